//! Post ids and edit codes.
//!
//! Post ids are short random base-36 tokens. They are not checked against the
//! store for collisions; at 13 characters the space is about 2^67.
//!
//! Edit codes are drawn from `100000..=999999`, so a generated code never has a
//! leading zero even though validation accepts any six digits.

use rand::Rng;

pub const POST_ID_LEN: usize = 13;
const POST_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn generate_post_id() -> String {
    let mut rng = rand::thread_rng();
    (0..POST_ID_LEN)
        .map(|_| POST_ID_ALPHABET[rng.gen_range(0..POST_ID_ALPHABET.len())] as char)
        .collect()
}

pub fn generate_edit_id() -> String {
    rand::thread_rng().gen_range(100_000..=999_999u32).to_string()
}
