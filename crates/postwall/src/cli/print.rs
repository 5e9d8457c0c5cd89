use chrono::{DateTime, Utc};
use colored::Colorize;
use postwallapp::api::{CmdMessage, MessageLevel};
use postwallapp::model::Post;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const ALIAS_WIDTH: usize = 16;
const IMAGE_MARKER: &str = "[img]";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_posts(posts: &[Post]) {
    if posts.is_empty() {
        println!("No posts yet.");
        return;
    }

    let now = Utc::now();
    for post in posts {
        let line = format_post_line(post, now);
        let (left, time) = line.split_at(line.len() - TIME_WIDTH);
        println!("{}{}", left, time.dimmed());
    }
}

pub(super) fn print_full_post(post: &Post) {
    println!(
        "{} {} {}",
        avatar_display(&post.avatar),
        post.alias.bold(),
        format_time_ago(post.timestamp, Utc::now()).trim().dimmed()
    );
    println!("{}", format!("id: {}", post.id).dimmed());
    println!("--------------------------------");
    println!("{}", post.content);
}

/// One feed row: `id  avatar alias  content...   time ago`, padded so the
/// relative time is right-aligned at `LINE_WIDTH`.
fn format_post_line(post: &Post, now: DateTime<Utc>) -> String {
    let avatar = avatar_display(&post.avatar);
    let alias = truncate_to_width(&post.alias, ALIAS_WIDTH);
    let alias_pad = ALIAS_WIDTH.saturating_sub(alias.width());
    let left = format!("{}  {} {}{}  ", post.id, avatar, alias, " ".repeat(alias_pad));

    let available = LINE_WIDTH.saturating_sub(left.width() + TIME_WIDTH);
    let preview: String = post
        .content
        .chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    let preview = truncate_to_width(&preview, available);
    let padding = available.saturating_sub(preview.width());

    format!(
        "{}{}{}{}",
        left,
        preview,
        " ".repeat(padding),
        format_time_ago(post.timestamp, now)
    )
}

fn avatar_display(avatar: &str) -> &str {
    if avatar.starts_with("http://") || avatar.starts_with("https://") {
        IMAGE_MARKER
    } else {
        avatar
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp_ms: i64, now: DateTime<Utc>) -> String {
    let time_str = match DateTime::<Utc>::from_timestamp_millis(timestamp_ms) {
        Some(then) => {
            let duration = now.signed_duration_since(then);
            Formatter::new().convert(duration.to_std().unwrap_or_default())
        }
        None => "unknown".to_string(),
    };
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
