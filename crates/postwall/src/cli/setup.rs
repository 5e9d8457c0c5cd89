use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "postwall",
    bin_name = "postwall",
    version,
    disable_help_subcommand = true
)]
#[command(about = "A small posting wall: serve it over HTTP or post from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Directory holding the posts (overrides config and POSTWALL_DATA)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server
    #[command(display_order = 1)]
    Serve {
        /// Address to listen on, e.g. 0.0.0.0:4000
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,

        /// Keep posts in memory only (lost on exit)
        #[arg(long)]
        memory: bool,
    },

    /// List posts, newest first
    #[command(alias = "ls", display_order = 2)]
    List {
        /// Print the posts as JSON
        #[arg(long)]
        json: bool,
    },

    /// View a single post
    #[command(alias = "v", display_order = 3)]
    View {
        /// Id of the post
        id: String,
    },

    /// Publish a new post
    #[command(alias = "p", display_order = 4)]
    Post {
        /// Display name (letters, numbers, spaces, hyphens, underscores)
        #[arg(long)]
        alias: String,

        /// An emoji or an image URL
        #[arg(long)]
        avatar: String,

        /// Choose the 6-digit edit code instead of getting a random one
        #[arg(long, value_name = "CODE")]
        edit_code: Option<String>,

        /// Post text (words are joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        content: Vec<String>,
    },

    /// Edit a post using its edit code
    #[command(alias = "e", display_order = 5)]
    Edit {
        /// Id of the post
        id: String,

        /// The edit code printed when the post was created
        #[arg(long, value_name = "CODE")]
        code: String,

        /// New alias
        #[arg(long)]
        alias: Option<String>,

        /// New avatar
        #[arg(long)]
        avatar: Option<String>,

        /// New text
        #[arg(long)]
        content: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn naked_invocation_has_no_command() {
        let cli = parse(&["postwall"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn post_joins_content_words() {
        let cli = parse(&[
            "postwall", "post", "--alias", "Bob", "--avatar", "🏂", "fresh", "powder",
        ]);
        match cli.command {
            Some(Commands::Post {
                alias,
                avatar,
                edit_code,
                content,
            }) => {
                assert_eq!(alias, "Bob");
                assert_eq!(avatar, "🏂");
                assert_eq!(edit_code, None);
                assert_eq!(content.join(" "), "fresh powder");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn post_requires_content() {
        assert!(Cli::try_parse_from(["postwall", "post", "--alias", "Bob", "--avatar", "🏂"]).is_err());
    }

    #[test]
    fn edit_requires_code() {
        assert!(Cli::try_parse_from(["postwall", "edit", "abc", "--content", "x"]).is_err());

        let cli = parse(&["postwall", "edit", "abc", "--code", "123456", "--content", "x"]);
        assert_eq!(
            cli.command,
            Some(Commands::Edit {
                id: "abc".into(),
                code: "123456".into(),
                alias: None,
                avatar: None,
                content: Some("x".into()),
            })
        );
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = parse(&["postwall", "list", "--json", "-v", "--data-dir", "/tmp/wall"]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/wall")));
        assert_eq!(cli.command, Some(Commands::List { json: true }));
    }

    #[test]
    fn serve_flags() {
        let cli = parse(&["postwall", "serve", "--bind", "0.0.0.0:9000", "--memory"]);
        assert_eq!(
            cli.command,
            Some(Commands::Serve {
                bind: Some("0.0.0.0:9000".into()),
                memory: true,
            })
        );
    }
}
