use clap::{Parser, Subcommand};

use crate::catalog::CharacterId;

#[derive(Parser)]
#[command(name = "herodex")]
#[command(about = "Browse, search and favorite characters from the Marvel catalog")]
#[command(version)]
pub struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show one page of the catalog
    #[command(visible_alias = "ls")]
    Browse {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Search characters whose name starts with TEXT
    #[command(visible_alias = "s")]
    Search {
        /// Name prefix
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List favorite characters
    Favorites,

    /// Toggle a character in the favorites list
    #[command(visible_alias = "fav")]
    Favorite {
        /// Character ID
        id: CharacterId,
    },

    /// Show a character in detail
    Show {
        /// Character ID
        id: CharacterId,
    },

    /// Interactive session with debounced search
    #[command(visible_alias = "i")]
    Interactive,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_joins_words() {
        let cli = Cli::parse_from(["herodex", "search", "Iron", "Man", "--json"]);
        assert!(cli.json);
        match cli.command {
            Commands::Search { text } => assert_eq!(text.join(" "), "Iron Man"),
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_parse_favorite_id() {
        let cli = Cli::parse_from(["herodex", "favorite", "1009351"]);
        match cli.command {
            Commands::Favorite { id } => assert_eq!(id, CharacterId(1009351)),
            _ => panic!("expected favorite"),
        }
    }

    #[test]
    fn test_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["herodex", "show", "hulk"]).is_err());
    }
}
