use clap::Parser;
use std::process::ExitCode;

use herodex::HerodexError;
use herodex::cli::{Cli, Commands, ConfigAction};
use herodex::commands::{
    cmd_browse, cmd_config_show, cmd_favorite_toggle, cmd_favorites, cmd_interactive, cmd_search,
    cmd_show,
};
use herodex::config::Config;
use herodex::logging::{Verbosity, init_subscriber};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_subscriber(Verbosity::from_flags(cli.verbose, cli.quiet));

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return exit_code_for(&e);
        }
    };

    let json = cli.json;
    let result = match cli.command {
        Commands::Browse { page } => cmd_browse(&config, page, json).await,
        Commands::Search { text } => cmd_search(&config, &text.join(" "), json).await,
        Commands::Favorites => cmd_favorites(&config, json).await,
        Commands::Favorite { id } => cmd_favorite_toggle(&config, id, json).await,
        Commands::Show { id } => cmd_show(&config, id, json).await,
        Commands::Interactive => cmd_interactive(&config).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd_config_show(&config, json),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for(&e)
        }
    }
}

/// Configuration problems and bad arguments are distinguished from
/// runtime failures so scripts can tell them apart.
fn exit_code_for(error: &HerodexError) -> ExitCode {
    match error {
        HerodexError::Config(_) | HerodexError::Auth(_) | HerodexError::YamlParse(_) => {
            ExitCode::from(2)
        }
        _ => ExitCode::FAILURE,
    }
}
