mod cache_store;
mod cli;
mod color;
mod commands;
mod config;
mod history;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use output::output_error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    color::init(cli.color);

    if let Err(e) = run(&cli) {
        output_error(&e, cli.format);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<()> {
    // Local-only commands need no configuration or API client
    match &cli.command {
        Commands::Completions { shell } => {
            Cli::generate_completions(*shell);
            return Ok(());
        }
        Commands::History { action } => {
            return commands::history::handle_history(action.as_ref(), cli.format);
        }
        Commands::Logout => {
            return commands::login::handle_logout(cli.format);
        }
        _ => {}
    }

    let mut config = Config::load(cli.config.clone())?;
    config.merge_with_cli(cli.token.clone());

    match &cli.command {
        Commands::Profile {
            username,
            sort,
            filter,
            limit,
            no_cache,
            export,
        } => commands::profile::handle_profile(
            &config,
            cli.cache_dir.as_deref(),
            cli.format,
            username,
            (*sort).into(),
            filter.as_deref(),
            *limit,
            *no_cache,
            export.as_deref(),
        ),
        Commands::Compare { user1, user2 } => {
            commands::compare::handle_compare(&config, cli.format, user1, user2)
        }
        Commands::Team { members } => commands::team::handle_team(&config, cli.format, members),
        Commands::ReleaseNotes {
            owner,
            repo,
            version,
            limit,
            output,
            copy,
        } => commands::release::handle_release_notes(
            &config,
            cli.format,
            owner,
            repo,
            version,
            *limit,
            output.as_deref(),
            *copy,
        ),
        Commands::Limits => commands::limits::handle_limits(&config, cli.format),
        Commands::Login { client_id } => {
            commands::login::handle_login(&config, client_id.as_deref(), cli.format)
        }
        Commands::History { .. } | Commands::Logout | Commands::Completions { .. } => {
            unreachable!("handled before config load")
        }
    }
}
