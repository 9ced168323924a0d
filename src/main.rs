//! DeckGen client - terminal client for AI presentation generation
//!
//! This is the main entry point for the deckgen binary. The client signs
//! in to the DeckGen service, submits source documents for asynchronous
//! transformation into presentation decks, polls generation progress,
//! and downloads the results.

mod api;
mod app;
mod cli;
mod config;
mod error;
mod job;
mod logging;
mod persona;
mod router;
mod session;
mod version;

use clap::Parser;
use tracing::debug;

use crate::app::{App, GenerateOptions};
use crate::cli::{Cli, Commands, ConfigSubcommand, PersonaSubcommand};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::persona::{DirectoryView, PageSize};

fn main() {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    // Commands that need neither configuration nor a session
    match &cli.command {
        Commands::Version => {
            version::print_version();
            return;
        }
        Commands::Config { subcommand } => {
            let _ = logging::init_simple(tracing::Level::WARN);
            exit_on_error(handle_config_command(subcommand.clone(), cli.config.as_deref()));
            return;
        }
        Commands::Persona {
            subcommand: PersonaSubcommand::List { query, page, page_size },
        } => {
            let _ = logging::init_simple(tracing::Level::WARN);
            exit_on_error(handle_persona_list(query.clone(), *page, page_size));
            return;
        }
        _ => {}
    }

    // Load config (or use defaults)
    let config = match ClientConfig::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprint!("{}", e.format_for_terminal());
            std::process::exit(e.exit_code());
        }
    };

    // Initialize logging with config settings
    // The guards must be kept alive for the lifetime of the program
    let _log_guards = match logging::init_logging(&config.logging, cli.verbose, cli.quiet) {
        Ok(guards) => guards,
        Err(e) => {
            eprint!("{}", e.format_for_terminal());
            std::process::exit(e.exit_code());
        }
    };

    let build = version::build_info();
    debug!(
        version = %build.full_version(),
        service = %config.service.base_url,
        "Starting DeckGen client"
    );

    // All remaining commands are network-bound; run them on a
    // current-thread runtime
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            let err = Error::Internal(format!("Failed to create async runtime: {}", e));
            eprint!("{}", err.format_for_terminal());
            std::process::exit(err.exit_code());
        }
    };

    exit_on_error(runtime.block_on(run_command(cli.command, config)));
}

/// Print a formatted error and exit with its mapped code
fn exit_on_error(result: Result<()>) {
    if let Err(e) = result {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

/// Dispatch a network-bound command to the application shell
async fn run_command(command: Commands, config: ClientConfig) -> Result<()> {
    let mut app = App::new(config)?;

    match command {
        Commands::Login { email, password } => app.login(email, password).await,

        Commands::Register { first_name, last_name, company, email, password } => {
            app.register(&first_name, &last_name, &company, &email, password).await
        }

        Commands::Logout => {
            app.logout();
            Ok(())
        }

        Commands::Whoami => app.whoami().await,

        Commands::Persona { subcommand } => match subcommand {
            PersonaSubcommand::Show => app.persona_show().await,
            PersonaSubcommand::Set { persona } => app.persona_set(&persona).await,
            PersonaSubcommand::List { .. } => unreachable!("handled before runtime setup"),
        },

        Commands::Generate { file, org, purpose, audience, message, vibe, output, change_persona } => {
            app.generate(GenerateOptions {
                file,
                org,
                purpose,
                audience,
                message,
                vibe,
                output,
                change_persona,
            })
            .await
        }

        Commands::Status { job_id } => app.status(&job_id).await,

        Commands::Download { job_id, output } => app.download(&job_id, output).await,

        Commands::Config { .. } | Commands::Version => {
            unreachable!("handled before runtime setup")
        }
    }
}

/// Handle configuration subcommands
fn handle_config_command(subcommand: ConfigSubcommand, config_path: Option<&str>) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show => {
            let cfg = ClientConfig::load(config_path)?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            config::init_config(path.as_deref(), force)?;
        }
        ConfigSubcommand::Validate => {
            ClientConfig::load(config_path)?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}

/// Handle `persona list` against the compiled-in catalog
fn handle_persona_list(query: Option<String>, page: usize, page_size: &str) -> Result<()> {
    let page_size: PageSize = page_size.parse().map_err(Error::Config)?;

    let mut view = DirectoryView::new();
    if let Some(query) = query {
        view.set_query(&query);
    }
    // Size before page: both reset the cursor to the first page
    view.set_page_size(page_size);
    view.set_page(page);

    let visible = view.visible();
    if visible.is_empty() {
        println!("No personas match '{}'.", view.query());
        return Ok(());
    }

    for entry in visible {
        println!("{:<20} {:<28} {}", entry.id, entry.title, entry.description);
    }

    if view.pagination_visible() {
        println!();
        println!("Page {} of {}", view.page(), view.total_pages());
    }

    Ok(())
}
