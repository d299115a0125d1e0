//! Media File Tools CLI
//!
//! A command-line tool for cataloging movie collections and renaming TV
//! episodes using TMDB.

use clap::Parser;
use mediafiletools::cli::{
    args::{Cli, Commands},
    commands::{catalog, episodes, rename, rollback},
};
use mediafiletools::preflight;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Only commands that fetch from TMDB need the preflight
    if cli.command.needs_tmdb() && !cli.skip_preflight {
        run_preflight_checks().await?;
    }

    let result = match cli.command {
        Commands::Catalog {
            path,
            sort,
            strip,
            output_type,
            output,
        } => catalog::catalog(
            &path,
            &sort,
            strip,
            output_type.as_deref(),
            output.as_deref(),
        ),

        Commands::Episodes {
            show,
            start,
            end,
            output_type,
            output,
        } => {
            episodes::episodes(
                &show,
                start,
                end,
                output_type.as_deref(),
                output.as_deref(),
            )
            .await
        }

        Commands::Rename {
            path,
            source,
            info,
            strict,
            dry_run,
            rollback_output,
        } => {
            let args = rename::RenameArgs {
                info,
                strict,
                dry_run,
                rollback_output,
            };
            rename::rename(&path, &source, &args).await
        }

        Commands::Rollback {
            rollback_file,
            dry_run,
        } => rollback::rollback(&rollback_file, dry_run),
    };

    if let Err(e) = &result {
        if e.is_usage_error() {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    }

    result?;
    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("mediafiletools=debug")
    } else {
        EnvFilter::new("mediafiletools=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
async fn run_preflight_checks() -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks().await?;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
