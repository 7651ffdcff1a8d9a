//! CLI entry point for columnist

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "columnist")]
#[command(version)]
#[command(about = "A channel/column blog content engine", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Tags for the new post
        #[arg(short, long)]
        tag: Vec<String>,
    },

    /// List site content
    List {
        /// Type of content to list (post, tag, channel, column)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Validate the channel configuration and post classification
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "columnist=debug,info"
    } else {
        "columnist=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let app = columnist::Columnist::new(&base_dir)?;

    match cli.command {
        Commands::New { title, tag } => {
            tracing::info!("Creating new post with title: {}", title);
            columnist::commands::new::run(&app, &title, &tag)?;
        }

        Commands::List { r#type } => {
            columnist::commands::list::run(&app, &r#type)?;
        }

        Commands::Check => {
            columnist::commands::check::run(&app)?;
        }
    }

    Ok(())
}
