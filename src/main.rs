//! StudyScout - learning resource search and AI tutor CLI
//!
#![doc = "StudyScout - learning resource search and AI tutor CLI"]
#![doc = "Main entry point for the StudyScout application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use studyscout::cli::{Cli, Commands};
use studyscout::commands;
use studyscout::config::Config;
use studyscout::gateway::Gateway;
use studyscout::resource::ResourceFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    let gateway = Gateway::from_config(&config);

    // Execute command
    match cli.command {
        Commands::Search {
            topic,
            resource_type,
            difficulty,
            json,
        } => {
            let filter = ResourceFilter::new(resource_type, difficulty);
            commands::search::run_search(&gateway, &topic, filter, json).await?;
            Ok(())
        }
        Commands::Chat { topic } => {
            commands::chat::run_chat(gateway, &topic).await?;
            Ok(())
        }
        Commands::Summarize { title, context } => {
            tracing::info!("Summarizing '{}'", title);
            commands::summarize::run_summarize(&gateway, &title, &context).await?;
            Ok(())
        }
        Commands::Concepts { json } => {
            commands::concepts::run_concepts(json)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "studyscout=debug"
    } else {
        "studyscout=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
