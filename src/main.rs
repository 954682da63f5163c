use anyhow::Context;
use clap::Parser;
use tripsmith::utils::error::ErrorSeverity;
use tripsmith::utils::{logger, validation::Validate};
use tripsmith::{AppConfig, CliConfig, GeminiGenerator, InMemoryFragmentStore, Planner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting tripsmith CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let app_config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => AppConfig::default(),
    };

    if let Err(e) = app_config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let store = if app_config.templates.fragments.is_empty() {
        InMemoryFragmentStore::seeded()
    } else {
        InMemoryFragmentStore::with_fragments(app_config.templates.fragments.clone())
    };
    let generator = GeminiGenerator::new(app_config.generator.clone());
    let planner = Planner::new(store, generator);

    let request = cli.trip_request();
    match planner.plan(&request).await {
        Ok(itinerary) => {
            tracing::info!("✅ Itinerary generated with {} days", itinerary.days.len());
            println!("{}", serde_json::to_string_pretty(&itinerary)?);
        }
        Err(e) => {
            tracing::error!(
                "❌ Itinerary generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
