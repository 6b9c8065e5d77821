use clap::Parser;
use payroll_report::utils::{logger, validation::Validate};
use payroll_report::{CliConfig, LocalStorage, ReportEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    // Input files must exist before any parsing starts.
    if let Err(e) = config.validate() {
        tracing::error!("Input validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let settings = match config.resolve_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings: {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };
    if let Err(e) = settings.validate() {
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let engine = ReportEngine::new(LocalStorage::default(), settings);

    match engine.run(&config.files, config.report) {
        Ok(rendered) => {
            println!("{}", rendered.trim_end());
        }
        Err(e) => {
            tracing::error!("Report '{}' failed: {}", config.report, e);
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
