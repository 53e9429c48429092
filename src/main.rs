use clap::Parser;
use referee_check::core::ConfigProvider;
use referee_check::utils::error::ErrorSeverity;
use referee_check::utils::{logger, validation::Validate};
use referee_check::{
    CheckEngine, CheckError, CliConfig, LocalStorage, RefereeCheckPipeline, TomlConfig,
};

async fn run<C: ConfigProvider + Validate + 'static>(config: C) -> Result<(), CheckError> {
    config.validate()?;

    let storage = LocalStorage::new(".");
    let pipeline = RefereeCheckPipeline::from_config(storage, config)?;
    let engine = CheckEngine::new(pipeline);

    let paths = engine.run().await?;
    println!("✅ Referee check completed");
    println!("📁 Qualification table: {}", paths.qualified);
    println!("📁 Problem report: {}", paths.report);
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = CliConfig::parse();

    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting referee-check");
    tracing::debug!("CLI config: {:?}", args);

    let result = match args.config.clone() {
        Some(path) => match TomlConfig::from_file(&path) {
            Ok(config) => {
                tracing::info!("Using settings from {}", path);
                run(config).await
            }
            Err(e) => Err(e),
        },
        None => run(args).await,
    };

    if let Err(e) = result {
        tracing::error!("❌ Referee check failed: {} (Severity: {:?})", e, e.severity());
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
