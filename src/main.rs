use clap::Parser;
use lang_creator::domain::ports::Prompter;
use lang_creator::utils::error::ErrorSeverity;
use lang_creator::utils::{logger, validation::Validate};
use lang_creator::{CliConfig, ConsolePrompter, GameEngine, JsonExporter, LangError, ScriptedPrompter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting lang-creator CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let outcome = match &config.answers {
        Some(path) => ScriptedPrompter::from_file(path).and_then(|p| play(&config, p)),
        None => play(&config, ConsolePrompter::new()),
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Language creator failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        // 依嚴重程度決定退出碼
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

    Ok(())
}

fn play<P: Prompter>(config: &CliConfig, prompter: P) -> Result<(), LangError> {
    let (language, settings) = config.load()?;
    let mut engine = GameEngine::new(language, settings, prompter, std::io::stdout());
    engine.run()?;

    if let Some(path) = &config.export {
        let written = JsonExporter::new(path).export(engine.language())?;
        println!("📁 Language saved to: {}", written.display());
    }

    Ok(())
}
