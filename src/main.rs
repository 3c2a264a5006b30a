use clap::Parser;
use hr_master::app::terminal::TerminalSession;
use hr_master::config::Command;
use hr_master::core::import::{load_batch, render_toml_entry, stage_batch};
use hr_master::core::ConfigProvider;
use hr_master::utils::error::{EntryError, ErrorSeverity};
use hr_master::utils::{logger, validation::Validate};
use hr_master::{sample_form, CliConfig, Exporter, LocalStorage, Schema, StagingSession};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(cli.verbose, config.logging.level.as_deref(), config.logging.json);
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let schema = Schema::employee_master();

    match cli.command() {
        Command::Schema => {
            print_schema(&schema);
            Ok(())
        }
        Command::Sample => {
            print!("{}", render_toml_entry(&schema, &sample_form()));
            Ok(())
        }
        Command::Entry => {
            let exporter = Exporter::new(
                LocalStorage::new(config.output_path().to_string()),
                config,
            );
            let stdin = std::io::stdin();
            let mut terminal = TerminalSession::new(
                stdin.lock(),
                std::io::stdout(),
                StagingSession::new(schema),
                exporter,
            );
            terminal
                .run()
                .map_err(|e| anyhow::anyhow!("entry session failed: {}", e))?;
            Ok(())
        }
        Command::Import { input } => {
            let storage = LocalStorage::new(config.output_path().to_string());
            let exporter = Exporter::new(storage, config);
            if let Err(e) = run_import(&input, schema, &exporter) {
                tracing::error!(
                    "❌ Import failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
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
            Ok(())
        }
    }
}

fn run_import<S, C>(
    input: &Path,
    schema: Schema,
    exporter: &Exporter<S, C>,
) -> Result<(), EntryError>
where
    S: hr_master::core::Storage,
    C: ConfigProvider,
{
    tracing::info!("📁 Importing employees from {}", input.display());
    let entries = load_batch(input)?;

    let mut session = StagingSession::new(schema);
    stage_batch(&mut session, &entries);

    for path in exporter.export(&session)? {
        println!("✅ Saved {}", path);
    }
    Ok(())
}

fn print_schema(schema: &Schema) {
    for (idx, field) in schema.fields().iter().enumerate() {
        println!("{:>2}. {} ({})", idx + 1, field.name, field.kind.tag());
        if let Some(description) = &field.description {
            println!("    {}", description);
        }
        if let Some(options) = field.kind.allowed_values() {
            println!("    options: {}", options.join(", "));
        }
    }
}
