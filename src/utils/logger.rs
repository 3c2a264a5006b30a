use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool, level: Option<&str>) -> String {
    if verbose {
        return "hr_master=debug,info".to_string();
    }
    match level {
        Some(level) if !level.trim().is_empty() => format!("hr_master={}", level.trim()),
        _ => "hr_master=info".to_string(),
    }
}

pub fn init_cli_logger(verbose: bool, level: Option<&str>, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, level)));

    let registry = tracing_subscriber::registry().with(filter);

    // stderr keeps the interactive prompts on stdout readable
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .json(),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init();
    }
}
