use anyhow::{Context, Result};
use std::path::Path;
use transformer_cli::cli::{usage_error, Flags};
use transformer_cli::RunConfig;

fn main() -> Result<()> {
    // 1. Setup File Logging
    let file_appender = tracing_appender::rolling::daily("logs", "transformer.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // 2. Setup Console Logging
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // 3. Combine Subscribers
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    // 4. Setup Panic Hook
    std::panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info.payload();
        let msg = if let Some(s) = payload.downcast_ref::<&str>() {
            *s
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.as_str()
        } else {
            "Unknown panic"
        };

        let location = panic_info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        tracing::error!(target: "panic", "🔥 CRASH detected at {}: {}", location, msg);
        eprintln!("🔥 CRASH detected at {}: {}", location, msg);
    }));

    // 5. Parse + validate flags (exits with a usage error on failure)
    let flags = Flags::parse_validated();

    let config = match RunConfig::from_flags(&flags) {
        Ok(config) => config,
        Err(e) => usage_error(e).exit(),
    };
    config.log_summary();

    if config.model_dir_is_remote() {
        tracing::info!("Model dir is on Cloud Storage; not writing run configuration locally.");
    } else {
        let model_dir = Path::new(&config.model_dir);
        if flags.base.clean && model_dir.exists() {
            tracing::warn!("🧹 Removing existing model dir {}", model_dir.display());
            std::fs::remove_dir_all(model_dir)
                .with_context(|| format!("Failed to remove {}", model_dir.display()))?;
        }
        config.save_json(model_dir)?;
    }

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
