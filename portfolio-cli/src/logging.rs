use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Логи идут в stderr, stdout занят выводом записей.
///
/// `level` уже разрешён настройками (`LOG_LEVEL`, затем `RUST_LOG`);
/// некорректная директива заменяется на `warn`.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = build_filter(level);

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_uses_resolved_level() {
        assert_eq!(build_filter("debug").to_string(), "debug");
    }

    #[test]
    fn invalid_level_falls_back_to_warn() {
        assert_eq!(build_filter("portfolio=loud").to_string(), "warn");
    }
}
