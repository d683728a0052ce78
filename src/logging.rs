//! Logger setup
//!
//! Library code only uses the `log` macros; binaries call `init` once.

use log::LevelFilter;

/// Environment variable that overrides the configured level
pub const LOG_ENV: &str = "MOGE_LOG";

/// Level from `MOGE_LOG` if set and valid, else `fallback`
pub fn resolve_level(env_value: Option<&str>, fallback: LevelFilter) -> LevelFilter {
    env_value
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(fallback)
}

/// Install a stderr logger printing `[LEVEL target] message`
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let env_value = std::env::var(LOG_ENV).ok();
    let level = resolve_level(env_value.as_deref(), level);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // Keep macroquad's internals quiet unless asked
        .level_for("miniquad", LevelFilter::Warn)
        .chain(std::io::stderr())
        .apply()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_level() {
        assert_eq!(resolve_level(None, LevelFilter::Info), LevelFilter::Info);
        assert_eq!(resolve_level(Some("trace"), LevelFilter::Info), LevelFilter::Trace);
        assert_eq!(resolve_level(Some(" warn "), LevelFilter::Info), LevelFilter::Warn);
        assert_eq!(resolve_level(Some("nope"), LevelFilter::Error), LevelFilter::Error);
    }
}
