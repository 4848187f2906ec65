//! Configuration for the codetalk REPL.
//!
//! CLI argument parsing via `arrrg`, resolved into a [`ReplConfig`] with
//! defaults. The backend base address lives here — it is configuration, not
//! core logic.

use std::time::Duration;

use arrrg_derive::CommandLine;

/// Command-line arguments for the codetalk REPL.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ReplArgs {
    /// Backend base URL.
    #[arrrg(optional, "Backend base URL (default: http://127.0.0.1:8004)", "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECONDS")]
    pub timeout: Option<u32>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Resolved configuration for the REPL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplConfig {
    /// Backend base URL, `None` for the client default.
    pub base_url: Option<String>,

    /// Request timeout, `None` for the client default.
    pub timeout: Option<Duration>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl From<ReplArgs> for ReplConfig {
    fn from(args: ReplArgs) -> Self {
        ReplConfig {
            base_url: args.base_url,
            timeout: args.timeout.map(|t| Duration::from_secs(u64::from(t))),
            use_color: !args.no_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_args_defaults() {
        let config = ReplConfig::from(ReplArgs::default());
        assert!(config.base_url.is_none());
        assert!(config.timeout.is_none());
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ReplArgs {
            base_url: Some("http://backend:9000".to_string()),
            timeout: Some(15),
            no_color: true,
        };
        let config = ReplConfig::from(args);
        assert_eq!(config.base_url.as_deref(), Some("http://backend:9000"));
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert!(!config.use_color);
    }
}
