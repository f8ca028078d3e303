//! Server logging. Everything goes to stderr; stdout is the JSON-RPC channel.

use std::sync::Once;

use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` directives, e.g. `"jellyfish_editor=debug,tower_lsp=warn"`.
    pub env_filter: Option<String>,
    pub write_style: WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        // Editor log panes show escape codes verbatim.
        Self { env_filter: None, write_style: WriteStyle::Never }
    }
}

/// Where the active directives came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Filter {
    Directives(String),
    Level(LevelFilter),
}

/// Explicit config wins over `RUST_LOG`; with neither, only warnings.
fn pick_filter(configured: Option<String>, rust_log: Option<String>) -> Filter {
    match configured.or(rust_log).filter(|s| !s.trim().is_empty()) {
        Some(directives) => Filter::Directives(directives),
        None => Filter::Level(LevelFilter::Warn),
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has an effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = Builder::new();
        match pick_filter(config.env_filter, std::env::var("RUST_LOG").ok()) {
            Filter::Directives(d) => builder.parse_filters(&d),
            Filter::Level(level) => builder.filter_level(level),
        };
        builder.write_style(config.write_style).target(Target::Stderr).init();
        log::debug!("stderr logger ready");
    });
}
