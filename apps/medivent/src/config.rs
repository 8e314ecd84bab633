use std::io::Write;

use log::{warn, LevelFilter};
use medi_vent::VentilationMode;

/// Environment variable selecting the page a session opens on.
pub const MODE_ENV: &str = "MEDIVENT_MODE";
/// Environment variable selecting `text` or `json` output.
pub const OUTPUT_ENV: &str = "MEDIVENT_OUTPUT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub output: OutputMode,
    pub mode: VentilationMode,
}

impl Config {
    /// Defaults overridden by `MEDIVENT_MODE` and `MEDIVENT_OUTPUT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Unparseable values are reported and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Config::default();
        if let Some(s) = lookup(MODE_ENV) {
            match s.parse::<VentilationMode>() {
                Ok(mode) => cfg.mode = mode,
                Err(e) => warn!("ignoring {MODE_ENV}: {e}"),
            }
        }
        if let Some(s) = lookup(OUTPUT_ENV) {
            match s.trim().to_ascii_lowercase().as_str() {
                "text" => cfg.output = OutputMode::Text,
                "json" => cfg.output = OutputMode::Json,
                other => warn!("ignoring {OUTPUT_ENV}: unknown output '{other}'"),
            }
        }
        cfg
    }
}

/// Map `-v` occurrences to a log level; `RUST_LOG` still wins when set.
pub fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(verbose))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    let _ = builder.try_init();
}
