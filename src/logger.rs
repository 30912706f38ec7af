//! `log4rs` setup: rolling `app.log`, plus an optional `dev6.log` for the developer channel.
//!
//! The first successful call installs the logger; later calls swap its configuration.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::LevelFilter;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::config::LoggingConfig;

/// Target used by the `dev6!` macro.
pub const DEV6_TARGET: &str = "querylite::dev6";

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const ROLL_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_RETENTION: u32 = 7;

static HANDLE: OnceLock<log4rs::Handle> = OnceLock::new();

/// Load a log4rs YAML file (for example `log4rs.yaml`). The logger installed this way cannot
/// be swapped by the `configure_*` functions later.
pub fn init_file(path: &Path) -> Result<(), Box<dyn Error>> {
    log4rs::init_file(path, log4rs::config::Deserializers::default())?;
    Ok(())
}

#[must_use]
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Rolling file logging under `dir` (current directory when `None`).
pub fn configure_logging(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<usize>,
) -> Result<(), Box<dyn Error>> {
    configure_logging_with_dev(dir, level, retention, false)
}

/// As [`configure_logging`]; with `enable_dev6` the developer channel also goes to `dev6.log`.
pub fn configure_logging_with_dev(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<usize>,
    enable_dev6: bool,
) -> Result<(), Box<dyn Error>> {
    let base = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    std::fs::create_dir_all(&base)?;
    let keep = retention.map_or(DEFAULT_RETENTION, |r| u32::try_from(r).unwrap_or(u32::MAX));
    let lvl = level.map_or(LevelFilter::Info, parse_level);

    let mut builder =
        Config::builder().appender(Appender::builder().build("app", Box::new(rolling(&base, "app", keep)?)));
    builder = if enable_dev6 {
        builder
            .appender(Appender::builder().build("dev6", Box::new(rolling(&base, "dev6", keep)?)))
            .logger(Logger::builder().appender("dev6").additive(false).build(DEV6_TARGET, LevelFilter::Trace))
    } else {
        builder.logger(Logger::builder().additive(false).build(DEV6_TARGET, LevelFilter::Off))
    };
    let config = builder.build(Root::builder().appender("app").build(lvl))?;
    install(config)
}

/// Apply the `[logging]` table of an [`EngineConfig`](crate::config::EngineConfig).
pub fn configure_from_config(cfg: &LoggingConfig) -> Result<(), Box<dyn Error>> {
    configure_logging_with_dev(cfg.dir.as_deref(), cfg.level.as_deref(), cfg.retention, cfg.dev6)
}

/// Configure from `QUERYLITE_LOG_DIR`, `QUERYLITE_LOG_LEVEL`, `QUERYLITE_LOG_RETENTION`
/// and `QUERYLITE_DEV6`.
pub fn configure_from_env() -> Result<(), Box<dyn Error>> {
    let mut cfg = LoggingConfig::default();
    cfg.apply_env();
    configure_from_config(&cfg)
}

fn rolling(base: &Path, name: &str, keep: u32) -> Result<RollingFileAppender, Box<dyn Error>> {
    let pattern = base.join(format!("{name}.{{}}.log"));
    let roller = FixedWindowRoller::builder().build(&pattern.display().to_string(), keep)?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_BYTES)), Box::new(roller));
    Ok(RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(base.join(format!("{name}.log")), Box::new(policy))?)
}

fn install(config: Config) -> Result<(), Box<dyn Error>> {
    if let Some(handle) = HANDLE.get() {
        handle.set_config(config);
        return Ok(());
    }
    let handle = log4rs::init_config(config)?;
    let _ = HANDLE.set(handle);
    Ok(())
}
