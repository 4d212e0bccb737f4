//! Logging for the fieldcheck validation engine
//!
//! The engine is silent by default. Rule evaluation and field failures are
//! reported at `trace`/`debug` level and only reach stderr when enabled
//! through the environment or at runtime.
//!
//! # Usage
//!
//! ```rust
//! use fieldcheck_log::{debug, info, trace, warn};
//!
//! trace!("evaluating rule {}", "min");
//! debug!(target: "fieldcheck::walker", "field {} failed", "Username");
//! info!("registry ready with {} rules", 6);
//! warn!("unknown rule token");
//! ```
//!
//! # Environment Variables
//!
//! - `FIELDCHECK_DEBUG=1` - Enable debug logging
//! - `FIELDCHECK_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `FIELDCHECK_LOG_FORMAT=json|compact` - Set output format
//! - `FIELDCHECK_LOG_TIMESTAMPS=1|0` - Include timestamps

use once_cell::sync::Lazy;
use std::env;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

// ============================================================================
// Log Levels
// ============================================================================

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    /// Per-rule evaluation detail
    Trace = 0,
    /// Field failures and pass summaries
    Debug = 1,
    /// Informational
    Info = 2,
    /// Schema problems
    Warn = 3,
    /// Errors
    Error = 4,
    /// No logging
    Off = 5,
}

impl Level {
    /// Parse a level name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            _ => Level::Off,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One JSON object per line
    Json,
    /// `HH:MM:SS L target: message`
    Compact,
}

impl Format {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "compact" => Some(Format::Compact),
            _ => None,
        }
    }
}

// ============================================================================
// Global Configuration
// ============================================================================

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

/// Logging configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Whether debug mode is enabled
    pub debug: bool,
    /// Minimum log level
    pub level: Level,
    /// Output format
    pub format: Format,
    /// Whether to include timestamps
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Json,
            timestamps: true,
        }
    }
}

fn env_flag(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl LogConfig {
    /// Build the configuration from `FIELDCHECK_*` variables and publish
    /// the level to the global switches.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let debug = env_flag("FIELDCHECK_DEBUG").unwrap_or(defaults.debug);

        let level = env::var("FIELDCHECK_LOG_LEVEL")
            .ok()
            .and_then(|s| Level::parse(&s))
            .unwrap_or(if debug { Level::Debug } else { defaults.level });

        let format = env::var("FIELDCHECK_LOG_FORMAT")
            .ok()
            .and_then(|s| Format::parse(&s))
            .unwrap_or(defaults.format);

        let timestamps = env_flag("FIELDCHECK_LOG_TIMESTAMPS").unwrap_or(defaults.timestamps);

        DEBUG_ENABLED.store(debug, Ordering::SeqCst);
        LOG_LEVEL.store(level as u8, Ordering::SeqCst);

        Self {
            debug,
            level,
            format,
            timestamps,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Read the environment eagerly. Otherwise this happens the first time a
/// level is checked or changed.
pub fn init() {
    Lazy::force(&CONFIG);
}

#[inline]
pub fn is_debug_enabled() -> bool {
    init();
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Check if a log level is enabled.
#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    init();
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn current_level() -> Level {
    init();
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Set log level at runtime.
pub fn set_level(level: Level) {
    // The environment must not overwrite this later.
    init();
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Enable or disable debug mode at runtime.
pub fn set_debug(enabled: bool) {
    init();
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        set_level(Level::Debug);
    }
}

pub fn config() -> &'static LogConfig {
    &CONFIG
}

// ============================================================================
// Log Output
// ============================================================================

#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    if !is_level_enabled(level) {
        return;
    }

    let config = config();
    let line = render(level, target, message, config);
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "{}", line);
}

fn render(level: Level, target: &str, message: &str, config: &LogConfig) -> String {
    match config.format {
        Format::Compact => render_compact(level, target, message, config.timestamps),
        Format::Json => render_json(level, target, message, config.timestamps),
    }
}

fn render_compact(level: Level, target: &str, message: &str, timestamps: bool) -> String {
    let mut line = String::new();
    if timestamps {
        line.push_str(&chrono::Local::now().format("%H:%M:%S%.3f ").to_string());
    }
    line.push(level.as_str().chars().next().unwrap_or('?'));
    line.push(' ');
    if !target.is_empty() {
        line.push_str(target);
        line.push_str(": ");
    }
    // Password messages span two lines; keep one record per line.
    line.push_str(&message.replace('\n', "\\n"));
    line
}

#[cfg(feature = "json")]
fn render_json(level: Level, target: &str, message: &str, timestamps: bool) -> String {
    use serde::Serialize;

    #[derive(Serialize)]
    struct LogEntry<'a> {
        #[serde(skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
        level: &'a str,
        target: &'a str,
        message: &'a str,
    }

    let entry = LogEntry {
        timestamp: timestamps.then(|| chrono::Utc::now().to_rfc3339()),
        level: level.as_str(),
        target,
        message,
    };

    serde_json::to_string(&entry).unwrap_or_else(|_| render_compact(level, target, message, timestamps))
}

#[cfg(not(feature = "json"))]
fn render_json(level: Level, target: &str, message: &str, timestamps: bool) -> String {
    let timestamp = if timestamps {
        format!(r#""timestamp":"{}","#, chrono::Utc::now().to_rfc3339())
    } else {
        String::new()
    };
    format!(
        r#"{{{}"level":"{}","target":"{}","message":"{}"}}"#,
        timestamp,
        level.as_str(),
        escape_json(target),
        escape_json(message)
    )
}

#[cfg(not(feature = "json"))]
fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => result.push_str(&format!("\\u{:04x}", c as u32)),
            c => result.push(c),
        }
    }
    result
}

// ============================================================================
// Macros
// ============================================================================

/// Log a trace message.
///
/// Only enabled when `FIELDCHECK_LOG_LEVEL=trace`.
#[macro_export]
macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Trace) {
            $crate::log($crate::Level::Trace, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Trace) {
            $crate::log($crate::Level::Trace, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log a debug message.
///
/// Enabled by `FIELDCHECK_DEBUG=1` or `FIELDCHECK_LOG_LEVEL=debug`.
///
/// ```rust
/// use fieldcheck_log::debug;
///
/// let field = "Age";
/// debug!(target: "fieldcheck::walker", "{} failed min", field);
/// ```
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_debug_enabled() || $crate::is_level_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_debug_enabled() || $crate::is_level_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, module_path!(), &format!($($arg)+));
        }
    };
}

#[macro_export]
macro_rules! info {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Info) {
            $crate::log($crate::Level::Info, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Info) {
            $crate::log($crate::Level::Info, module_path!(), &format!($($arg)+));
        }
    };
}

#[macro_export]
macro_rules! warn {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Warn) {
            $crate::log($crate::Level::Warn, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Warn) {
            $crate::log($crate::Level::Warn, module_path!(), &format!($($arg)+));
        }
    };
}

#[macro_export]
macro_rules! error {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Error) {
            $crate::log($crate::Level::Error, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Error) {
            $crate::log($crate::Level::Error, module_path!(), &format!($($arg)+));
        }
    };
}

// ============================================================================
// Tracing Integration
// ============================================================================

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! A `tracing` subscriber that honours `FIELDCHECK_LOG_LEVEL`.

    use super::*;

    pub fn subscriber() -> impl tracing::Subscriber {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let level = match config().level {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(false))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Off);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("trace"), Some(Level::Trace));
        assert_eq!(Level::parse(" DEBUG "), Some(Level::Debug));
        assert_eq!(Level::parse("warning"), Some(Level::Warn));
        assert_eq!(Level::parse("none"), Some(Level::Off));
        assert_eq!(Level::parse("verbose"), None);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(Format::parse("json"), Some(Format::Json));
        assert_eq!(Format::parse("Compact"), Some(Format::Compact));
        assert_eq!(Format::parse("pretty"), None);
    }

    #[test]
    fn test_off_is_never_enabled() {
        assert!(!is_level_enabled(Level::Off));
    }

    #[test]
    fn test_compact_escapes_newlines() {
        let line = render_compact(Level::Debug, "fieldcheck", "first\nsecond", false);
        assert_eq!(line, "D fieldcheck: first\\nsecond");
    }

    #[test]
    fn test_json_line_is_single_line() {
        let line = render_json(Level::Warn, "fieldcheck::parser", "a \"quoted\"\nline", false);
        assert!(!line.contains('\n'));
        assert!(line.contains(r#""level":"WARN""#));
        assert!(!line.contains("timestamp"));
    }

    #[test]
    fn test_runtime_level_switches() {
        let original = current_level();
        let original_debug = is_debug_enabled();

        set_level(Level::Error);
        assert_eq!(current_level(), Level::Error);
        assert!(!is_level_enabled(Level::Warn));

        set_debug(true);
        assert!(is_debug_enabled());
        assert_eq!(current_level(), Level::Debug);

        set_debug(original_debug);
        set_level(original);
    }

    #[test]
    fn test_macros_compile() {
        trace!("trace message");
        debug!("debug message");
        info!("info message");
        warn!("warn message");
        error!("error message");

        debug!(target: "fieldcheck::test", "with target {}", 1);
    }
}
