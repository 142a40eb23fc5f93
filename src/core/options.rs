//! Codec options and diagnostic log threshold

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::core::error::XmpError;

static DEFAULT_LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Warn as u8);

/// Minimum severity of diagnostics emitted while decoding and encoding.
///
/// Levels are ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    /// Every binding and conversion decision
    Debug = 0,
    /// Noteworthy but expected events
    Info = 1,
    /// Recoverable problems such as skipped fields
    #[default]
    Warn = 2,
    /// Only failures
    Error = 3,
}

impl LogLevel {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        })
    }
}

impl FromStr for LogLevel {
    type Err = XmpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(XmpError::BadParam(format!("unknown log level '{}'", s))),
        }
    }
}

/// Set the process-wide default log threshold
pub fn set_log_level(level: LogLevel) {
    DEFAULT_LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// The process-wide default log threshold
pub fn log_level() -> LogLevel {
    LogLevel::from_u8(DEFAULT_LOG_LEVEL.load(Ordering::Relaxed))
}

/// Options for decoding and encoding XMP packets
///
/// # Example
///
/// ```
/// use xmpdoc::{LogLevel, XmpOptions};
///
/// let options = XmpOptions::default()
///     .strict()
///     .log_level(LogLevel::Error)
///     .indent(0);
/// assert!(options.strict);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct XmpOptions {
    /// Fail the whole decode on the first field conversion error
    /// (default: skip the field and keep the raw value as generic content)
    pub strict: bool,
    /// Minimum severity of emitted diagnostics
    pub log_level: LogLevel,
    /// Spaces per nesting level in written XML, 0 for compact output
    pub indent: usize,
    /// Wrap written packets in `<?xpacket?>` processing instructions
    pub packet_wrapper: bool,
}

impl Default for XmpOptions {
    fn default() -> Self {
        Self {
            strict: false,
            log_level: log_level(),
            indent: 2,
            packet_wrapper: true,
        }
    }
}

impl XmpOptions {
    /// Abort decoding on the first field conversion error.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Skip fields that fail to convert, keeping their raw content (default).
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Set the diagnostic threshold for this call.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Set the indentation width of written XML.
    pub fn indent(mut self, width: usize) -> Self {
        self.indent = width;
        self
    }

    /// Write bare `x:xmpmeta` without `<?xpacket?>` wrapper.
    pub fn without_packet_wrapper(mut self) -> Self {
        self.packet_wrapper = false;
        self
    }

    /// Whether a diagnostic of `level` passes the threshold
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.log_level
    }

    /// Emit a diagnostic through the `log` facade if it passes the threshold
    pub(crate) fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            log::log!(target: "xmpdoc", log::Level::from(level), "{}", args);
        }
    }
}
