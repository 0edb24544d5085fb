use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "spheretrace")]
#[command(about = "A CPU ray tracer for sphere scenes")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Display width in pixels (the traced buffer is this divided by the resolution divisor)
    #[arg(long, default_value = "800", help = "Display width in pixels")]
    pub width: u32,

    /// Display height in pixels
    #[arg(long, default_value = "600", help = "Display height in pixels")]
    pub height: u32,

    /// Resolution divisor; the traced buffer is the display resolution divided by this
    #[arg(long, short = 'd', default_value = "2.5", help = "Resolution divisor (clamped to >= 0.8)")]
    pub resolution_divisor: f32,

    /// Maximum number of reflective/transmissive bounces per ray
    #[arg(long, short = 'b', default_value = "2", help = "Maximum ray bounces")]
    pub max_bounces: u32,

    /// Send the frame to TEV for visualization
    #[arg(long, help = "Send the frame to TEV for visualization")]
    pub tev: bool,

    /// TEV client IP address and port (automatically enables --tev)
    #[arg(long, help = "TEV client IP address and port (automatically enables --tev)")]
    pub tev_address: Option<String>,

    /// Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)
    #[arg(short, long, default_value = "output.png", help = "Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)")]
    pub output: String,
}
