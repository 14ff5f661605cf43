// utils.rs - External tool execution helpers and logging setup
use std::process::Command;

/// Execute FFmpeg command with error handling
pub fn execute_ffmpeg_command(mut command: Command) -> Result<String, String> {
    tracing::debug!("Executing FFmpeg: {:?}", command);

    let output = command
        .output()
        .map_err(|e| format!("Failed to execute FFmpeg: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("FFmpeg error: {}", stderr));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Check if FFmpeg is available
pub fn check_ffmpeg_available() -> Result<(), String> {
    Command::new("ffmpeg")
        .args(["-version"])
        .output()
        .map_err(|_| "FFmpeg not found. Please install FFmpeg.")?;

    Ok(())
}

// Logging configuration shared by every binary
pub fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, fmt, Layer};

    // Get log level from environment or default to INFO for production
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            "debug,yt_courier=trace,reqwest=info,hyper=info".to_string()
        } else {
            "info,yt_courier=info,reqwest=warn,hyper=warn".to_string()
        }
    });

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log_level))?;

    let fmt_layer = if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        // JSON logging for log aggregation
        fmt::layer()
            .json()
            .with_current_span(false)
            .with_target(true)
            .boxed()
    } else {
        // Human-readable logging for interactive runs
        fmt::layer()
            .with_target(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
