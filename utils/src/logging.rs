use std::env;

use chrono::Local;
use log::LevelFilter;

pub fn level_from_str(level: Option<&str>) -> LevelFilter {
    match level {
        Some("trace") => LevelFilter::Trace,
        Some("debug") => LevelFilter::Debug,
        Some("info") => LevelFilter::Info,
        Some("warn") => LevelFilter::Warn,
        Some("error") => LevelFilter::Error,
        _ => LevelFilter::Info, // Pipeline logs should show progress unless told otherwise
    }
}

pub fn setup_logging() -> Result<(), fern::InitError> {
    let level = level_from_str(env::var("LOG_LEVEL").ok().as_deref());

    // stdout is reserved for workflow commands such as ::set-output
    let stderr_config = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}] {}: {}",
                Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        // reqwest/hyper are noisy below warn
        .level_for("hyper", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .chain(std::io::stderr());

    fern::Dispatch::new().chain(stderr_config).apply()?;

    Ok(())
}
