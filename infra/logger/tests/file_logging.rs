use std::fs;
use std::time::Duration;
use tempfile::tempdir;
use tscope_logger::{LevelFilter, LogFormat, Logger};

#[test]
fn json_file_logging_writes_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder("integration-file-logging")
        .console(false)
        .file(&log_dir)
        .file_format(LogFormat::Json)
        .level(LevelFilter::INFO)
        .init()?;
    assert!(logger.writes_files());

    tracing::info!(feeds = 11, "trusted feed refreshed");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    assert!(contents.contains("trusted feed refreshed"));
    assert!(contents.trim_start().starts_with('{'), "file lines should be JSON");

    Ok(())
}
