use anyhow::Context;
use tscope::domain::config::LoggingConfig;
use tscope::kernel::config::load_api_config;
use tscope_logger::{LevelFilter, LogFormat, Logger};
use tscope_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = load_api_config(std::env::args().nth(1))
        .context("Critical: Configuration is malformed")?;

    let _log = logger(&cfg.logging)?;

    Server::builder().config(cfg).build()?.run().await
}

fn logger(cfg: &LoggingConfig) -> anyhow::Result<Logger> {
    let level: LevelFilter =
        cfg.level.parse().with_context(|| format!("Invalid log level '{}'", cfg.level))?;

    let mut builder = Logger::builder(env!("CARGO_PKG_NAME")).level(level).console(cfg.console);
    if let Some(filter) = &cfg.filter {
        builder = builder.env_filter(filter);
    }
    if let Some(dir) = &cfg.dir {
        let format = if cfg.json { LogFormat::Json } else { LogFormat::Compact };
        builder = builder.file(dir.clone()).file_format(format).max_files(cfg.max_files);
    }

    builder.init().context("Failed to install logger")
}
