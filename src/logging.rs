use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::config::Config;
use crate::Result;

/// Installs the global log subscriber. Logs go to stderr.
pub fn init_logging(config: &Config) -> Result<()> {
    let level = log_level(config);
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn log_level(config: &Config) -> Level {
    if config.debug {
        Level::DEBUG
    } else if config.verbose {
        Level::INFO
    } else if config.quiet {
        Level::ERROR
    } else {
        Level::WARN
    }
}
