use anyhow::Result;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

/// Log to stderr at a level picked by `-v` count, unless `RUST_LOG` is set.
pub fn setup_logging(verbosity: u8, quiet: bool) -> Result<()> {
    let level_filter = if quiet {
        LevelFilter::OFF
    } else {
        match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .from_env()?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}
