//! Logger setup for the `colornoise` binary.

use log::LevelFilter;

/// Maps the number of `-v` flags to a log level.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs `env_logger` at the level chosen by `verbosity`.
///
/// `RUST_LOG` is parsed after the default level, so it still takes
/// precedence. Calling this twice is harmless.
pub fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for_verbosity(verbosity))
        .format_timestamp(None)
        .parse_default_env();
    // A second init (e.g. from tests) keeps the first logger.
    let _ = builder.try_init();
}
