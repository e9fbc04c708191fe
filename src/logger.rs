//! Logger setup for the eztemplate binary.

/// Initializes env_logger; `verbose` turns on debug output.
///
/// `RUST_LOG` still overrides the level when set.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
