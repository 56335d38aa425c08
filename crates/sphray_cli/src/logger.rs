use log::LevelFilter;

/// Initialize env_logger, with `RUST_LOG` taking precedence over `level`.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}
