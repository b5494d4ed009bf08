/// `env_logger` default filter for a `-v` count: warn, info, debug, then
/// trace. `RUST_LOG` still overrides it in the binaries.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
