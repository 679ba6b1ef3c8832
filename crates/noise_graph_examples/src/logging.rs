use env_logger::Env;

/// Route library `tracing` events to stderr through `env_logger`.
///
/// Without a `tracing` subscriber installed, events are forwarded as `log` records. The
/// level defaults to `info` and can be overridden with `RUST_LOG`, e.g.
/// `RUST_LOG=noise_graph=debug`.
pub fn init_tracing() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .try_init();
    log::debug!("Logging initialized.");
}
