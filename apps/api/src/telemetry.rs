use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes structured logging.
///
/// `RUST_LOG` wins when set; otherwise this crate, `tower_http` and the calling
/// binary's own target all log at `level`.
pub fn init(level: &str, binary_target: &str) {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(default_directives(level, binary_target))
        }))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

fn default_directives(level: &str, binary_target: &str) -> String {
    format!(
        "{}={level},{binary_target}={level},tower_http={level}",
        env!("CARGO_CRATE_NAME")
    )
}
