//! Tracing subscriber setup for the `qcrc` binary.

use tracing_subscriber::EnvFilter;

/// Filter directives: `RUST_LOG` if set and non-empty, else the crate default.
pub fn directives(rust_log: Option<&str>, verbose: bool) -> String {
    match rust_log.map(str::trim) {
        Some(env) if !env.is_empty() => env.to_string(),
        _ => format!("qcrc={}", if verbose { "debug" } else { "info" }),
    }
}

/// Install a stderr subscriber so stdout only carries command output.
pub fn init(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = EnvFilter::new(directives(rust_log.as_deref(), verbose));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
