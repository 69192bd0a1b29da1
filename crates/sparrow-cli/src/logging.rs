use sparrow_core::AppInfo;
use tracing_subscriber::{EnvFilter, fmt};

/// Logs go to stderr so command output stays pipeable. Quiet by default;
/// RUST_LOG=debug surfaces the engine's per-action events.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    // Ignore error if a global subscriber is already set (e.g., in tests)
    let _ = tracing::subscriber::set_global_default(subscriber);
    tracing::debug!(version = AppInfo::version(), "logging initialized");
}
