use aqualog::commands::Cli;
use aqualog::libs::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Outside debug mode only store warnings reach the terminal.
    let filter = if is_debug_mode() {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aqualog=debug"))
    } else {
        EnvFilter::new("aqualog=warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Cli::menu().await
}
