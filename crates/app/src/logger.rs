use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install the global log subscriber, writing to stderr at `level` and above.
pub fn init(level: Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set up logging: {e}");
    }
}
