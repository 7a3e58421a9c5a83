use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_backend::infrastructure::StoreInspector;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // stdout carries the report, logs go to stderr.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let inspector = StoreInspector::default();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let inspection = inspector.run(&mut out).await?;
    tracing::info!("Inspection finished: {:?}", inspection);

    Ok(())
}
