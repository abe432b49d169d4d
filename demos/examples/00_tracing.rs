use std::time::Duration;

use spreadwatch::{Period, Spreadwatch};
use spreadwatch_demos::common::{get_source, print_summary};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,spreadwatch=trace,spreadwatch_http=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let sw = Spreadwatch::builder()
        .with_source(get_source())
        .fetch_timeout(Duration::from_secs(10))
        .build()?;

    // One-shot fetch outside a session
    let dataset = sw.fetch_once(Period::D5).await?;
    tracing::info!(fx_points = dataset.fx.len(), "one-shot fetch done");

    // Session: immediate fetch, then stop
    let mut session = sw.start(Period::M1);
    tokio::time::timeout(
        Duration::from_secs(15),
        session.wait_for(|s| !s.refresh.loading && s.refresh.last_update.is_some()),
    )
    .await??;
    print_summary(&session.view());
    session.stop().await;

    Ok(())
}
