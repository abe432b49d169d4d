use std::time::Duration;

use spreadwatch::{Period, Spreadwatch};
use spreadwatch_demos::common::{get_source, print_summary};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sw = Spreadwatch::builder()
        .with_source(get_source())
        .fetch_timeout(Duration::from_secs(10))
        .build()?;

    let mut session = sw.start(Period::D5);
    let wait = Duration::from_secs(15);
    tokio::time::timeout(wait, session.wait_for(|s| s.refresh.last_update.is_some())).await??;
    print_summary(&session.view());

    // Results still in flight for 5d are discarded from here on
    session.set_period(Period::M3)?;
    let snap = tokio::time::timeout(
        wait,
        session.wait_for(|s| s.generation == 1 && !s.refresh.loading),
    )
    .await??;
    println!("generation {} on {}", snap.generation, snap.refresh.period);
    let view = session.view();
    print_summary(&view);
    for row in view.combined.iter().rev().take(5) {
        println!(
            "  {} spread={:.2} usdjpy={:.2}{}",
            row.date,
            row.spread,
            row.rate,
            if view.unmatched.contains(&row.date) { " (no spread)" } else { "" }
        );
    }

    session.stop().await;
    Ok(())
}
