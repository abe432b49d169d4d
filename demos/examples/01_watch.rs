use std::time::Duration;

use spreadwatch::{Period, Spreadwatch};
use spreadwatch_demos::common::{get_source, print_summary};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sw = Spreadwatch::builder()
        .with_source(get_source())
        .interval(Duration::from_millis(300))
        .fetch_timeout(Duration::from_secs(10))
        .build()?;

    let mut session = sw.start(Period::M1);
    let mut updates = session.subscribe();

    // Watch a few refresh cycles, printing each applied update
    let mut seen = 0;
    let mut last = None;
    while seen < 3 {
        tokio::time::timeout(Duration::from_secs(15), updates.changed()).await??;
        let snap = updates.borrow_and_update().clone();
        if snap.refresh.loading || snap.refresh.last_update == last {
            continue;
        }
        last = snap.refresh.last_update;
        seen += 1;
        println!("update #{seen}");
        print_summary(&spreadwatch::View::from_snapshot(&snap));
    }

    // A manual refresh on top of the cadence
    session.trigger()?;
    tokio::time::sleep(Duration::from_millis(50)).await;

    session.stop().await;
    println!("stopped: {}", session.is_stopped());
    Ok(())
}
