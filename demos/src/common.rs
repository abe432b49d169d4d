use std::sync::Arc;

use spreadwatch::{DataSource, View};
use spreadwatch_mock::MockSource;

/// Environment variable forcing the fixture source (set by CI).
pub const ENV_USE_MOCK: &str = "SPREADWATCH_DEMOS_USE_MOCK";

/// Return a data source for demos.
///
/// Uses the fixture source when `SPREADWATCH_DEMOS_USE_MOCK` is set or when no
/// usable `SPREADWATCH_BASE_URL` is configured.
#[must_use]
pub fn get_source() -> Arc<dyn DataSource> {
    if std::env::var(ENV_USE_MOCK).is_ok() {
        println!("--- (Using Mock Source for CI) ---");
        return Arc::new(MockSource::new());
    }
    match spreadwatch_http::HttpSource::from_env() {
        Ok(source) => {
            println!("--- (Using {}) ---", source.endpoint());
            Arc::new(source)
        }
        Err(e) => {
            println!("--- ({e}; using Mock Source) ---");
            Arc::new(MockSource::new())
        }
    }
}

/// Print the headline figures of a view.
pub fn print_summary(view: &View) {
    println!(
        "period={} loading={} rows={} unmatched={}",
        view.period,
        view.loading,
        view.combined.len(),
        view.unmatched.len()
    );
    let rows = [
        ("US-JP 10Y spread", &view.summaries.spread),
        ("USD/JPY", &view.summaries.fx),
        ("Gold", &view.summaries.gold),
        ("Oil", &view.summaries.oil),
    ];
    for (label, summary) in rows {
        match summary {
            Some(s) => match s.change {
                Some(c) => println!("  {label:<18} {:>10.3} ({c:+.3}) as of {}", s.value, s.date),
                None => println!("  {label:<18} {:>10.3} as of {}", s.value, s.date),
            },
            None => println!("  {label:<18} n/a"),
        }
    }
    if let Some(err) = &view.error {
        println!("  error: {err}");
    }
}
