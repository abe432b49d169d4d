use std::sync::Arc;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use spreadwatch::scheduler::{Action, Disposition, Event, Phase, Scheduler};
use spreadwatch::{Dataset, FetchError, FxPoint, Period};

fn ds(rate: f64) -> Dataset {
    Dataset {
        fx: vec![FxPoint {
            date: "2024-01-01".into(),
            rate,
        }],
        ..Dataset::default()
    }
}

fn settled(request_id: u64, generation: u64, outcome: Result<Dataset, FetchError>) -> Event {
    Event::Settled {
        request_id,
        generation,
        outcome,
        at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
    }
}

fn issued(actions: &[Action]) -> Vec<(u64, u64, Period)> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Issue {
                request_id,
                generation,
                period,
            } => Some((*request_id, *generation, *period)),
            _ => None,
        })
        .collect()
}

fn published(actions: &[Action]) -> bool {
    actions.iter().any(|a| matches!(a, Action::Publish(_)))
}

#[test]
fn trigger_issues_and_marks_loading() {
    let sm = Scheduler::new(Period::M1);
    let (sm, actions) = sm.handle(Event::Trigger);

    assert_eq!(issued(&actions), vec![(1, 0, Period::M1)]);
    assert!(published(&actions));
    assert!(sm.snapshot().refresh.loading);
    assert!(sm.snapshot().refresh.error.is_none());
    assert_eq!(sm.in_flight(), 1);
}

#[test]
fn applied_success_replaces_dataset() {
    let sm = Scheduler::new(Period::M1);
    let (sm, _) = sm.handle(Event::Trigger);
    let (sm, actions) = sm.handle(settled(1, 0, Ok(ds(150.0))));

    assert!(published(&actions));
    assert_eq!(sm.last_disposition(), Some(Disposition::Applied));
    let snap = sm.snapshot();
    assert_eq!(*snap.dataset, ds(150.0));
    assert!(!snap.refresh.loading);
    assert!(snap.refresh.error.is_none());
    assert!(snap.refresh.last_update.is_some());
}

#[test]
fn applied_failure_keeps_previous_dataset() {
    let sm = Scheduler::new(Period::M1);
    let (sm, _) = sm.handle(Event::Trigger);
    let (sm, _) = sm.handle(settled(1, 0, Ok(ds(150.0))));
    let before = Arc::clone(&sm.snapshot().dataset);
    let last_update = sm.snapshot().refresh.last_update;

    let (sm, _) = sm.handle(Event::Tick);
    let (sm, _) = sm.handle(settled(2, 0, Err(FetchError::status(502, "bad gateway"))));

    let snap = sm.snapshot();
    assert!(Arc::ptr_eq(&before, &snap.dataset));
    assert_eq!(snap.refresh.last_update, last_update);
    assert!(!snap.refresh.loading);
    let msg = snap.refresh.error.as_deref().expect("error recorded");
    assert!(msg.starts_with("Failed to fetch market data"));
}

#[test]
fn next_issue_clears_error() {
    let sm = Scheduler::new(Period::M1);
    let (sm, _) = sm.handle(Event::Trigger);
    let (sm, _) = sm.handle(settled(1, 0, Err(FetchError::malformed("x"))));
    assert!(sm.snapshot().refresh.error.is_some());

    let (sm, _) = sm.handle(Event::Trigger);
    assert!(sm.snapshot().refresh.error.is_none());
    assert!(sm.snapshot().refresh.loading);
}

#[test]
fn same_period_is_a_noop() {
    let sm = Scheduler::new(Period::M1);
    let (sm, _) = sm.handle(Event::Trigger);
    let (sm, actions) = sm.handle(Event::SetPeriod(Period::M1));
    assert!(actions.is_empty());
    assert_eq!(sm.snapshot().generation, 0);
}

#[test]
fn period_change_resets_timer_and_discards_old_generation() {
    let sm = Scheduler::new(Period::D5);
    let (sm, _) = sm.handle(Event::Trigger);
    let (sm, actions) = sm.handle(Event::SetPeriod(Period::M1));

    assert!(matches!(actions.first(), Some(Action::ResetTimer)));
    assert_eq!(issued(&actions), vec![(2, 1, Period::M1)]);
    assert_eq!(sm.snapshot().generation, 1);
    assert_eq!(sm.snapshot().refresh.period, Period::M1);

    // 1mo settles first, then the slow 5d request
    let (sm, _) = sm.handle(settled(2, 1, Ok(ds(1.0))));
    assert_eq!(sm.last_disposition(), Some(Disposition::Applied));
    let (sm, actions) = sm.handle(settled(1, 0, Ok(ds(5.0))));
    assert_eq!(sm.last_disposition(), Some(Disposition::StaleGeneration));
    assert!(!published(&actions));

    assert_eq!(*sm.snapshot().dataset, ds(1.0));
    assert!(!sm.snapshot().refresh.loading);
    assert_eq!(sm.in_flight(), 0);
}

#[test]
fn stale_generation_failure_is_discarded_too() {
    let sm = Scheduler::new(Period::D5);
    let (sm, _) = sm.handle(Event::Trigger);
    let (sm, _) = sm.handle(Event::SetPeriod(Period::M3));
    let (sm, _) = sm.handle(settled(1, 0, Err(FetchError::transport("reset"))));
    assert_eq!(sm.last_disposition(), Some(Disposition::StaleGeneration));
    assert!(sm.snapshot().refresh.error.is_none());
    // the 3mo request is still the latest issued
    assert!(sm.snapshot().refresh.loading);
}

#[test]
fn older_request_settling_late_is_out_of_order() {
    let sm = Scheduler::new(Period::M1);
    let (sm, _) = sm.handle(Event::Trigger);
    let (sm, _) = sm.handle(Event::Tick);

    let (sm, _) = sm.handle(settled(2, 0, Ok(ds(2.0))));
    assert!(!sm.snapshot().refresh.loading);
    let (sm, _) = sm.handle(settled(1, 0, Ok(ds(1.0))));
    assert_eq!(sm.last_disposition(), Some(Disposition::OutOfOrder));
    assert_eq!(*sm.snapshot().dataset, ds(2.0));
    assert!(!sm.snapshot().refresh.loading);
}

#[test]
fn loading_waits_for_latest_issued() {
    let sm = Scheduler::new(Period::M1);
    let (sm, _) = sm.handle(Event::Trigger);
    let (sm, _) = sm.handle(Event::Trigger);

    let (sm, _) = sm.handle(settled(1, 0, Ok(ds(1.0))));
    assert_eq!(sm.last_disposition(), Some(Disposition::Applied));
    assert_eq!(*sm.snapshot().dataset, ds(1.0));
    assert!(sm.snapshot().refresh.loading);

    let (sm, _) = sm.handle(settled(2, 0, Ok(ds(2.0))));
    assert_eq!(*sm.snapshot().dataset, ds(2.0));
    assert!(!sm.snapshot().refresh.loading);
}

#[test]
fn unknown_request_is_ignored() {
    let sm = Scheduler::new(Period::M1);
    let (sm, actions) = sm.handle(settled(42, 0, Ok(ds(1.0))));
    assert!(actions.is_empty());
    assert_eq!(sm.last_disposition(), Some(Disposition::Ignored));
    assert!(sm.snapshot().dataset.is_empty());
}

#[test]
fn shutdown_aborts_publishes_then_terminates() {
    let sm = Scheduler::new(Period::M1);
    let (sm, _) = sm.handle(Event::Trigger);
    let (sm, actions) = sm.handle(Event::Shutdown);

    assert_eq!(sm.phase(), Phase::Terminated);
    assert!(matches!(actions.first(), Some(Action::AbortAll)));
    assert!(matches!(actions.last(), Some(Action::Terminate)));
    assert!(published(&actions));
    assert!(!sm.snapshot().refresh.loading);
    assert_eq!(sm.in_flight(), 0);

    let (sm, actions) = sm.handle(Event::Trigger);
    assert!(actions.is_empty());
    let (_, actions) = sm.handle(settled(1, 0, Ok(ds(1.0))));
    assert!(actions.is_empty());
}

proptest! {
    #[test]
    fn newest_request_wins_regardless_of_settle_order(
        order in (1usize..12).prop_flat_map(|n| Just((1..=n as u64).collect::<Vec<_>>()).prop_shuffle())
    ) {
        let n = order.len() as u64;
        let mut sm = Scheduler::new(Period::M1);
        for _ in 0..n {
            sm = sm.handle(Event::Trigger).0;
        }
        let newest_at = order.iter().position(|x| *x == n).unwrap_or(0);
        for (i, id) in order.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let rate = *id as f64;
            sm = sm.handle(settled(*id, 0, Ok(ds(rate)))).0;
            prop_assert_eq!(sm.snapshot().refresh.loading, i < newest_at);
        }
        #[allow(clippy::cast_precision_loss)]
        let expected = ds(n as f64);
        prop_assert_eq!(&*sm.snapshot().dataset, &expected);
        prop_assert!(!sm.snapshot().refresh.loading);
    }
}
