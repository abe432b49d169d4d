use std::time::Duration;

use spreadwatch_core::TaskHandle;

#[tokio::test(flavor = "multi_thread")]
async fn task_handle_stop_graceful() {
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let (done_tx, done_rx) = tokio::sync::oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let _ = stop_rx.await;
        let _ = done_tx.send(());
    });

    let handle = TaskHandle::new(task, stop_tx);
    handle.stop().await;

    tokio::time::timeout(Duration::from_millis(100), done_rx)
        .await
        .expect("task did not complete after stop()")
        .expect("task dropped its completion sender");
}

#[tokio::test(flavor = "multi_thread")]
async fn task_handle_drop_aborts_stubborn_task() {
    let (stop_tx, _stop_rx) = tokio::sync::oneshot::channel::<()>();
    let (guard_tx, guard_rx) = tokio::sync::oneshot::channel::<()>();

    // Ignores the stop signal; only an abort ends it, which drops `guard_tx`.
    let task = tokio::spawn(async move {
        let _guard = guard_tx;
        std::future::pending::<()>().await;
    });

    let handle = TaskHandle::new(task, stop_tx);
    assert!(!handle.is_finished());
    drop(handle);

    let res = tokio::time::timeout(Duration::from_secs(1), guard_rx)
        .await
        .expect("task was not aborted on drop");
    assert!(res.is_err(), "sender should be dropped, not used");
}

#[tokio::test(flavor = "multi_thread")]
async fn task_handle_reports_finished() {
    let (stop_tx, _stop_rx) = tokio::sync::oneshot::channel::<()>();
    let task = tokio::spawn(async {});
    let handle = TaskHandle::new(task, stop_tx);
    for _ in 0..100 {
        if handle.is_finished() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(handle.is_finished());
}
