use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tower_lsp::lsp_types::Url;

use phpdd_lsp::controller::CheckController;
use phpdd_lsp::settings::Settings;

fn php_url() -> Url {
    Url::parse("file:///srv/app/burst.php").unwrap()
}

fn fast_settings() -> Settings {
    Settings {
        debounce: Duration::from_millis(30),
        ..Settings::default()
    }
}

/// Mirrors the focus-event path: arm the controller's trigger with a
/// silent scan, counting how many scans actually dispatch.
async fn fire_focus_event(controller: &Arc<CheckController>, scans: &Arc<AtomicUsize>) {
    let url = php_url();
    if !controller.wants_silent_check(&url) {
        return;
    }

    let worker = controller.clone();
    let scans = scans.clone();
    controller
        .trigger
        .arm(controller.settings.debounce, async move {
            scans.fetch_add(1, Ordering::SeqCst);
            let _ = worker.check(Some(url)).await;
        })
        .await;
}

#[tokio::test]
async fn burst_of_focus_events_dispatches_one_scan() {
    let controller = Arc::new(CheckController::new(fast_settings()));
    controller.open_document(php_url(), "<?php $$x;").await;

    let scans = Arc::new(AtomicUsize::new(0));
    for _ in 0..3 {
        fire_focus_event(&controller, &scans).await;
    }

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(scans.load(Ordering::SeqCst), 1);
    assert_eq!(controller.diagnostics.get(&php_url()).unwrap().len(), 1);
    assert!(!controller.wants_silent_check(&php_url()));
}

#[tokio::test]
async fn focus_after_completed_scan_does_not_rescan() {
    let controller = Arc::new(CheckController::new(fast_settings()));
    controller.open_document(php_url(), "<?php $$x;").await;

    let scans = Arc::new(AtomicUsize::new(0));
    fire_focus_event(&controller, &scans).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Document unchanged: the dedup cache suppresses the second round.
    fire_focus_event(&controller, &scans).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(scans.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn edit_requalifies_the_document_for_scanning() {
    let controller = Arc::new(CheckController::new(fast_settings()));
    controller.open_document(php_url(), "<?php $$x;").await;

    let scans = Arc::new(AtomicUsize::new(0));
    fire_focus_event(&controller, &scans).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    controller.change_document(php_url(), "<?php $$y;").await;
    fire_focus_event(&controller, &scans).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(scans.load(Ordering::SeqCst), 2);
}
