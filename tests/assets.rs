#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use toaster::ToastManager;
use toaster::assets::{AssetKind, AssetReadiness, AssetSettings, ensure_assets};
use toaster::host::MemoryHost;
use toaster::manager::ManagerSettings;
use toaster::{ToastConfig, ToastOptions};

#[tokio::test(start_paused = true)]
async fn preloaded_assets_are_ready_immediately() {
    let host = MemoryHost::new();
    host.preload(AssetKind::IconFont);
    host.preload(AssetKind::UtilityCss);

    let readiness = ensure_assets(&host, &AssetSettings::default()).await;
    assert_eq!(readiness, AssetReadiness::Ready { attempts: 1 });
    assert!(host.injected_url(AssetKind::IconFont).is_none());
}

#[tokio::test(start_paused = true)]
async fn missing_assets_are_injected_with_configured_urls() {
    let host = MemoryHost::with_asset_latency(3);
    host.preload(AssetKind::IconFont);
    let settings = AssetSettings::default();

    let readiness = ensure_assets(&host, &settings).await;
    assert!(readiness.is_ready());
    assert_eq!(
        host.injected_url(AssetKind::UtilityCss).as_ref(),
        Some(&settings.utility_css_url)
    );
    assert!(host.injected_url(AssetKind::IconFont).is_none());
}

#[tokio::test(start_paused = true)]
async fn slow_assets_resolve_after_a_few_polls() {
    let host = MemoryHost::with_asset_latency(4);
    let started = Instant::now();

    let readiness = ensure_assets(&host, &AssetSettings::default()).await;

    // every poll consumes one latency tick per asset
    match readiness {
        AssetReadiness::Ready { attempts } => assert_eq!(attempts, 5),
        other => panic!("expected ready, got {other:?}"),
    }
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(400) && elapsed < Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn never_loading_assets_time_out_after_the_budget() {
    let host = MemoryHost::with_asset_latency(u32::MAX);
    let started = Instant::now();

    let readiness = ensure_assets(&host, &AssetSettings::default()).await;

    assert_eq!(
        readiness,
        AssetReadiness::TimedOut {
            missing: vec![AssetKind::IconFont, AssetKind::UtilityCss],
        }
    );
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(4_900) && elapsed < Duration::from_millis(5_000));
}

#[tokio::test(start_paused = true)]
async fn disabled_probe_is_skipped() {
    let host = MemoryHost::new();
    let settings = AssetSettings {
        enabled: false,
        ..AssetSettings::default()
    };
    assert_eq!(ensure_assets(&host, &settings).await, AssetReadiness::Skipped);
    assert!(host.injected_url(AssetKind::IconFont).is_none());
}

#[tokio::test(start_paused = true)]
async fn asset_timeout_never_blocks_toasts() {
    let host = Arc::new(MemoryHost::with_asset_latency(u32::MAX));
    let manager = ToastManager::new(
        host.clone(),
        ToastConfig::default(),
        ManagerSettings::default(),
    )
    .expect("manager");

    let settings = AssetSettings {
        poll_attempts: 3,
        ..AssetSettings::default()
    };
    let readiness = manager.prepare_assets(host.as_ref(), &settings).await;
    assert!(!readiness.is_ready());

    let handle = manager.show(ToastOptions::new().message("still works"));
    assert!(manager.state(handle).is_some());
}
