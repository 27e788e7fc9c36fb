//! End-to-end tests: the client reporter against the HTTP API served on
//! an ephemeral loopback port with the in-memory store.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use eon_api::AppState;
use eon_client::{ClientConfig, HostEvent, LivingPlatform, Reporter};
use eon_core::{GrowthCurve, UpdateStrategy};
use eon_db::{MemoryStore, PlatformStore, RecordingPolicy};
use eon_types::{Interaction, Point, RecordInteractionRequest, SessionId};
use tokio::net::TcpListener;

const TIMEOUT: Duration = Duration::from_secs(5);

async fn spawn_service(policy: RecordingPolicy) -> (String, PlatformStore) {
    let store = PlatformStore::from(MemoryStore::new());
    store.ensure_initialized("1.0.3").await.unwrap();
    let state = Arc::new(AppState::new(store.clone()).with_policy(policy));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(eon_api::serve(listener, state, std::future::pending()));
    (format!("http://{addr}"), store)
}

async fn wait_for_report(platform: &mut LivingPlatform) {
    tokio::time::timeout(TIMEOUT, async {
        while platform.apply_reports() == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("report outcome did not arrive");
}

#[tokio::test]
async fn sqrt_scaled_first_click_over_http() {
    let (base_url, _store) = spawn_service(RecordingPolicy {
        curve: GrowthCurve::SqrtScaled { factor: 3 },
        strategy: UpdateStrategy::Atomic,
    })
    .await;
    let (reporter, _rx) = Reporter::http(&base_url, TIMEOUT).unwrap();

    let request = RecordInteractionRequest::new(
        &Interaction::Click(Point::new(120.0, 80.0)),
        SessionId::new("sess_e2e"),
        Some(Utc::now()),
    );
    let response = reporter.send(&request).await.unwrap();

    assert!(response.success);
    assert_eq!(response.growth_level.value(), 3);
    assert_eq!(response.total_interactions, 1);
}

#[tokio::test]
async fn server_growth_overwrites_local_estimate() {
    let (base_url, store) = spawn_service(RecordingPolicy {
        curve: GrowthCurve::SqrtScaled { factor: 3 },
        strategy: UpdateStrategy::Atomic,
    })
    .await;
    let config = ClientConfig {
        api_base_url: Some(base_url),
        ..ClientConfig::offline()
    };
    let mut platform = LivingPlatform::connect(&config, 800.0, 600.0).unwrap();

    for _ in 0..4 {
        platform.handle(HostEvent::Click(Point::new(5.0, 5.0)), Duration::ZERO);
        wait_for_report(&mut platform).await;
    }

    // Local linear estimate would be 8; sqrt(4) * 3 = 6 on the server.
    assert_eq!(platform.growth_level().value(), 6);
    assert_eq!(platform.interaction_count(), 4);
    assert_eq!(store.count_interactions().await.unwrap(), 4);
    assert_eq!(store.platform_state().await.unwrap().total_interactions, 4);
}

#[tokio::test]
async fn offline_service_keeps_local_estimate() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig {
        api_base_url: Some(format!("http://{addr}")),
        ..ClientConfig::offline()
    };
    let mut platform = LivingPlatform::connect(&config, 800.0, 600.0).unwrap();

    for _ in 0..5 {
        platform.handle(HostEvent::KeyPressed, Duration::ZERO);
        wait_for_report(&mut platform).await;
    }

    assert_eq!(platform.growth_level().value(), 10);
}

#[tokio::test]
async fn error_envelope_becomes_status_error() {
    let store = PlatformStore::from(MemoryStore::new());
    let state = Arc::new(AppState::new(store));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(eon_api::serve(listener, state, std::future::pending()));

    let (reporter, _rx) = Reporter::http(&format!("http://{addr}"), TIMEOUT).unwrap();
    let request = RecordInteractionRequest::new(
        &Interaction::Keypress,
        SessionId::new("sess_e2e"),
        None,
    );
    let err = reporter.send(&request).await.unwrap_err();

    assert!(matches!(
        err,
        eon_client::ClientError::Status { status: 500, ref message } if message == "Platform state not found"
    ));
}
