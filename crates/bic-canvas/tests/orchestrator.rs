//! End-to-end orchestrator scenarios against a mock dataset backend.

use bic_canvas::{Canvas, Hit, HitRegion, PointerEvent};
use bic_core::{Point, TypeKey};
use bic_data::EndpointConfig;
use serde_json::json;
use std::rc::Rc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn canvas_for(server: &MockServer) -> Canvas {
    Canvas::new(&EndpointConfig {
        base_url: server.uri(),
        timeout_secs: 5,
    })
    .unwrap()
}

async fn mount_purchase_frequency(server: &MockServer, delay: Duration) {
    Mock::given(method("GET"))
        .and(path("/api/tools/purchase-frequency"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "status": "success",
                    "frequencyHistogram": [3, 1, 4],
                    "intervalHeatmap": {},
                    "segmentQuadrant": {},
                    "regularityChart": [],
                    "valueTreemap": {}
                }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn successful_create_appends_exactly_one_widget() {
    let server = MockServer::start().await;
    mount_purchase_frequency(&server, Duration::ZERO).await;
    let canvas = canvas_for(&server);

    let id = canvas
        .create("purchase-frequency.histogram", None, None)
        .await
        .unwrap();

    let widgets = canvas.widgets();
    assert_eq!(widgets.len(), 1);
    let w = &widgets[0];
    assert_eq!(w.id, id);
    assert_eq!(w.type_key, TypeKey::new("purchase-frequency.histogram"));
    assert!(w.size.width >= 300.0 && w.size.height >= 200.0);
    assert!(w.position.x >= 0.0 && w.position.y >= 0.0);
    assert!(!canvas.is_loading());
    assert_eq!(canvas.last_error(), None);
}

#[tokio::test]
async fn create_ids_are_unique_across_spawns() {
    let server = MockServer::start().await;
    mount_purchase_frequency(&server, Duration::ZERO).await;
    let canvas = canvas_for(&server);

    let mut ids = std::collections::HashSet::new();
    for _ in 0..5 {
        let id = canvas
            .create("purchase-frequency.histogram", None, None)
            .await
            .unwrap();
        assert!(ids.insert(id));
    }
    assert_eq!(canvas.widgets().len(), 5);
}

// Scenario A: remove lands while the spawn's fetch is still pending.
// Once the fetch resolves, the canvas must not contain the widget.
#[tokio::test]
async fn removal_during_pending_fetch_wins() {
    let server = MockServer::start().await;
    mount_purchase_frequency(&server, Duration::from_millis(500)).await;
    let canvas = Rc::new(canvas_for(&server));

    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let spawned = canvas.clone();
            let task = tokio::task::spawn_local(async move {
                spawned
                    .create("purchase-frequency.histogram", None, None)
                    .await
            });

            // Wait for the spawn to be staged, then remove it mid-fetch.
            while canvas.pending_ids().is_empty() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            let id = canvas.pending_ids().remove(0);
            assert!(canvas.is_loading());
            canvas.remove(&id);

            let created = task.await.unwrap().unwrap();
            assert_eq!(created, id);
            assert!(canvas.widget(&id).is_none(), "widget must not resurrect");
            assert!(canvas.widgets().is_empty());
            assert!(!canvas.is_loading());
        })
        .await;
}

#[tokio::test]
async fn fetch_failure_surfaces_error_and_adds_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tools/churn-prediction"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "message": "model service offline"
        })))
        .mount(&server)
        .await;
    let canvas = canvas_for(&server);

    let result = canvas
        .create("churn-prediction.risk-matrix", None, None)
        .await;
    assert!(result.is_err());
    assert!(canvas.widgets().is_empty());
    assert!(!canvas.is_loading());
    let error = canvas.last_error().unwrap();
    assert!(error.contains("model service offline"), "got: {error}");
}

// Scenario B: dragging A by (40, -15) moves exactly A; B stays put.
#[tokio::test]
async fn drag_moves_only_the_grabbed_widget() {
    let server = MockServer::start().await;
    mount_purchase_frequency(&server, Duration::ZERO).await;
    let canvas = canvas_for(&server);

    let a = canvas
        .create(
            "purchase-frequency.histogram",
            None,
            Some(Point::new(100.0, 100.0)),
        )
        .await
        .unwrap();
    let b = canvas
        .create(
            "purchase-frequency.histogram",
            None,
            Some(Point::new(700.0, 500.0)),
        )
        .await
        .unwrap();
    let b_before = canvas.widget(&b).unwrap();

    // Grab A 12,8 into its body and drag by (40, -15).
    canvas.pointer(
        &PointerEvent::Down { x: 112.0, y: 108.0 },
        Some(&Hit {
            id: a.clone(),
            region: HitRegion::Body,
        }),
    );
    canvas.pointer(&PointerEvent::Move { x: 152.0, y: 93.0 }, None);
    canvas.pointer(&PointerEvent::Up { x: 152.0, y: 93.0 }, None);

    let a_after = canvas.widget(&a).unwrap();
    assert_eq!(a_after.position, Point::new(140.0, 85.0));

    let b_after = canvas.widget(&b).unwrap();
    assert_eq!(b_after.position, b_before.position);
    assert_eq!(b_after.size, b_before.size);
    assert!(!canvas.is_interacting());
}

#[tokio::test]
async fn resize_honors_min_size_floor() {
    let server = MockServer::start().await;
    mount_purchase_frequency(&server, Duration::ZERO).await;
    let canvas = canvas_for(&server);

    let id = canvas
        .create(
            "purchase-frequency.histogram",
            None,
            Some(Point::new(0.0, 0.0)),
        )
        .await
        .unwrap();

    canvas.pointer(
        &PointerEvent::Down { x: 400.0, y: 300.0 },
        Some(&Hit {
            id: id.clone(),
            region: HitRegion::ResizeHandle,
        }),
    );
    canvas.pointer(
        &PointerEvent::Move {
            x: -2000.0,
            y: -2000.0,
        },
        None,
    );
    canvas.pointer(&PointerEvent::Up { x: -2000.0, y: -2000.0 }, None);

    let w = canvas.widget(&id).unwrap();
    assert_eq!((w.size.width, w.size.height), (300.0, 200.0));
}

// Scenario C: keyword command spawns the mapped widget with its canned
// feedback; unmatched input returns the fallback and spawns nothing.
#[tokio::test]
async fn commands_spawn_or_fall_back() {
    let server = MockServer::start().await;
    mount_purchase_frequency(&server, Duration::ZERO).await;
    let canvas = canvas_for(&server);

    let dispatch = canvas.dispatch("show purchase frequency").await;
    assert_eq!(dispatch.feedback, "Here's the purchase frequency breakdown.");
    let id = dispatch.widget.expect("command should spawn a widget");
    assert_eq!(
        canvas.widget(&id).unwrap().type_key,
        TypeKey::new("purchase-frequency.histogram")
    );

    let dispatch = canvas.dispatch("xyz unrelated").await;
    assert!(dispatch.widget.is_none());
    assert_eq!(canvas.widgets().len(), 1);
    assert!(dispatch.feedback.contains("Try"));
}

#[tokio::test]
async fn command_fetch_failure_reports_error_feedback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tools/purchase-frequency"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let canvas = canvas_for(&server);

    let dispatch = canvas.dispatch("show purchase frequency").await;
    assert!(dispatch.widget.is_none());
    assert!(canvas.widgets().is_empty());
    assert!(dispatch.feedback.contains("failed"), "got: {}", dispatch.feedback);
}
