//! End-to-end tests for the review-submission workflow against a mock
//! storefront API.

use std::sync::Arc;

use camino::Utf8PathBuf;
use shop_review::telemetry::test_support::RecordingTelemetrySink;
use shop_review::{
    ApiEndpoint, ApiSettings, AttachOutcome, HttpReviewGateway, HttpShopDirectory,
    LocalFileMediaPicker, MediaKind, Rating, ReviewContext, ReviewError, ReviewSubmissionWorkflow,
    Session, SubmissionState, TelemetryEvent, WorkflowOptions,
};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORDER: &str = r#"{
    "productData": {
        "shopDetail": { "id_shop": "shop-1" },
        "products": [
            { "_id": "cart-1", "id_product": { "product_name": "Apples" }, "quantity": 2 },
            { "_id": "cart-2", "id_product": { "product_name": "Pears" }, "quantity": 1 }
        ]
    }
}"#;

fn settings_for(server: &MockServer) -> ApiSettings {
    let endpoint =
        ApiEndpoint::parse(&format!("{}/api", server.uri())).expect("mock URI should parse");
    ApiSettings::new(endpoint)
}

fn workflow_with(sink: &Arc<RecordingTelemetrySink>) -> ReviewSubmissionWorkflow {
    let context = ReviewContext::from_json_str(ORDER).expect("order should parse");
    let session = Session::new("user-7").expect("session should build");
    ReviewSubmissionWorkflow::new(context, session, WorkflowOptions::default())
        .with_telemetry(Arc::clone(sink) as Arc<dyn shop_review::TelemetrySink>)
}

async fn mount_shop(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/get-user-by-id"))
        .and(query_param("id_user", "shop-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "_id": "shop-1", "data_user": { "shop_name": "Green Grocer" } }
        ])))
        .mount(server)
        .await;
}

fn write_media(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> Utf8PathBuf {
    let file_path = dir.path().join(name);
    std::fs::write(&file_path, contents).expect("media file should be written");
    Utf8PathBuf::from_path_buf(file_path).expect("temp path should be UTF-8")
}

#[tokio::test]
async fn review_with_photo_is_submitted_once() {
    let server = MockServer::start().await;
    mount_shop(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/add-review"))
        .and(body_string_contains("name=\"orderId\""))
        .and(body_string_contains("cart-1"))
        .and(body_string_contains("Crisp apples"))
        .and(body_string_contains("filename=\"crate.jpg\""))
        .and(body_string_contains("JPEGDATA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "created",
            "data": { "_id": "review-1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("temp dir should be created");
    let photo = write_media(&dir, "crate.jpg", b"JPEGDATA");
    let sink = Arc::new(RecordingTelemetrySink::default());
    let directory = HttpShopDirectory::new(settings_for(&server)).expect("client should build");
    let gateway = HttpReviewGateway::new(settings_for(&server)).expect("client should build");
    let mut workflow = workflow_with(&sink);

    workflow.load_shop(&directory).await;
    assert_eq!(workflow.shop_name(), "Green Grocer");
    assert_eq!(workflow.product_count(), 2);

    workflow.set_rating(Rating::new(5).expect("rating should be valid"));
    workflow.set_comment("Crisp apples");
    let outcome = workflow
        .attach_media(MediaKind::Photo, &LocalFileMediaPicker::new(Some(photo)))
        .await
        .expect("photo should attach");
    assert!(matches!(outcome, AttachOutcome::Attached(_)));

    let receipt = workflow
        .submit(&gateway)
        .await
        .expect("submission should succeed");
    assert_eq!(receipt.review_id.as_deref(), Some("review-1"));
    assert_eq!(workflow.submission_state(), SubmissionState::Succeeded);

    let second = workflow.submit(&gateway).await;
    assert!(
        matches!(second, Err(ReviewError::AlreadySubmitted)),
        "expected AlreadySubmitted, got {second:?}"
    );
    assert_eq!(
        sink.take(),
        vec![TelemetryEvent::ReviewSubmitted {
            shop_id: "shop-1".to_owned(),
            rating: 5,
            attachment_count: 1,
        }]
    );
}

#[tokio::test]
async fn failed_submission_can_be_retried_with_the_same_draft() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/add-review"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database offline"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/add-review"))
        .and(body_string_contains("Second try"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingTelemetrySink::default());
    let gateway = HttpReviewGateway::new(settings_for(&server)).expect("client should build");
    let mut workflow = workflow_with(&sink);
    workflow.set_comment("Second try");

    let first = workflow.submit(&gateway).await;
    assert!(
        matches!(first, Err(ReviewError::Api { .. })),
        "expected Api error, got {first:?}"
    );
    assert_eq!(workflow.submission_state(), SubmissionState::Idle);
    assert_eq!(workflow.draft().comment(), "Second try");

    workflow
        .submit(&gateway)
        .await
        .expect("retry should succeed");

    let events = sink.take();
    assert!(matches!(
        events.first(),
        Some(TelemetryEvent::ReviewSubmissionFailed { .. })
    ));
    assert!(matches!(
        events.get(1),
        Some(TelemetryEvent::ReviewSubmitted { .. })
    ));
}

#[tokio::test]
async fn unreadable_shop_leaves_name_blank_and_submission_works() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/get-user-by-id"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/add-review"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingTelemetrySink::default());
    let directory = HttpShopDirectory::new(settings_for(&server)).expect("client should build");
    let gateway = HttpReviewGateway::new(settings_for(&server)).expect("client should build");
    let mut workflow = workflow_with(&sink);

    workflow.load_shop(&directory).await;
    assert!(!workflow.is_loading());
    assert_eq!(workflow.shop_name(), "");

    workflow
        .submit(&gateway)
        .await
        .expect("submission should succeed");
}

#[tokio::test]
async fn missing_file_is_ignored_and_recorded() {
    let sink = Arc::new(RecordingTelemetrySink::default());
    let mut workflow = workflow_with(&sink);
    let picker = LocalFileMediaPicker::new(Some(Utf8PathBuf::from("/no/such/clip.mp4")));

    let outcome = workflow
        .attach_media(MediaKind::Video, &picker)
        .await
        .expect("ignored failures should not error");

    assert_eq!(outcome, AttachOutcome::Ignored);
    assert!(workflow.draft().attachments().is_empty());
    assert!(matches!(
        sink.take().as_slice(),
        [TelemetryEvent::MediaPickFailed { surfaced: false, .. }]
    ));
}
