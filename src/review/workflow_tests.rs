//! Tests for the review-submission workflow.

use std::sync::{Arc, Mutex};

use rstest::{fixture, rstest};

use super::{
    AttachOutcome, MediaPickFailurePolicy, MockNavigationHost, ReviewSubmissionWorkflow,
    ShopLoadState, SubmissionState, WorkflowOptions,
};
use crate::api::{
    MockReviewSubmissionGateway, MockShopDirectory, ReviewError, ReviewPayload, ShopSummary,
    SubmitReceipt,
};
use crate::media::{MediaKind, MockMediaPicker, PickedAsset};
use crate::review::{OrderProduct, Rating, ReviewContext, Session};
use crate::telemetry::TelemetryEvent;
use crate::telemetry::test_support::RecordingTelemetrySink;

#[fixture]
fn workflow() -> ReviewSubmissionWorkflow {
    workflow_with(MediaPickFailurePolicy::Ignore)
}

fn workflow_with(policy: MediaPickFailurePolicy) -> ReviewSubmissionWorkflow {
    let context = ReviewContext::new(
        "shop-1",
        vec![
            OrderProduct::with_id("cart-1"),
            OrderProduct::with_id("cart-2"),
        ],
    )
    .expect("context should build");
    let session = Session::new("user-7").expect("session should build");
    ReviewSubmissionWorkflow::new(
        context,
        session,
        WorkflowOptions {
            media_pick_failure: policy,
        },
    )
}

fn asset(name: &str) -> PickedAsset {
    PickedAsset {
        uri: format!("file:///media/{name}"),
        mime_type: Some("image/jpeg".to_owned()),
        file_name: Some(name.to_owned()),
    }
}

fn picker_returning(result: Result<Option<PickedAsset>, ReviewError>) -> MockMediaPicker {
    let mut picker = MockMediaPicker::new();
    picker
        .expect_pick()
        .times(1)
        .returning(move |_| result.clone());
    picker
}

fn attachment_names(workflow: &ReviewSubmissionWorkflow) -> Vec<String> {
    workflow
        .draft()
        .attachments()
        .iter()
        .filter_map(|media| media.display_name.clone())
        .collect()
}

/// Gateway mock that records every payload it receives.
fn recording_gateway(
    result: Result<SubmitReceipt, ReviewError>,
) -> (MockReviewSubmissionGateway, Arc<Mutex<Vec<ReviewPayload>>>) {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&sent);
    let mut gateway = MockReviewSubmissionGateway::new();
    gateway.expect_submit().returning(move |payload| {
        sink.lock().expect("payload log").push(payload.clone());
        result.clone()
    });
    (gateway, sent)
}

#[rstest]
fn starts_loading_with_default_draft(workflow: ReviewSubmissionWorkflow) {
    assert!(workflow.is_loading());
    assert_eq!(workflow.shop_name(), "");
    assert_eq!(workflow.product_count(), 2);
    assert_eq!(workflow.draft().rating().get(), 1);
    assert_eq!(workflow.submission_state(), SubmissionState::Idle);
}

#[rstest]
#[tokio::test]
async fn load_shop_populates_summary(mut workflow: ReviewSubmissionWorkflow) {
    let mut directory = MockShopDirectory::new();
    directory
        .expect_fetch_by_id()
        .withf(|id| id == "shop-1")
        .times(1)
        .returning(|id| {
            Ok(ShopSummary {
                shop_id: id.to_owned(),
                shop_name: Some("Green Grocer".to_owned()),
                avatar: None,
            })
        });

    workflow.load_shop(&directory).await;

    assert!(!workflow.is_loading());
    assert_eq!(workflow.shop_name(), "Green Grocer");
}

#[rstest]
#[tokio::test]
async fn load_shop_failure_clears_loading_with_blank_name(mut workflow: ReviewSubmissionWorkflow) {
    let mut directory = MockShopDirectory::new();
    directory.expect_fetch_by_id().returning(|_| {
        Err(ReviewError::Network {
            message: "offline".to_owned(),
        })
    });

    workflow.load_shop(&directory).await;

    assert_eq!(
        workflow.shop_state(),
        &ShopLoadState::Loaded(ShopSummary::empty("shop-1"))
    );
    assert_eq!(workflow.shop_name(), "");
}

#[rstest]
fn shop_summary_is_not_refreshed(mut workflow: ReviewSubmissionWorkflow) {
    workflow.apply_shop_result(Ok(ShopSummary {
        shop_id: "shop-1".to_owned(),
        shop_name: Some("First".to_owned()),
        avatar: None,
    }));
    workflow.apply_shop_result(Ok(ShopSummary {
        shop_id: "shop-1".to_owned(),
        shop_name: Some("Second".to_owned()),
        avatar: None,
    }));

    assert_eq!(workflow.shop_name(), "First");
}

#[rstest]
fn set_rating_reads_back_every_star(mut workflow: ReviewSubmissionWorkflow) {
    for rating in Rating::all() {
        workflow.set_rating(rating);
        assert_eq!(workflow.draft().rating(), rating);
    }
}

#[rstest]
fn set_comment_is_verbatim(mut workflow: ReviewSubmissionWorkflow) {
    let comment = "  Rất ngon!\nWill buy again  ";

    workflow.set_comment(comment);

    assert_eq!(workflow.draft().comment(), comment);
}

#[rstest]
#[tokio::test]
async fn attach_appends_in_pick_order(mut workflow: ReviewSubmissionWorkflow) {
    for name in ["a.jpg", "b.jpg", "c.jpg"] {
        let picker = picker_returning(Ok(Some(asset(name))));
        let outcome = workflow
            .attach_media(MediaKind::Photo, &picker)
            .await
            .expect("attach should succeed");
        assert!(matches!(outcome, AttachOutcome::Attached(_)));
    }

    assert_eq!(attachment_names(&workflow), vec!["a.jpg", "b.jpg", "c.jpg"]);
}

#[rstest]
#[tokio::test]
async fn picker_is_asked_for_a_single_asset_of_the_kind(mut workflow: ReviewSubmissionWorkflow) {
    let mut picker = MockMediaPicker::new();
    picker
        .expect_pick()
        .withf(|request| request.kind == MediaKind::Video && request.selection_limit == 1)
        .times(1)
        .returning(|_| Ok(None));

    let outcome = workflow
        .attach_media(MediaKind::Video, &picker)
        .await
        .expect("cancel is not an error");

    assert_eq!(outcome, AttachOutcome::Cancelled);
    assert!(workflow.draft().attachments().is_empty());
}

#[tokio::test]
async fn ignored_pick_failure_leaves_draft_unchanged() {
    let sink = Arc::new(RecordingTelemetrySink::default());
    let mut workflow = workflow_with(MediaPickFailurePolicy::Ignore).with_telemetry(sink.clone());
    let before = workflow.draft().clone();
    let picker = picker_returning(Err(ReviewError::Io {
        message: "permission denied".to_owned(),
    }));

    let outcome = workflow
        .attach_media(MediaKind::Photo, &picker)
        .await
        .expect("ignored failure is not an error");

    assert_eq!(outcome, AttachOutcome::Ignored);
    assert_eq!(workflow.draft(), &before);
    assert!(matches!(
        sink.take().as_slice(),
        [TelemetryEvent::MediaPickFailed { surfaced: false, .. }]
    ));
}

#[tokio::test]
async fn surfaced_pick_failure_is_returned() {
    let mut workflow = workflow_with(MediaPickFailurePolicy::Surface);
    let error = ReviewError::MediaNotFound {
        path: "/tmp/gone.jpg".to_owned(),
    };
    let picker = picker_returning(Err(error.clone()));

    let result = workflow.attach_media(MediaKind::Photo, &picker).await;

    assert_eq!(result, Err(error));
    assert!(workflow.draft().attachments().is_empty());
}

#[rstest]
#[case::first(0, vec!["b.jpg", "c.jpg", "d.jpg"])]
#[case::middle(2, vec!["a.jpg", "b.jpg", "d.jpg"])]
#[case::last(3, vec!["a.jpg", "b.jpg", "c.jpg"])]
fn remove_media_drops_exactly_one_and_keeps_order(
    mut workflow: ReviewSubmissionWorkflow,
    #[case] index: usize,
    #[case] expected: Vec<&str>,
) {
    for name in ["a.jpg", "b.jpg", "c.jpg", "d.jpg"] {
        let _outcome = workflow.apply_pick_result(MediaKind::Photo, Ok(Some(asset(name))));
    }

    let removed = workflow.remove_media(index);

    assert!(removed.is_some());
    assert_eq!(attachment_names(&workflow), expected);
}

#[rstest]
fn repeated_removal_recomputes_positions(mut workflow: ReviewSubmissionWorkflow) {
    for name in ["a.jpg", "b.jpg", "c.jpg"] {
        let _outcome = workflow.apply_pick_result(MediaKind::Photo, Ok(Some(asset(name))));
    }

    let _first = workflow.remove_media(0);
    let _second = workflow.remove_media(0);

    assert_eq!(attachment_names(&workflow), vec!["c.jpg"]);
    assert!(workflow.remove_media(5).is_none());
}

#[rstest]
fn default_draft_builds_a_well_formed_payload(workflow: ReviewSubmissionWorkflow) {
    let payload = workflow.build_payload().expect("payload should build");

    assert_eq!(payload.user_id, "user-7");
    assert_eq!(payload.shop_id, "shop-1");
    assert_eq!(payload.order_id, "cart-1");
    assert_eq!(payload.rating, "1");
    assert_eq!(payload.comment, "");
    assert!(payload.files.is_empty());
}

#[rstest]
fn unnamed_attachments_get_positional_fallback_names(mut workflow: ReviewSubmissionWorkflow) {
    let _named = workflow.apply_pick_result(MediaKind::Photo, Ok(Some(asset("cover.jpg"))));
    let _unnamed = workflow.apply_pick_result(
        MediaKind::Video,
        Ok(Some(PickedAsset {
            uri: "file:///media/clip".to_owned(),
            mime_type: Some("video/mp4".to_owned()),
            file_name: None,
        })),
    );

    let payload = workflow.build_payload().expect("payload should build");
    let names: Vec<_> = payload.files.iter().map(|file| file.name.as_str()).collect();

    assert_eq!(names, vec!["cover.jpg", "file_1"]);
    let second = payload.files.get(1).expect("second file");
    assert_eq!(second.mime_type.as_deref(), Some("video/mp4"));
}

#[test]
fn order_without_products_cannot_submit() {
    let context = ReviewContext::new("shop-1", Vec::new()).expect("context should build");
    let session = Session::new("user-7").expect("session should build");
    let mut workflow = ReviewSubmissionWorkflow::new(context, session, WorkflowOptions::default());

    let result = workflow.begin_submit();

    assert_eq!(result, Err(ReviewError::MissingOrderReference));
    assert_eq!(workflow.submission_state(), SubmissionState::Idle);
}

#[rstest]
#[tokio::test]
async fn failed_submission_preserves_draft_for_retry(mut workflow: ReviewSubmissionWorkflow) {
    workflow.set_rating(Rating::new(4).expect("valid rating"));
    workflow.set_comment("Crisp apples");
    let _attached = workflow.apply_pick_result(MediaKind::Photo, Ok(Some(asset("a.jpg"))));
    let before = workflow.draft().clone();
    let (gateway, sent) = recording_gateway(Err(ReviewError::Api {
        message: "status 500".to_owned(),
    }));

    let result = workflow.submit(&gateway).await;

    assert!(result.is_err());
    assert_eq!(workflow.draft(), &before);
    assert_eq!(workflow.submission_state(), SubmissionState::Idle);

    let retry = workflow.submit(&gateway).await;
    assert!(retry.is_err());
    assert_eq!(sent.lock().expect("payload log").len(), 2, "one send per press");
}

#[rstest]
#[tokio::test]
async fn success_navigates_back_once_and_blocks_further_sends(
    mut workflow: ReviewSubmissionWorkflow,
) {
    let (gateway, sent) = recording_gateway(Ok(SubmitReceipt::default()));
    let mut navigator = MockNavigationHost::new();
    navigator.expect_go_back().times(1).return_const(());

    let receipt = workflow.submit(&gateway).await;
    assert_eq!(receipt, Ok(SubmitReceipt::default()));
    assert_eq!(workflow.submission_state(), SubmissionState::Succeeded);

    assert!(workflow.acknowledge_success(&navigator));
    assert!(!workflow.acknowledge_success(&navigator));

    let again = workflow.submit(&gateway).await;
    assert_eq!(again, Err(ReviewError::AlreadySubmitted));
    assert_eq!(sent.lock().expect("payload log").len(), 1);
}

#[rstest]
fn acknowledge_before_success_does_not_navigate(mut workflow: ReviewSubmissionWorkflow) {
    let mut navigator = MockNavigationHost::new();
    navigator.expect_go_back().times(0);

    assert!(!workflow.acknowledge_success(&navigator));
}

#[rstest]
fn second_submit_while_in_flight_is_rejected(mut workflow: ReviewSubmissionWorkflow) {
    let first = workflow.begin_submit();
    assert!(first.is_ok());
    assert_eq!(workflow.submission_state(), SubmissionState::Submitting);

    let second = workflow.begin_submit();

    assert_eq!(second, Err(ReviewError::SubmissionInFlight));
}

#[rstest]
fn stale_result_without_submission_is_ignored(mut workflow: ReviewSubmissionWorkflow) {
    let result = workflow.finish_submit(Ok(SubmitReceipt::default()));

    assert!(result.is_ok());
    assert_eq!(workflow.submission_state(), SubmissionState::Idle);
}

#[rstest]
fn success_records_telemetry(workflow: ReviewSubmissionWorkflow) {
    let sink = Arc::new(RecordingTelemetrySink::default());
    let mut workflow = workflow.with_telemetry(sink.clone());
    workflow.set_rating(Rating::new(5).expect("valid rating"));

    let _payload = workflow.begin_submit().expect("submit should start");
    let _receipt = workflow.finish_submit(Ok(SubmitReceipt::default()));

    assert_eq!(
        sink.take(),
        vec![TelemetryEvent::ReviewSubmitted {
            shop_id: "shop-1".to_owned(),
            rating: 5,
            attachment_count: 0,
        }]
    );
}

#[rstest]
#[case("ignore", Some(MediaPickFailurePolicy::Ignore))]
#[case("SURFACE", Some(MediaPickFailurePolicy::Surface))]
#[case("explode", None)]
fn pick_failure_policy_parses(#[case] input: &str, #[case] expected: Option<MediaPickFailurePolicy>) {
    assert_eq!(MediaPickFailurePolicy::parse(input), expected);
}
