//! Event form and list flows against an in-memory API

mod support;

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::America::Chicago;
use serde_json::json;
use shared::QrPayload;
use valet_client::ClientError;
use valet_console::{EventListController, FormField, Modal, SubmitOutcome, messages};

use support::{ApiCall, FakeApi, api_error, event};

fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn upcoming() -> DateTime<Utc> {
    Utc::now() + Duration::days(7)
}

async fn loaded(events: Vec<shared::ValetEvent>) -> EventListController<FakeApi> {
    let mut list = EventListController::new(FakeApi::with_events(events), Chicago);
    list.refresh().await.unwrap();
    list
}

#[tokio::test]
async fn test_create_sends_null_start_date() {
    let mut list = EventListController::new(FakeApi::new(), Chicago);
    let mut form = list.begin_create();
    assert_eq!(list.view().modal(), &Modal::AddEvent);

    form.set_event_id("EVT1");
    form.set_end_date(Some(utc(2025, 6, 1, 10)));
    let outcome = list.submit_form(&mut form).await.unwrap();
    assert_eq!(outcome.message(), messages::EVENT_CREATED);

    let calls = list.api().calls();
    assert_eq!(calls.len(), 2, "create then refetch: {calls:?}");
    let ApiCall::Create(payload) = &calls[0] else {
        panic!("expected create, got {:?}", calls[0]);
    };
    assert_eq!(
        serde_json::to_value(payload).unwrap(),
        json!({
            "eventId": "EVT1",
            "title": "",
            "location": "",
            "startDate": null,
            "endDate": "2025-06-01T10:00:00Z"
        })
    );
    assert_eq!(calls[1], ApiCall::List);

    // QR for the new event is shown, form is back to empty
    let SubmitOutcome::Created { qr, .. } = outcome else {
        panic!("expected create outcome");
    };
    assert_eq!(qr, QrPayload::for_payload(payload, Chicago).encode().unwrap());
    assert_eq!(
        list.view().modal(),
        &Modal::QrCode {
            event_id: "EVT1".into(),
            payload: qr
        }
    );
    assert_eq!(form.values().event_id, "");
    assert_eq!(list.view().rows().len(), 1);
}

#[tokio::test]
async fn test_end_before_start_never_reaches_network() {
    let mut list = EventListController::new(FakeApi::new(), Chicago);
    let mut form = list.begin_create();
    form.set_event_id("EVT1");
    form.set_date_input(FormField::StartDate, "2025-06-02").unwrap();
    form.set_date_input(FormField::EndDate, "2025-06-01").unwrap();

    let err = list.submit_form(&mut form).await.unwrap_err();
    assert_eq!(err.user_message(), messages::END_BEFORE_START);
    assert_eq!(
        form.visible_error(FormField::EndDate),
        Some(messages::END_BEFORE_START)
    );
    assert!(list.api().calls().is_empty());
}

#[tokio::test]
async fn test_missing_required_fields() {
    let mut list = EventListController::new(FakeApi::new(), Chicago);
    let mut form = list.begin_create();

    let err = list.submit_form(&mut form).await.unwrap_err();
    let errors = err.field_errors().unwrap();
    assert_eq!(errors.get(FormField::EventId), Some(messages::EVENT_ID_REQUIRED));
    assert_eq!(errors.get(FormField::EndDate), Some(messages::END_DATE_REQUIRED));
    assert!(list.api().calls().is_empty());
}

#[tokio::test]
async fn test_create_error_surfaces_server_description() {
    let api = FakeApi::new();
    api.fail_next(api_error(409, "Event ID already exists"));
    let mut list = EventListController::new(api, Chicago);
    let mut form = list.begin_create();
    form.set_event_id("EVT1");
    form.set_end_date(Some(upcoming()));

    let err = list.submit_form(&mut form).await.unwrap_err();
    assert_eq!(err.user_message(), "Event ID already exists");
    // values kept for another attempt
    assert_eq!(form.values().event_id, "EVT1");

    list.api().fail_next(ClientError::Internal("boom".into()));
    let err = list.submit_form(&mut form).await.unwrap_err();
    assert_eq!(err.user_message(), messages::SUBMIT_FAILED);
}

#[tokio::test]
async fn test_delete_removes_row_after_one_call() {
    let end = upcoming();
    let mut list = loaded(vec![
        event("a1", "EVT1", Some(end)),
        event("a2", "EVT2", Some(end)),
        event("a3", "EVT3", Some(end)),
    ])
    .await;

    list.delete_event("a2").await.unwrap();

    let deletes: Vec<_> = list
        .api()
        .calls()
        .into_iter()
        .filter(|c| matches!(c, ApiCall::Delete(_)))
        .collect();
    assert_eq!(deletes, vec![ApiCall::Delete("a2".into())]);
    let ids: Vec<_> = list.view().rows().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a3"]);
}

#[tokio::test]
async fn test_failed_delete_keeps_row() {
    let mut list = loaded(vec![event("a1", "EVT1", Some(upcoming()))]).await;

    list.api().fail_next(api_error(500, "Database unavailable"));
    let err = list.delete_event("a1").await.unwrap_err();
    assert_eq!(err.user_message(), "Database unavailable");
    assert_eq!(list.view().rows().len(), 1);

    list.api().reject_next(500);
    let err = list.delete_event("a1").await.unwrap_err();
    assert_eq!(err.user_message(), messages::DELETE_FAILED);
    assert_eq!(list.view().rows().len(), 1);
}

#[tokio::test]
async fn test_delete_selection_requires_selection() {
    let mut list = loaded(vec![event("a1", "EVT1", Some(upcoming()))]).await;

    let err = list.delete_selection().await.unwrap_err();
    assert_eq!(err.user_message(), messages::SELECT_TO_DELETE);

    list.view_mut().select("a1");
    list.delete_selection().await.unwrap();
    assert!(list.view().rows().is_empty());
    assert_eq!(list.view().selected(), None);
}

#[tokio::test]
async fn test_bulk_delete_sends_checked_ids_once() {
    let end = upcoming();
    let mut list = loaded(vec![
        event("a1", "EVT1", Some(end)),
        event("a2", "EVT2", Some(end)),
        event("a3", "EVT3", Some(end)),
    ])
    .await;

    let err = list.delete_checked().await.unwrap_err();
    assert_eq!(err.user_message(), messages::SELECT_TO_DELETE);

    list.view_mut().toggle_checked("a3");
    list.view_mut().toggle_checked("a1");
    assert_eq!(list.delete_checked().await.unwrap(), 2);

    assert_eq!(
        list.api().calls().last(),
        Some(&ApiCall::DeleteMany(vec!["a1".into(), "a3".into()]))
    );
    let ids: Vec<_> = list.view().rows().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a2"]);
    assert!(list.view().checked_ids().is_empty());
}

#[tokio::test]
async fn test_expired_event_cannot_be_edited() {
    let mut list = loaded(vec![event("a1", "EVT1", Some(Utc::now() - Duration::hours(1)))]).await;

    let err = list.begin_edit("a1").unwrap_err();
    assert_eq!(err.user_message(), messages::EVENT_EXPIRED);
    assert_eq!(list.view().modal(), &Modal::None);

    let err = list.begin_edit("missing").unwrap_err();
    assert_eq!(err.user_message(), messages::SELECT_TO_UPDATE);
}

#[tokio::test]
async fn test_update_flow() {
    let end = upcoming();
    let mut list = loaded(vec![event("a1", "EVT1", Some(end))]).await;

    let mut form = list.begin_edit("a1").unwrap();
    assert_eq!(list.view().selected(), Some("a1"));
    assert_eq!(form.values().title, "EVT1 title");

    form.set_title("Summer Gala");
    let outcome = list.submit_form(&mut form).await.unwrap();
    assert_eq!(outcome.message(), messages::EVENT_UPDATED);

    let update = list
        .api()
        .calls()
        .into_iter()
        .find_map(|c| match c {
            ApiCall::Update(id, payload) => Some((id, payload)),
            _ => None,
        })
        .unwrap();
    assert_eq!(update.0, "a1");
    assert_eq!(update.1.title, "Summer Gala");
    assert_eq!(update.1.location, "Main Garage");

    assert_eq!(list.view().modal(), &Modal::None);
    assert_eq!(list.view().selected(), None);
    assert_eq!(list.view().rows()[0].title.as_deref(), Some("Summer Gala"));
}

#[tokio::test]
async fn test_update_sends_entered_end_timestamp() {
    let end = Utc.with_ymd_and_hms(2099, 6, 1, 23, 30, 0).unwrap();
    let mut list = loaded(vec![event("a1", "EVT1", Some(end))]).await;

    let mut form = list.begin_edit("a1").unwrap();
    form.set_date_input(FormField::EndDate, "2099-07-01T10:00:00Z").unwrap();
    list.submit_form(&mut form).await.unwrap();

    let sent = list
        .api()
        .calls()
        .into_iter()
        .find_map(|c| match c {
            ApiCall::Update(_, payload) => Some(payload),
            _ => None,
        })
        .unwrap();
    assert_eq!(sent.end_date, utc(2099, 7, 1, 10));
    assert_eq!(list.view().rows()[0].end_date, Some(utc(2099, 7, 1, 10)));
}

#[tokio::test]
async fn test_update_rejected_status() {
    let mut list = loaded(vec![event("a1", "EVT1", Some(upcoming()))]).await;
    let mut form = list.begin_edit("a1").unwrap();

    list.api().reject_next(400);
    let err = list.submit_form(&mut form).await.unwrap_err();
    assert_eq!(err.user_message(), messages::UPDATE_FAILED);
    // still editing the same row
    assert_eq!(list.view().modal(), &Modal::EditEvent { id: "a1".into() });
}

#[tokio::test]
async fn test_refresh_failure_keeps_cache() {
    let mut list = loaded(vec![event("a1", "EVT1", Some(upcoming()))]).await;

    list.api().fail_next(ClientError::Internal("down".into()));
    let err = list.refresh().await.unwrap_err();
    assert_eq!(err.user_message(), messages::FETCH_FAILED);
    assert_eq!(list.view().rows().len(), 1);
}

#[tokio::test]
async fn test_qr_reflects_admin_toggle() {
    let mut list = loaded(vec![event("a1", "EVT1", Some(utc(2025, 6, 1, 23)))]).await;

    list.view_mut().toggle_admin("EVT1");
    let qr = list.generate_qr("a1").unwrap();
    let value: serde_json::Value = serde_json::from_str(&qr).unwrap();
    assert_eq!(value["scanType"], "valetAdmin");
    assert_eq!(value["valetAdmin"], true);
    assert_eq!(value["endDate"], "2025-06-01");
    assert_eq!(value["endTime"], "18:00:00");
    assert_eq!(value["timezone"], "America/Chicago");

    assert_eq!(list.generate_qr("a1").unwrap(), qr);
}
