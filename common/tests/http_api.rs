//! `HttpScheduleApi` against a wiremock backend.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use timetable_common::api::{HttpScheduleApi, ScheduleApi};
use timetable_common::form::EventForm;
use timetable_common::loader::{FetchOutcome, ScheduleLoader};
use timetable_common::mutation::MutationFlow;
use timetable_common::permissions::Role;
use timetable_common::{ScheduleError, Session};

fn schedule_body() -> serde_json::Value {
    json!({
        "success": true,
        "data": [
            {
                "_id": "e1",
                "subject": {"_id": "s1", "subject_name": "Math"},
                "teacher": {"_id": "t1", "name": "Alice"},
                "class": {"_id": "c5a"},
                "startTime": "2026-10-19T09:00:00.000Z",
                "endTime": "2026-10-19T10:00:00.000Z"
            },
            {
                "_id": "e2",
                "subject": {"_id": "s2", "subject_name": "Science"},
                "teacher": {"_id": "t2", "name": "Bob"},
                "class": {"_id": "c5a"},
                "startTime": "2026-10-19T10:00:00.000Z",
                "endTime": "2026-10-19T11:00:00.000Z"
            }
        ]
    })
}

#[tokio::test]
async fn test_list_classes_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/class/all"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"_id": "c5a", "class_text": "5A"}, {"_id": "c6b", "class_text": "6B"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpScheduleApi::new(server.uri()).unwrap();
    let classes = api.list_classes(&Session::with_token("tok-123")).await.unwrap();

    assert_eq!(classes.len(), 2);
    assert_eq!(classes[0].id, "c5a");
    assert_eq!(classes[0].label, "5A");
}

#[tokio::test]
async fn test_loader_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/schedule/fetch-with-class/c5a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(schedule_body()))
        .mount(&server)
        .await;

    let api = HttpScheduleApi::new(server.uri()).unwrap();
    let mut loader = ScheduleLoader::new(api, Session::with_token("tok"));

    assert_eq!(loader.load("c5a").await, FetchOutcome::Applied(2));
    assert_eq!(loader.events()[0].title(), "Math - Alice");
    assert_eq!(loader.events()[1].title(), "Science - Bob");
}

#[tokio::test]
async fn test_error_payload_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/schedule/fetch-with-class/c5a"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "Access denied for this class"})),
        )
        .mount(&server)
        .await;

    let api = HttpScheduleApi::new(server.uri()).unwrap();
    let err = api
        .list_schedule(&Session::with_token("tok"), "c5a")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ScheduleError::Api {
            status: 403,
            message: Some("Access denied for this class".into())
        }
    );
    assert_eq!(err.user_message("Failed"), "Access denied for this class");
}

#[tokio::test]
async fn test_success_false_envelope_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/class/all"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": false, "message": "Session expired"})),
        )
        .mount(&server)
        .await;

    let api = HttpScheduleApi::new(server.uri()).unwrap();
    let err = api.list_classes(&Session::with_token("tok")).await.unwrap_err();
    assert_eq!(err.user_message("Failed"), "Session expired");
}

#[tokio::test]
async fn test_missing_token_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(schedule_body()))
        .expect(0)
        .mount(&server)
        .await;

    let api = HttpScheduleApi::new(server.uri()).unwrap();
    let err = api
        .list_schedule(&Session::anonymous(), "c5a")
        .await
        .unwrap_err();
    assert_eq!(err, ScheduleError::MissingCredentials);
}

#[tokio::test]
async fn test_create_posts_body_then_reloads_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/schedule/fetch-with-class/c5a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(schedule_body()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/schedule/create"))
        .and(header("authorization", "Bearer tok"))
        .and(body_partial_json(json!({
            "teacher": "t1",
            "subject": "s1",
            "class": "c5a",
            "date": "2026-10-21",
            "startTime": "08:00",
            "endTime": "08:45",
            "startTimeISO": "2026-10-21T08:00:00.000Z",
            "endTimeISO": "2026-10-21T08:45:00.000Z"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "Schedule created"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpScheduleApi::new(server.uri()).unwrap();
    let mut loader = ScheduleLoader::new(api, Session::with_token("tok"));
    loader.load("c5a").await;

    let form = EventForm {
        teacher_id: "t1".into(),
        subject_id: "s1".into(),
        date: "2026-10-21".into(),
        period: Some(0),
    };
    let flow = MutationFlow::new(Role::Teacher.capabilities());
    let outcome = flow.create(&mut loader, &form, &chrono::Utc).await.unwrap();
    assert_eq!(outcome.refresh, FetchOutcome::Applied(2));
}

#[tokio::test]
async fn test_delete_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/schedule/e1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpScheduleApi::new(server.uri()).unwrap();
    api.delete_entry(&Session::with_token("tok"), "e1").await.unwrap();
}

#[tokio::test]
async fn test_class_id_is_percent_encoded_in_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/schedule/fetch-with-class/5%20A%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpScheduleApi::new(server.uri()).unwrap();
    let entries = api
        .list_schedule(&Session::with_token("tok"), "5 A/b")
        .await
        .unwrap();
    assert!(entries.is_empty());
}
