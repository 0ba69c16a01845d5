//! End-to-end checks of the HTTP backend and session controller against a
//! stub BloodConnect server.

use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use bloodconnect::config::SessionConfig;
use bloodconnect::net::api::{Backend, HttpBackend};
use bloodconnect::net::error::ApiError;
use bloodconnect::net::types::{DonorPatch, DonorStatus, LoginReply};
use bloodconnect::page::View;
use bloodconnect::page::memory::MemoryPage;
use bloodconnect::session::{LoginOutcome, SessionController, SessionError};
use bloodconnect::state::session::Role;
use bloodconnect::util::storage::{KeyValueStore, MemoryStore, SESSION_KEY, Storage};
use bloodconnect::util::timer::TokioTimer;
use bloodconnect::util::toast::Toast;

type Recorded = Arc<Mutex<Vec<Value>>>;

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    match (body["email"].as_str(), body["password"].as_str()) {
        (Some("sara@blood.pk"), Some("secret")) => (
            StatusCode::OK,
            Json(json!({"success": true, "role": "donor", "userId": "DNR-004", "name": "Sara"})),
        ),
        (Some("ali@blood.pk"), Some("secret")) => (
            StatusCode::OK,
            Json(json!({"success": true, "role": "recipient", "userId": "REC-002", "name": "Ali"})),
        ),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({"success": false, "message": "Invalid credentials"}))),
    }
}

async fn record(State(seen): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    seen.lock().unwrap().push(body);
    Json(json!({"success": true}))
}

async fn accept(State(seen): State<Recorded>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let missing = body["requestId"] == "REQ-404";
    seen.lock().unwrap().push(body);
    if missing {
        (StatusCode::NOT_FOUND, Json(json!({"success": false, "message": "Request not found"})))
    } else {
        (StatusCode::OK, Json(json!({"success": true})))
    }
}

async fn dashboard(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id != "DNR-004" {
        return (StatusCode::NOT_FOUND, Json(json!({"success": false})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "id": id, "name": "Sara", "bloodGroup": "O-", "status": "Available",
            "totalDonations": 5, "badgeLevel": "Silver", "city": "Lahore", "area": "Gulberg"
        })),
    )
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "timestamp": "2026-01-01T00:00:00Z", "donors": 12, "recipients": 4}))
}

async fn spawn_stub() -> (String, Recorded) {
    let seen: Recorded = Arc::default();
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/donor/status", post(record))
        .route("/api/donor/update", post(record))
        .route("/api/donor/accept-request", post(accept))
        .route("/api/donor/dashboard/{id}", get(dashboard))
        .route("/api/health", get(health))
        .with_state(seen.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api"), seen)
}

/// Base URL of a server that answers every request with a plain-text 500.
async fn spawn_broken() -> String {
    let app = Router::new().fallback(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

struct Harness {
    controller: SessionController,
    page: Rc<MemoryPage>,
    store: Rc<MemoryStore>,
}

fn harness(base_url: &str) -> Harness {
    let page = Rc::new(MemoryPage::new());
    let store = Rc::new(MemoryStore::new());
    let config = SessionConfig { fallback_redirect_delay: Duration::ZERO, ..SessionConfig::default() };
    let controller = SessionController::new(
        config,
        Storage::new(store.clone()),
        Rc::new(HttpBackend::new(base_url)),
        page.clone(),
        Rc::new(TokioTimer),
    );
    Harness { controller, page, store }
}

// =============================================================================
// LOGIN
// =============================================================================

#[tokio::test]
async fn login_accepted_by_server() {
    let (base, _) = spawn_stub().await;
    let h = harness(&base);

    let outcome = h.controller.login("sara@blood.pk", "secret").await.unwrap();

    assert!(matches!(outcome, LoginOutcome::Authenticated(_)));
    let session = outcome.session();
    assert_eq!((session.role, session.user_id.as_str(), session.name.as_str()), (Role::Donor, "DNR-004", "Sara"));
    let stored: Value = serde_json::from_str(&h.store.get(SESSION_KEY).unwrap()).unwrap();
    assert_eq!(stored, json!({"success": true, "role": "donor", "userId": "DNR-004", "name": "Sara"}));
    assert_eq!(h.page.navigations(), vec![View::DonorDashboard]);
}

#[tokio::test]
async fn login_recipient_redirects_to_recipient_dashboard() {
    let (base, _) = spawn_stub().await;
    let h = harness(&base);
    h.controller.login("ali@blood.pk", "secret").await.unwrap();
    assert_eq!(h.page.last_navigation(), Some(View::RecipientDashboard));
}

#[tokio::test]
async fn login_rejected_with_401_body() {
    let (base, _) = spawn_stub().await;
    let h = harness(&base);

    let err = h.controller.login("sara@blood.pk", "wrong").await.unwrap_err();

    assert!(matches!(err, SessionError::Rejected { ref message } if message == "Invalid credentials"));
    assert_eq!(h.page.toasts(), vec![Toast::error("Invalid credentials")]);
    assert!(h.store.get(SESSION_KEY).is_none());
    assert!(h.page.navigations().is_empty());
}

#[tokio::test]
async fn non_json_answer_degrades_to_local_session() {
    let base = spawn_broken().await;
    let h = harness(&base);

    let outcome = h.controller.login("someone@blood.pk", "secret").await.unwrap();

    assert!(outcome.is_degraded());
    assert_eq!(outcome.session().user_id, "FALLBACK-001");
    assert!(h.store.get(SESSION_KEY).is_some());
    assert_eq!(h.page.last_navigation(), Some(View::DonorDashboard));
}

#[tokio::test]
async fn raw_backend_reports_rejection_as_reply() {
    let (base, _) = spawn_stub().await;
    let reply = HttpBackend::new(base).login("x@y.z", "nope").await.unwrap();
    assert_eq!(reply, LoginReply::Rejected { message: Some("Invalid credentials".to_owned()) });
}

// =============================================================================
// DONOR
// =============================================================================

#[tokio::test]
async fn status_update_posts_wire_value() {
    let (base, seen) = spawn_stub().await;
    let h = harness(&base);

    assert!(h.controller.update_donor_status("DNR-004", DonorStatus::Unavailable).await);

    assert_eq!(seen.lock().unwrap().as_slice(), &[json!({"donorId": "DNR-004", "status": "Unavailable"})]);
    assert_eq!(h.page.last_toast(), Some(Toast::success("Status updated to Unavailable")));
}

#[tokio::test]
async fn accept_request_ok_and_not_found() {
    let (base, seen) = spawn_stub().await;
    let h = harness(&base);

    assert!(h.controller.accept_request("DNR-004", "REQ-1").await);
    assert!(!h.controller.accept_request("DNR-004", "REQ-404").await);

    assert_eq!(seen.lock().unwrap().len(), 2);
    assert_eq!(
        h.page.toasts(),
        vec![Toast::success("Life saved! Request completed."), Toast::error("Failed to accept request")]
    );
    assert!(h.controller.current_user().is_none());
}

#[tokio::test]
async fn update_info_flattens_patch() {
    let (base, seen) = spawn_stub().await;
    let h = harness(&base);
    let patch = DonorPatch { phone: Some("0300-1234567".to_owned()), area: Some("DHA".to_owned()), ..DonorPatch::default() };

    assert!(h.controller.update_donor_info("DNR-004", &patch).await);

    assert_eq!(seen.lock().unwrap().as_slice(), &[json!({"donorId": "DNR-004", "phone": "0300-1234567", "area": "DHA"})]);
}

#[tokio::test]
async fn dashboard_fetch() {
    let (base, _) = spawn_stub().await;
    let backend = HttpBackend::new(base);

    let dashboard = backend.donor_dashboard("DNR-004").await.unwrap();
    assert_eq!(dashboard.blood_group, "O-");
    assert_eq!(dashboard.total_donations, 5);

    let err = backend.donor_dashboard("DNR-999").await.unwrap_err();
    assert!(matches!(err, ApiError::Status(404)));
}

#[tokio::test]
async fn health_check() {
    let (base, _) = spawn_stub().await;
    let health = HttpBackend::new(base).health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!((health.donors, health.recipients), (12, 4));
}
