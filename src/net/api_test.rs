use super::*;

#[test]
fn join_url_strips_trailing_slash() {
    assert_eq!(join_url("http://localhost:18080/api/", LOGIN_PATH), "http://localhost:18080/api/auth/login");
    assert_eq!(join_url("http://localhost:18080/api", HEALTH_PATH), "http://localhost:18080/api/health");
}

#[test]
fn donor_dashboard_path_formats_id() {
    assert_eq!(donor_dashboard_path("DNR-001"), "/donor/dashboard/DNR-001");
}

#[test]
fn http_backend_normalizes_base_url() {
    let backend = HttpBackend::new("http://example.test/api///");
    assert_eq!(backend.base_url(), "http://example.test/api");
    assert_eq!(backend.url(ACCEPT_REQUEST_PATH), "http://example.test/api/donor/accept-request");
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let backend = HttpBackend::new(format!("http://127.0.0.1:{port}/api"));
    let err = backend.login("a@b.com", "pw").await.unwrap_err();
    assert!(err.is_transport(), "expected transport error, got {err:?}");
}
