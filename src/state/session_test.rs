use super::*;

fn hint(email: &str, name: Option<&str>, role: Option<Role>) -> PendingRegistration {
    PendingRegistration { email: email.to_owned(), name: name.map(str::to_owned), role }
}

// =============================================================
// Role
// =============================================================

#[test]
fn role_decodes_donor() {
    let role: Role = serde_json::from_str("\"donor\"").unwrap();
    assert_eq!(role, Role::Donor);
}

#[test]
fn role_decodes_unknown_as_recipient() {
    let role: Role = serde_json::from_str("\"hospital\"").unwrap();
    assert_eq!(role, Role::Recipient);
}

#[test]
fn role_encodes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Recipient).unwrap(), "\"recipient\"");
}

#[test]
fn role_guess_from_email() {
    assert_eq!(Role::guess_from_email("donor1@test.com"), Role::Donor);
    assert_eq!(Role::guess_from_email("someone@test.com"), Role::Recipient);
}

// =============================================================
// Session wire format
// =============================================================

#[test]
fn session_uses_camel_case_fields() {
    let session = Session::new(Role::Donor, "D-7", "Sara");
    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "success": true, "role": "donor", "userId": "D-7", "name": "Sara" })
    );
}

#[test]
fn session_parses_backend_shape() {
    let raw = r#"{"success":true,"role":"recipient","userId":"REC-001","name":"Ali"}"#;
    let session: Session = serde_json::from_str(raw).unwrap();
    assert_eq!(session, Session::new(Role::Recipient, "REC-001", "Ali"));
}

// =============================================================
// Demo sessions
// =============================================================

#[test]
fn demo_session_role_from_email() {
    assert_eq!(Session::demo("donor1@test.com", None).role, Role::Donor);
    assert_eq!(Session::demo("someone@test.com", None).role, Role::Recipient);
}

#[test]
fn demo_session_uses_demo_identity() {
    let session = Session::demo("someone@test.com", None);
    assert_eq!(session.user_id, DEMO_USER_ID);
    assert_eq!(session.name, DEMO_NAME);
    assert!(session.success);
}

#[test]
fn demo_session_matching_hint_overrides_role_and_name() {
    let reg = hint("donor1@test.com", Some("Bilal"), Some(Role::Recipient));
    let session = Session::demo("donor1@test.com", Some(&reg));
    assert_eq!(session.role, Role::Recipient);
    assert_eq!(session.name, "Bilal");
}

#[test]
fn demo_session_ignores_hint_for_other_email() {
    let reg = hint("other@test.com", Some("Bilal"), Some(Role::Donor));
    let session = Session::demo("someone@test.com", Some(&reg));
    assert_eq!(session.role, Role::Recipient);
    assert_eq!(session.name, DEMO_NAME);
}

#[test]
fn demo_session_partial_hint_keeps_email_role() {
    let reg = hint("donor1@test.com", Some("Bilal"), None);
    let session = Session::demo("donor1@test.com", Some(&reg));
    assert_eq!(session.role, Role::Donor);
    assert_eq!(session.name, "Bilal");
}

// =============================================================
// Fallback sessions
// =============================================================

#[test]
fn fallback_session_default_identity() {
    let session = Session::fallback("a@b.com", None);
    assert_eq!(session, Session::new(FALLBACK_ROLE, FALLBACK_USER_ID, FALLBACK_NAME));
}

#[test]
fn fallback_session_uses_matching_hint() {
    let reg = hint("a@b.com", Some("Zainab"), Some(Role::Recipient));
    let session = Session::fallback("a@b.com", Some(&reg));
    assert_eq!(session.role, Role::Recipient);
    assert_eq!(session.name, "Zainab");
    assert_eq!(session.user_id, FALLBACK_USER_ID);
}

#[test]
fn fallback_session_hint_match_is_case_sensitive() {
    let reg = hint("A@B.com", Some("Zainab"), Some(Role::Recipient));
    let session = Session::fallback("a@b.com", Some(&reg));
    assert_eq!(session.name, FALLBACK_NAME);
    assert_eq!(session.role, Role::Donor);
}

// =============================================================
// PendingRegistration
// =============================================================

#[test]
fn pending_registration_optional_fields_default() {
    let reg: PendingRegistration = serde_json::from_str(r#"{"email":"x@y.z"}"#).unwrap();
    assert_eq!(reg, hint("x@y.z", None, None));
}
