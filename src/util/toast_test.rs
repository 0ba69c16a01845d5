use super::*;

#[test]
fn default_severity_is_info() {
    assert_eq!(Severity::default(), Severity::Info);
}

#[test]
fn css_class_includes_severity() {
    assert_eq!(Toast::warning("x").css_class(), "toast toast-warning");
    assert_eq!(Toast::info("x").css_class(), "toast toast-info");
}

#[test]
fn constructors_set_severity() {
    assert_eq!(Toast::success("ok").severity, Severity::Success);
    assert_eq!(Toast::error("bad").severity, Severity::Error);
}

#[test]
fn lifetime_is_three_seconds() {
    assert_eq!(TOAST_LIFETIME, Duration::from_secs(3));
}
