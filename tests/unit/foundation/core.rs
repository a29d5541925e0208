use super::*;

#[test]
fn abort_signal_is_shared_between_clones() {
    let signal = AbortSignal::new();
    let observer = signal.clone();
    assert!(!observer.is_aborted());
    signal.abort();
    assert!(observer.is_aborted());
}

#[test]
fn cross_origin_uses_attribute_spelling() {
    let s = serde_json::to_string(&CrossOrigin::UseCredentials).unwrap();
    assert_eq!(s, "\"use-credentials\"");
    let c: CrossOrigin = serde_json::from_str("\"anonymous\"").unwrap();
    assert_eq!(c, CrossOrigin::Anonymous);
}

#[test]
fn cross_origin_as_str_matches_serde() {
    for c in [CrossOrigin::Anonymous, CrossOrigin::UseCredentials] {
        assert_eq!(serde_json::to_string(&c).unwrap(), format!("\"{}\"", c.as_str()));
    }
}
