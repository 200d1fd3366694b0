use reelsearch::infrastructure::observability::sanitize_query;

#[test]
fn given_blank_query_when_sanitizing_then_marks_empty() {
    assert_eq!(sanitize_query("   "), "[EMPTY]");
}

#[test]
fn given_short_query_when_sanitizing_then_returns_trimmed_query() {
    assert_eq!(sanitize_query("  love  "), "love");
}

#[test]
fn given_control_characters_when_sanitizing_then_replaces_them() {
    assert_eq!(sanitize_query("love\nhina"), "love hina");
}

#[test]
fn given_long_query_when_sanitizing_then_truncates_with_length() {
    let query = "é".repeat(100);

    let sanitized = sanitize_query(&query);

    assert!(sanitized.starts_with(&"é".repeat(64)));
    assert!(sanitized.ends_with("... (100 chars total)"));
}
