const MAX_VISIBLE_CHARS: usize = 64;

/// Renders a user query safe for a single log line.
pub fn sanitize_query(query: &str) -> String {
    let trimmed = query.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let visible: String = trimmed
        .chars()
        .take(MAX_VISIBLE_CHARS)
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    let total = trimmed.chars().count();
    if total > MAX_VISIBLE_CHARS {
        format!("{}... ({} chars total)", visible, total)
    } else {
        visible
    }
}
