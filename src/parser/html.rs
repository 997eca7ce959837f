use scraper::Html;

/// Strip tags and decode entities, keeping the visible text in document order.
///
/// Text nodes are concatenated as-is, so `<td>Name:</td><td>Bob</td>` becomes
/// `Name:Bob`. Non-breaking spaces become plain spaces so labels typed with a
/// regular space still match.
pub fn visible_text(input: &str) -> String {
    if !input.contains('<') && !input.contains('&') {
        return input.to_string();
    }

    let document = if looks_like_document(input) {
        Html::parse_document(input)
    } else {
        Html::parse_fragment(input)
    };

    document
        .root_element()
        .text()
        .collect::<String>()
        .replace('\u{a0}', " ")
}

fn looks_like_document(input: &str) -> bool {
    let head: String = input.trim_start().chars().take(9).collect();
    let head = head.to_ascii_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}

// ── Tests ──
