/// Turns raw recognized text into the token sequence the vectorizer expects.
///
/// The whole string is lowercased, split on runs of whitespace, and every
/// character outside `[a-z0-9]` is stripped from each segment. Leading or
/// trailing whitespace yields an empty segment, and a segment can also end
/// up empty after stripping; both survive as empty tokens and simply fail
/// vocabulary lookup later.
///
/// Never fails. An empty input yields an empty sequence.
///
/// ```
/// use scantag::normalize;
///
/// assert_eq!(normalize("Hello, World!"), vec!["hello", "world"]);
/// assert!(normalize("").is_empty());
/// ```
pub fn normalize(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let lower = text.to_lowercase();
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_separator = false;

    for ch in lower.chars() {
        if ch.is_whitespace() {
            if !in_separator {
                tokens.push(std::mem::take(&mut current));
                in_separator = true;
            }
        } else {
            in_separator = false;
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
                current.push(ch);
            }
        }
    }
    tokens.push(current);

    tokens
}
