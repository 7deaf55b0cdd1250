/// Clip a string to at most `max` characters, appending an ellipsis when
/// anything was cut. Char-based so multi-byte input never splits.
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let clipped: String = s.chars().take(max).collect();
        format!("{}...", clipped)
    }
}
