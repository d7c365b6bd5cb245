//! String utilities for the domain layer.

/// One-line excerpt of markdown content for list views.
///
/// Collapses all whitespace runs (including newlines) to single spaces and
/// cuts at `max_chars` characters, appending an ellipsis when cut.
pub fn excerpt(s: &str, max_chars: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let kept: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Whether user-entered content is blank
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_short_is_unchanged() {
        assert_eq!(excerpt("hello", 10), "hello");
    }

    #[test]
    fn test_excerpt_collapses_newlines() {
        assert_eq!(excerpt("# Title\n\nbody  text", 40), "# Title body text");
    }

    #[test]
    fn test_excerpt_cuts_on_char_boundary() {
        assert_eq!(excerpt("안녕하세요 여러분", 4), "안녕하…");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \n\t"));
        assert!(!is_blank(" a "));
    }
}
