use regex::Regex;

/// Denylist-based input sanitizer for free-text fields (notes, names).
///
/// Deterministic and total: invalid input is stripped, never rejected.
/// Patterns are compiled once at construction; the sanitizer is meant to
/// be built once per process and shared.
pub struct Sanitizer {
    script_blocks: Regex,
    event_handlers: Regex,
    javascript_urls: Regex,
}

impl Sanitizer {
    pub fn new() -> Self {
        Self {
            script_blocks: Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>")
                .expect("script pattern is valid"),
            event_handlers: Regex::new(r#"(?i)\bon\w+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#)
                .expect("event handler pattern is valid"),
            javascript_urls: Regex::new(r"(?i)javascript\s*:").expect("js url pattern is valid"),
        }
    }

    pub fn sanitize(&self, input: &str) -> String {
        let out = self.script_blocks.replace_all(input, "");
        let out = self.event_handlers.replace_all(&out, "");
        let out = self.javascript_urls.replace_all(&out, "");
        out.trim().to_string()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_input_passes_through() {
        let s = Sanitizer::new();
        assert_eq!(
            s.sanitize("Outdoor ceremony, 120 guests"),
            "Outdoor ceremony, 120 guests"
        );
    }

    #[test]
    fn test_script_blocks_are_stripped() {
        let s = Sanitizer::new();
        assert_eq!(
            s.sanitize("hello <script>alert('x')</script> world"),
            "hello  world"
        );
        // Case-insensitive, attribute-bearing
        assert_eq!(
            s.sanitize("<SCRIPT src=\"x.js\">payload</SCRIPT>ok"),
            "ok"
        );
    }

    #[test]
    fn test_event_handlers_are_stripped() {
        let s = Sanitizer::new();
        let out = s.sanitize("<img src=\"x\" onerror=\"steal()\">");
        assert!(!out.to_lowercase().contains("onerror"));
    }

    #[test]
    fn test_javascript_urls_are_stripped() {
        let s = Sanitizer::new();
        let out = s.sanitize("<a href=\"javascript:alert(1)\">link</a>");
        assert!(!out.to_lowercase().contains("javascript:"));
    }

    #[test]
    fn test_never_errors_on_odd_input() {
        let s = Sanitizer::new();
        // Unterminated markup and empty input are fine
        assert_eq!(s.sanitize(""), "");
        let _ = s.sanitize("<script>never closed");
        let _ = s.sanitize("on=click=weird");
    }
}
