use std::collections::HashSet;

/// Exact-match allow-list for request origins.
pub struct OriginPolicy {
    allowed: HashSet<String>,
}

impl OriginPolicy {
    pub fn new(origins: Vec<String>) -> Self {
        Self {
            allowed: origins.into_iter().collect(),
        }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed.contains(origin)
    }

    pub fn allowed_origins(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_only() {
        let policy = OriginPolicy::new(vec![
            "https://vela.example.com".to_string(),
            "http://localhost:3000".to_string(),
        ]);

        assert!(policy.is_allowed("https://vela.example.com"));
        assert!(policy.is_allowed("http://localhost:3000"));
        assert!(!policy.is_allowed("https://evil.example.com"));
        // No suffix or scheme fuzziness
        assert!(!policy.is_allowed("http://vela.example.com"));
        assert!(!policy.is_allowed("https://vela.example.com/"));
    }

    #[test]
    fn test_empty_policy_denies_everything() {
        let policy = OriginPolicy::new(vec![]);
        assert!(!policy.is_allowed("https://vela.example.com"));
    }
}
