#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CookieOptions {
    pub max_age: Option<i64>,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: Option<SameSite>,
    pub path: Option<String>,
    pub domain: Option<String>,
}

/// Build a Set-Cookie value. Attribute order is fixed (value, Max-Age,
/// HttpOnly, Secure, SameSite, Path, Domain); unset attributes are omitted.
pub fn build_cookie(name: &str, value: &str, opts: &CookieOptions) -> String {
    let mut parts = vec![format!("{}={}", name, value)];

    if let Some(max_age) = opts.max_age {
        parts.push(format!("Max-Age={}", max_age));
    }
    if opts.http_only {
        parts.push("HttpOnly".to_string());
    }
    if opts.secure {
        parts.push("Secure".to_string());
    }
    if let Some(same_site) = opts.same_site {
        parts.push(format!("SameSite={}", same_site.as_str()));
    }
    if let Some(path) = &opts.path {
        parts.push(format!("Path={}", path));
    }
    if let Some(domain) = &opts.domain {
        parts.push(format!("Domain={}", domain));
    }

    parts.join("; ")
}
