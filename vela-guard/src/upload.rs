use serde::Serialize;

/// Size cap and MIME allow-list for vendor file uploads.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_bytes: u64,
    pub allowed_mime: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            allowed_mime: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
                "application/pdf".to_string(),
            ],
        }
    }
}

/// Structured validation result; invalid uploads are reported, never thrown.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UploadCheck {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl UploadCheck {
    fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    fn fail(message: &str) -> Self {
        Self {
            is_valid: false,
            error: Some(message.to_string()),
        }
    }
}

impl UploadPolicy {
    pub fn check(&self, file_name: &str, mime: &str, size_bytes: u64) -> UploadCheck {
        if file_name.trim().is_empty() {
            return UploadCheck::fail("file name is required");
        }
        if size_bytes == 0 {
            return UploadCheck::fail("file is empty");
        }
        if size_bytes > self.max_bytes {
            return UploadCheck::fail(&format!(
                "file exceeds the maximum size of {} bytes",
                self.max_bytes
            ));
        }
        if !self.allowed_mime.iter().any(|m| m == mime) {
            return UploadCheck::fail(&format!("file type {} is not allowed", mime));
        }

        UploadCheck::ok()
    }
}
