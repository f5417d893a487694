//! Form validation for untrusted request input.
//!
//! Validation never persists anything and never decides who the author
//! is: author and target post always come from the session and the URL
//! path, not from the payload.

use std::collections::BTreeMap;

use serde::Serialize;

/// Extensions accepted for the optional post image.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Field-level validation errors, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    #[serde(flatten)]
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }
}

/// Validate post input: text is required, the image path (if any) must
/// look like an image file. Group resolution happens at the handler,
/// which appends its own field error for an unknown slug.
pub fn validate_post_input(text: &str, image: Option<&str>) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if text.trim().is_empty() {
        errors.add("text", "This field is required.");
    }

    if let Some(image) = image {
        let extension = image.rsplit('.').next().map(str::to_ascii_lowercase);
        let recognized = extension
            .as_deref()
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext));
        if image.trim().is_empty() || !recognized {
            errors.add("image", "Upload a valid image.");
        }
    }

    errors
}

/// Validate comment input: text is required.
pub fn validate_comment_input(text: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if text.trim().is_empty() {
        errors.add("text", "This field is required.");
    }

    errors
}
