use serde::Deserialize;

pub const MAX_PUBLIC_LINK_LEN: usize = 500;

/// Form body of the link submission.
#[derive(Debug, Deserialize)]
pub struct LinkForm {
    pub public_link: String,
}

impl LinkForm {
    /// Returns the trimmed link, or the reason it was rejected.
    pub fn validate(&self) -> Result<&str, &'static str> {
        let link = self.public_link.trim();
        if link.is_empty() {
            return Err("public_link is required");
        }
        if link.chars().count() > MAX_PUBLIC_LINK_LEN {
            return Err("public_link must be at most 500 characters");
        }
        Ok(link)
    }
}
