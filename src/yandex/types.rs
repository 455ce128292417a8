use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One entry of the public resources API: a folder, or a file with its previews.
///
/// Folder responses nest their children under `_embedded.items`; the children
/// themselves never carry `_embedded`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDescriptor {
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub mime_type: Option<String>,
    pub name: Option<String>,
    pub path: Option<String>,
    /// Direct download URL, present on files only.
    pub file: Option<String>,
    pub size: Option<i64>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sizes: Vec<PreviewSize>,
    #[serde(rename = "_embedded")]
    pub embedded: Option<Embedded>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Embedded {
    #[serde(default)]
    pub items: Vec<ResourceDescriptor>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewSize {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct DownloadLink {
    pub href: String,
}

impl Embedded {
    /// True when the API holds more entries than this page returned.
    pub fn is_truncated(&self) -> bool {
        self.total
            .is_some_and(|total| total > self.items.len() as u64)
    }
}

impl ResourceDescriptor {
    pub fn is_file(&self) -> bool {
        self.resource_type.as_deref() == Some("file")
    }

    /// Entries listed under this resource. A public link to a single file has no
    /// `_embedded` block, so the resource stands in for its own listing.
    pub fn into_children(mut self) -> Vec<ResourceDescriptor> {
        match self.embedded.take() {
            Some(embedded) => embedded.items,
            None if self.is_file() => vec![self],
            None => Vec::new(),
        }
    }

    /// Children of a folder listing, or `None` when the response has no `_embedded` items.
    pub fn into_folder_items(self) -> Option<Vec<ResourceDescriptor>> {
        self.embedded.map(|embedded| embedded.items)
    }
}
