use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BulkDownloadRequest {
    #[serde(default)]
    pub selected_files: Vec<i32>,
}
