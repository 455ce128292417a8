pub mod types;

use bytes::Bytes;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use thiserror::Error;

pub use types::{DownloadLink, PreviewSize, ResourceDescriptor};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Yandex Disk responded with status {0}")]
    Status(StatusCode),
}

/// Client for the Yandex Disk public resources API.
#[derive(Clone)]
pub struct YandexDiskClient {
    client: Client,
    api_url: String,
    page_limit: u32,
}

impl YandexDiskClient {
    pub fn new(api_url: impl Into<String>, page_limit: u32) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            page_limit,
        }
    }

    /// Lists the resource at `path` inside the public link. The root is `""`.
    pub async fn fetch_listing(
        &self,
        public_link: &str,
        path: &str,
    ) -> Result<ResourceDescriptor, FetchError> {
        let limit = self.page_limit.to_string();
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("public_key", public_link),
                ("path", path),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            warn!(
                "Listing {:?} of {} failed with status {}",
                path,
                public_link,
                response.status()
            );
            return Err(FetchError::Status(response.status()));
        }

        let listing: ResourceDescriptor = response.json().await?;
        if let Some(embedded) = listing.embedded.as_ref().filter(|e| e.is_truncated()) {
            warn!(
                "Listing {:?} of {} truncated: {} of {:?} entries returned",
                path,
                public_link,
                embedded.items.len(),
                embedded.total
            );
        }

        Ok(listing)
    }

    /// Resolves a short-lived download URL for `path`, then fetches its content.
    pub async fn fetch_download_bytes(
        &self,
        public_link: &str,
        path: &str,
    ) -> Result<Bytes, FetchError> {
        let response = self
            .client
            .get(format!("{}/download", self.api_url))
            .query(&[("public_key", public_link), ("path", path)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            warn!(
                "Download link for {:?} of {} failed with status {}",
                path,
                public_link,
                response.status()
            );
            return Err(FetchError::Status(response.status()));
        }

        let link: DownloadLink = response.json().await?;
        debug!("Downloading {:?} from {}", path, link.href);

        let response = self.client.get(&link.href).send().await?;
        if response.status() != StatusCode::OK {
            warn!("Download of {:?} failed with status {}", path, response.status());
            return Err(FetchError::Status(response.status()));
        }

        Ok(response.bytes().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const RESOURCES: &str = "/v1/disk/public/resources";
    const LINK: &str = "https://disk.yandex.ru/d/abc123";

    fn client_for(server: &mockito::Server) -> YandexDiskClient {
        YandexDiskClient::new(format!("{}{}", server.url(), RESOURCES), 100)
    }

    #[tokio::test]
    async fn test_fetch_listing_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", RESOURCES)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("public_key".into(), LINK.into()),
                Matcher::UrlEncoded("path".into(), "/Разработчик Simple".into()),
                Matcher::UrlEncoded("limit".into(), "100".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"type": "dir", "path": "/Разработчик Simple", "_embedded": {"items": [{"type": "file", "name": "a.txt"}]}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let listing = client
            .fetch_listing(LINK, "/Разработчик Simple")
            .await
            .unwrap();

        mock.assert_async().await;
        let items = listing.into_folder_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name.as_deref(), Some("a.txt"));
    }

    #[tokio::test]
    async fn test_fetch_listing_not_found() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", RESOURCES)
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"error": "DiskNotFoundError"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.fetch_listing(LINK, "").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(FetchError::Status(StatusCode::NOT_FOUND))));
    }

    #[tokio::test]
    async fn test_fetch_download_bytes_success() {
        let mut server = mockito::Server::new_async().await;
        let href = format!("{}/blobs/a.txt", server.url());
        let link_mock = server
            .mock("GET", "/v1/disk/public/resources/download")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("public_key".into(), LINK.into()),
                Matcher::UrlEncoded("path".into(), "/a.txt".into()),
            ]))
            .with_status(200)
            .with_body(format!(r#"{{"href": "{}", "method": "GET"}}"#, href))
            .create_async()
            .await;
        let blob_mock = server
            .mock("GET", "/blobs/a.txt")
            .with_status(200)
            .with_body("0123456789")
            .create_async()
            .await;

        let client = client_for(&server);
        let bytes = client.fetch_download_bytes(LINK, "/a.txt").await.unwrap();

        link_mock.assert_async().await;
        blob_mock.assert_async().await;
        assert_eq!(bytes, Bytes::from("0123456789"));
    }

    #[tokio::test]
    async fn test_fetch_download_link_failure() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/disk/public/resources/download")
            .match_query(Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.fetch_download_bytes(LINK, "/a.txt").await;

        mock.assert_async().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_download_payload_failure() {
        let mut server = mockito::Server::new_async().await;
        let href = format!("{}/blobs/gone", server.url());
        let _link_mock = server
            .mock("GET", "/v1/disk/public/resources/download")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(format!(r#"{{"href": "{}"}}"#, href))
            .create_async()
            .await;
        let blob_mock = server
            .mock("GET", "/blobs/gone")
            .with_status(410)
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.fetch_download_bytes(LINK, "/gone").await;

        blob_mock.assert_async().await;
        assert!(matches!(result, Err(FetchError::Status(StatusCode::GONE))));
    }
}
