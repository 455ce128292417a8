use std::collections::HashSet;
use std::io::{Cursor, Write};

use log::{info, warn};
use thiserror::Error;
use zip::ZipWriter;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;

use crate::models::File;
use crate::yandex::YandexDiskClient;

pub const ARCHIVE_NAME: &str = "selected_files.zip";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Zip error: {0}")]
    Zip(#[from] ZipError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Downloads `files` one after another and packs them into an in-memory ZIP archive.
///
/// A file whose download fails is left out of the archive.
pub async fn export_zip(
    client: &YandexDiskClient,
    files: &[File],
) -> Result<Vec<u8>, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let mut used_names = HashSet::new();
    let mut written = 0;

    for file in files {
        let content = match client.fetch_download_bytes(&file.public_link, &file.path).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping {:?} (id={}) in archive: {}", file.name, file.id, e);
                continue;
            }
        };

        let entry_name = unique_entry_name(&file.name, &mut used_names);
        zip.start_file(entry_name, SimpleFileOptions::default())?;
        zip.write_all(&content)?;
        written += 1;
    }

    let buffer = zip.finish()?.into_inner();
    info!(
        "Built archive with {} of {} selected files ({} bytes)",
        written,
        files.len(),
        buffer.len()
    );
    Ok(buffer)
}

/// Returns `name`, or `name (n).ext` when an earlier entry already took it.
fn unique_entry_name(name: &str, used: &mut HashSet<String>) -> String {
    if used.insert(name.to_string()) {
        return name.to_string();
    }

    let (stem, ext) = match name.rfind('.') {
        Some(dot) if dot > 0 => name.split_at(dot),
        _ => (name, ""),
    };
    let mut n = 1;
    loop {
        let candidate = format!("{} ({}){}", stem, n, ext);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
