use serde::Serialize;

use crate::models::File;

/// The top of an ingested tree: folders not nested in another folder, and
/// files that sit outside every folder.
#[derive(Debug, Default, Serialize)]
pub struct TopLevel {
    pub folders: Vec<File>,
    pub files: Vec<File>,
}

fn is_under(path: &str, folder: &str) -> bool {
    path.strip_prefix(folder.trim_end_matches('/'))
        .is_some_and(|rest| rest.starts_with('/'))
}

pub fn top_level(rows: Vec<File>) -> TopLevel {
    let folder_paths: Vec<String> = rows
        .iter()
        .filter(|row| row.is_dir())
        .map(|row| row.path.clone())
        .collect();
    let enclosed = |path: &str| folder_paths.iter().any(|folder| is_under(path, folder));

    let mut top = TopLevel::default();
    for row in rows {
        if enclosed(&row.path) {
            continue;
        }
        if row.is_dir() {
            top.folders.push(row);
        } else {
            top.files.push(row);
        }
    }
    top
}
