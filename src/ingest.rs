use std::str::FromStr;

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use log::{debug, info};
use mime_guess::from_path;
use serde::Serialize;

use crate::models::{File, NewFile, NewPreview};
use crate::schema::{files, previews};
use crate::yandex::{PreviewSize, ResourceDescriptor};

const TYPE_NOT_AVAILABLE: &str = "type_not_available";
const MIME_TYPE_NOT_AVAILABLE: &str = "mime_type_not_available";
const FILE_URL_NOT_AVAILABLE: &str = "file_url_not_available";

/// What to do when a descriptor collides with an existing (name, public_link) row
/// whose other fields differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Keep the stored row and drop the incoming one.
    #[default]
    Ignore,
    /// Overwrite the stored row and replace its previews.
    Update,
}

impl FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "update" => Ok(Self::Update),
            other => Err(format!(
                "INGEST_CONFLICT_POLICY must be `ignore` or `update`, got `{}`",
                other
            )),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}

enum Outcome {
    Created,
    Updated,
    Unchanged,
}

/// Maps a remote descriptor onto a row for `public_link`.
///
/// Returns `None` when the descriptor lacks a field the table cannot do without
/// (name, path, created or modified).
pub fn new_file_from_descriptor(item: &ResourceDescriptor, public_link: &str) -> Option<NewFile> {
    let name = item.name.clone()?;
    let resource_type = item
        .resource_type
        .clone()
        .unwrap_or_else(|| TYPE_NOT_AVAILABLE.to_string());
    let mime_type = match &item.mime_type {
        Some(mime) => mime.clone(),
        None if item.is_file() => from_path(&name)
            .first()
            .map(|m| m.to_string())
            .unwrap_or_else(|| MIME_TYPE_NOT_AVAILABLE.to_string()),
        None => MIME_TYPE_NOT_AVAILABLE.to_string(),
    };

    Some(NewFile {
        resource_type,
        mime_type,
        path: item.path.clone()?,
        file_url: item
            .file
            .clone()
            .unwrap_or_else(|| FILE_URL_NOT_AVAILABLE.to_string()),
        public_link: public_link.to_string(),
        size: item.size.unwrap_or(0),
        created: item.created?.naive_utc(),
        modified: item.modified?.naive_utc(),
        name,
    })
}

/// Stores the descriptors of one listing under `public_link`.
///
/// Each item is handled in its own transaction. Rows that break the
/// (name, public_link) constraint are dropped without surfacing an error; any
/// other database failure aborts the whole call.
pub fn ingest(
    conn: &mut PgConnection,
    items: &[ResourceDescriptor],
    public_link: &str,
    policy: ConflictPolicy,
) -> QueryResult<IngestReport> {
    let mut report = IngestReport::default();

    for item in items {
        let Some(new_file) = new_file_from_descriptor(item, public_link) else {
            debug!("Dropping incomplete descriptor {:?}", item.name);
            report.skipped += 1;
            continue;
        };

        let result = conn.transaction(|conn| match policy {
            ConflictPolicy::Ignore => get_or_create(conn, &new_file, &item.sizes),
            ConflictPolicy::Update => create_or_update(conn, &new_file, &item.sizes),
        });

        match result {
            Ok(Outcome::Created) => report.created += 1,
            Ok(Outcome::Updated) => report.updated += 1,
            Ok(Outcome::Unchanged) => report.skipped += 1,
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                debug!("Dropping duplicate {:?} for {}", new_file.name, public_link);
                report.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Ingested {} items for {}: {} created, {} updated, {} skipped",
        items.len(),
        public_link,
        report.created,
        report.updated,
        report.skipped
    );

    Ok(report)
}

/// Looks the row up by every column and inserts it when no exact match exists.
/// A row differing in any column is inserted and left to the unique constraint.
fn get_or_create(
    conn: &mut PgConnection,
    new_file: &NewFile,
    sizes: &[PreviewSize],
) -> QueryResult<Outcome> {
    let existing = files::table
        .filter(files::resource_type.eq(&new_file.resource_type))
        .filter(files::mime_type.eq(&new_file.mime_type))
        .filter(files::name.eq(&new_file.name))
        .filter(files::path.eq(&new_file.path))
        .filter(files::file_url.eq(&new_file.file_url))
        .filter(files::public_link.eq(&new_file.public_link))
        .filter(files::size.eq(new_file.size))
        .filter(files::created.eq(new_file.created))
        .filter(files::modified.eq(new_file.modified))
        .select(File::as_select())
        .first(conn)
        .optional()?;

    if existing.is_some() {
        return Ok(Outcome::Unchanged);
    }

    let file = insert_file(conn, new_file)?;
    insert_previews(conn, &file, sizes)?;
    Ok(Outcome::Created)
}

fn create_or_update(
    conn: &mut PgConnection,
    new_file: &NewFile,
    sizes: &[PreviewSize],
) -> QueryResult<Outcome> {
    let existing = files::table
        .filter(files::name.eq(&new_file.name))
        .filter(files::public_link.eq(&new_file.public_link))
        .select(File::as_select())
        .first(conn)
        .optional()?;

    match existing {
        None => {
            let file = insert_file(conn, new_file)?;
            insert_previews(conn, &file, sizes)?;
            Ok(Outcome::Created)
        }
        Some(file) if new_file.matches(&file) => Ok(Outcome::Unchanged),
        Some(file) => {
            let file = diesel::update(files::table.find(file.id))
                .set(new_file)
                .returning(File::as_returning())
                .get_result(conn)?;
            diesel::delete(previews::table.filter(previews::file_id.eq(file.id)))
                .execute(conn)?;
            insert_previews(conn, &file, sizes)?;
            Ok(Outcome::Updated)
        }
    }
}

fn insert_file(conn: &mut PgConnection, new_file: &NewFile) -> QueryResult<File> {
    diesel::insert_into(files::table)
        .values(new_file)
        .returning(File::as_returning())
        .get_result(conn)
}

fn insert_previews(conn: &mut PgConnection, file: &File, sizes: &[PreviewSize]) -> QueryResult<()> {
    if sizes.is_empty() {
        return Ok(());
    }

    let new_previews: Vec<NewPreview> = sizes
        .iter()
        .map(|size| NewPreview {
            file_id: file.id,
            size_name: size.name.clone(),
            preview_url: size.url.clone(),
        })
        .collect();

    diesel::insert_into(previews::table)
        .values(&new_previews)
        .execute(conn)?;
    Ok(())
}
