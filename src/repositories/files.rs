use crate::database::{DbPool, get_db_conn};
use crate::models::File;
use crate::schema::files::dsl::*;
use diesel::prelude::*;

/// Finds a file record by its ID.
pub fn find_file_by_id(pool: &DbPool, file_id_val: i32) -> Result<File, diesel::result::Error> {
    let mut conn = get_db_conn(pool)?;

    files.find(file_id_val).select(File::as_select()).first(&mut conn)
}

/// Loads the file records for the given IDs, ordered by ID. Unknown IDs are ignored.
pub fn find_files_by_ids(
    pool: &DbPool,
    file_ids: &[i32],
) -> Result<Vec<File>, diesel::result::Error> {
    let mut conn = get_db_conn(pool)?;

    files
        .filter(id.eq_any(file_ids))
        .order(id.asc())
        .select(File::as_select())
        .load(&mut conn)
}

/// Loads every record ingested from a public link
pub fn load_files_by_public_link(
    pool: &DbPool,
    link: &str,
) -> Result<Vec<File>, diesel::result::Error> {
    let mut conn = get_db_conn(pool)?;

    files
        .filter(public_link.eq(link))
        .order(path.asc())
        .select(File::as_select())
        .load(&mut conn)
}

/// Loads the records of a public link whose path lies inside `folder_path`, at any depth.
pub fn load_files_under_path(
    pool: &DbPool,
    link: &str,
    folder_path: &str,
) -> Result<Vec<File>, diesel::result::Error> {
    let mut conn = get_db_conn(pool)?;
    let pattern = format!("{}/%", escape_like(folder_path.trim_end_matches('/')));

    files
        .filter(public_link.eq(link))
        .filter(path.like(pattern).escape('\\'))
        .order(path.asc())
        .select(File::as_select())
        .load(&mut conn)
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
