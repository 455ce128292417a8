use crate::database::{DbPool, get_db_conn};
use crate::models::{File, Preview};
use diesel::prelude::*;

/// Loads the previews attached to a file record
pub fn load_previews_for_file(
    pool: &DbPool,
    file: &File,
) -> Result<Vec<Preview>, diesel::result::Error> {
    use crate::schema::previews::dsl::*;

    let mut conn = get_db_conn(pool)?;

    Preview::belonging_to(file)
        .order(id.asc())
        .select(Preview::as_select())
        .load(&mut conn)
}
