use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::Serialize;

use crate::models::files::File;

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = crate::schema::previews)]
#[diesel(belongs_to(File, foreign_key = file_id))]
pub struct Preview {
    pub id: i32,
    pub file_id: i32,
    pub size_name: String,
    pub preview_url: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::previews)]
pub struct NewPreview {
    pub file_id: i32,
    pub size_name: String,
    pub preview_url: String,
}
