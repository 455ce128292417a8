use chrono::NaiveDateTime;
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use serde::Serialize;

/// Folder entries carry this resource type; everything else is a file.
pub const DIR_TYPE: &str = "dir";

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::schema::files)]
pub struct File {
    pub id: i32,
    pub resource_type: String,
    pub mime_type: String,
    pub name: String,
    pub path: String,
    pub file_url: String,
    pub public_link: String,
    pub size: i64,
    pub created: NaiveDateTime,
    pub modified: NaiveDateTime,
}

impl File {
    pub fn is_dir(&self) -> bool {
        self.resource_type == DIR_TYPE
    }
}

#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::files)]
pub struct NewFile {
    pub resource_type: String,
    pub mime_type: String,
    pub name: String,
    pub path: String,
    pub file_url: String,
    pub public_link: String,
    pub size: i64,
    pub created: NaiveDateTime,
    pub modified: NaiveDateTime,
}

impl NewFile {
    /// True when the stored row already holds exactly these values.
    pub fn matches(&self, file: &File) -> bool {
        self.resource_type == file.resource_type
            && self.mime_type == file.mime_type
            && self.name == file.name
            && self.path == file.path
            && self.file_url == file.file_url
            && self.public_link == file.public_link
            && self.size == file.size
            && self.created == file.created
            && self.modified == file.modified
    }
}
