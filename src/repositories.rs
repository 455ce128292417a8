pub mod files;
pub mod previews;
