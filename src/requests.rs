pub mod download;
pub mod link;
