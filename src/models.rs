pub mod files;
pub mod previews;

pub use files::{File, NewFile};
pub use previews::{NewPreview, Preview};
