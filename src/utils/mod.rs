pub mod file;
pub mod uri;

pub use file::atomic_save;
pub use uri::{cleanup_uri, localname};
