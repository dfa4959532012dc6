pub mod connection;
pub mod migrations;
pub mod store;
pub mod kv_store;
pub mod documents;
pub mod users;
pub mod backup;

pub use connection::{get_db_pool, DatabaseConfig};
pub use backup::backup_document;
pub use documents::{delete_document, load_document, save_document};
pub use kv_store::PgBlobStore;
pub use store::{BlobStore, MemoryBlobStore};
pub use users::PgUserDirectory;
