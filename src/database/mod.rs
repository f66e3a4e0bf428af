pub mod manager;
pub mod store;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod models;

pub use manager::DatabaseManager;
pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;
pub use repository::Repository;
pub use store::{DatabaseError, Document, RecordStore, WriteResult};
