pub mod error;
mod csv_store;
mod store;

pub use csv_store::CsvStore;
pub use store::{DataStore, MemoryStore};
