pub mod error;
pub(crate) mod masks;
pub(crate) mod scan;
mod worker;

pub use worker::{run_query, submit, QueryHandle};
