pub mod condition;
pub mod event;
pub mod query;
pub mod series;
