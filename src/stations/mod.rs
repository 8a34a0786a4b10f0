pub mod error;
mod station_list;

pub use station_list::{Station, StationList};
