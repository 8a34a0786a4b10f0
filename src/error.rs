use crate::data::error::DataStoreError;
use crate::engine::error::QueryError;
use crate::stations::error::StationListError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeatwaveError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    StationList(#[from] StationListError),

    #[error(transparent)]
    Data(#[from] DataStoreError),
}
