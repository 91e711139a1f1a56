// crates/grocery-etl-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Object storage error: {0}")]
    Bucket(#[from] grocery_etl_bucket::BucketError),

    #[error("One or more datasets failed to load: {}", .0.join(", "))]
    IncompleteLoad(Vec<&'static str>),
}

pub type Result<T> = std::result::Result<T, EtlError>;
