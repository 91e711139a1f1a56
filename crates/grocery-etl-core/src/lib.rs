pub mod config;
pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod schemas;
pub mod transform;
