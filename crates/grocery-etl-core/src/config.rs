//! Pipeline configuration sourced from the orchestrator's key-value store.
//!
//! Every parameter is required; a missing key fails the load immediately
//! since the pipeline cannot run without it. No defaulting or coercion
//! happens here beyond parsing `DBT_JOBS_ID` out of its JSON encoding.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required variable: {0}")]
    Missing(String),
    #[error("variable {key} is not valid JSON: {source}")]
    InvalidJson {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Seam to the external key-value configuration provider.
pub trait VariableStore {
    fn get(&self, key: &str) -> Result<String, ConfigError>;
}

/// Reads variables from the process environment. The binary loads `.env`
/// first, which is how the orchestrator's variable store surfaces locally.
pub struct EnvVariables;

impl VariableStore for EnvVariables {
    fn get(&self, key: &str) -> Result<String, ConfigError> {
        std::env::var(key).map_err(|_| ConfigError::Missing(key.to_string()))
    }
}

/// Map-backed provider for tests.
#[derive(Debug, Default)]
pub struct StaticVariables {
    values: HashMap<String, String>,
}

impl StaticVariables {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl FromIterator<(String, String)> for StaticVariables {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl VariableStore for StaticVariables {
    fn get(&self, key: &str) -> Result<String, ConfigError> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::Missing(key.to_string()))
    }
}

/// One immutable snapshot of the pipeline parameters, read once at startup.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub gcp_credentials_file_path: String,
    pub gcp_project_id: String,
    pub bucket_name: String,
    pub bucket_class: String,
    pub bucket_location: String,
    pub dataset_name: String,
    pub dbt_account_id: String,
    pub dbt_conn_id: String,
    /// Parsed from the JSON-encoded `DBT_JOBS_ID` variable: job name -> job id.
    pub dbt_jobs_id: HashMap<String, Value>,
}

impl PipelineConfig {
    pub fn load(vars: &dyn VariableStore) -> Result<Self, ConfigError> {
        let gcp_credentials_file_path = vars.get("GCP_CREDENTIALS_FILE_PATH")?;
        let gcp_project_id = vars.get("GCP_PROJECT_ID")?;
        let bucket_name = vars.get("BUCKET_NAME")?;
        let bucket_class = vars.get("BUCKET_CLASS")?;
        let bucket_location = vars.get("BUCKET_LOCATION")?;
        let dataset_name = vars.get("DATASET_NAME")?;
        let dbt_account_id = vars.get("DBT_ACCOUNT_ID")?;
        let dbt_conn_id = vars.get("DBT_CONN_ID")?;

        let dbt_jobs_raw = vars.get("DBT_JOBS_ID")?;
        let dbt_jobs_id: HashMap<String, Value> =
            serde_json::from_str(&dbt_jobs_raw).map_err(|source| ConfigError::InvalidJson {
                key: "DBT_JOBS_ID".to_string(),
                source,
            })?;

        Ok(Self {
            gcp_credentials_file_path,
            gcp_project_id,
            bucket_name,
            bucket_class,
            bucket_location,
            dataset_name,
            dbt_account_id,
            dbt_conn_id,
            dbt_jobs_id,
        })
    }
}
