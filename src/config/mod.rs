//! Configuration loading and management

use crate::core::Params;
use crate::storage::SqlTable;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Paging policy applied to incoming parameters
///
/// # Example
/// ```yaml
/// max_count: 100
/// default_count: 20
/// stable_key: id
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Largest page size a caller may request
    pub max_count: Option<usize>,

    /// Page size used when a page is requested without one
    ///
    /// When unset, such a request fails with `MissingPageSize`.
    pub default_count: Option<usize>,

    /// Column keeping unsorted SQL pages in a repeatable order
    pub stable_key: Option<String>,
}

impl PagingConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Effective parameters for a request
    ///
    /// Fills in the default page size for a page requested without one,
    /// then caps the page size at `max_count`.
    pub fn apply(&self, mut params: Params) -> Params {
        if params.page.is_some() && params.count.is_none() {
            params.count = self.default_count;
        }
        if let (Some(count), Some(max)) = (params.count, self.max_count) {
            params.count = Some(count.min(max));
        }
        params
    }

    /// Describe a SQL table, with the configured stable key if any
    pub fn sql_table(&self, name: &str) -> Result<SqlTable> {
        let table = SqlTable::new(name)?;
        match &self.stable_key {
            Some(key) => table.stable_key(key),
            None => Ok(table),
        }
    }
}
