//! In-memory data source for testing and development

use crate::core::{DataSource, Query, Sortable};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-memory data source
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// clones share the same elements. Elements keep their insertion order, so
/// paging without an explicit sort field is repeatable as long as the
/// collection is not modified.
#[derive(Clone)]
pub struct InMemorySource<T> {
    items: Arc<RwLock<Vec<T>>>,
}

impl<T> InMemorySource<T> {
    /// Create an empty source
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Append one element
    pub fn push(&self, item: T) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        items.push(item);

        Ok(())
    }

    /// Append every element of `iter`
    pub fn extend(&self, iter: impl IntoIterator<Item = T>) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        items.extend(iter);

        Ok(())
    }

    /// Number of elements
    pub fn len(&self) -> Result<usize> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<T> Default for InMemorySource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for InMemorySource<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }
}

impl<T> FromIterator<T> for InMemorySource<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

#[async_trait]
impl<T> DataSource<T> for InMemorySource<T>
where
    T: Sortable + Clone,
{
    async fn count(&self) -> Result<usize> {
        self.len()
    }

    async fn any(&self, query: &Query) -> Result<bool> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(!query.select_from(&items).is_empty())
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<T>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(query.select_from(&items).into_iter().cloned().collect())
    }
}
