//! Shared test harness for data source testing
//!
//! Provides `TestItem`, a sortable record with fields covering the common
//! `FieldValue` variants, a `RecordingSource` wrapper counting the calls a
//! pipeline makes, a `QueryLog` wrapper keeping the queries it evaluates,
//! and helper functions for creating test data.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod source_harness;
//! use source_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
mod paged_source_tests;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use paged_source::core::query::Query;
use paged_source::core::source::DataSource;
use paged_source::impl_sortable;

// ---------------------------------------------------------------------------
// TestItem
// ---------------------------------------------------------------------------

/// A test record.
///
/// Sortable fields:
/// - `seq`: insertion position, 1-based (Integer)
/// - `name`: `item-001`, `item-002`, ... (String, unique)
/// - `age`: `seq % 7` (Integer, with ties)
/// - `score`: `seq / 4` (Float, with ties)
/// - `active`: even `seq` (Boolean)
/// - `id`: random (Uuid)
/// - `createdAt`: one minute apart, newest last (DateTime)
///
/// `secret` is deliberately not sortable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestItem {
    pub id: Uuid,
    pub seq: i64,
    pub name: String,
    pub age: i64,
    pub score: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub secret: String,
}

impl_sortable!(TestItem {
    id,
    seq,
    name,
    age,
    score,
    active,
    created_at as "createdAt",
});

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Create the item at insertion position `seq`
pub fn create_test_item(seq: i64) -> TestItem {
    let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    TestItem {
        id: Uuid::new_v4(),
        seq,
        name: format!("item-{:03}", seq),
        age: seq % 7,
        score: (seq / 4) as f64,
        active: seq % 2 == 0,
        created_at: epoch + Duration::minutes(seq),
        secret: format!("secret-{}", seq),
    }
}

/// Items `1..=n` in insertion order
pub fn sample_items(n: usize) -> Vec<TestItem> {
    (1..=n as i64).map(create_test_item).collect()
}

/// Insertion positions of a page, in page order
pub fn seqs(items: &[TestItem]) -> Vec<i64> {
    items.iter().map(|item| item.seq).collect()
}

// ---------------------------------------------------------------------------
// RecordingSource
// ---------------------------------------------------------------------------

/// Wraps a source and counts every call made to it
pub struct RecordingSource<S> {
    inner: S,
    counts: AtomicUsize,
    checks: AtomicUsize,
    fetches: AtomicUsize,
}

impl<S> RecordingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            counts: AtomicUsize::new(0),
            checks: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn count_calls(&self) -> usize {
        self.counts.load(Ordering::SeqCst)
    }

    pub fn any_calls(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.count_calls() + self.any_calls() + self.fetch_calls()
    }
}

#[async_trait]
impl<T, S> DataSource<T> for RecordingSource<S>
where
    T: Send + 'static,
    S: DataSource<T>,
{
    async fn count(&self) -> Result<usize> {
        self.counts.fetch_add(1, Ordering::SeqCst);
        self.inner.count().await
    }

    async fn any(&self, query: &Query) -> Result<bool> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.inner.any(query).await
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<T>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(query).await
    }

    fn is_ordered(&self) -> bool {
        self.inner.is_ordered()
    }
}

// ---------------------------------------------------------------------------
// QueryLog
// ---------------------------------------------------------------------------

/// Wraps a source, keeps every query it is asked to evaluate, and reports
/// whatever `is_ordered` it was built with
pub struct QueryLog<S> {
    inner: S,
    ordered: bool,
    checked: Mutex<Vec<Query>>,
    fetched: Mutex<Vec<Query>>,
}

impl<S> QueryLog<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            ordered: false,
            checked: Mutex::new(Vec::new()),
            fetched: Mutex::new(Vec::new()),
        }
    }

    /// A source that already has an explicit order
    pub fn ordered(inner: S) -> Self {
        Self {
            ordered: true,
            ..Self::new(inner)
        }
    }

    pub fn checked(&self) -> Vec<Query> {
        self.checked.lock().unwrap().clone()
    }

    pub fn fetched(&self) -> Vec<Query> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl<T, S> DataSource<T> for QueryLog<S>
where
    T: Send + 'static,
    S: DataSource<T>,
{
    async fn count(&self) -> Result<usize> {
        self.inner.count().await
    }

    async fn any(&self, query: &Query) -> Result<bool> {
        self.checked.lock().unwrap().push(query.clone());
        self.inner.any(query).await
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<T>> {
        self.fetched.lock().unwrap().push(query.clone());
        self.inner.fetch(query).await
    }

    fn is_ordered(&self) -> bool {
        self.ordered
    }
}

// ---------------------------------------------------------------------------
// FailingSource
// ---------------------------------------------------------------------------

/// A source whose every call fails, like an unreachable database
pub struct FailingSource;

#[async_trait]
impl DataSource<TestItem> for FailingSource {
    async fn count(&self) -> Result<usize> {
        Err(anyhow!("connection refused"))
    }

    async fn any(&self, _query: &Query) -> Result<bool> {
        Err(anyhow!("connection refused"))
    }

    async fn fetch(&self, _query: &Query) -> Result<Vec<TestItem>> {
        Err(anyhow!("connection refused"))
    }
}
