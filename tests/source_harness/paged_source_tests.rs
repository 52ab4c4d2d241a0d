//! Macro-generated test suite for `PagedResult` over a `DataSource<TestItem>`.
//!
//! The `paged_source_tests!` macro generates a test module that runs the
//! whole paging pipeline against any source implementation: paging,
//! boundary correction, ordering, order field rejection, empty sources and
//! projection.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod source_harness;
//!
//! use source_harness::*;
//! use paged_source::storage::InMemorySource;
//!
//! paged_source_tests!(|items: Vec<TestItem>| InMemorySource::from(items));
//! ```
//!
//! # Generated Tests
//!
//! ## Paging
//! - `test_second_page`: 100 items, page 2 of 10
//! - `test_last_partial_page`: 25 items, page 3 of 10 holds 5
//! - `test_page_past_end_falls_back_to_first`: 25 items, page 4 of 10
//! - `test_count_larger_than_total`: count clamped to the total
//! - `test_no_page_returns_no_data`: total only
//! - `test_pages_cover_source_once`: every item lands on exactly one page
//! - `test_zero_page_is_first_page`
//!
//! ## Ordering
//! - `test_order_by_string_desc`, `test_order_by_float_is_stable`,
//!   `test_order_by_datetime`, `test_order_by_alias_only`
//! - `test_blank_order_by_keeps_source_order`
//!
//! ## Rejection
//! - `test_unknown_field_rejected`, `test_hidden_field_rejected`,
//!   `test_expression_rejected`, `test_missing_page_size`
//!
//! ## Edge Cases
//! - `test_empty_source`, `test_projection_keeps_metadata`

/// Generate a `PagedResult` conformance test suite for a data source.
///
/// `$factory` must be an expression callable with a `Vec<TestItem>` that
/// returns a `DataSource<TestItem>` holding exactly those items, in that
/// order. It is called anew for each test.
#[macro_export]
macro_rules! paged_source_tests {
    ($factory:expr) => {
        mod paged_source_contract_tests {
            use super::*;
            use paged_source::core::error::{OrderFieldReason, PagingError};
            use paged_source::core::params::Params;
            use paged_source::core::result::PagedResult;

            async fn page_of(n: usize, params: Params) -> Result<PagedResult<TestItem>, PagingError> {
                let source = ($factory)(sample_items(n));
                PagedResult::<TestItem>::create(params, &source).await
            }

            // ==================================================================
            // Paging
            // ==================================================================

            #[tokio::test]
            async fn test_second_page() {
                let result = page_of(100, Params::paged(2, 10)).await.unwrap();

                assert_eq!(result.total, 100);
                assert_eq!(result.page(), Some(2));
                assert_eq!(result.count(), Some(10));
                assert_eq!(seqs(&result.data), (11..=20).collect::<Vec<_>>());
            }

            #[tokio::test]
            async fn test_last_partial_page() {
                let result = page_of(25, Params::paged(3, 10)).await.unwrap();

                assert_eq!(result.page(), Some(3));
                assert_eq!(seqs(&result.data), (21..=25).collect::<Vec<_>>());
                assert_eq!(result.total_pages(), 3);
                assert!(!result.has_next());
                assert!(result.has_prev());
            }

            #[tokio::test]
            async fn test_page_past_end_falls_back_to_first() {
                let result = page_of(25, Params::paged(4, 10)).await.unwrap();

                assert_eq!(result.page(), Some(1));
                assert_eq!(result.total, 25);
                assert_eq!(seqs(&result.data), (1..=10).collect::<Vec<_>>());
            }

            #[tokio::test]
            async fn test_page_past_end_keeps_order() {
                let result = page_of(25, Params::paged(10, 3).order_by_desc("seq"))
                    .await
                    .unwrap();

                assert_eq!(result.page(), Some(1));
                assert_eq!(seqs(&result.data), vec![25, 24, 23]);
            }

            #[tokio::test]
            async fn test_count_larger_than_total() {
                let result = page_of(100, Params::paged(2, 200)).await.unwrap();

                assert_eq!(result.total, 100);
                assert_eq!(result.page(), Some(1));
                assert_eq!(result.count(), Some(100));
                assert_eq!(result.data.len(), 100);
            }

            #[tokio::test]
            async fn test_no_page_returns_no_data() {
                let result = page_of(30, Params::new().order_by("name")).await.unwrap();

                assert!(result.data.is_empty());
                assert_eq!(result.total, 30);
                assert_eq!(result.page(), None);
                assert_eq!(result.params.order_by.as_deref(), Some("name"));

                let result = page_of(30, Params::new().with_count(5)).await.unwrap();
                assert!(result.data.is_empty());
                assert_eq!(result.count(), Some(5));
            }

            #[tokio::test]
            async fn test_pages_cover_source_once() {
                let mut seen = Vec::new();
                for page in 1..=12 {
                    let result = page_of(100, Params::paged(page, 9).order_by("name"))
                        .await
                        .unwrap();
                    assert_eq!(result.total, 100);
                    assert_eq!(result.page(), Some(page));
                    seen.extend(seqs(&result.data));
                }
                assert_eq!(seen, (1..=100).collect::<Vec<_>>());
            }

            #[tokio::test]
            async fn test_zero_page_is_first_page() {
                let result = page_of(20, Params::paged(0, 5)).await.unwrap();

                assert_eq!(result.page(), Some(1));
                assert_eq!(seqs(&result.data), vec![1, 2, 3, 4, 5]);
            }

            // ==================================================================
            // Ordering
            // ==================================================================

            #[tokio::test]
            async fn test_order_by_string_desc() {
                let result = page_of(100, Params::paged(1, 3).order_by_desc("name"))
                    .await
                    .unwrap();

                assert_eq!(seqs(&result.data), vec![100, 99, 98]);
                assert!(result.params.desc);
            }

            #[tokio::test]
            async fn test_order_by_float_is_stable() {
                // score = seq / 4, so every score is shared by up to four items
                let result = page_of(12, Params::paged(1, 12).order_by_desc("score"))
                    .await
                    .unwrap();

                assert_eq!(
                    seqs(&result.data),
                    vec![12, 8, 9, 10, 11, 4, 5, 6, 7, 1, 2, 3]
                );
            }

            #[tokio::test]
            async fn test_order_by_datetime() {
                let result = page_of(10, Params::paged(2, 4).order_by_desc("createdAt"))
                    .await
                    .unwrap();

                assert_eq!(seqs(&result.data), vec![6, 5, 4, 3]);
            }

            #[tokio::test]
            async fn test_order_by_alias_only() {
                let err = page_of(10, Params::paged(1, 4).order_by("created_at"))
                    .await
                    .unwrap_err();

                assert!(matches!(
                    err,
                    PagingError::OrderField {
                        reason: OrderFieldReason::UnknownField,
                        ..
                    }
                ));
            }

            #[tokio::test]
            async fn test_blank_order_by_keeps_source_order() {
                let result = page_of(10, Params::paged(2, 3).order_by("   ")).await.unwrap();

                assert_eq!(seqs(&result.data), vec![4, 5, 6]);
            }

            // ==================================================================
            // Rejection
            // ==================================================================

            #[tokio::test]
            async fn test_unknown_field_rejected() {
                let err = page_of(10, Params::paged(1, 10).order_by("nonexistent"))
                    .await
                    .unwrap_err();

                match err {
                    PagingError::OrderField { field, reason } => {
                        assert_eq!(field, "nonexistent");
                        assert_eq!(reason, OrderFieldReason::UnknownField);
                    }
                    other => panic!("Expected OrderField, got {:?}", other),
                }
            }

            #[tokio::test]
            async fn test_hidden_field_rejected() {
                let err = page_of(10, Params::paged(1, 10).order_by("secret"))
                    .await
                    .unwrap_err();

                assert!(err.is_client_error());
            }

            #[tokio::test]
            async fn test_expression_rejected() {
                for payload in [
                    "name.Length",
                    "name; DROP TABLE items",
                    "GetType().Name",
                    "seq DESC",
                    "name[0]",
                ] {
                    let err = page_of(10, Params::paged(1, 10).order_by(payload))
                        .await
                        .unwrap_err();
                    assert!(
                        matches!(
                            err,
                            PagingError::OrderField {
                                reason: OrderFieldReason::NotAFieldName,
                                ..
                            }
                        ),
                        "payload {:?} gave {:?}",
                        payload,
                        err
                    );
                }
            }

            #[tokio::test]
            async fn test_missing_page_size() {
                let err = page_of(10, Params::new().with_page(2)).await.unwrap_err();

                assert!(matches!(err, PagingError::MissingPageSize));
                assert!(!err.is_client_error());
            }

            // ==================================================================
            // Edge Cases
            // ==================================================================

            #[tokio::test]
            async fn test_empty_source() {
                let result = page_of(0, Params::paged(3, 10).order_by("name"))
                    .await
                    .unwrap();

                assert_eq!(result.total, 0);
                assert!(result.data.is_empty());
                assert_eq!(result.count(), Some(0));
                assert_eq!(result.page(), Some(3));
                assert_eq!(result.total_pages(), 0);
            }

            #[tokio::test]
            async fn test_projection_keeps_metadata() {
                let result = page_of(200, Params::paged(1, 10).order_by("seq"))
                    .await
                    .unwrap();
                let params = result.params.clone();

                let names = result.select(|item| item.name);

                assert_eq!(names.total, 200);
                assert_eq!(names.params, params);
                assert_eq!(names.data.len(), 10);
                assert_eq!(names.data[0], "item-001");
            }
        }
    };
}
