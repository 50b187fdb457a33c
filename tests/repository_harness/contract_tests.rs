//! Macro-generated test suite for `CatalogueRepository` contract validation.
//!
//! The `catalogue_repository_tests!` macro generates a test module that
//! validates any `CatalogueRepository` implementation against the full
//! contract: CRUD round trips, idempotent deletes, counting, sorted reads,
//! paging, failure propagation and concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod repository_harness;
//!
//! use repository_harness::*;
//! use catalogue::catalogue::InMemoryCatalogueRepository;
//!
//! catalogue_repository_tests!(InMemoryCatalogueRepository::new());
//! ```

/// Generate a full `CatalogueRepository` conformance test suite.
///
/// `$factory` must be an expression that evaluates to an empty repository.
/// It is re-evaluated for each test to ensure isolation. For the concurrent
/// access test, the returned repository must also implement `Clone + 'static`.
#[macro_export]
macro_rules! catalogue_repository_tests {
    ($factory:expr) => {
        mod catalogue_repository_contract_tests {
            use super::*;
            use catalogue::catalogue::{CatalogueItem, CatalogueRepository};
            use catalogue::core::{
                Order, PageRequest, ReactiveCrudRepository, ReactiveSortingRepository,
                RepositoryError, Sort, StorageError, ValidationError,
            };
            use futures::{StreamExt, TryStreamExt};

            fn assert_catalogue_repository<R: CatalogueRepository>(_: &R) {}

            // ==================================================================
            // CRUD — save & find_by_id
            // ==================================================================

            #[tokio::test]
            async fn test_save_then_find_round_trip() {
                let repository = $factory;
                assert_catalogue_repository(&repository);

                let saved = repository
                    .save(item("Widget", 9.5).with_description("small"))
                    .await
                    .unwrap();
                let id = saved.id.expect("save should assign an id");

                let found = repository.find_by_id(&id).await.unwrap();
                assert_eq!(found, Some(saved));
            }

            #[tokio::test]
            async fn test_find_missing_is_empty_not_error() {
                let repository = $factory;
                repository.save(item("Widget", 9.5)).await.unwrap();

                for id in [0_i64, -1, 999, i64::MAX] {
                    let found = repository.find_by_id(&id).await.unwrap();
                    assert!(found.is_none(), "id {} should not be found", id);
                }
            }

            #[tokio::test]
            async fn test_save_existing_updates_in_place() {
                let repository = $factory;
                let mut saved = repository.save(item("Widget", 9.5)).await.unwrap();
                let id = saved.id.unwrap();

                saved.price = 12.0;
                let updated = repository.save(saved).await.unwrap();

                assert_eq!(updated.id, Some(id));
                assert_eq!(repository.count().await.unwrap(), 1);
                let found = repository.find_by_id(&id).await.unwrap().unwrap();
                assert!((found.price - 12.0).abs() < f64::EPSILON);
            }

            #[tokio::test]
            async fn test_save_with_explicit_id() {
                let repository = $factory;
                let saved = repository
                    .save(item("Widget", 9.5).with_id(1))
                    .await
                    .unwrap();
                assert_eq!(saved.id, Some(1));
                assert!(repository.exists_by_id(&1).await.unwrap());
            }

            // ==================================================================
            // save_all
            // ==================================================================

            #[tokio::test]
            async fn test_save_all_preserves_order() {
                let repository = $factory;
                let batch = sample_batch(6);
                let expected: Vec<String> = batch.iter().map(|i| i.sku.clone()).collect();

                let saved: Vec<CatalogueItem> = repository
                    .save_all(batch)
                    .try_collect()
                    .await
                    .unwrap();

                let skus: Vec<String> = saved.iter().map(|i| i.sku.clone()).collect();
                assert_eq!(skus, expected);
                assert!(saved.iter().all(|i| i.id.is_some()));
                assert_eq!(repository.count().await.unwrap(), 6);
            }

            #[tokio::test]
            async fn test_save_all_reports_failed_writes() {
                let repository = $factory;
                let batch = vec![
                    item("Widget", 1.0),
                    item("Widget", 2.0),
                    item("Gadget", 3.0),
                ];

                let results: Vec<_> = repository.save_all(batch).collect().await;
                assert!(results[0].is_ok());
                assert!(results[1].is_err());
                assert!(results[2].is_ok());

                let saved: Result<Vec<CatalogueItem>, _> = repository
                    .save_all(vec![item("Bolt", 1.0), item("Bolt", 1.0)])
                    .try_collect()
                    .await;
                assert!(saved.is_err());
            }

            // ==================================================================
            // delete_by_id & exists_by_id
            // ==================================================================

            #[tokio::test]
            async fn test_delete_is_idempotent() {
                let repository = $factory;
                let saved = repository.save(item("Widget", 9.5)).await.unwrap();
                let id = saved.id.unwrap();

                repository.delete_by_id(&id).await.unwrap();
                assert!(repository.find_by_id(&id).await.unwrap().is_none());

                // Again, and for an id that never existed
                repository.delete_by_id(&id).await.unwrap();
                repository.delete_by_id(&4242).await.unwrap();
                assert!(repository.find_by_id(&4242).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_widget_lifecycle() {
                let repository = $factory;

                repository
                    .save(CatalogueItem::new("W-1", "Widget", 9.5).with_id(1))
                    .await
                    .unwrap();
                assert!(repository.exists_by_id(&1).await.unwrap());
                assert_eq!(repository.count().await.unwrap(), 1);

                repository.delete_by_id(&1).await.unwrap();
                assert!(!repository.exists_by_id(&1).await.unwrap());
                assert_eq!(repository.count().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_delete_entity_requires_id() {
                let repository = $factory;
                let err = repository.delete(&item("Widget", 9.5)).await.unwrap_err();
                assert!(matches!(
                    err,
                    RepositoryError::Validation(ValidationError::MissingIdentifier { .. })
                ));

                let saved = repository.save(item("Widget", 9.5)).await.unwrap();
                repository.delete(&saved).await.unwrap();
                assert_eq!(repository.count().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_bulk_deletes() {
                let repository = $factory;
                let saved: Vec<CatalogueItem> = repository
                    .save_all(sample_batch(5))
                    .try_collect()
                    .await
                    .unwrap();
                let ids: Vec<i64> = saved.iter().filter_map(|i| i.id).collect();

                repository
                    .delete_all_by_id(vec![ids[0], ids[1], 9999])
                    .await
                    .unwrap();
                assert_eq!(repository.count().await.unwrap(), 3);

                // One unsaved item aborts the whole call
                let mixed = vec![saved[2].clone(), item("Loose", 1.0)];
                assert!(repository.delete_all_items(mixed).await.is_err());
                assert_eq!(repository.count().await.unwrap(), 3);

                repository
                    .delete_all_items(vec![saved[2].clone()])
                    .await
                    .unwrap();
                assert_eq!(repository.count().await.unwrap(), 2);

                repository.delete_all().await.unwrap();
                assert_eq!(repository.count().await.unwrap(), 0);
            }

            // ==================================================================
            // count & find_all
            // ==================================================================

            #[tokio::test]
            async fn test_count_matches_saved() {
                let repository = $factory;
                assert_eq!(repository.count().await.unwrap(), 0);

                for (n, entity) in sample_batch(7).into_iter().enumerate() {
                    repository.save(entity).await.unwrap();
                    assert_eq!(repository.count().await.unwrap(), n as u64 + 1);
                }
            }

            #[tokio::test]
            async fn test_find_all_returns_everything() {
                let repository = $factory;
                let empty: Vec<CatalogueItem> =
                    repository.find_all().try_collect().await.unwrap();
                assert!(empty.is_empty());

                repository
                    .save_all(sample_batch(4))
                    .try_collect::<Vec<_>>()
                    .await
                    .unwrap();

                let all: Vec<CatalogueItem> = repository.find_all().try_collect().await.unwrap();
                assert_eq!(all.len(), 4);
            }

            #[tokio::test]
            async fn test_find_all_by_id_follows_requested_order() {
                let repository = $factory;
                let saved: Vec<CatalogueItem> = repository
                    .save_all(priced_items())
                    .try_collect()
                    .await
                    .unwrap();
                let widget = saved[0].id.unwrap();
                let nut = saved[3].id.unwrap();

                let found: Vec<CatalogueItem> = repository
                    .find_all_by_id(vec![nut, 12345, widget])
                    .try_collect()
                    .await
                    .unwrap();
                assert_eq!(names(&found), vec!["Nut", "Widget"]);
            }

            // ==================================================================
            // Sorting
            // ==================================================================

            #[tokio::test]
            async fn test_sorted_independent_of_insertion_order() {
                let base = priced_items();
                let permutations: Vec<Vec<usize>> = vec![
                    vec![0, 1, 2, 3],
                    vec![3, 2, 1, 0],
                    vec![1, 3, 0, 2],
                    vec![2, 0, 3, 1],
                ];

                for permutation in permutations {
                    let repository = $factory;
                    for &i in &permutation {
                        repository.save(base[i].clone()).await.unwrap();
                    }

                    let by_price: Vec<CatalogueItem> = repository
                        .find_all_sorted(&Sort::by(Order::asc("price")))
                        .try_collect()
                        .await
                        .unwrap();
                    assert_eq!(names(&by_price), vec!["Bolt", "Nut", "Widget", "Gadget"]);

                    let by_name_desc: Vec<CatalogueItem> = repository
                        .find_all_sorted(&Sort::by(Order::desc("name")))
                        .try_collect()
                        .await
                        .unwrap();
                    assert_eq!(names(&by_name_desc), vec!["Widget", "Nut", "Gadget", "Bolt"]);
                }
            }

            #[tokio::test]
            async fn test_sorted_multi_key() {
                let repository = $factory;
                repository
                    .save_all(priced_items())
                    .try_collect::<Vec<_>>()
                    .await
                    .unwrap();

                let sort = Sort::parse("category,price:desc").unwrap();
                let sorted: Vec<CatalogueItem> = repository
                    .find_all_sorted(&sort)
                    .try_collect()
                    .await
                    .unwrap();
                assert_eq!(names(&sorted), vec!["Nut", "Bolt", "Gadget", "Widget"]);
            }

            #[tokio::test]
            async fn test_sorted_unknown_property_fails() {
                let repository = $factory;
                repository.save(item("Widget", 9.5)).await.unwrap();

                let result: Result<Vec<CatalogueItem>, _> = repository
                    .find_all_sorted(&Sort::by(Order::asc("colour")))
                    .try_collect()
                    .await;
                assert!(matches!(result, Err(RepositoryError::Query(_))));
            }

            // ==================================================================
            // Paging
            // ==================================================================

            #[tokio::test]
            async fn test_find_page() {
                let repository = $factory;
                repository
                    .save_all(sample_batch(25))
                    .try_collect::<Vec<_>>()
                    .await
                    .unwrap();

                let request = PageRequest::of(3, 10).with_sort(Order::desc("price"));
                let page = repository.find_page(&request).await.unwrap();

                assert_eq!(page.content.len(), 5);
                assert_eq!(page.content[0].sku, "SKU-004");
                assert_eq!(page.pagination.total, 25);
                assert_eq!(page.pagination.total_pages, 3);
                assert!(page.pagination.has_prev);
                assert!(!page.pagination.has_next);

                let beyond = repository
                    .find_page(&PageRequest::of(9, 10))
                    .await
                    .unwrap();
                assert!(beyond.is_empty());
                assert_eq!(beyond.pagination.total, 25);
            }

            #[tokio::test]
            async fn test_find_page_far_beyond_end() {
                let repository = $factory;
                repository
                    .save_all(sample_batch(3))
                    .try_collect::<Vec<_>>()
                    .await
                    .unwrap();

                let page = repository
                    .find_page(&PageRequest::of(usize::MAX, 10))
                    .await
                    .unwrap();
                assert!(page.is_empty());
                assert_eq!(page.pagination.total, 3);
                assert!(page.pagination.has_prev);
                assert!(!page.pagination.has_next);
            }

            // ==================================================================
            // Failures
            // ==================================================================

            #[tokio::test]
            async fn test_duplicate_sku_rejected() {
                let repository = $factory;
                repository
                    .save(CatalogueItem::new("W-1", "Widget", 9.5))
                    .await
                    .unwrap();

                let err = repository
                    .save(CatalogueItem::new("W-1", "Imposter", 1.0))
                    .await
                    .unwrap_err();
                assert!(matches!(
                    err,
                    RepositoryError::Storage(StorageError::ConstraintViolation { .. })
                ));
                assert_eq!(err.error_code(), "CONSTRAINT_VIOLATION");
                assert_eq!(repository.count().await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_invalid_item_rejected() {
                let repository = $factory;
                let err = repository
                    .save(CatalogueItem::new("W-1", "", -3.0))
                    .await
                    .unwrap_err();

                let RepositoryError::Validation(ValidationError::FieldErrors(fields)) = err else {
                    panic!("expected field errors");
                };
                let fields: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(fields, vec!["name", "price"]);
                assert_eq!(repository.count().await.unwrap(), 0);
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_saves_get_distinct_ids() {
                let repository = $factory;
                let mut handles = Vec::new();

                for entity in sample_batch(20) {
                    let repository = repository.clone();
                    handles.push(tokio::spawn(async move { repository.save(entity).await }));
                }

                let mut ids = Vec::new();
                for handle in handles {
                    let saved = handle.await.expect("task should not panic").unwrap();
                    ids.push(saved.id.unwrap());
                }

                ids.sort_unstable();
                ids.dedup();
                assert_eq!(ids.len(), 20);
                assert_eq!(repository.count().await.unwrap(), 20);
            }
        }
    };
}
