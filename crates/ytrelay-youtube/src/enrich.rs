//! Batched secondary lookups keyed by identifier.

use std::collections::HashMap;
use std::future::Future;

use crate::error::YoutubeError;
use crate::pagination::Keyed;

/// Identifier to detail record. The first record seen for an id is kept.
pub type DetailMap<D> = HashMap<String, D>;

/// Number of calls [`enrich`] makes for `id_count` ids.
#[must_use]
pub fn batch_count(id_count: usize, batch_max: usize) -> usize {
    id_count.div_ceil(batch_max.max(1))
}

/// Looks up detail records for `ids` in contiguous chunks of at most
/// `batch_max`, one `fetch_details` call per chunk, in order.
///
/// Records the upstream omits are simply missing from the map; the merger
/// applies defaults for them.
///
/// # Errors
///
/// The first failing chunk aborts the run with
/// [`YoutubeError::BatchDetail`] naming its 0-based index and size.
pub async fn enrich<'a, D, F, Fut>(
    ids: &'a [String],
    batch_max: usize,
    mut fetch_details: F,
) -> Result<DetailMap<D>, YoutubeError>
where
    D: Keyed,
    F: FnMut(&'a [String]) -> Fut,
    Fut: Future<Output = Result<Vec<D>, YoutubeError>>,
{
    let mut details = DetailMap::with_capacity(ids.len());
    if ids.is_empty() {
        return Ok(details);
    }

    for (batch_index, batch) in ids.chunks(batch_max.max(1)).enumerate() {
        tracing::debug!(batch_index, batch_len = batch.len(), "fetching detail batch");

        let records = fetch_details(batch)
            .await
            .map_err(|e| YoutubeError::BatchDetail {
                batch_index,
                batch_len: batch.len(),
                source: Box::new(e),
            })?;

        if records.len() < batch.len() {
            tracing::debug!(
                batch_index,
                requested = batch.len(),
                returned = records.len(),
                "upstream omitted some records"
            );
        }

        for record in records {
            let Some(key) = record.key().map(str::to_owned) else {
                continue;
            };
            details.entry(key).or_insert(record);
        }
    }

    Ok(details)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Detail {
        id: String,
        tag: &'static str,
    }

    impl Keyed for Detail {
        fn key(&self) -> Option<&str> {
            Some(&self.id)
        }
    }

    fn id_list(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("id{i}")).collect()
    }

    #[tokio::test]
    async fn call_count_and_map_size_follow_batch_max() {
        for (n, expected_calls) in [(1usize, 1usize), (49, 1), (50, 1), (51, 2), (75, 2), (250, 5)]
        {
            let ids = id_list(n);
            let sizes = RefCell::new(Vec::new());
            let map = enrich(&ids, 50, |batch| {
                sizes.borrow_mut().push(batch.len());
                let records: Vec<Detail> = batch
                    .iter()
                    .map(|id| Detail {
                        id: id.clone(),
                        tag: "x",
                    })
                    .collect();
                async move { Ok::<_, YoutubeError>(records) }
            })
            .await
            .unwrap();

            assert_eq!(sizes.borrow().len(), expected_calls, "n = {n}");
            assert_eq!(batch_count(n, 50), expected_calls, "n = {n}");
            assert_eq!(sizes.borrow().iter().sum::<usize>(), n);
            assert_eq!(map.len(), n, "n = {n}");
        }
    }

    #[tokio::test]
    async fn chunks_preserve_original_order() {
        let ids = id_list(5);
        let mut seen: Vec<Vec<String>> = Vec::new();
        enrich(&ids, 2, |batch| {
            seen.push(batch.to_vec());
            async move { Ok::<_, YoutubeError>(Vec::<Detail>::new()) }
        })
        .await
        .unwrap();

        assert_eq!(
            seen,
            vec![
                vec!["id0".to_string(), "id1".to_string()],
                vec!["id2".to_string(), "id3".to_string()],
                vec!["id4".to_string()],
            ]
        );
    }

    #[tokio::test]
    async fn empty_ids_make_no_call() {
        let mut calls = 0;
        let map = enrich(&[], 50, |_batch| {
            calls += 1;
            async move { Ok::<_, YoutubeError>(Vec::<Detail>::new()) }
        })
        .await
        .unwrap();

        assert!(map.is_empty());
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn first_record_for_an_id_wins() {
        let ids = id_list(2);
        let map = enrich(&ids, 1, |batch| {
            let id = batch[0].clone();
            async move {
                Ok::<_, YoutubeError>(vec![
                    Detail {
                        id: id.clone(),
                        tag: "first",
                    },
                    Detail {
                        id: "id0".to_string(),
                        tag: "late",
                    },
                ])
            }
        })
        .await
        .unwrap();

        assert_eq!(map["id0"].tag, "first");
        assert_eq!(map["id1"].tag, "first");
    }

    #[tokio::test]
    async fn failing_batch_reports_index_and_size() {
        let ids = id_list(120);
        let mut call = 0usize;
        let result = enrich(&ids, 50, |batch| {
            call += 1;
            let fail = call == 2;
            let records: Vec<Detail> = batch
                .iter()
                .map(|id| Detail {
                    id: id.clone(),
                    tag: "x",
                })
                .collect();
            async move {
                if fail {
                    Err(YoutubeError::UnexpectedStatus {
                        status: 500,
                        resource: "videos".to_string(),
                    })
                } else {
                    Ok(records)
                }
            }
        })
        .await;

        match result {
            Err(YoutubeError::BatchDetail {
                batch_index,
                batch_len,
                ..
            }) => {
                assert_eq!(batch_index, 1);
                assert_eq!(batch_len, 50);
            }
            other => panic!("expected BatchDetail, got: {other:?}"),
        }
        assert_eq!(call, 2, "no call after the failing batch");
    }
}
