use std::cmp::Reverse;

use crate::entity::{CommentEntity, VideoEntity};

/// Sorts `entities` by `key_fn` descending and keeps the first `max_count`.
///
/// The sort is stable, so equal keys keep their incoming order. Truncation
/// happens after sorting: the result is the top `max_count` of everything
/// collected.
#[must_use]
pub fn rank_and_trim<T, K, F>(mut entities: Vec<T>, key_fn: F, max_count: usize) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    entities.sort_by_key(|e| Reverse(key_fn(e)));
    entities.truncate(max_count);
    entities
}

#[must_use]
pub fn by_view_count(video: &VideoEntity) -> u64 {
    video.statistics.view_count
}

#[must_use]
pub fn by_like_count(comment: &CommentEntity) -> u64 {
    comment.like_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_descending_and_truncates_after_sorting() {
        let ranked = rank_and_trim(vec![3, 9, 1, 7, 5], |n| *n, 3);
        assert_eq!(ranked, vec![9, 7, 5]);
    }

    #[test]
    fn equal_keys_keep_original_order() {
        let items = vec![("a", 1), ("b", 5), ("c", 1), ("d", 5), ("e", 1)];
        let ranked = rank_and_trim(items, |(_, k)| *k, 10);
        assert_eq!(
            ranked.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            vec!["b", "d", "a", "c", "e"]
        );
    }

    #[test]
    fn max_count_larger_than_input_keeps_everything() {
        assert_eq!(rank_and_trim(vec![1, 2], |n| *n, 50), vec![2, 1]);
        assert!(rank_and_trim(Vec::<u64>::new(), |n| *n, 5).is_empty());
    }

    #[test]
    fn videos_rank_by_views() {
        let mut low = VideoEntity::default();
        low.statistics.view_count = 10;
        low.basic_info.video_id = "low".to_string();
        let mut high = VideoEntity::default();
        high.statistics.view_count = 1_000;
        high.basic_info.video_id = "high".to_string();

        let ranked = rank_and_trim(vec![low, high], by_view_count, 1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].basic_info.video_id, "high");
    }
}
