use super::*;

fn sample() -> RankIndex<&'static str, i64> {
    let mut idx = RankIndex::new();
    for (k, s) in [("alice", 50), ("bob", 40), ("carol", 30), ("dave", 20), ("erin", 10)] {
        idx.set_rank(k, s);
    }
    idx
}

#[test]
fn rank_of_matches_insertion_order_for_distinct_scores() {
    let idx = sample();
    assert_eq!(idx.rank_of("alice"), 1);
    assert_eq!(idx.rank_of("erin"), 5);
    assert_eq!(idx.rank_of("nobody"), 0);
}

#[test]
fn node_at_round_trips_with_rank_of() {
    let idx = sample();
    for rank in 1..=idx.size() {
        let (key, _) = idx.node_at(rank).unwrap();
        assert_eq!(idx.rank_of(key), rank);
    }
}

#[test]
fn node_at_out_of_range_returns_none() {
    let idx = sample();
    assert_eq!(idx.node_at(0), None);
    assert_eq!(idx.node_at(idx.size() + 1), None);
    assert_eq!(idx.node_at(usize::MAX), None);
}

#[test]
fn node_at_on_empty_index_returns_none() {
    let idx: RankIndex<&str, i64> = RankIndex::new();
    assert_eq!(idx.node_at(1), None);
}

#[test]
fn score_of_reflects_presence() {
    let idx = sample();
    assert_eq!(idx.score_of("carol"), Some(30));
    assert_eq!(idx.score_of("nobody"), None);
}

#[test]
fn list_from_rank_returns_a_contiguous_slice() {
    let idx = sample();
    let slice = idx.list_from_rank(2, 2);
    assert_eq!(slice, vec![("bob", 40), ("carol", 30)]);
}

#[test]
fn list_from_rank_truncates_at_the_end() {
    let idx = sample();
    let slice = idx.list_from_rank(4, 10);
    assert_eq!(slice, vec![("dave", 20), ("erin", 10)]);
}

#[test]
fn list_from_rank_past_the_end_is_empty() {
    let idx = sample();
    assert_eq!(idx.list_from_rank(idx.size() + 1, 5), Vec::new());
}

#[test]
fn list_from_rank_with_zero_limit_is_empty() {
    let idx = sample();
    assert_eq!(idx.list_from_rank(1, 0), Vec::new());
}

#[test]
fn full_list_matches_iter() {
    let idx = sample();
    assert_eq!(idx.full_list(), idx.iter().collect::<Vec<_>>());
    assert_eq!(idx.full_list().len(), idx.size());
}

#[test]
fn iter_yields_scores_in_non_increasing_order() {
    let idx = sample();
    let scores: Vec<i64> = idx.iter().map(|(_, s)| s).collect();
    let mut sorted = scores.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(scores, sorted);
}

#[test]
fn size_and_is_empty_agree() {
    let idx: RankIndex<&str, i64> = RankIndex::new();
    assert!(idx.is_empty());
    assert_eq!(idx.size(), 0);

    let idx = sample();
    assert!(!idx.is_empty());
    assert_eq!(idx.size(), 5);
}

#[test]
fn max_level_is_zero_when_empty() {
    let idx: RankIndex<&str, i64> = RankIndex::new();
    assert_eq!(idx.max_level(), 0);
}
