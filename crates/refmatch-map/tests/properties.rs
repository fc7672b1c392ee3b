use proptest::prelude::*;

use refmatch_map::{MultiStrategyScorer, distance, find_city_matches, similarity};
use refmatch_model::CandidateRecord;

fn word_phrase() -> impl Strategy<Value = String> {
    "[a-z]{1,10}( [a-z]{1,10}){0,2}"
}

proptest! {
    #[test]
    fn similarity_with_itself_is_100(s in word_phrase()) {
        prop_assert_eq!(similarity(&s, &s), 100);
    }

    #[test]
    fn similarity_is_symmetric_and_bounded(a in "[a-zA-Z ]{0,16}", b in "[a-zA-Z ]{0,16}") {
        let ab = similarity(&a, &b);
        prop_assert_eq!(ab, similarity(&b, &a));
        prop_assert!(ab <= 100);
    }

    #[test]
    fn distance_is_symmetric(a in "[a-z]{0,12}", b in "[a-z]{0,12}") {
        prop_assert_eq!(distance(&a, &b), distance(&b, &a));
        prop_assert!(distance(&a, &b) <= a.len().max(b.len()));
    }

    #[test]
    fn composite_score_is_bounded(a in word_phrase(), b in word_phrase()) {
        let score = MultiStrategyScorer::default().score(&a, &b);
        prop_assert!(score <= 100);
    }

    #[test]
    fn city_matches_are_sorted(term in "[a-z ]{0,14}") {
        let candidates = vec![
            CandidateRecord::new("1", "Kabupaten Sleman"),
            CandidateRecord::new("2", "Kota Yogyakarta"),
            CandidateRecord::new("3", "Kabupaten Bantul"),
            CandidateRecord::new("4", "Kota Magelang"),
        ];
        let matches = find_city_matches(&term, &candidates);
        prop_assert!(matches.windows(2).all(|p| p[0].similarity >= p[1].similarity));
        prop_assert!(matches.iter().all(|m| m.similarity > 50 && m.similarity <= 100));
    }
}
