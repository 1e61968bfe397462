use bp_dupcheck::algorithms::{ratio, token_set_ratio, token_sort_ratio};
use bp_dupcheck::{MatchOptions, Matcher, Normalizer, RawRow, Scorer};
use proptest::prelude::*;
use std::collections::HashSet;

/// Name-like strings: words, punctuation, the odd title or suffix.
fn name_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[A-Za-z]{1,8}",
            "[0-9]{1,3}",
            Just("Ltd.".to_string()),
            Just("Mr.".to_string()),
            Just("&".to_string()),
            Just("Müller".to_string()),
        ],
        0..5,
    )
    .prop_map(|words| words.join(" "))
}

fn normalized_strategy() -> impl Strategy<Value = String> {
    name_strategy().prop_map(|name| Normalizer::default().normalize(&name))
}

proptest! {
    #[test]
    fn normalize_is_idempotent(text in ".{0,40}") {
        let normalizer = Normalizer::default();
        let once = normalizer.normalize(&text);
        prop_assert_eq!(normalizer.normalize(&once), once);
    }

    #[test]
    fn normalize_never_leaves_padding(text in ".{0,40}") {
        let out = Normalizer::default().normalize(&text);
        prop_assert_eq!(out.trim(), out.as_str());
        prop_assert!(!out.contains("  "));
    }

    #[test]
    fn whitespace_normalizes_to_empty(text in "[ \t\n]{0,10}") {
        prop_assert_eq!(Normalizer::default().normalize(&text), "");
    }

    #[test]
    fn metrics_stay_in_range(a in normalized_strategy(), b in normalized_strategy()) {
        for value in [ratio(&a, &b), token_sort_ratio(&a, &b), token_set_ratio(&a, &b)] {
            prop_assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn score_is_symmetric(a in normalized_strategy(), b in normalized_strategy()) {
        let scorer = Scorer::default();
        prop_assert_eq!(scorer.score(&a, &b), scorer.score(&b, &a));
    }

    #[test]
    fn score_of_self_is_100(a in normalized_strategy()) {
        prop_assume!(!a.is_empty());
        prop_assert_eq!(Scorer::default().score(&a, &a), 100.0);
    }

    #[test]
    fn empty_scores_zero(a in normalized_strategy()) {
        let scorer = Scorer::default();
        prop_assert_eq!(scorer.score("", &a), 0.0);
        prop_assert_eq!(scorer.score(&a, ""), 0.0);
    }

    #[test]
    fn result_set_invariants(
        names in prop::collection::vec(name_strategy(), 1..12),
        top_n in 1usize..4,
        min_score in 0.0f64..100.0,
    ) {
        let rows: Vec<RawRow> = names
            .iter()
            .enumerate()
            .map(|(i, name)| RawRow::new(format!("BP{}", i), name.clone(), ""))
            .collect();
        let session = Matcher::default().load(rows);
        let results = session.find_matches(&MatchOptions::new(top_n, min_score)).unwrap();

        prop_assert_eq!(results.len(), names.len());
        let keys: HashSet<&str> = results.iter().map(|(id, _)| id).collect();
        prop_assert_eq!(keys.len(), names.len());

        for (id, candidates) in results.iter() {
            prop_assert!(candidates.len() <= top_n);
            for pair in candidates.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
            for c in candidates {
                prop_assert_ne!(c.candidate.id(), id);
                prop_assert!(c.score >= min_score);
            }
        }
    }
}
