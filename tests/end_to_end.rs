use bp_dupcheck::export::{write_json, write_results_csv, write_to_path};
use bp_dupcheck::input::{example_rows, read_rows_from_path, write_example_csv};
use bp_dupcheck::{
    ConfidenceTier, MatchError, MatchOptions, Matcher, MatcherConfig, Normalizer, RawRow, Scorer,
};
use std::collections::HashSet;

fn abc_rows() -> Vec<RawRow> {
    vec![
        RawRow::new("A", "ABC Company Ltd.", ""),
        RawRow::new("B", "ABC Company Limited", ""),
    ]
}

#[test]
fn abc_company_variants_match_both_ways() {
    let session = Matcher::default().load(abc_rows());
    let results = session.find_matches(&MatchOptions::new(3, 50.0)).unwrap();

    let a = results.get("A").unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].candidate.id(), "B");
    assert!(a[0].score >= 80.0);

    let b = results.get("B").unwrap();
    assert_eq!(b[0].candidate.id(), "A");
    assert!(b[0].score >= 80.0);
}

#[test]
fn dissimilar_record_has_no_candidates() {
    let mut rows = abc_rows();
    rows.push(RawRow::new("C", "Unique Company", "No Matches"));
    let session = Matcher::default().load(rows);
    let results = session.find_matches(&MatchOptions::new(3, 50.0)).unwrap();

    assert_eq!(results.len(), 3);
    assert!(results.get("C").unwrap().is_empty());
    assert!(results
        .candidates()
        .all(|c| c.candidate.id() != "C" && c.source.id() != "C"));
}

#[test]
fn matching_without_records_is_an_error() {
    let session = Matcher::default().load(vec![RawRow::new("", "Nameless", "")]);
    assert_eq!(session.len(), 0);
    assert_eq!(
        session.find_matches(&MatchOptions::default()).unwrap_err(),
        MatchError::NothingLoaded
    );
}

#[test]
fn example_dataset_invariants() {
    let options = MatchOptions::new(3, 50.0);
    let session = Matcher::default().load(example_rows());
    assert_eq!(session.len(), 20);
    let results = session.find_matches(&options).unwrap();

    let ids: HashSet<&str> = results.iter().map(|(id, _)| id).collect();
    assert_eq!(ids.len(), 20);

    for (id, candidates) in results.iter() {
        assert!(candidates.len() <= options.top_n);
        for pair in candidates.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        for c in candidates {
            assert_eq!(c.source.id(), id);
            assert_ne!(c.candidate.id(), id);
            assert!(c.score >= options.min_score);
        }
    }
}

#[test]
fn example_dataset_expected_pairs() {
    let results = Matcher::default()
        .load(example_rows())
        .find_matches(&MatchOptions::default())
        .unwrap();

    let best = |id: &str| results.get(id).unwrap()[0].candidate.id().to_string();
    assert_eq!(best("BP003"), "BP004"); // Mrs. Jane Smith / Jane Smith
    assert_eq!(best("BP009"), "BP010"); // Mr. John Doe / John Doe Senior Partner
    assert_eq!(best("BP011"), "BP012"); // Smith & Associates LLC / Smith and Associates LLC
    assert_eq!(best("BP015"), "BP016"); // Acme Industries / ACME INDUSTRIES LTD
    assert_eq!(best("BP019"), "BP020"); // Pacific Trading Enterprises, split across fields

    let pacific = &results.get("BP019").unwrap()[0];
    assert_eq!(pacific.score, 100.0);
    assert_eq!(pacific.confidence(), ConfidenceTier::High);
}

#[test]
fn summary_of_example_run() {
    let results = Matcher::default()
        .load(example_rows())
        .find_matches(&MatchOptions::default())
        .unwrap();
    let stats = results.summary();

    assert_eq!(stats.total_records, 20);
    assert_eq!(stats.total_matches, results.candidates().count());
    assert_eq!(
        stats.high_confidence + stats.medium_confidence + stats.low_confidence,
        stats.total_matches
    );
    assert!(stats.records_with_matches <= stats.total_records);
    assert!(stats.average_score >= 50.0 && stats.average_score <= 100.0);
}

#[test]
fn summary_with_no_candidates() {
    let session = Matcher::default().load(vec![
        RawRow::new("X", "Alpha", ""),
        RawRow::new("Y", "Omega", ""),
    ]);
    let stats = session
        .find_matches(&MatchOptions::new(3, 99.0))
        .unwrap()
        .summary();
    assert_eq!(stats.total_records, 2);
    assert_eq!(stats.total_matches, 0);
    assert_eq!(stats.average_score, 0.0);
    assert_eq!(stats.high_confidence, 0);
    assert_eq!(stats.medium_confidence, 0);
    assert_eq!(stats.low_confidence, 0);
}

#[test]
fn custom_ignore_words_change_matches() {
    // Without "ltd"/"limited" ignored the suffixes pull the score down
    let strict = Matcher::new(Normalizer::with_ignore_words(["company"]), Scorer::default());
    let strict_score = strict
        .load(abc_rows())
        .find_matches(&MatchOptions::new(3, 0.0))
        .unwrap()
        .get("A")
        .unwrap()[0]
        .score;
    assert!(strict_score < 100.0);
    assert!(strict_score > 50.0);
}

#[test]
fn config_file_drives_matcher() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matcher.toml");
    std::fs::write(&path, "ignore_words = []\ntop_n = 1\nmin_score = 90\n").unwrap();

    let config = MatcherConfig::from_path(&path).unwrap();
    let session = Matcher::from_config(&config).load(example_rows());
    let results = session.find_matches(&config.match_options()).unwrap();
    assert!(results.iter().all(|(_, c)| c.len() <= 1));
    assert!(results.candidates().all(|c| c.score >= 90.0));
}

#[test]
fn csv_files_round_trip_through_the_engine() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("input.csv");
    let output_path = dir.path().join("results.csv");
    let json_path = dir.path().join("report.json");

    write_example_csv(std::fs::File::create(&input_path).unwrap()).unwrap();
    let rows = read_rows_from_path(&input_path).unwrap();
    let results = Matcher::default()
        .load(rows)
        .find_matches(&MatchOptions::default())
        .unwrap();
    let stats = results.summary();

    write_to_path(&output_path, |w| write_results_csv(&results, w)).unwrap();
    write_to_path(&json_path, |w| write_json(&results, Some(&stats), w)).unwrap();

    let csv_text = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(csv_text.lines().count(), stats.total_matches + 1);

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(report["summary"]["total_records"], 20);
}

#[test]
fn sessions_run_concurrently() {
    let session = Matcher::default().load(example_rows());
    let expected = session.find_matches(&MatchOptions::default()).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| session.find_matches(&MatchOptions::default()).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
