use std::fs;

use retrace_bench::{BenchError, TrialResult, load_report, parse_report};

const TWO_TESTS: &str = "\
======================================================================
EXTERNAL BOUNDARY CROSSING BENCHMARKS
======================================================================

## Test 1: env_var_access (10,000 iterations)
Measures: reading HOME from the process environment
  Run 1: 1.10ms (9090909 calls/sec)
  Run 2: 0.90ms (11111111 calls/sec)
  Average: 1.00ms (10000000 calls/sec)
  Per-call: 0.10µs

## Test 2: file_read (1,000 iterations)
  Run 1: 12.00ms (83333 ops/sec)
  Average: 12.00ms (83333 ops/sec)
  Per-operation: 12.00µs
";

#[test]
fn test_parses_every_block_in_order() {
    let report = parse_report(TWO_TESTS).expect("parse");
    assert_eq!(report.names(), vec!["env_var_access", "file_read"]);
    assert_eq!(
        report.get("env_var_access"),
        Some(&TrialResult {
            name: "env_var_access".into(),
            average_ms: 1.0,
            per_op_us: 0.1,
        })
    );
    let file = report.get("file_read").expect("file_read");
    assert_eq!(file.average_ms, 12.0);
    assert_eq!(file.per_op_us, 12.0);
}

#[test]
fn test_name_stops_at_first_whitespace() {
    let text = "## Test 1: Environment variable access (10,000 iterations)\n\
                  Average: 3.00ms (1 calls/sec)\n  Per-call: 0.30µs\n";
    let report = parse_report(text).expect("parse");
    assert_eq!(report.names(), vec!["Environment"]);
}

#[test]
fn test_incomplete_block_does_not_borrow_from_next_block() {
    let text = "## Test 1: alpha\n  Average: 1.00ms\n\
                ## Test 2: beta\n  Per-call: 2.00µs\n";
    let report = parse_report(text).expect("parse");
    assert!(report.is_empty());
}

#[test]
fn test_nameless_heading_still_closes_open_block() {
    let text = "## Test 1: alpha\n Average: 1.00ms\n## Test 2: \n Average: 7.00ms\n Per-call: 3.00µs\n";
    let report = parse_report(text).expect("parse");
    assert!(report.get("alpha").is_none());
    assert!(report.is_empty());
}

#[test]
fn test_heading_resets_half_read_block() {
    let text = "## Test 1: alpha\n  Average: 1.00ms\n\
                ## Test 2: beta\n  Average: 4.00ms\n  Per-call: 0.40µs\n";
    let report = parse_report(text).expect("parse");
    assert_eq!(report.names(), vec!["beta"]);
    assert_eq!(report.get("beta").unwrap().average_ms, 4.0);
}

#[test]
fn test_text_without_blocks_yields_empty_report() {
    let report = parse_report("no benchmarks ran today\n").expect("parse");
    assert!(report.is_empty());
    assert!(parse_report("").expect("parse").is_empty());
}

#[test]
fn test_tolerates_prose_between_summary_lines() {
    let text = "## Test 7: clock\nMeasures: something\n\nnotes\n  Average: 5.25ms\n\
                more notes\n  Per-call: 0.52µs\ntrailer\n";
    let report = parse_report(text).expect("parse");
    let clock = report.get("clock").expect("clock");
    assert_eq!(clock.average_ms, 5.25);
    assert_eq!(clock.per_op_us, 0.52);
}

#[test]
fn test_per_call_overhead_label_is_not_recognised() {
    let text = "## Test 1: clock\n  Average: 5.00ms\n  Per-call overhead: 0.50µs\n";
    let report = parse_report(text).expect("parse");
    assert!(report.is_empty());
}

#[test]
fn test_duplicate_name_keeps_first_slot_with_later_values() {
    let text = "## Test 1: a\n Average: 1.00ms\n Per-call: 0.10µs\n\
                ## Test 2: b\n Average: 2.00ms\n Per-call: 0.20µs\n\
                ## Test 3: a\n Average: 3.00ms\n Per-call: 0.30µs\n";
    let report = parse_report(text).expect("parse");
    assert_eq!(report.names(), vec!["a", "b"]);
    assert_eq!(report.get("a").unwrap().average_ms, 3.0);
}

#[test]
fn test_load_report_missing_file_is_missing_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.txt");
    let err = load_report(&path).unwrap_err();
    assert!(err.is_missing_input());
    assert!(matches!(err, BenchError::MissingReport(ref p) if p == &path));
}

#[test]
fn test_load_report_reads_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("external_baseline.txt");
    fs::write(&path, TWO_TESTS).expect("write");
    let report = load_report(&path).expect("load");
    assert_eq!(report.len(), 2);
}

#[test]
fn test_load_report_malformed_number_names_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.txt");
    fs::write(&path, "## Test 1: x\n Average: 1..2ms\n Per-call: 1.0µs\n").expect("write");
    let err = load_report(&path).unwrap_err();
    assert!(!err.is_missing_input());
    assert!(err.to_string().contains("broken.txt"));
}
