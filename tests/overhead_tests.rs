use retrace_bench::{
    Classification, ParsedReport, TrialResult, calculate_overhead, format_overhead,
    overhead::{NoiseVerdict, compare_reports},
};

fn result(name: &str, average_ms: f64, per_op_us: f64) -> TrialResult {
    TrialResult {
        name: name.into(),
        average_ms,
        per_op_us,
    }
}

#[test]
fn test_zero_baseline_yields_zero_overhead() {
    assert_eq!(calculate_overhead(0.0, 12.5), (0.0, 0.0));
    assert_eq!(calculate_overhead(0.0, 0.0), (0.0, 0.0));
}

#[test]
fn test_overhead_formula_is_exact() {
    let (pct, abs_us) = calculate_overhead(4.0, 5.0);
    assert_eq!(pct, (5.0 - 4.0) / 4.0 * 100.0);
    assert_eq!(abs_us, (5.0 - 4.0) * 1000.0);
    assert_eq!(pct, 25.0);
    assert_eq!(abs_us, 1000.0);
}

#[test]
fn test_small_internal_delta_is_within_noise() {
    let (pct, abs_us) = calculate_overhead(10.0, 10.3);
    assert!((pct - 3.0).abs() < 1e-9);
    assert_eq!(NoiseVerdict::of(pct), NoiseVerdict::WithinNoise);
    assert_eq!(format_overhead(pct, abs_us, true), "+3.0% ✓ (within noise)");
}

#[test]
fn test_large_internal_delta_is_unexpected() {
    let (pct, abs_us) = calculate_overhead(10.0, 12.0);
    assert!((pct - 20.0).abs() < 1e-9);
    assert_eq!(NoiseVerdict::of(pct), NoiseVerdict::Unexpected);
    assert_eq!(format_overhead(pct, abs_us, true), "+20.0% ⚠ (unexpected)");
}

#[test]
fn test_negative_internal_delta_uses_magnitude() {
    assert_eq!(format_overhead(-4.9, 0.0, true), "-4.9% ✓ (within noise)");
    assert_eq!(format_overhead(-5.0, 0.0, true), "-5.0% ⚠ (unexpected)");
}

#[test]
fn test_external_framing_reports_absolute_and_percentage() {
    let (pct, abs_us) = calculate_overhead(50.000, 50.015);
    assert!((abs_us - 15.0).abs() < 1e-6);
    assert!((pct - 0.03).abs() < 1e-6);
    let text = format_overhead(pct, abs_us, false);
    assert!(text.contains("+15.0µs per operation"), "{text}");
    assert!(text.contains("(+0.03%)"), "{text}");
}

#[test]
fn test_external_framing_keeps_small_percentages_visible() {
    assert_eq!(
        format_overhead(0.0, 0.0, false),
        "+0.0µs per operation (+0.0%)"
    );
    assert_eq!(
        format_overhead(-0.04, -2.0, false),
        "-2.0µs per operation (-0.04%)"
    );
    assert_eq!(
        format_overhead(1.5, 15.0, false),
        "+15.0µs per operation (+1.5%)"
    );
}

#[test]
fn test_compare_reports_pairs_by_name_in_baseline_order() {
    let baseline: ParsedReport = vec![
        result("sort_integers", 10.0, 1.0),
        result("format_strings", 20.0, 2.0),
    ]
    .into_iter()
    .collect();
    let treatment: ParsedReport = vec![
        result("format_strings", 22.0, 2.2),
        result("sort_integers", 10.3, 1.03),
        result("treatment_only", 1.0, 0.1),
    ]
    .into_iter()
    .collect();

    let records = compare_reports(&baseline, &treatment, Classification::Internal);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "sort_integers");
    assert_eq!(records[0].treatment_ms, 10.3);
    assert_eq!(records[0].treatment_per_op_us, 1.03);
    assert!(!records[0].treatment_missing);
    assert_eq!(records[1].name, "format_strings");
    assert!((records[1].percentage_delta - 10.0).abs() < 1e-9);
    assert!(records[1].describe().contains("unexpected"));
}

#[test]
fn test_missing_treatment_defaults_to_zero() {
    let baseline: ParsedReport = vec![result("file_read", 8.0, 8.0)].into_iter().collect();
    let treatment = ParsedReport::new();

    let records = compare_reports(&baseline, &treatment, Classification::External);
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert!(record.treatment_missing);
    assert_eq!(record.treatment_ms, 0.0);
    assert_eq!(record.treatment_per_op_us, 0.0);
    assert_eq!(record.percentage_delta, -100.0);
    assert_eq!(record.absolute_delta_us, -8000.0);
    assert_eq!(record.describe(), "-8000.0µs per operation (-100.0%)");
}

#[test]
fn test_empty_baseline_produces_no_records() {
    let treatment: ParsedReport = vec![result("x", 1.0, 1.0)].into_iter().collect();
    let records = compare_reports(&ParsedReport::new(), &treatment, Classification::Internal);
    assert!(records.is_empty());
}
