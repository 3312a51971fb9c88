//! End-to-end breeding simulation tests

use chrono::{Duration, Utc};
use herdbook::testing::PedigreeBuilder;
use herdbook::{Animal, BodyTrait, Gender, HerdSnapshot};

use breeding::{simulate_breeding, Recommendation, ScoreStatus};
use genetics::PedigreeStatus;

const REQUIRED: usize = 5;

/// Measure every animal of a founder line at herd-average values.
fn measure_average(builder: &mut PedigreeBuilder, prefix: &str) {
    builder
        .measure_all(prefix, BodyTrait::Height, 80.0)
        .measure_all(prefix, BodyTrait::Length, 90.0)
        .measure_all(prefix, BodyTrait::Chest, 85.0);
}

/// Give one animal measurements well above the herd.
fn measure_outstanding(builder: &mut PedigreeBuilder, id: &str) {
    builder
        .measure(id, BodyTrait::Height, 110.0)
        .measure(id, BodyTrait::Length, 125.0)
        .measure(id, BodyTrait::Chest, 115.0);
}

fn outstanding(id: &str, gender: Gender) -> Animal {
    Animal::new(id, gender)
        .with_static(BodyTrait::Height, 110.0)
        .with_static(BodyTrait::Length, 125.0)
        .with_static(BodyTrait::Chest, 115.0)
}

fn elite_herd() -> HerdSnapshot {
    let mut builder = PedigreeBuilder::new();
    builder
        .founder_line("RAM", Gender::Male, 5)
        .founder_line("EWE", Gender::Female, 5);
    measure_average(&mut builder, "RAM");
    measure_average(&mut builder, "EWE");
    measure_outstanding(&mut builder, "RAM");
    measure_outstanding(&mut builder, "EWE");
    // same quality, no recorded parents
    builder
        .animal(outstanding("LONE_RAM", Gender::Male))
        .animal(outstanding("LONE_EWE", Gender::Female));
    builder.build()
}

#[test]
fn test_nothing_known_is_not_computable() {
    let herd = HerdSnapshot::new(vec![
        Animal::new("RAM", Gender::Male),
        Animal::new("EWE", Gender::Female),
    ]);

    let result = simulate_breeding("RAM", "EWE", &herd, REQUIRED).unwrap();

    assert_eq!(result.score.status, ScoreStatus::NotComputable);
    assert_eq!(result.score.recommendation, Recommendation::InsufficientData);
    assert!(result.score.value.is_none());
    assert!(result.rule_applied("R4"));
    assert_eq!(result.applied_rules.len(), 1);
    assert!(!result.warnings.is_empty());
}

#[test]
fn test_due_date_is_gestation_from_now() {
    let herd = HerdSnapshot::new(vec![
        Animal::new("RAM", Gender::Male),
        Animal::new("EWE", Gender::Female),
    ]);

    let result = simulate_breeding("RAM", "EWE", &herd, REQUIRED).unwrap();

    let expected = Utc::now() + Duration::days(145);
    let drift = (result.expected_due_date - expected).num_seconds().abs();
    assert!(drift < 24 * 3600);
}

#[test]
fn test_complete_pedigree_outstanding_pair_is_excellent() {
    let herd = elite_herd();

    let result = simulate_breeding("RAM", "EWE", &herd, REQUIRED).unwrap();

    assert_eq!(result.inbreeding.status, PedigreeStatus::Computable);
    assert_eq!(result.inbreeding.coefficient, Some(0.0));
    assert!(result.morphometrics.confidence >= 0.7);
    let value = result.score.value.expect("computable");
    assert!(value >= 85.0, "value {value}");
    assert_eq!(result.score.status, ScoreStatus::Reliable);
    assert_eq!(result.score.recommendation, Recommendation::Excellent);
    assert!(result.applied_rules.is_empty());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_missing_pedigree_caps_at_good() {
    let herd = elite_herd();

    let result = simulate_breeding("LONE_RAM", "LONE_EWE", &herd, REQUIRED).unwrap();

    assert_eq!(
        result.inbreeding.status,
        PedigreeStatus::InsufficientPedigreeData
    );
    assert!(result.score.value.expect("morphometrics known") >= 85.0);
    assert!(result.rule_applied("R1"));
    assert!(result.rule_applied("R5"));
    assert_eq!(result.score.recommendation, Recommendation::Good);
    assert_eq!(result.score.status, ScoreStatus::LowConfidence);
    assert_eq!(result.warnings.len(), 2);
}

#[test]
fn test_siblings_are_not_recommended() {
    let mut builder = PedigreeBuilder::new();
    builder
        .founder_line("F", Gender::Male, 4)
        .founder_line("M", Gender::Female, 4)
        .offspring("BROTHER", Gender::Male, "F", "M")
        .offspring("SISTER", Gender::Female, "F", "M");
    measure_average(&mut builder, "F");
    measure_average(&mut builder, "M");
    measure_outstanding(&mut builder, "BROTHER");
    measure_outstanding(&mut builder, "SISTER");
    let herd = builder.build();

    let result = simulate_breeding("BROTHER", "SISTER", &herd, REQUIRED).unwrap();

    assert_eq!(result.inbreeding.coefficient, Some(0.25));
    // strong morphometrics keep the raw value high
    assert!(result.score.value.expect("computable") >= 80.0);
    assert!(result.rule_applied("R2"));
    assert_eq!(result.score.recommendation, Recommendation::NotRecommended);
    assert_eq!(result.score.status, ScoreStatus::Reliable);
    assert!(result.warnings.iter().any(|w| w.contains("25.00%")));
}

#[test]
fn test_result_serializes() {
    let herd = elite_herd();
    let result = simulate_breeding("RAM", "EWE", &herd, REQUIRED).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["score"]["recommendation"], "excellent");
    assert_eq!(json["inbreeding"]["status"], "computable");
    assert!(json["warnings"].as_array().unwrap().is_empty());
    assert!(json["simulation_id"].is_string());
}
