//! Inbreeding coefficient integration tests
//!
//! Every pedigree here is complete to five generations unless a test is
//! about missing pedigree, so the default requirement applies.

use genetics::{
    inbreeding_coefficient, pedigree_depth, GeneticsError, InbreedingCalculator, InbreedingResult,
    PedigreeStatus, Relationship, RiskLevel,
};
use herdbook::testing::PedigreeBuilder;
use herdbook::{Animal, Gender, HerdSnapshot};

const REQUIRED: usize = 5;

fn coefficient_of(
    herd: &HerdSnapshot,
    sire: &str,
    dam: &str,
    required: usize,
) -> InbreedingResult {
    inbreeding_coefficient(sire, dam, herd, required).expect("both animals in herd")
}

fn assert_coefficient(herd: &HerdSnapshot, sire: &str, dam: &str, expected: f64) -> RiskLevel {
    let result = coefficient_of(herd, sire, dam, REQUIRED);
    assert_eq!(result.status, PedigreeStatus::Computable, "{sire} x {dam}");
    let coefficient = result.coefficient.expect("coefficient present when computable");
    assert!(
        (coefficient - expected).abs() < 1e-12,
        "{sire} x {dam}: expected {expected}, got {coefficient}"
    );
    result.risk_level
}

// =============================================================================
// Special cases
// =============================================================================

fn parent_offspring_herd() -> HerdSnapshot {
    PedigreeBuilder::new()
        .founder_line("EWE", Gender::Female, 5)
        .founder_line("RAM", Gender::Male, 5)
        .founder_line("OUT", Gender::Male, 4)
        .founder_line("OUTF", Gender::Female, 4)
        // son of EWE, daughter of RAM
        .offspring("SON", Gender::Male, "OUT", "EWE")
        .offspring("DAUGHTER", Gender::Female, "RAM", "OUTF")
        .build()
}

#[test]
fn test_parent_offspring_both_directions() {
    let herd = parent_offspring_herd();

    // dam is the sire's mother
    assert_eq!(assert_coefficient(&herd, "SON", "EWE", 0.25), RiskLevel::High);
    // sire is the dam's father
    assert_eq!(assert_coefficient(&herd, "RAM", "DAUGHTER", 0.25), RiskLevel::High);

    let result = coefficient_of(&herd, "RAM", "DAUGHTER", REQUIRED);
    assert_eq!(result.relationship, Relationship::ParentOffspring);
}

#[test]
fn test_grandparent_grandchild() {
    let herd = PedigreeBuilder::new()
        .founder_line("G", Gender::Male, 5)
        .founder_line("W", Gender::Female, 4)
        .founder_line("F", Gender::Male, 4)
        .offspring("P", Gender::Female, "G", "W")
        .offspring("C", Gender::Female, "F", "P")
        .build();

    assert_eq!(assert_coefficient(&herd, "G", "C", 0.125), RiskLevel::Medium);

    let result = coefficient_of(&herd, "G", "C", REQUIRED);
    assert_eq!(result.relationship, Relationship::GrandparentGrandchild);
}

#[test]
fn test_grandparent_through_paternal_line() {
    let herd = PedigreeBuilder::new()
        .founder_line("GD", Gender::Female, 5)
        .founder_line("GS", Gender::Male, 4)
        .founder_line("M", Gender::Female, 4)
        .offspring("F", Gender::Male, "GS", "GD")
        .offspring("GRANDSON", Gender::Male, "F", "M")
        .build();

    // granddam as dam, grandson as sire
    assert_eq!(assert_coefficient(&herd, "GRANDSON", "GD", 0.125), RiskLevel::Medium);
}

// =============================================================================
// Path counting
// =============================================================================

#[test]
fn test_full_siblings() {
    let herd = PedigreeBuilder::new()
        .founder_line("F", Gender::Male, 4)
        .founder_line("M", Gender::Female, 4)
        .offspring("BROTHER", Gender::Male, "F", "M")
        .offspring("SISTER", Gender::Female, "F", "M")
        .build();

    assert_eq!(assert_coefficient(&herd, "BROTHER", "SISTER", 0.25), RiskLevel::High);

    let result = coefficient_of(&herd, "BROTHER", "SISTER", REQUIRED);
    assert_eq!(result.relationship, Relationship::Related);
    assert_eq!(result.contributions.len(), 2);
}

#[test]
fn test_half_siblings() {
    let herd = PedigreeBuilder::new()
        .founder_line("F", Gender::Male, 4)
        .founder_line("M1", Gender::Female, 4)
        .founder_line("M2", Gender::Female, 4)
        .offspring("A", Gender::Male, "F", "M1")
        .offspring("B", Gender::Female, "F", "M2")
        .build();

    assert_eq!(assert_coefficient(&herd, "A", "B", 0.125), RiskLevel::High);
}

#[test]
fn test_first_cousins() {
    let herd = PedigreeBuilder::new()
        .founder_line("G1", Gender::Male, 3)
        .founder_line("G2", Gender::Female, 3)
        .offspring("X", Gender::Male, "G1", "G2")
        .offspring("Y", Gender::Female, "G1", "G2")
        .founder_line("MX", Gender::Female, 4)
        .founder_line("FY", Gender::Male, 4)
        .offspring("COUSIN_M", Gender::Male, "X", "MX")
        .offspring("COUSIN_F", Gender::Female, "FY", "Y")
        .build();

    assert_eq!(pedigree_depth("COUSIN_M", &herd, 5), 5);
    assert_eq!(
        assert_coefficient(&herd, "COUSIN_M", "COUSIN_F", 0.0625),
        RiskLevel::Medium
    );
}

#[test]
fn test_unrelated_lines() {
    let herd = PedigreeBuilder::new()
        .founder_line("RAM", Gender::Male, 5)
        .founder_line("EWE", Gender::Female, 5)
        .build();

    assert_eq!(assert_coefficient(&herd, "RAM", "EWE", 0.0), RiskLevel::Low);

    let result = coefficient_of(&herd, "RAM", "EWE", REQUIRED);
    assert_eq!(result.relationship, Relationship::Unrelated);
    assert!(result.contributions.is_empty());
}

#[test]
fn test_sire_as_great_grandparent_uses_direct_path() {
    // GG -> P1 -> P2 -> C: the sire is three generations above the dam
    let herd = PedigreeBuilder::new()
        .founder_line("GG", Gender::Male, 5)
        .founder_line("A", Gender::Female, 4)
        .founder_line("B", Gender::Male, 4)
        .founder_line("D", Gender::Male, 4)
        .offspring("P1", Gender::Female, "GG", "A")
        .offspring("P2", Gender::Female, "B", "P1")
        .offspring("C", Gender::Female, "D", "P2")
        .build();

    // loop GG-P1-P2-C has four individuals
    assert_eq!(assert_coefficient(&herd, "GG", "C", 0.0625), RiskLevel::Medium);
}

#[test]
fn test_multiple_common_ancestors_add_up() {
    // Double first cousins: both sets of grandparents shared
    let herd = PedigreeBuilder::new()
        .founder_line("G1", Gender::Male, 3)
        .founder_line("G2", Gender::Female, 3)
        .founder_line("H1", Gender::Male, 3)
        .founder_line("H2", Gender::Female, 3)
        .offspring("X1", Gender::Male, "G1", "G2")
        .offspring("X2", Gender::Male, "G1", "G2")
        .offspring("Y1", Gender::Female, "H1", "H2")
        .offspring("Y2", Gender::Female, "H1", "H2")
        .offspring("A", Gender::Male, "X1", "Y1")
        .offspring("B", Gender::Female, "X2", "Y2")
        .build();

    assert_eq!(assert_coefficient(&herd, "A", "B", 0.125), RiskLevel::High);
}

// =============================================================================
// Pedigree sufficiency
// =============================================================================

#[test]
fn test_no_pedigree_is_insufficient() {
    let herd = HerdSnapshot::new(vec![
        Animal::new("RAM", Gender::Male),
        Animal::new("EWE", Gender::Female),
    ]);

    let result = coefficient_of(&herd, "RAM", "EWE", REQUIRED);
    assert_eq!(result.status, PedigreeStatus::InsufficientPedigreeData);
    assert_eq!(result.available_generations, 0);
    assert!(result.coefficient.is_none());
    assert_eq!(result.risk_level, RiskLevel::Unknown);
}

#[test]
fn test_partial_pedigree_is_incomplete() {
    let herd = PedigreeBuilder::new()
        .founder_line("RAM", Gender::Male, 5)
        .founder_line("EWE", Gender::Female, 3)
        .build();

    let result = coefficient_of(&herd, "RAM", "EWE", REQUIRED);
    assert_eq!(result.status, PedigreeStatus::IncompleteGenerations);
    assert_eq!(result.available_generations, 3);
    assert_eq!(result.required_generations, REQUIRED);
    assert!(result.coefficient.is_none());
}

#[test]
fn test_shallow_parent_offspring_still_not_computable() {
    let herd = PedigreeBuilder::new()
        .founder_line("RAM", Gender::Male, 1)
        .offspring("LAMB", Gender::Female, "RAM", "RAM.d")
        .build();

    let result = coefficient_of(&herd, "RAM", "LAMB", REQUIRED);
    assert!(!result.is_computable());
    assert!(result.coefficient.is_none());
}

#[test]
fn test_lower_requirement_makes_shallow_pedigree_computable() {
    let herd = PedigreeBuilder::new()
        .founder_line("F", Gender::Male, 1)
        .founder_line("M", Gender::Female, 1)
        .offspring("A", Gender::Male, "F", "M")
        .offspring("B", Gender::Female, "F", "M")
        .build();

    let result = coefficient_of(&herd, "A", "B", 2);
    assert_eq!(result.coefficient, Some(0.25));
}

#[test]
fn test_coefficient_always_within_unit_interval() {
    let herd = PedigreeBuilder::new()
        .founder_line("F", Gender::Male, 4)
        .founder_line("M", Gender::Female, 4)
        .offspring("A", Gender::Male, "F", "M")
        .offspring("B", Gender::Female, "F", "M")
        .offspring("C", Gender::Male, "A", "B")
        .offspring("D", Gender::Female, "A", "B")
        .build();

    let calculator = InbreedingCalculator::new();
    let ids: Vec<String> = herd.iter().map(|a| a.id.clone()).collect();
    for sire in ids.iter().step_by(7) {
        for dam in ids.iter().step_by(5) {
            let result = calculator.compute(sire, dam, &herd).unwrap();
            assert_eq!(result.coefficient.is_some(), result.is_computable());
            if let Some(c) = result.coefficient {
                assert!((0.0..=1.0).contains(&c));
            }
        }
    }
}

#[test]
fn test_unknown_animal_is_an_error_not_missing_pedigree() {
    let herd = PedigreeBuilder::new()
        .founder_line("RAM", Gender::Male, 5)
        .build();

    let err = inbreeding_coefficient("RAM", "NOT_IN_HERD", &herd, REQUIRED).unwrap_err();
    assert!(matches!(err, GeneticsError::AnimalNotFound { id } if id == "NOT_IN_HERD"));

    let err = inbreeding_coefficient("GHOST", "RAM", &herd, REQUIRED).unwrap_err();
    assert!(matches!(err, GeneticsError::AnimalNotFound { id } if id == "GHOST"));
}

#[test]
fn test_result_serializes_snake_case() {
    let herd = HerdSnapshot::new(vec![
        Animal::new("A", Gender::Male),
        Animal::new("B", Gender::Female),
    ]);
    let result = coefficient_of(&herd, "A", "B", REQUIRED);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["status"], "insufficient_pedigree_data");
    assert_eq!(json["risk_level"], "unknown");
    assert!(json["coefficient"].is_null());
}
