//! Morphometrics integration tests

use chrono::{TimeZone, Utc};
use herdbook::testing::PedigreeBuilder;
use herdbook::{Animal, BodyTrait, Gender, HerdSnapshot, Measurement};
use morphometrics::{
    predict_trait, score_animal_morphometrics, score_pair_morphometrics, Classification,
    DataBasis, HerdStatisticsSnapshot, Heritability, MorphometricsConfig, PairScorer,
    ScoringWeights,
};

fn measured_herd() -> HerdSnapshot {
    let mut builder = PedigreeBuilder::new();
    for (i, (height, length, chest, weight)) in [
        (88.0, 98.0, 95.0, 62.0),
        (92.0, 101.0, 97.0, 66.0),
        (95.0, 104.0, 100.0, 70.0),
        (98.0, 108.0, 103.0, 74.0),
        (102.0, 112.0, 105.0, 78.0),
    ]
    .into_iter()
    .enumerate()
    {
        let id = format!("EWE{i}");
        builder
            .animal(Animal::new(&id, Gender::Female))
            .measure(&id, BodyTrait::Height, height)
            .measure(&id, BodyTrait::Length, length)
            .measure(&id, BodyTrait::Chest, chest)
            .measure(&id, BodyTrait::Mass, weight);
    }
    builder
        .animal(Animal::new("RAM", Gender::Male))
        .measure("RAM", BodyTrait::Height, 104.0)
        .measure("RAM", BodyTrait::Length, 122.0)
        .measure("RAM", BodyTrait::Chest, 110.0);
    builder.build()
}

// =============================================================================
// Trait prediction
// =============================================================================

#[test]
fn test_both_parents_beat_one_parent() {
    let herd = measured_herd();
    let ram = herd.get("RAM").unwrap();
    let ewe = herd.get("EWE2").unwrap();
    let unmeasured = Animal::new("LAMB", Gender::Female);
    let heritability = Heritability::default();

    for body_trait in BodyTrait::PREDICTABLE {
        let h = heritability.get(body_trait).unwrap();
        let both = predict_trait(body_trait, ram, ewe, &herd, h);
        let one = predict_trait(body_trait, ram, &unmeasured, &herd, h);

        assert_eq!(both.data_basis, DataBasis::BothParentsMeasured);
        assert_eq!(one.data_basis, DataBasis::OneParentMeasured);
        assert!(both.confidence >= 0.75, "{body_trait}");
        assert!(both.spread().unwrap() < one.spread().unwrap(), "{body_trait}");
    }
}

#[test]
fn test_no_data_anywhere_is_insufficient() {
    let sire = Animal::new("S", Gender::Male);
    let dam = Animal::new("D", Gender::Female);
    let herd = HerdSnapshot::new(vec![sire.clone(), dam.clone()]);

    for body_trait in BodyTrait::PREDICTABLE {
        let predicted = predict_trait(body_trait, &sire, &dam, &herd, 0.4);
        assert_eq!(predicted.data_basis, DataBasis::InsufficientData);
        assert_eq!(predicted.confidence, 0.0);
        assert!(predicted.mean.is_none());
        assert!(predicted.min.is_none());
        assert!(predicted.max.is_none());
    }
}

#[test]
fn test_latest_history_entry_drives_prediction() {
    let day = |d| Utc.with_ymd_and_hms(2024, 5, d, 9, 0, 0).unwrap();
    let sire = Animal::new("S", Gender::Male)
        .with_static(BodyTrait::Height, 70.0)
        .with_measurement(Measurement::at(day(20)).with(BodyTrait::Height, 100.0))
        .with_measurement(Measurement::at(day(1)).with(BodyTrait::Height, 80.0));
    let dam = Animal::new("D", Gender::Female).with_static(BodyTrait::Height, 90.0);
    let herd = HerdSnapshot::new(vec![sire.clone(), dam.clone()]);

    let predicted = predict_trait(BodyTrait::Height, &sire, &dam, &herd, 0.4);
    assert_eq!(predicted.mean, Some(95.0));
}

// =============================================================================
// Scoring
// =============================================================================

#[test]
fn test_animal_confidence_is_share_of_metrics() {
    let herd = measured_herd();
    let stats = HerdStatisticsSnapshot::compute(&herd);
    let weights = ScoringWeights::default();

    let ewe = score_animal_morphometrics(herd.get("EWE0").unwrap(), &stats, &weights);
    assert_eq!(ewe.available_metrics, 4);
    assert_eq!(ewe.confidence, 1.0);

    let ram = score_animal_morphometrics(herd.get("RAM").unwrap(), &stats, &weights);
    assert_eq!(ram.available_metrics, 3);
    assert_eq!(ram.confidence, 0.75);
    assert!(!ram.mass.available);

    let lamb = score_animal_morphometrics(&Animal::new("LAMB", Gender::Male), &stats, &weights);
    assert_eq!(lamb.confidence, 0.0);
    assert_eq!(lamb.global_score, 50.0);
}

#[test]
fn test_mass_uses_weight() {
    let herd = measured_herd();
    let stats = HerdStatisticsSnapshot::compute(&herd);
    assert_eq!(stats.mass.sample_count, 5);
    assert_eq!(stats.mean(BodyTrait::Mass), Some(70.0));

    let score = score_animal_morphometrics(
        herd.get("EWE4").unwrap(),
        &stats,
        &ScoringWeights::default(),
    );
    assert_eq!(score.mass.raw_value, Some(78.0));
}

#[test]
fn test_large_ram_ranks_high() {
    let herd = measured_herd();
    let stats = HerdStatisticsSnapshot::compute(&herd);
    let score =
        score_animal_morphometrics(herd.get("RAM").unwrap(), &stats, &ScoringWeights::default());

    assert!(score.global_score > 65.0);
    assert!(matches!(
        score.classification,
        Classification::Elite | Classification::TresBon
    ));
    assert!(score.summary.contains("length"));
    assert!(score.summary.contains("longiligne"));
}

#[test]
fn test_pair_score_above_herd() {
    let herd = measured_herd();
    let ram = herd.get("RAM").unwrap();
    let ewe = herd.get("EWE4").unwrap();

    let score = score_pair_morphometrics(ram, ewe, &herd);
    let overall = score.overall_score.expect("both parents measured");
    assert!(overall > 50.0);
    assert!(score.confidence >= 0.75);
}

#[test]
fn test_pair_scorer_respects_confidence_cut() {
    let herd = measured_herd();
    let ram = herd.get("RAM").unwrap();
    let lamb = Animal::new("LAMB", Gender::Female);
    let stats = HerdStatisticsSnapshot::compute(&herd);

    // one measured parent with a herd mean gives 0.60 per trait
    let default_score = PairScorer::new().score(ram, &lamb, &stats);
    assert!(default_score.overall_score.is_some());

    let strict = PairScorer::with_config(MorphometricsConfig {
        min_trait_confidence: 0.7,
        ..MorphometricsConfig::default()
    });
    let strict_score = strict.score(ram, &lamb, &stats);
    assert!(strict_score.overall_score.is_none());
    assert_eq!(strict_score.confidence, 0.0);
}
