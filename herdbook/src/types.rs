//! Core types for the herd data model.
//!
//! With the `typescript` feature enabled, these types can be exported to TypeScript
//! using ts-rs for consistency with the herd management frontend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Biological sex of an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Get string representation for messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Morphometric traits tracked for every animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum BodyTrait {
    /// Live weight (kg)
    Mass,
    /// Height at withers (cm)
    Height,
    /// Body length (cm)
    Length,
    /// Chest girth (cm)
    Chest,
}

impl BodyTrait {
    /// All traits in reporting order.
    pub const ALL: [BodyTrait; 4] = [Self::Mass, Self::Height, Self::Length, Self::Chest];

    /// Traits that can be predicted for offspring from parental measurements.
    pub const PREDICTABLE: [BodyTrait; 3] = [Self::Height, Self::Length, Self::Chest];

    /// Get string representation for messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mass => "mass",
            Self::Height => "height",
            Self::Length => "length",
            Self::Chest => "chest",
        }
    }

    /// Unit the trait is measured in
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Mass => "kg",
            Self::Height | Self::Length | Self::Chest => "cm",
        }
    }
}

impl std::fmt::Display for BodyTrait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dated measurement session. Any field may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Measurement {
    /// When the animal was measured
    pub measured_at: DateTime<Utc>,
    /// Live weight (kg)
    #[serde(default)]
    pub weight: Option<f64>,
    /// Height at withers (cm)
    #[serde(default)]
    pub height_at_withers: Option<f64>,
    /// Body length (cm)
    #[serde(default)]
    pub body_length: Option<f64>,
    /// Chest girth (cm)
    #[serde(default)]
    pub chest_girth: Option<f64>,
}

impl Measurement {
    /// Create an empty measurement session at the given time.
    pub fn at(measured_at: DateTime<Utc>) -> Self {
        Self {
            measured_at,
            weight: None,
            height_at_withers: None,
            body_length: None,
            chest_girth: None,
        }
    }

    /// Builder: record a value for one trait.
    pub fn with(mut self, body_trait: BodyTrait, value: f64) -> Self {
        *self.slot_mut(body_trait) = Some(value);
        self
    }

    /// Raw recorded value for a trait, valid or not.
    pub fn value(&self, body_trait: BodyTrait) -> Option<f64> {
        match body_trait {
            BodyTrait::Mass => self.weight,
            BodyTrait::Height => self.height_at_withers,
            BodyTrait::Length => self.body_length,
            BodyTrait::Chest => self.chest_girth,
        }
    }

    fn slot_mut(&mut self, body_trait: BodyTrait) -> &mut Option<f64> {
        match body_trait {
            BodyTrait::Mass => &mut self.weight,
            BodyTrait::Height => &mut self.height_at_withers,
            BodyTrait::Length => &mut self.body_length,
            BodyTrait::Chest => &mut self.chest_girth,
        }
    }
}

/// An animal as supplied by the herd store.
///
/// Parent references are weak: an id that does not resolve within the
/// snapshot being analysed is an unknown ancestor, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Animal {
    /// Unique identifier (ear tag, registry number)
    pub id: String,
    /// Optional display name
    #[serde(default)]
    pub name: Option<String>,
    pub gender: Gender,
    /// Biological father
    #[serde(default)]
    pub sire_id: Option<String>,
    /// Biological mother
    #[serde(default)]
    pub dam_id: Option<String>,
    /// Measurement history, in any order
    #[serde(default)]
    pub measurements: Vec<Measurement>,
    /// Static fallback weight used when no history exists
    #[serde(default)]
    pub weight: Option<f64>,
    /// Static fallback height at withers
    #[serde(default)]
    pub height_at_withers: Option<f64>,
    /// Static fallback body length
    #[serde(default)]
    pub body_length: Option<f64>,
    /// Static fallback chest girth
    #[serde(default)]
    pub chest_girth: Option<f64>,
}

impl Animal {
    /// Create an animal with no parents and no measurements.
    pub fn new(id: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: None,
            gender,
            sire_id: None,
            dam_id: None,
            measurements: Vec::new(),
            weight: None,
            height_at_withers: None,
            body_length: None,
            chest_girth: None,
        }
    }

    /// Builder: set display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: set both parents.
    pub fn with_parents(mut self, sire_id: impl Into<String>, dam_id: impl Into<String>) -> Self {
        self.sire_id = Some(sire_id.into());
        self.dam_id = Some(dam_id.into());
        self
    }

    /// Builder: set sire only.
    pub fn with_sire(mut self, sire_id: impl Into<String>) -> Self {
        self.sire_id = Some(sire_id.into());
        self
    }

    /// Builder: set dam only.
    pub fn with_dam(mut self, dam_id: impl Into<String>) -> Self {
        self.dam_id = Some(dam_id.into());
        self
    }

    /// Builder: append a measurement session.
    pub fn with_measurement(mut self, measurement: Measurement) -> Self {
        self.measurements.push(measurement);
        self
    }

    /// Builder: set a static fallback value.
    pub fn with_static(mut self, body_trait: BodyTrait, value: f64) -> Self {
        match body_trait {
            BodyTrait::Mass => self.weight = Some(value),
            BodyTrait::Height => self.height_at_withers = Some(value),
            BodyTrait::Length => self.body_length = Some(value),
            BodyTrait::Chest => self.chest_girth = Some(value),
        }
        self
    }

    /// Static fallback value for a trait, valid or not.
    pub fn static_value(&self, body_trait: BodyTrait) -> Option<f64> {
        match body_trait {
            BodyTrait::Mass => self.weight,
            BodyTrait::Height => self.height_at_withers,
            BodyTrait::Length => self.body_length,
            BodyTrait::Chest => self.chest_girth,
        }
    }

    /// Most recent valid value for a trait.
    ///
    /// History takes precedence over the static fields. Among history
    /// entries the latest `measured_at` wins; on equal timestamps the entry
    /// appearing later in the sequence wins.
    pub fn latest_value(&self, body_trait: BodyTrait) -> Option<f64> {
        let from_history = self
            .measurements
            .iter()
            .enumerate()
            .filter_map(|(idx, m)| {
                m.value(body_trait)
                    .filter(|v| is_valid_measure(*v))
                    .map(|v| (m.measured_at, idx, v))
            })
            .max_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)))
            .map(|(_, _, v)| v);

        from_history.or_else(|| self.static_value(body_trait).filter(|v| is_valid_measure(*v)))
    }

    /// Whether any trait has a valid value.
    pub fn has_measurements(&self) -> bool {
        BodyTrait::ALL.iter().any(|t| self.latest_value(*t).is_some())
    }

    /// Display label: name if present, otherwise id.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// A measurement is usable only when finite and strictly positive.
pub fn is_valid_measure(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
