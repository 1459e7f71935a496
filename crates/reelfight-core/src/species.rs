//! Species records and their fight profiles.
//!
//! Ratings are stored on the dataset's 0–10 scale. `FightParams` is the
//! normalized form the engine works with; optional ratings are resolved to
//! concrete values there, once.

use serde::{Deserialize, Serialize};

use crate::constants::{RATING_SCALE, SEED_MODULUS};
use crate::error::FightError;

/// Static behavioural ratings for one species (0–10 scale).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightProfile {
    pub burst_speed: f64,
    pub initial_run_distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump_probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jump_frequency_per_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dive_probability: Option<f64>,
    #[serde(
        default,
        alias = "circle_probability",
        skip_serializing_if = "Option::is_none"
    )]
    pub circle_under_boat_probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headshake_intensity: Option<f64>,
    pub stamina_index: f64,
    /// Display only.
    #[serde(default)]
    pub cover_or_depth_escape_tendency: String,
    /// Display only.
    #[serde(default)]
    pub typical_phases: Vec<String>,
}

impl FightProfile {
    /// Profile with the three required ratings set and every optional
    /// behaviour absent.
    pub fn new(burst_speed: f64, initial_run_distance: f64, stamina_index: f64) -> Self {
        Self {
            burst_speed,
            initial_run_distance,
            jump_probability: None,
            jump_frequency_per_min: None,
            dive_probability: None,
            circle_under_boat_probability: None,
            headshake_intensity: None,
            stamina_index,
            cover_or_depth_escape_tendency: String::new(),
            typical_phases: Vec::new(),
        }
    }

    /// Check every present rating is finite and within [0, 10].
    pub fn validate(&self) -> Result<(), FightError> {
        check_rating("burst_speed", self.burst_speed)?;
        check_rating("initial_run_distance", self.initial_run_distance)?;
        check_rating("stamina_index", self.stamina_index)?;

        let optional = [
            ("jump_probability", self.jump_probability),
            ("jump_frequency_per_min", self.jump_frequency_per_min),
            ("dive_probability", self.dive_probability),
            (
                "circle_under_boat_probability",
                self.circle_under_boat_probability,
            ),
            ("headshake_intensity", self.headshake_intensity),
        ];
        for (field, value) in optional {
            if let Some(v) = value {
                check_rating(field, v)?;
            }
        }
        Ok(())
    }
}

fn check_rating(field: &str, value: f64) -> Result<(), FightError> {
    if !value.is_finite() {
        return Err(FightError::invalid_profile(field, "is not a finite number"));
    }
    if !(0.0..=RATING_SCALE).contains(&value) {
        return Err(FightError::invalid_profile(
            field,
            format!("must be within [0, {RATING_SCALE}] (got {value})"),
        ));
    }
    Ok(())
}

/// A species as it appears in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    /// Slug identifier. Derived from `name` when absent.
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default)]
    pub habitat: String,
    #[serde(default)]
    pub tackle_class: String,
    pub fight_profile: FightProfile,
    #[serde(default, alias = "angler_tips_to_simulate")]
    pub angler_tips: Vec<String>,
}

impl Species {
    pub fn new(name: &str, fight_profile: FightProfile) -> Self {
        Self {
            id: slugify(name),
            name: name.to_string(),
            scientific_name: String::new(),
            habitat: String::new(),
            tackle_class: String::new(),
            fight_profile,
            angler_tips: Vec::new(),
        }
    }

    /// Seed derived from this species' id.
    pub fn default_seed(&self) -> u64 {
        seed_from_id(&self.id)
    }
}

/// Parse a single species record from JSON, deriving the id and validating
/// the profile. Missing required ratings surface as `InvalidProfile`.
pub fn parse_species(json: &str) -> Result<Species, FightError> {
    let mut species: Species = serde_json::from_str(json)
        .map_err(|e| FightError::invalid_profile("species", e.to_string()))?;
    if species.id.is_empty() {
        species.id = slugify(&species.name);
    }
    species.fight_profile.validate()?;
    Ok(species)
}

/// Lower-case slug: runs of non-alphanumerics become `-`, no leading or
/// trailing dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Seed from a species id: sum of code points mod 9973, plus one. Never zero.
pub fn seed_from_id(id: &str) -> u64 {
    let sum: u64 = id.chars().map(|c| c as u64).sum();
    sum % SEED_MODULUS + 1
}

/// Normalized profile, every rating in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FightParams {
    pub burst: f64,
    pub run0: f64,
    pub stamina: f64,
    pub jump: f64,
    /// Jumps per second. Informational; does not drive the dynamics.
    pub jump_rate_per_sec: f64,
    pub dive: f64,
    pub circle: f64,
    pub shake: f64,
}

impl FightParams {
    /// Validate and normalize a profile.
    pub fn from_profile(profile: &FightProfile) -> Result<Self, FightError> {
        profile.validate()?;
        let f = |v: Option<f64>| v.unwrap_or(0.0) / RATING_SCALE;
        Ok(Self {
            burst: profile.burst_speed / RATING_SCALE,
            run0: profile.initial_run_distance / RATING_SCALE,
            stamina: profile.stamina_index / RATING_SCALE,
            jump: f(profile.jump_probability),
            jump_rate_per_sec: f(profile.jump_frequency_per_min) / 60.0,
            dive: f(profile.dive_probability),
            circle: f(profile.circle_under_boat_probability),
            shake: f(profile.headshake_intensity),
        })
    }
}
