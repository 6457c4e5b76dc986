//! Journal record types.
//!
//! Defines [`Entry`] (one logged moment), [`FoodItem`] (one analyzed or manually
//! entered food), [`FoodStatus`] (analysis lifecycle of a food item), and
//! [`NewEntry`] (an entry before the store assigns its id and timestamps).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::RangeInclusive;

use crate::error::ValidationError;

/// Valid mood scores.
pub const MOOD_RANGE: RangeInclusive<u8> = 1..=5;

/// Valid energy levels.
pub const ENERGY_RANGE: RangeInclusive<u8> = 1..=10;

/// Symptom tag that the sugar pattern looks for.
pub const ENERGY_CRASH: &str = "energy-crash";

/// Where a food item is in its analysis lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodStatus {
    /// Photo submitted, analysis still in flight.
    Pending,
    /// Name and nutrition fields are final.
    #[default]
    Ready,
    /// Analysis failed; the name carries the error label.
    Failed,
}

impl FoodStatus {
    /// SQL-compatible string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for FoodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FoodStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "ready" => Ok(Self::Ready),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("unknown food status: {s}")),
        }
    }
}

/// One food attached to an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    /// Client-generated, unique within the parent entry.
    pub id: String,
    /// Display label.
    pub name: String,
    /// Embedded image as a data URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    /// Estimated calories, never negative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Free-text remarks from image analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_notes: Option<String>,
    #[serde(default)]
    pub status: FoodStatus,
}

impl FoodItem {
    /// A manually entered food, ready to be saved.
    pub fn manual(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            photo: None,
            ingredients: None,
            calories: None,
            ai_notes: None,
            status: FoodStatus::Ready,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == FoodStatus::Ready && !self.name.is_empty()
    }
}

/// A stored journal entry, matching the `entries` table plus its food items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Assigned by the store; absent before persistence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Mood score in `[1, 5]`.
    pub mood: u8,
    /// Free-text description of what was eaten.
    pub food: String,
    #[serde(default)]
    pub foods: Vec<FoodItem>,
    /// Energy level in `[1, 10]`.
    pub energy: u8,
    /// Symptom tags in the order they were selected.
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub notes: String,
    /// Milliseconds since the Unix epoch, stamped at creation.
    pub timestamp: i64,
    /// UTC calendar date of `timestamp`.
    pub date: NaiveDate,
}

impl Entry {
    pub fn has_symptom(&self, tag: &str) -> bool {
        self.symptoms.iter().any(|s| s == tag)
    }
}

/// An entry as submitted by the capture flow, before the store stamps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub mood: u8,
    #[serde(default)]
    pub food: String,
    #[serde(default)]
    pub foods: Vec<FoodItem>,
    pub energy: u8,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl NewEntry {
    /// Check the invariants the store relies on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !MOOD_RANGE.contains(&self.mood) {
            return Err(ValidationError::MoodOutOfRange(self.mood));
        }
        if !ENERGY_RANGE.contains(&self.energy) {
            return Err(ValidationError::EnergyOutOfRange(self.energy));
        }
        if self.food.trim().is_empty() && self.foods.is_empty() {
            return Err(ValidationError::MissingFood);
        }

        let mut seen = HashSet::new();
        for item in &self.foods {
            if !seen.insert(item.id.as_str()) {
                return Err(ValidationError::DuplicateFoodId(item.id.clone()));
            }
            if let Some(calories) = item.calories {
                if calories < 0.0 {
                    return Err(ValidationError::NegativeCalories {
                        id: item.id.clone(),
                        calories,
                    });
                }
            }
        }
        Ok(())
    }

    /// Stamp this entry with an id and creation time.
    pub fn into_entry(self, id: i64, created_at: DateTime<Utc>) -> Entry {
        Entry {
            id: Some(id),
            mood: self.mood,
            food: self.food,
            foods: self.foods,
            energy: self.energy,
            symptoms: self.symptoms,
            notes: self.notes,
            timestamp: created_at.timestamp_millis(),
            date: created_at.date_naive(),
        }
    }
}
