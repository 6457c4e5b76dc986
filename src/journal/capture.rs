//! Entry capture flow.
//!
//! A [`Draft`] is the working set behind the "log an entry" form: mood, typed
//! food text, foods being analyzed, energy, symptoms, and notes. Photo analyses
//! run independently and land on their food item by client-generated id; a
//! result for an item that has since been removed is dropped. [`Draft::finalize`]
//! validates the draft and produces the [`NewEntry`] handed to the store.

use crate::analysis::FoodAnalysis;
use crate::error::ValidationError;
use crate::journal::types::{FoodItem, FoodStatus, NewEntry};

/// Symptom tags offered by the capture form.
pub const SYMPTOM_TAGS: [&str; 5] = [
    "bloating",
    "brain-fog",
    "anxiety",
    "cravings",
    "energy-crash",
];

/// Energy preselected on a fresh draft.
pub const DEFAULT_ENERGY: u8 = 5;

/// Display name of a food whose analysis is in flight.
pub const ANALYZING_LABEL: &str = "🔍 Analyzing...";

const FAILED_PREFIX: &str = "❌ ";
const FAILED_MESSAGE_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub mood: Option<u8>,
    pub food_input: String,
    foods: Vec<FoodItem>,
    pub energy: u8,
    symptoms: Vec<String>,
    pub notes: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            mood: None,
            food_input: String::new(),
            foods: Vec::new(),
            energy: DEFAULT_ENERGY,
            symptoms: Vec::new(),
            notes: String::new(),
        }
    }
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn foods(&self) -> &[FoodItem] {
        &self.foods
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    /// Select `tag` if absent, deselect it if present.
    pub fn toggle_symptom(&mut self, tag: &str) {
        if let Some(pos) = self.symptoms.iter().position(|s| s == tag) {
            self.symptoms.remove(pos);
        } else {
            self.symptoms.push(tag.to_string());
        }
    }

    /// Add a food typed in by hand. Returns its id.
    pub fn add_food(&mut self, name: &str) -> String {
        let id = new_food_id();
        self.foods.push(FoodItem::manual(id.clone(), name.trim()));
        id
    }

    /// Register a photo whose analysis is starting. Returns the id the result
    /// must be applied to.
    pub fn begin_analysis(&mut self, photo: Option<String>) -> String {
        let id = new_food_id();
        self.foods.push(FoodItem {
            id: id.clone(),
            name: ANALYZING_LABEL.to_string(),
            photo,
            ingredients: None,
            calories: None,
            ai_notes: None,
            status: FoodStatus::Pending,
        });
        tracing::debug!(food_id = %id, "analysis started");
        id
    }

    /// Fill in the food `id` from a finished analysis and append its name to the
    /// food text. Returns `false` when `id` is no longer in the working set.
    pub fn apply_analysis(&mut self, id: &str, analysis: &FoodAnalysis) -> bool {
        let Some(item) = self.foods.iter_mut().find(|f| f.id == id) else {
            tracing::debug!(food_id = %id, "analysis result for removed food ignored");
            return false;
        };

        item.name = analysis.food_name.clone();
        item.ingredients = non_empty(&analysis.ingredients);
        item.calories = Some(analysis.calories.max(0.0));
        item.ai_notes = non_empty(&analysis.notes);
        item.status = FoodStatus::Ready;

        if self.food_input.is_empty() {
            self.food_input = analysis.food_name.clone();
        } else {
            self.food_input = format!("{}, {}", self.food_input, analysis.food_name);
        }
        true
    }

    /// Mark the food `id` as failed, showing a truncated error label. Returns
    /// `false` when `id` is no longer in the working set.
    pub fn fail_analysis(&mut self, id: &str, message: &str) -> bool {
        let Some(item) = self.foods.iter_mut().find(|f| f.id == id) else {
            return false;
        };

        let short: String = message.chars().take(FAILED_MESSAGE_CHARS).collect();
        item.name = format!("{FAILED_PREFIX}{short}");
        item.status = FoodStatus::Failed;
        true
    }

    pub fn remove_food(&mut self, id: &str) -> bool {
        let before = self.foods.len();
        self.foods.retain(|f| f.id != id);
        self.foods.len() != before
    }

    /// `true` while any analysis is still in flight.
    pub fn is_analyzing(&self) -> bool {
        self.foods.iter().any(|f| f.status == FoodStatus::Pending)
    }

    /// Validate the draft and build the entry to store.
    ///
    /// Pending and failed foods are dropped. When no food text was typed, the
    /// names of the remaining foods are used instead.
    pub fn finalize(&self) -> Result<NewEntry, ValidationError> {
        let foods: Vec<FoodItem> = self.foods.iter().filter(|f| f.is_ready()).cloned().collect();

        let typed = self.food_input.trim();
        let food = if typed.is_empty() {
            foods
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        } else {
            typed.to_string()
        };

        let Some(mood) = self.mood else {
            return Err(ValidationError::MissingMood);
        };
        if food.is_empty() && foods.is_empty() {
            return Err(ValidationError::MissingFood);
        }

        let entry = NewEntry {
            mood,
            food,
            foods,
            energy: self.energy,
            symptoms: self.symptoms.clone(),
            notes: self.notes.trim().to_string(),
        };
        entry.validate()?;
        Ok(entry)
    }
}

fn new_food_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
