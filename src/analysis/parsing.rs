//! Lenient extraction of the food analysis from a vision model's reply.
//!
//! Models are asked for bare JSON but often wrap it in code fences or prose.
//! [`extract_json_candidate`] tries, in order: a fenced `json` block, any fenced
//! block, and the first-`{`-to-last-`}` substring. [`interpret`] never fails:
//! unparseable replies degrade to a placeholder result built from the raw text.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use super::FoodAnalysis;

/// Name used when the model gave nothing usable.
pub const FALLBACK_FOOD_NAME: &str = "Food detected";

/// Note attached to results synthesized from an unparseable reply.
pub const UNPARSED_NOTE: &str = "Could not parse structured data";

/// Characters of raw reply kept as the name of a degraded result.
const FALLBACK_NAME_CHARS: usize = 50;

static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\n?([\s\S]*?)\n?```").expect("valid regex"));
static FENCED_ANY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```\n?([\s\S]*?)\n?```").expect("valid regex"));
static BRACED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\{[\s\S]*\})").expect("valid regex"));

/// Pick the slice of `text` most likely to hold the JSON payload.
pub fn extract_json_candidate(text: &str) -> &str {
    for pattern in [&*FENCED_JSON, &*FENCED_ANY, &*BRACED] {
        if let Some(found) = pattern.captures(text).and_then(|c| c.get(1)) {
            return found.as_str().trim();
        }
    }
    text.trim()
}

/// Fields pulled out of whatever JSON the model produced. Every field is optional.
#[derive(Debug, Default)]
struct RawFields {
    food_name: Option<String>,
    foods: Vec<String>,
    ingredients: Option<Vec<String>>,
    calories: Option<f64>,
    notes: Option<String>,
}

impl RawFields {
    fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        Self {
            food_name: obj
                .get("foodName")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_owned),
            foods: obj
                .get("foods")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(value_to_text).collect())
                .unwrap_or_default(),
            ingredients: obj
                .get("ingredients")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(value_to_text).collect()),
            calories: obj.get("calories").and_then(calories_from_value),
            notes: obj
                .get("notes")
                .and_then(Value::as_str)
                .map(str::to_owned),
        }
    }

    /// Placeholder fields for a reply that held no parseable JSON.
    fn unparsed(text: &str) -> Self {
        let name: String = text.chars().take(FALLBACK_NAME_CHARS).collect();
        Self {
            food_name: (!name.is_empty()).then_some(name),
            foods: Vec::new(),
            ingredients: Some(Vec::new()),
            calories: Some(0.0),
            notes: Some(UNPARSED_NOTE.to_string()),
        }
    }

    fn into_analysis(self, raw: &str) -> FoodAnalysis {
        let joined_foods = self.foods.join(", ");
        let food_name = self
            .food_name
            .or((!joined_foods.is_empty()).then_some(joined_foods))
            .unwrap_or_else(|| FALLBACK_FOOD_NAME.to_string());

        FoodAnalysis {
            food_name,
            ingredients: self.ingredients.map(|i| i.join(", ")).unwrap_or_default(),
            calories: self.calories.unwrap_or(0.0),
            notes: self.notes.unwrap_or_default(),
            raw: raw.to_string(),
        }
    }
}

/// Turn the model's reply text into a [`FoodAnalysis`], degrading instead of failing.
pub fn interpret(text: &str) -> FoodAnalysis {
    let candidate = extract_json_candidate(text);
    let fields = match serde_json::from_str::<Value>(candidate) {
        Ok(value) => RawFields::from_value(&value),
        Err(e) => {
            tracing::debug!(error = %e, "model reply is not JSON, using degraded result");
            RawFields::unparsed(text)
        }
    };
    fields.into_analysis(text)
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Accept numbers or numeric strings; zero, negative, and non-finite values count as absent.
fn calories_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (n.is_finite() && n > 0.0).then_some(n)
}
