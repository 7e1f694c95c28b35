//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/IO types here — adapters map provider payloads into these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::AnalysisFailure;

/// A single food item recognised on the plate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub name: String,
    pub calories: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl FoodItem {
    pub fn new(name: impl Into<String>, calories: f64) -> Self {
        Self {
            name: name.into(),
            calories,
            quantity: None,
            unit: None,
        }
    }

    /// Display label: `name (quantity unit)`, `name (quantity)` or just `name`.
    pub fn label(&self) -> String {
        match (&self.quantity, &self.unit) {
            (Some(q), Some(u)) => format!("{} ({} {})", self.name, q, u),
            (Some(q), None) => format!("{} ({})", self.name, q),
            _ => self.name.clone(),
        }
    }
}

/// Terminal result of one analysis call.
///
/// Either a success payload or an error payload, never both: an outcome
/// carrying `error` always has no items and a zero total. Fields are private
/// so the only way to build one is [`AnalysisOutcome::success`] or
/// [`AnalysisOutcome::failure`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    food_items: Vec<FoodItem>,
    total_calories: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    nutritional_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl AnalysisOutcome {
    pub fn success(food_items: Vec<FoodItem>, total_calories: f64, summary: String) -> Self {
        Self {
            food_items,
            total_calories,
            nutritional_summary: Some(summary),
            error: None,
        }
    }

    /// Error payload. `summary` is a best-effort salvage shown alongside the error.
    pub fn failure(error: impl Into<String>, summary: Option<String>) -> Self {
        Self {
            food_items: Vec::new(),
            total_calories: 0.0,
            nutritional_summary: summary,
            error: Some(error.into()),
        }
    }

    pub fn food_items(&self) -> &[FoodItem] {
        &self.food_items
    }

    pub fn total_calories(&self) -> f64 {
        self.total_calories
    }

    pub fn nutritional_summary(&self) -> Option<&str> {
        self.nutritional_summary.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl From<AnalysisFailure> for AnalysisOutcome {
    fn from(failure: AnalysisFailure) -> Self {
        let message = failure.to_string();
        let summary = match failure {
            AnalysisFailure::Decode { raw_content } => Some(raw_content),
            _ => None,
        };
        Self::failure(message, summary)
    }
}

/// Signed-in user, as exposed outside the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_has_no_items() {
        let outcome = AnalysisOutcome::failure("boom", None);
        assert!(outcome.is_error());
        assert!(outcome.food_items().is_empty());
        assert_eq!(outcome.total_calories(), 0.0);
    }

    #[test]
    fn test_decode_failure_keeps_raw_text() {
        let outcome: AnalysisOutcome = AnalysisFailure::Decode {
            raw_content: "a plate of pasta".to_string(),
        }
        .into();
        assert_eq!(outcome.error(), Some("Could not parse the analysis result"));
        assert_eq!(outcome.nutritional_summary(), Some("a plate of pasta"));
    }

    #[test]
    fn test_label_forms() {
        let mut item = FoodItem::new("rice", 200.0);
        assert_eq!(item.label(), "rice");
        item.quantity = Some("1".to_string());
        assert_eq!(item.label(), "rice (1)");
        item.unit = Some("cup".to_string());
        assert_eq!(item.label(), "rice (1 cup)");
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let outcome = AnalysisOutcome::success(vec![FoodItem::new("apple", 95.0)], 95.0, String::new());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["totalCalories"], 95.0);
        assert_eq!(json["foodItems"][0]["name"], "apple");
        assert!(json.get("error").is_none());
    }
}
