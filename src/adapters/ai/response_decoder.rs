//! Decodes a raw provider response into an `AnalysisOutcome`.
//!
//! Stages run in order and the first failing one short-circuits:
//! transport check → content extraction → JSON localization →
//! structural validation → normalization. `decode` never fails; every
//! failure becomes an error outcome.

use super::json_localize;
use crate::domain::{AnalysisFailure, AnalysisOutcome, FoodItem, RawProviderResponse};
use serde_json::Value;
use tracing::{debug, info, warn};

const UNKNOWN_ITEM: &str = "Unknown item";

/// Result of the structural validation step.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Valid(AnalysisOutcome),
    Invalid(InvalidReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    NoJson,
    NotAnObject,
    MissingFoodItems,
}

/// Decode a provider response. Always returns a well-formed outcome.
pub fn decode(raw: &RawProviderResponse) -> AnalysisOutcome {
    match try_decode(raw) {
        Ok(outcome) => outcome,
        Err(failure) => {
            warn!(error = %failure, "analysis failed");
            failure.into()
        }
    }
}

fn try_decode(raw: &RawProviderResponse) -> Result<AnalysisOutcome, AnalysisFailure> {
    check_transport(raw)?;
    let content = extract_content(&raw.body).ok_or(AnalysisFailure::EmptyContent)?;
    debug!(content_len = content.len(), "received model content");

    match validate(&content) {
        Validation::Valid(outcome) => {
            info!(
                items = outcome.food_items().len(),
                total_calories = outcome.total_calories(),
                "analysis decoded"
            );
            Ok(outcome)
        }
        Validation::Invalid(reason) => {
            warn!(?reason, "model content failed validation");
            Err(AnalysisFailure::Decode {
                raw_content: content,
            })
        }
    }
}

fn check_transport(raw: &RawProviderResponse) -> Result<(), AnalysisFailure> {
    if raw.is_success() {
        return Ok(());
    }
    warn!(status = raw.status, body = %raw.body, "provider returned error status");
    Err(AnalysisFailure::Transport {
        status: raw.status,
        status_text: raw.status_text.clone(),
    })
}

/// `choices[0].message.content`, as a string or concatenated text parts.
/// Blank content counts as absent.
pub fn extract_content(body: &Value) -> Option<String> {
    let content = body.pointer("/choices/0/message/content")?;
    let text = match content {
        Value::String(s) => s.clone(),
        Value::Array(parts) => parts
            .iter()
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(""),
        _ => return None,
    };
    (!text.trim().is_empty()).then_some(text)
}

/// Localize, parse and shape-check the model content.
pub fn validate(content: &str) -> Validation {
    let Some((strategy, value)) = json_localize::localize(content) else {
        return Validation::Invalid(InvalidReason::NoJson);
    };
    debug!(?strategy, "JSON localized");

    let Some(object) = value.as_object() else {
        return Validation::Invalid(InvalidReason::NotAnObject);
    };
    let Some(items) = object.get("foodItems").and_then(Value::as_array) else {
        return Validation::Invalid(InvalidReason::MissingFoodItems);
    };

    let food_items: Vec<FoodItem> = items.iter().filter_map(food_item_from_value).collect();
    let total_calories = object
        .get("totalCalories")
        .and_then(as_calories)
        .unwrap_or_else(|| food_items.iter().map(|i| i.calories).sum());
    let summary = object
        .get("nutritionalSummary")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Validation::Valid(AnalysisOutcome::success(food_items, total_calories, summary))
}

/// Permissive item conversion. Missing or non-numeric calories count as 0.
fn food_item_from_value(value: &Value) -> Option<FoodItem> {
    let Some(obj) = value.as_object() else {
        warn!(item = %value, "dropping non-object food item");
        return None;
    };
    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_ITEM)
        .to_string();
    let calories = obj.get("calories").and_then(as_calories).unwrap_or(0.0);

    Some(FoodItem {
        name,
        calories,
        quantity: obj.get("quantity").and_then(as_text),
        unit: obj.get("unit").and_then(as_text),
    })
}

/// Number or numeric string, clamped to non-negative. `None` otherwise.
fn as_calories(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then(|| n.max(0.0))
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
