//! Text rendering of an analysis outcome.

use crate::domain::AnalysisOutcome;

/// Render an outcome for the terminal.
///
/// Error outcomes show a warning line and, when present, the salvaged model
/// text. Successful outcomes show the rounded total, one line per item and
/// the summary.
pub fn render_outcome(outcome: &AnalysisOutcome) -> String {
    let mut out = String::new();

    if let Some(error) = outcome.error() {
        out.push_str(&format!("⚠  {}\n", error));
        if let Some(raw) = outcome.nutritional_summary().filter(|s| !s.trim().is_empty()) {
            out.push_str("\nModel said:\n");
            out.push_str(raw.trim());
            out.push('\n');
        }
        return out;
    }

    if outcome.food_items().is_empty() {
        out.push_str("No food items detected.\n");
        return out;
    }

    out.push_str(&format!(
        "🔥 {} calories\n\n",
        outcome.total_calories().round()
    ));
    out.push_str("Food Items\n");
    for item in outcome.food_items() {
        out.push_str(&format!(
            "  • {:<40} {:>6} cal\n",
            item.label(),
            item.calories.round()
        ));
    }

    if let Some(summary) = outcome.nutritional_summary().filter(|s| !s.trim().is_empty()) {
        out.push_str("\nNutritional Summary\n");
        out.push_str(&format!("  {}\n", summary.trim()));
    }

    out
}
