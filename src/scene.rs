use serde_json::Value;

use crate::{
    error::VidforgeResult,
    model::{Scene, Transition},
    process::process_element,
    validate::{ElementContext, ValidationResult, ensure_all_valid, validate_element},
};

/// Scene background carried only when it differs from this default.
pub const DEFAULT_BACKGROUND: &str = "#000000";

pub(crate) const DEFAULT_TRANSITION_STYLE: &str = "fade";

/// Merges a raw scene's traditional and text element collections into one
/// ordered element list and carries the filtered scene metadata.
///
/// Validation failures abort the whole build; processing failures are logged
/// and the element is skipped.
#[tracing::instrument(skip(raw))]
pub fn assemble_scene(raw: &Value, target_width: u32, target_height: u32) -> VidforgeResult<Scene> {
    let traditional = collection_at(raw, &["elements", "elementValues"]);
    let text = collection_at(raw, &["textElements", "textDetails"]);

    let text_results: Vec<ValidationResult> = text
        .iter()
        .map(|e| validate_element(e, ElementContext::Scene))
        .collect();
    ensure_all_valid("Scene text element", &text_results)?;

    let traditional_results: Vec<ValidationResult> = traditional
        .iter()
        .map(|e| validate_element(e, ElementContext::Scene))
        .collect();
    ensure_all_valid("Scene element", &traditional_results)?;

    // Traditional elements first, text elements appended.
    let mut elements = Vec::with_capacity(traditional.len() + text.len());
    for element in traditional.iter().chain(text.iter()) {
        match process_element(element, target_width, target_height) {
            Ok(processed) => elements.push(processed),
            Err(err) => tracing::warn!("Failed to process scene element: {err}"),
        }
    }

    Ok(Scene {
        elements,
        duration: positive_number(raw.get("duration")),
        background_color: background_of(raw),
        comment: trimmed_nonblank(raw.get("comment")),
        transition: transition_of(raw),
    })
}

fn collection_at(raw: &Value, path: &[&str]) -> Vec<Value> {
    let mut current = raw;
    for key in path {
        match current.get(key) {
            Some(next) => current = next,
            None => return Vec::new(),
        }
    }
    current.as_array().cloned().unwrap_or_default()
}

fn positive_number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|n| *n > 0.0)
}

fn trimmed_nonblank(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn background_of(raw: &Value) -> Option<String> {
    trimmed_nonblank(raw.get("backgroundColor")).filter(|color| color != DEFAULT_BACKGROUND)
}

/// Entry transition, carried only when its duration is a positive number.
fn transition_of(raw: &Value) -> Option<Transition> {
    let duration = positive_number(raw.get("transition_duration"))?;
    let style = trimmed_nonblank(raw.get("transition_style"))
        .unwrap_or_else(|| DEFAULT_TRANSITION_STYLE.to_string());
    Some(Transition { style, duration })
}
