mod create_movie;
mod merge_video_audio;
mod merge_videos;

pub use create_movie::build_create_movie;
pub use merge_video_audio::build_merge_video_audio;
pub use merge_videos::build_merge_videos;

use serde_json::Value;

use crate::{
    error::{VidforgeError, VidforgeResult},
    model::{ApiElement, Export, RequestBody},
    params::ParamSource,
    process::process_element,
    validate::{ElementContext, ValidationResult, ensure_all_valid, validate_element},
};

pub(crate) const DEFAULT_FPS: f64 = 25.0;
pub(crate) const DEFAULT_WIDTH: u32 = 1024;
pub(crate) const DEFAULT_HEIGHT: u32 = 768;

/// Global settings shared by every operation: output geometry, render
/// options, optional id/exports/client-data/comment. Scenes and elements are
/// filled in by the per-operation builders.
pub(crate) fn base_request(params: &dyn ParamSource, item_index: usize) -> VidforgeResult<RequestBody> {
    let width = params.u32_or("output_width", item_index, DEFAULT_WIDTH)?;
    let height = params.u32_or("output_height", item_index, DEFAULT_HEIGHT)?;
    let fps = params.f64_or("framerate", item_index, DEFAULT_FPS)?;
    let quality = params.str_or("quality", item_index, "high")?;
    let cache = params.bool_or("cache", item_index, true)?;
    let draft = params.bool_or("draft", item_index, false)?;

    let id = trimmed(params.str_or("recordId", item_index, "")?);
    let comment = trimmed(params.str_or("comment", item_index, "")?);
    let exports = trimmed(params.str_or("webhookUrl", item_index, "")?)
        .map(|endpoint| vec![Export::webhook(endpoint)]);
    let client_data = parse_client_data(&params.str_or("client-data", item_index, "")?);

    Ok(RequestBody {
        width,
        height,
        fps,
        quality,
        cache,
        draft,
        id,
        client_data,
        comment,
        exports,
        elements: None,
        scenes: Vec::new(),
    })
}

pub(crate) fn trimmed(s: String) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

/// Included only when it parses as JSON and holds a non-empty object;
/// everything else is silently dropped.
fn parse_client_data(raw: &str) -> Option<Value> {
    if raw.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) if !map.is_empty() => Some(Value::Object(map)),
        Ok(_) => None,
        Err(err) => {
            tracing::debug!("ignoring malformed client-data: {err}");
            None
        }
    }
}

/// Movie-level elements for all three operations: validate the collection,
/// then process each member, dropping (with a warning) the ones that fail to
/// transform.
pub(crate) fn movie_elements(
    label: &str,
    raw: &[Value],
    target_width: u32,
    target_height: u32,
) -> VidforgeResult<Vec<ApiElement>> {
    let results: Vec<ValidationResult> = raw
        .iter()
        .map(|e| validate_element(e, ElementContext::Movie))
        .collect();
    ensure_all_valid(label, &results)?;

    let mut processed = Vec::with_capacity(raw.len());
    for element in raw {
        match process_element(element, target_width, target_height) {
            Ok(p) => processed.push(p),
            Err(err) => tracing::warn!("Failed to process movie element: {err}"),
        }
    }
    Ok(processed)
}

/// Defaults the element's `type` when absent. Non-objects pass through for
/// the validators to reject.
pub(crate) fn with_default_type(value: Value, kind: &str) -> Value {
    match value {
        Value::Object(mut obj) => {
            if !obj.contains_key("type") {
                obj.insert("type".to_string(), Value::from(kind));
            }
            Value::Object(obj)
        }
        other => other,
    }
}

/// Fatal wrapper for the merge operations' video/audio helpers. A blank
/// source message collapses to "Unknown error".
pub(crate) fn processing_failed(side: &str, err: &VidforgeError) -> VidforgeError {
    let msg = err.to_string();
    let msg = if msg.trim().is_empty() {
        "Unknown error".to_string()
    } else {
        msg
    };
    VidforgeError::processing(format!("{side} element processing failed: {msg}"))
}
