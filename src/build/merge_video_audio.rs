use serde_json::Value;

use crate::{
    build::{base_request, movie_elements, processing_failed, with_default_type},
    error::{VidforgeError, VidforgeResult},
    model::{ApiElement, RequestBody, Scene},
    params::ParamSource,
    process::process_element,
    validate::{ElementContext, ValidationResult, ensure_all_valid, validate_element},
};

/// Compiles the merge-video-audio request body: always exactly one scene
/// holding the video track, the audio track and any scene-level text.
#[tracing::instrument(skip(params))]
pub fn build_merge_video_audio(params: &dyn ParamSource, item_index: usize) -> VidforgeResult<RequestBody> {
    let mut body = base_request(params, item_index)?;

    let video_raw = detail_element(params, "videoElement.videoDetails", item_index, "video")
        .map_err(|err| processing_failed("Video", &err))?;
    let audio_raw = detail_element(params, "audioElement.audioDetails", item_index, "audio")
        .map_err(|err| processing_failed("Audio", &err))?;

    let results = [
        validate_element(&video_raw, ElementContext::Scene),
        validate_element(&audio_raw, ElementContext::Scene),
    ];
    ensure_all_valid("Scene element", &results)?;

    let mut text_raw = params.collection_or_empty("textElements.textDetails", item_index);
    text_raw.extend(params.collection_or_empty("sceneTextElements.textDetails", item_index));
    let text_results: Vec<ValidationResult> = text_raw
        .iter()
        .map(|e| validate_element(e, ElementContext::Scene))
        .collect();
    ensure_all_valid("Text element", &text_results)?;

    let mut elements = vec![
        process_video_element(&video_raw, body.width, body.height)?,
        process_audio_element(&audio_raw, body.width, body.height)?,
    ];
    for element in &text_raw {
        match process_element(element, body.width, body.height) {
            Ok(p) => elements.push(p),
            Err(err) => tracing::warn!("Failed to process scene element: {err}"),
        }
    }
    body.scenes = vec![Scene {
        elements,
        ..Scene::default()
    }];

    let movie_text = params.collection_or_empty("movieTextElements.textDetails", item_index);
    let movie = movie_elements("Movie text element", &movie_text, body.width, body.height)?;
    if !movie.is_empty() {
        body.elements = Some(movie);
    }

    Ok(body)
}

fn detail_element(
    params: &dyn ParamSource,
    name: &str,
    item_index: usize,
    kind: &str,
) -> VidforgeResult<Value> {
    let value = params.get(name, item_index).map_err(VidforgeError::from)?;
    Ok(with_default_type(value.unwrap_or(Value::Null), kind))
}

fn process_video_element(raw: &Value, width: u32, height: u32) -> VidforgeResult<ApiElement> {
    process_element(raw, width, height).map_err(|err| processing_failed("Video", &err))
}

fn process_audio_element(raw: &Value, width: u32, height: u32) -> VidforgeResult<ApiElement> {
    process_element(raw, width, height).map_err(|err| processing_failed("Audio", &err))
}
