use serde_json::Value;

use crate::{
    build::{base_request, movie_elements, processing_failed, trimmed, with_default_type},
    error::VidforgeResult,
    model::{RequestBody, Scene, Transition},
    params::ParamSource,
    process::process_element,
    scene::DEFAULT_TRANSITION_STYLE,
    validate::{ElementContext, ValidationResult, ensure_all_valid, validate_element},
};

/// Compiles the merge-videos request body: one scene per supplied video,
/// chained with the configured entry transition.
#[tracing::instrument(skip(params))]
pub fn build_merge_videos(params: &dyn ParamSource, item_index: usize) -> VidforgeResult<RequestBody> {
    let mut body = base_request(params, item_index)?;

    let videos: Vec<Value> = params
        .collection_or_empty("videoElements.videoDetails", item_index)
        .into_iter()
        .map(|v| with_default_type(v, "video"))
        .collect();

    let results: Vec<ValidationResult> = videos
        .iter()
        .map(|e| validate_element(e, ElementContext::Scene))
        .collect();
    ensure_all_valid("Video element", &results)?;

    let transition_style = params.str_or("transition_style", item_index, "")?;
    let transition_duration = params.f64_or("transition_duration", item_index, 0.0)?;
    let transition = (transition_duration > 0.0).then(|| Transition {
        style: trimmed(transition_style).unwrap_or_else(|| DEFAULT_TRANSITION_STYLE.to_string()),
        duration: transition_duration,
    });

    let mut scenes = Vec::with_capacity(videos.len().max(1));
    for (index, video) in videos.iter().enumerate() {
        let processed = process_element(video, body.width, body.height)
            .map_err(|err| processing_failed("Video", &err))?;
        scenes.push(Scene {
            elements: vec![processed],
            // Entry transitions start at the second scene.
            transition: (index > 0).then(|| transition.clone()).flatten(),
            ..Scene::default()
        });
    }
    if scenes.is_empty() {
        scenes.push(Scene::default());
    }
    body.scenes = scenes;

    let movie_text = params.collection_or_empty("movieTextElements.textDetails", item_index);
    let movie = movie_elements("Movie text element", &movie_text, body.width, body.height)?;
    if !movie.is_empty() {
        body.elements = Some(movie);
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MapParams;
    use serde_json::json;

    fn params(value: Value) -> MapParams {
        let Value::Object(map) = value else {
            panic!("fixture must be an object");
        };
        MapParams::new(map)
    }

    fn three_videos() -> Value {
        json!({
            "videoElements": { "videoDetails": [
                { "src": "a.mp4" },
                { "src": "b.mp4" },
                { "src": "c.mp4" }
            ]},
            "transition_style": "wipe",
            "transition_duration": 1.5
        })
    }

    #[test]
    fn one_scene_per_video_with_entry_transitions() {
        let body = build_merge_videos(&params(three_videos()), 0).unwrap();
        assert_eq!(body.scenes.len(), 3);
        assert_eq!(body.scenes[0].transition, None);
        for scene in &body.scenes[1..] {
            assert_eq!(
                scene.transition,
                Some(Transition {
                    style: "wipe".to_string(),
                    duration: 1.5
                })
            );
        }
        assert_eq!(body.scenes[1].elements[0].get("src").unwrap(), &json!("b.mp4"));
        assert_eq!(body.scenes[1].elements[0].get("type").unwrap(), &json!("video"));
    }

    #[test]
    fn non_positive_transition_duration_drops_all_transitions() {
        let mut fixture = three_videos();
        fixture["transition_duration"] = json!(0);
        let body = build_merge_videos(&params(fixture), 0).unwrap();
        assert!(body.scenes.iter().all(|s| s.transition.is_none()));
    }

    #[test]
    fn invalid_video_aborts_with_aggregate_message() {
        let p = params(json!({
            "videoElements": { "videoDetails": [
                { "src": "a.mp4" },
                { "src": "" }
            ]}
        }));
        let err = build_merge_videos(&p, 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Video element validation errors:\nVideo element 2: Video element must have a src property"
        );
    }

    #[test]
    fn no_videos_yield_one_empty_scene() {
        let body = build_merge_videos(&params(json!({})), 0).unwrap();
        assert_eq!(body.scenes.len(), 1);
        assert!(body.scenes[0].elements.is_empty());
    }

    #[test]
    fn processing_failure_is_fatal_here() {
        let p = params(json!({
            "videoElements": { "videoDetails": [
                { "src": "a.mp4", "fontSize": { "bad": true } }
            ]}
        }));
        let err = build_merge_videos(&p, 0).unwrap_err();
        assert!(
            err.to_string().starts_with("Video element processing failed:"),
            "got: {err}"
        );
    }
}
