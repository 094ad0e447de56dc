use serde_json::{Value, json};
use vidforge::{MapParams, build_create_movie, build_merge_video_audio, build_merge_videos};

fn params(value: Value) -> MapParams {
    let Value::Object(map) = value else {
        panic!("fixture must be an object");
    };
    MapParams::new(map)
}

#[test]
fn create_movie_compiles_full_request_body() {
    let p = params(json!({
        "framerate": 30,
        "output_width": 1920,
        "output_height": 1080,
        "quality": "medium",
        "draft": true,
        "recordId": "  rec-42  ",
        "webhookUrl": "https://example.com/done",
        "client-data": "{\"batch\":7}",
        "comment": " promo cut ",
        "movieTextElements": { "textDetails": [
            { "text": "watermark", "position": "bottom-right", "fontColor": "#ffffff" }
        ]},
        "scenes": { "sceneValues": [
            {
                "duration": 5,
                "backgroundColor": "#112233",
                "comment": "opening",
                "elements": { "elementValues": [
                    { "type": "video", "src": "intro.mp4", "fit": "cover" }
                ]},
                "textElements": { "textDetails": [
                    { "text": "Welcome", "fontSize": 48, "fontFamily": "Inter" }
                ]}
            },
            {
                "transition_style": "wipe",
                "transition_duration": 1,
                "elements": { "elementValues": [
                    { "type": "image", "src": "still.png" }
                ]}
            }
        ]}
    }));

    let body = build_create_movie(&p, 0).unwrap();
    let value = serde_json::to_value(&body).unwrap();

    assert_eq!(value["fps"], json!(30.0));
    assert_eq!(value["width"], json!(1920));
    assert_eq!(value["height"], json!(1080));
    assert_eq!(value["quality"], json!("medium"));
    assert_eq!(value["cache"], json!(true));
    assert_eq!(value["draft"], json!(true));
    assert_eq!(value["id"], json!("rec-42"));
    assert_eq!(value["client-data"], json!({ "batch": 7 }));
    assert_eq!(value["comment"], json!("promo cut"));
    assert_eq!(
        value["exports"],
        json!([{ "destinations": [{ "type": "webhook", "endpoint": "https://example.com/done" }] }])
    );

    let elements = value["elements"].as_array().unwrap();
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0]["text"], json!("watermark"));
    assert_eq!(elements[0]["settings"]["font-color"], json!("#ffffff"));

    let scenes = value["scenes"].as_array().unwrap();
    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[0]["duration"], json!(5.0));
    assert_eq!(scenes[0]["background-color"], json!("#112233"));
    assert_eq!(scenes[0]["comment"], json!("opening"));
    assert!(scenes[0].get("transition").is_none());

    let first_elements = scenes[0]["elements"].as_array().unwrap();
    assert_eq!(first_elements.len(), 2);
    assert_eq!(first_elements[0]["type"], json!("video"));
    assert_eq!(first_elements[1]["text"], json!("Welcome"));
    assert_eq!(first_elements[1]["settings"]["font-size"], json!(48));

    assert_eq!(scenes[1]["transition"], json!({ "style": "wipe", "duration": 1.0 }));
}

#[test]
fn scene_and_element_counts_round_trip() {
    let scene = json!({
        "elements": { "elementValues": [
            { "type": "video", "src": "a.mp4" },
            { "type": "image", "src": "b.png" },
            { "type": "audio", "src": "c.mp3" }
        ]}
    });
    let p = params(json!({
        "scenes": { "sceneValues": [scene.clone(), scene.clone(), scene.clone(), scene] }
    }));
    let body = build_create_movie(&p, 0).unwrap();
    assert_eq!(body.scenes.len(), 4);
    for scene in &body.scenes {
        assert_eq!(scene.elements.len(), 3);
    }
}

#[test]
fn absent_scenes_default_to_one_empty_scene() {
    let body = build_create_movie(&params(json!({})), 0).unwrap();
    let value = serde_json::to_value(&body).unwrap();
    assert_eq!(value["scenes"], json!([{ "elements": [] }]));
    assert!(value.get("elements").is_none());
    assert!(value.get("id").is_none());
    assert!(value.get("exports").is_none());
}

#[test]
fn invalid_scene_duration_is_dropped_from_output() {
    for duration in [json!(0), json!(-1), json!("invalid")] {
        let p = params(json!({ "scenes": { "sceneValues": [{ "duration": duration }] } }));
        let body = build_create_movie(&p, 0).unwrap();
        let value = serde_json::to_value(&body).unwrap();
        assert!(value["scenes"][0].get("duration").is_none());
    }
}

#[test]
fn movie_text_validation_error_message_is_exact() {
    let p = params(json!({
        "movieTextElements": { "textDetails": [{ "text": "", "style": "001" }] }
    }));
    let err = build_create_movie(&p, 0).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Movie text element validation errors:\nMovie text element 1: Text element must have a text property"
    );
}

#[test]
fn subtitles_in_scene_values_abort_create_movie() {
    let p = params(json!({
        "scenes": { "sceneValues": [
            { "elements": { "elementValues": [
                { "type": "video", "src": "a.mp4" },
                { "type": "subtitles", "text": "cap", "start": 0 }
            ]}}
        ]}
    }));
    let err = build_create_movie(&p, 0).unwrap_err();
    assert!(err.to_string().starts_with("Scene element validation errors:"), "got: {err}");
}

#[test]
fn merge_video_audio_compiles_one_scene() {
    let p = params(json!({
        "videoElement": { "videoDetails": { "src": "clip.mp4", "width": -1, "height": -1 } },
        "audioElement": { "audioDetails": { "src": "music.mp3", "volume": 0.8 } },
        "output_width": 640,
        "output_height": 360
    }));
    let body = build_merge_video_audio(&p, 0).unwrap();
    let value = serde_json::to_value(&body).unwrap();
    let scenes = value["scenes"].as_array().unwrap();
    assert_eq!(scenes.len(), 1);
    let elements = scenes[0]["elements"].as_array().unwrap();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0]["type"], json!("video"));
    assert_eq!(elements[0]["width"], json!(640));
    assert_eq!(elements[0]["height"], json!(360));
    assert_eq!(elements[1]["type"], json!("audio"));
    assert_eq!(elements[1]["volume"], json!(0.8));
}

#[test]
fn merge_video_audio_processing_failure_message_is_prefixed() {
    let p = params(json!({
        "videoElement": { "videoDetails": { "src": "clip.mp4", "fontFamily": { "bad": 1 } } },
        "audioElement": { "audioDetails": { "src": "music.mp3" } }
    }));
    let err = build_merge_video_audio(&p, 0).unwrap_err();
    assert!(
        err.to_string().starts_with("Video element processing failed:"),
        "got: {err}"
    );
}

#[test]
fn merge_videos_chains_scenes_with_transitions() {
    let p = params(json!({
        "videoElements": { "videoDetails": [
            { "src": "a.mp4" },
            { "src": "b.mp4" }
        ]},
        "transition_style": "slide",
        "transition_duration": 0.5
    }));
    let body = build_merge_videos(&p, 0).unwrap();
    let value = serde_json::to_value(&body).unwrap();
    let scenes = value["scenes"].as_array().unwrap();
    assert_eq!(scenes.len(), 2);
    assert!(scenes[0].get("transition").is_none());
    assert_eq!(scenes[1]["transition"], json!({ "style": "slide", "duration": 0.5 }));
}

#[test]
fn compilation_is_deterministic() {
    let fixture = json!({
        "framerate": 24,
        "scenes": { "sceneValues": [
            { "elements": { "elementValues": [{ "type": "video", "src": "a.mp4" }] } }
        ]}
    });
    let first = serde_json::to_value(build_create_movie(&params(fixture.clone()), 0).unwrap()).unwrap();
    let second = serde_json::to_value(build_create_movie(&params(fixture), 0).unwrap()).unwrap();
    assert_eq!(first, second);
}
