use crate::{
    build::{base_request, movie_elements},
    error::VidforgeResult,
    model::{RequestBody, Scene},
    params::ParamSource,
    scene::assemble_scene,
};

/// Compiles the create-movie request body: global settings, movie-level
/// elements, and one scene per entry in `scenes.sceneValues`.
#[tracing::instrument(skip(params))]
pub fn build_create_movie(params: &dyn ParamSource, item_index: usize) -> VidforgeResult<RequestBody> {
    let mut body = base_request(params, item_index)?;

    let text_raw = params.collection_or_empty("movieTextElements.textDetails", item_index);
    let mut elements = movie_elements("Movie text element", &text_raw, body.width, body.height)?;

    let mixed_raw = params.collection_or_empty("movieElements.elementValues", item_index);
    elements.extend(movie_elements("Movie element", &mixed_raw, body.width, body.height)?);

    if !elements.is_empty() {
        body.elements = Some(elements);
    }

    let scene_values = params.collection_or_empty("scenes.sceneValues", item_index);
    let mut scenes = Vec::with_capacity(scene_values.len().max(1));
    for raw in &scene_values {
        scenes.push(assemble_scene(raw, body.width, body.height)?);
    }
    if scenes.is_empty() {
        scenes.push(Scene::default());
    }
    // Transitions describe entry from the previous scene; the first has none.
    if let Some(first) = scenes.first_mut() {
        first.transition = None;
    }
    body.scenes = scenes;

    Ok(body)
}
