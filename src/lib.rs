#![forbid(unsafe_code)]

pub mod build;
pub mod error;
pub mod model;
pub mod params;
pub mod process;
pub mod scene;
pub mod validate;

pub use build::{build_create_movie, build_merge_video_audio, build_merge_videos};
pub use error::{VidforgeError, VidforgeResult};
pub use model::{ApiElement, Destination, Export, RequestBody, Scene, Transition};
pub use params::{MapParams, ParamError, ParamResult, ParamSource};
pub use process::process_element;
pub use scene::assemble_scene;
pub use validate::{
    ElementContext, ElementKind, ValidationResult, ensure_all_valid, validate_element,
    validate_elements,
};
