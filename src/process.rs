use serde_json::{Map, Value};

use crate::{
    error::{VidforgeError, VidforgeResult},
    model::ApiElement,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FieldGroup {
    TopLevel,
    Settings,
}

/// Flat camelCase UI field → kebab-case API field. Settings rows nest under
/// the element's `settings` object.
const FIELD_MAP: &[(&str, &str, FieldGroup)] = &[
    ("type", "type", FieldGroup::TopLevel),
    ("src", "src", FieldGroup::TopLevel),
    ("text", "text", FieldGroup::TopLevel),
    ("component", "component", FieldGroup::TopLevel),
    ("style", "style", FieldGroup::TopLevel),
    ("start", "start", FieldGroup::TopLevel),
    ("duration", "duration", FieldGroup::TopLevel),
    ("end", "end", FieldGroup::TopLevel),
    ("x", "x", FieldGroup::TopLevel),
    ("y", "y", FieldGroup::TopLevel),
    ("position", "position", FieldGroup::TopLevel),
    ("volume", "volume", FieldGroup::TopLevel),
    ("speed", "speed", FieldGroup::TopLevel),
    ("fit", "fit", FieldGroup::TopLevel),
    ("radius", "radius", FieldGroup::TopLevel),
    ("color", "color", FieldGroup::TopLevel),
    ("muted", "muted", FieldGroup::TopLevel),
    ("loop", "loop", FieldGroup::TopLevel),
    ("fadeIn", "fade-in", FieldGroup::TopLevel),
    ("fadeOut", "fade-out", FieldGroup::TopLevel),
    ("zIndex", "z-index", FieldGroup::TopLevel),
    ("fontFamily", "font-family", FieldGroup::Settings),
    ("fontSize", "font-size", FieldGroup::Settings),
    ("fontWeight", "font-weight", FieldGroup::Settings),
    ("fontColor", "font-color", FieldGroup::Settings),
    ("backgroundColor", "background-color", FieldGroup::Settings),
    ("textAlign", "text-align", FieldGroup::Settings),
    ("verticalPosition", "vertical-position", FieldGroup::Settings),
    ("horizontalPosition", "horizontal-position", FieldGroup::Settings),
    ("lineHeight", "line-height", FieldGroup::Settings),
];

/// Canvas-dimension sentinel in raw `width`/`height` fields.
const FULL_CANVAS: f64 = -1.0;

/// Normalizes one raw element into the nested API shape. Pure transform:
/// identical input yields identical output.
pub fn process_element(raw: &Value, target_width: u32, target_height: u32) -> VidforgeResult<ApiElement> {
    let Some(obj) = raw.as_object() else {
        return Err(VidforgeError::processing("element is not an object"));
    };

    let mut element = ApiElement::new();
    let mut settings = Map::new();

    for &(source, dest, group) in FIELD_MAP {
        let Some(value) = obj.get(source) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        match group {
            FieldGroup::TopLevel => {
                element.insert(dest.to_string(), value.clone());
            }
            FieldGroup::Settings => {
                if value.is_object() || value.is_array() {
                    return Err(VidforgeError::processing(format!(
                        "styling field '{source}' must be a scalar"
                    )));
                }
                settings.insert(dest.to_string(), value.clone());
            }
        }
    }

    for (key, target) in [("width", target_width), ("height", target_height)] {
        let Some(value) = obj.get(key) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        match value.as_f64() {
            Some(n) if n == FULL_CANVAS => {
                element.insert(key.to_string(), Value::from(u64::from(target)));
            }
            Some(_) => {
                element.insert(key.to_string(), value.clone());
            }
            None => {
                return Err(VidforgeError::processing(format!("field '{key}' must be a number")));
            }
        }
    }

    if !settings.is_empty() {
        element.insert("settings".to_string(), Value::Object(settings));
    }

    Ok(element)
}
