use serde_json::{Map, Value};

use crate::error::{VidforgeError, VidforgeResult};

/// Outcome of checking a single element or a collection. Warnings never
/// affect validity.
#[derive(Clone, Debug, Default)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(msg.into());
    }

    pub fn warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Where an element is placed. Subtitles are valid only at movie level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementContext {
    Movie,
    Scene,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Video,
    Audio,
    Image,
    Text,
    Voice,
    Component,
    Html,
    Audiogram,
    Subtitles,
    Rectangle,
    Circle,
    Arrow,
    Line,
}

impl ElementKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "video" => Some(Self::Video),
            "audio" => Some(Self::Audio),
            "image" => Some(Self::Image),
            "text" => Some(Self::Text),
            "voice" => Some(Self::Voice),
            "component" => Some(Self::Component),
            "html" => Some(Self::Html),
            "audiogram" => Some(Self::Audiogram),
            "subtitles" => Some(Self::Subtitles),
            "rectangle" => Some(Self::Rectangle),
            "circle" => Some(Self::Circle),
            "arrow" => Some(Self::Arrow),
            "line" => Some(Self::Line),
            _ => None,
        }
    }
}

const FIT_MODES: &[&str] = &["cover", "contain", "fill", "scale-down", "none"];

const POSITION_PRESETS: &[&str] = &[
    "top-left",
    "top-center",
    "top-right",
    "center-left",
    "center-center",
    "center-right",
    "bottom-left",
    "bottom-center",
    "bottom-right",
];

/// Checks one element's shape and ranges for its declared kind.
pub fn validate_element(element: &Value, ctx: ElementContext) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if element.is_null() {
        result.error("Element is null or undefined");
        return result;
    }
    let Some(obj) = element.as_object() else {
        result.error("Element must be an object");
        return result;
    };

    let kind = match obj.get("type") {
        Some(Value::String(s)) => match ElementKind::parse(s) {
            Some(kind) => kind,
            None => {
                result.error(format!("Unknown element type: {s}"));
                return result;
            }
        },
        // Legacy text shapes carry no `type` at all.
        Some(Value::Null) | None => {
            if obj.contains_key("text") {
                ElementKind::Text
            } else {
                result.error("Element must have a type property");
                return result;
            }
        }
        Some(other) => {
            result.error(format!("Unknown element type: {other}"));
            return result;
        }
    };

    match kind {
        ElementKind::Video => validate_video(obj, &mut result),
        ElementKind::Audio => validate_audio(obj, &mut result),
        ElementKind::Image => validate_image(obj, &mut result),
        ElementKind::Text | ElementKind::Voice => validate_text(obj, &mut result),
        ElementKind::Subtitles => {
            if ctx == ElementContext::Scene {
                result.error("Subtitle elements are only allowed at the movie level");
            } else {
                validate_subtitle(obj, &mut result);
            }
        }
        ElementKind::Html => {
            require_nonempty(obj, "src", "HTML element must have a src property", &mut result);
            check_min(obj, "start", 0.0, "start must be a non-negative number", &mut result);
            check_positive(obj, "duration", "duration must be a positive number", &mut result);
        }
        ElementKind::Audiogram => {
            require_nonempty(obj, "src", "Audiogram element must have a src property", &mut result);
            check_min(obj, "start", 0.0, "start must be a non-negative number", &mut result);
        }
        ElementKind::Component => {
            require_nonempty(obj, "component", "Component element must have a component id", &mut result);
            check_min(obj, "start", 0.0, "start must be a non-negative number", &mut result);
        }
        ElementKind::Rectangle | ElementKind::Circle | ElementKind::Arrow | ElementKind::Line => {
            validate_shape(kind, obj, &mut result);
        }
    }

    result
}

fn validate_video(obj: &Map<String, Value>, result: &mut ValidationResult) {
    require_nonempty(obj, "src", "Video element must have a src property", result);
    check_min(obj, "duration", 0.0, "duration must be a non-negative number", result);
    check_min(obj, "start", 0.0, "start must be a non-negative number", result);
    check_range(obj, "volume", 0.0, 1.0, "volume must be a number between 0 and 1", result);
    check_positive(obj, "speed", "speed must be a number greater than 0", result);
    check_one_of(obj, "fit", FIT_MODES, result);
}

fn validate_audio(obj: &Map<String, Value>, result: &mut ValidationResult) {
    require_nonempty(obj, "src", "Audio element must have a src property", result);
    check_range(obj, "volume", 0.0, 1.0, "volume must be a number between 0 and 1", result);
    check_min(obj, "duration", 0.0, "duration must be a non-negative number", result);
    check_min(obj, "start", 0.0, "start must be a non-negative number", result);
}

fn validate_image(obj: &Map<String, Value>, result: &mut ValidationResult) {
    require_nonempty(obj, "src", "Image element must have a src property", result);
    check_one_of(obj, "fit", FIT_MODES, result);
}

fn validate_text(obj: &Map<String, Value>, result: &mut ValidationResult) {
    require_nonempty(obj, "text", "Text element must have a text property", result);

    match obj.get("position").and_then(Value::as_str) {
        None => {}
        Some("custom") => {
            if !obj.contains_key("x") || !obj.contains_key("y") {
                result.warning("Custom position requires x and y coordinates");
            }
        }
        Some(preset) if POSITION_PRESETS.contains(&preset) => {}
        Some(position) => {
            result.error(format!("position must be a position preset or custom, got: {position}"));
        }
    }

    check_numeric(obj, "x", "x must be a number", result);
    check_numeric(obj, "y", "y must be a number", result);
    check_min(obj, "start", 0.0, "start must be a non-negative number", result);
    check_positive(obj, "duration", "duration must be a positive number", result);
    check_font_weight(obj, result);
    check_hex_color(obj, "fontColor", result);
    check_hex_color(obj, "backgroundColor", result);
}

fn validate_subtitle(obj: &Map<String, Value>, result: &mut ValidationResult) {
    require_nonempty(obj, "text", "Subtitle element must have a text property", result);
    if obj.get("start").is_none_or(Value::is_null) {
        result.warning("Subtitle should have a start time");
    } else {
        check_min(obj, "start", 0.0, "start must be a non-negative number", result);
    }
    check_positive(obj, "duration", "duration must be a positive number", result);
}

fn validate_shape(kind: ElementKind, obj: &Map<String, Value>, result: &mut ValidationResult) {
    match kind {
        ElementKind::Rectangle => {
            check_required_positive(obj, "width", "Rectangle width must be a positive number", result);
            check_required_positive(obj, "height", "Rectangle height must be a positive number", result);
        }
        ElementKind::Circle => {
            check_required_positive(obj, "radius", "Circle radius must be a positive number", result);
        }
        ElementKind::Arrow | ElementKind::Line => {}
        _ => unreachable!("not a shape kind"),
    }
    check_hex_color(obj, "color", result);
}

fn require_nonempty(obj: &Map<String, Value>, key: &str, message: &str, result: &mut ValidationResult) {
    match obj.get(key).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => {}
        _ => result.error(message),
    }
}

fn present(obj: &Map<String, Value>, key: &str) -> Option<Value> {
    obj.get(key).filter(|v| !v.is_null()).cloned()
}

fn check_numeric(obj: &Map<String, Value>, key: &str, message: &str, result: &mut ValidationResult) {
    if let Some(value) = present(obj, key) {
        if value.as_f64().is_none() {
            result.error(message);
        }
    }
}

fn check_min(obj: &Map<String, Value>, key: &str, min: f64, message: &str, result: &mut ValidationResult) {
    if let Some(value) = present(obj, key) {
        match value.as_f64() {
            Some(n) if n >= min => {}
            _ => result.error(message),
        }
    }
}

fn check_positive(obj: &Map<String, Value>, key: &str, message: &str, result: &mut ValidationResult) {
    if let Some(value) = present(obj, key) {
        match value.as_f64() {
            Some(n) if n > 0.0 => {}
            _ => result.error(message),
        }
    }
}

fn check_required_positive(obj: &Map<String, Value>, key: &str, message: &str, result: &mut ValidationResult) {
    match present(obj, key).as_ref().and_then(Value::as_f64) {
        Some(n) if n > 0.0 => {}
        _ => result.error(message),
    }
}

fn check_range(
    obj: &Map<String, Value>,
    key: &str,
    lo: f64,
    hi: f64,
    message: &str,
    result: &mut ValidationResult,
) {
    if let Some(value) = present(obj, key) {
        match value.as_f64() {
            Some(n) if n >= lo && n <= hi => {}
            _ => result.error(message),
        }
    }
}

fn check_one_of(obj: &Map<String, Value>, key: &str, allowed: &[&str], result: &mut ValidationResult) {
    if let Some(value) = present(obj, key) {
        match value.as_str() {
            Some(s) if allowed.contains(&s) => {}
            _ => result.error(format!("{key} must be one of: {}", allowed.join(", "))),
        }
    }
}

fn check_font_weight(obj: &Map<String, Value>, result: &mut ValidationResult) {
    let Some(value) = present(obj, "fontWeight") else {
        return;
    };
    let ok = match &value {
        Value::Number(n) => n.as_f64().is_some_and(is_weight_step),
        Value::String(s) => match s.as_str() {
            "normal" | "bold" => true,
            other => other.parse::<f64>().is_ok_and(is_weight_step),
        },
        _ => false,
    };
    if !ok {
        result.error("fontWeight must be 100-900 in steps of 100, normal or bold");
    }
}

fn is_weight_step(n: f64) -> bool {
    (100.0..=900.0).contains(&n) && n % 100.0 == 0.0
}

fn check_hex_color(obj: &Map<String, Value>, key: &str, result: &mut ValidationResult) {
    if let Some(value) = present(obj, key) {
        let ok = value
            .as_str()
            .is_some_and(|s| s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit()));
        if !ok {
            result.error(format!("{key} must be a hex color like #RRGGBB"));
        }
    }
}

/// Validates each member of a collection, prefixing every message with its
/// 0-based position.
pub fn validate_elements(value: &Value, ctx: ElementContext) -> ValidationResult {
    let mut result = ValidationResult::valid();
    let Some(items) = value.as_array() else {
        result.error("Elements must be an array");
        return result;
    };

    for (index, item) in items.iter().enumerate() {
        let item_result = validate_element(item, ctx);
        if !item_result.is_valid {
            result.is_valid = false;
        }
        result
            .errors
            .extend(item_result.errors.iter().map(|e| format!("Element {index}: {e}")));
        result
            .warnings
            .extend(item_result.warnings.iter().map(|w| format!("Element {index}: {w}")));
    }
    result
}

/// Collapses per-item results into a single failure. Items are numbered
/// 1-based in the message regardless of their 0-based position.
pub fn ensure_all_valid(label: &str, results: &[ValidationResult]) -> VidforgeResult<()> {
    let mut lines = Vec::new();
    for (index, result) in results.iter().enumerate() {
        for error in &result.errors {
            lines.push(format!("{label} {}: {error}", index + 1));
        }
    }

    if lines.is_empty() {
        Ok(())
    } else {
        Err(VidforgeError::validation(format!(
            "{label} validation errors:\n{}",
            lines.join("\n")
        )))
    }
}
