use serde_json::Value;

pub type ParamResult<T> = Result<T, ParamError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    #[error("parameter '{name}' is unavailable: {reason}")]
    Access { name: String, reason: String },

    #[error("parameter '{name}' must be {expected}")]
    Type { name: String, expected: &'static str },
}

impl ParamError {
    pub fn access(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Access {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn type_mismatch(name: impl Into<String>, expected: &'static str) -> Self {
        Self::Type {
            name: name.into(),
            expected,
        }
    }
}

/// Lookup of previously-declared parameter values by dotted path
/// (e.g. `scenes.sceneValues`).
///
/// `Ok(None)` means the parameter was never declared; `Err` means the source
/// failed to produce it. Callers decide per call site whether an access
/// failure is fatal or degrades to the fallback.
pub trait ParamSource {
    fn get(&self, name: &str, item_index: usize) -> ParamResult<Option<Value>>;

    fn str_or(&self, name: &str, item_index: usize, fallback: &str) -> ParamResult<String> {
        match self.get(name, item_index)? {
            None | Some(Value::Null) => Ok(fallback.to_string()),
            Some(Value::String(s)) => Ok(s),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(_) => Err(ParamError::type_mismatch(name, "a string")),
        }
    }

    fn f64_or(&self, name: &str, item_index: usize, fallback: f64) -> ParamResult<f64> {
        match self.get(name, item_index)? {
            None | Some(Value::Null) => Ok(fallback),
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| ParamError::type_mismatch(name, "a number")),
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map_err(|_| ParamError::type_mismatch(name, "a number")),
            Some(_) => Err(ParamError::type_mismatch(name, "a number")),
        }
    }

    fn u32_or(&self, name: &str, item_index: usize, fallback: u32) -> ParamResult<u32> {
        let n = self.f64_or(name, item_index, f64::from(fallback))?;
        if n.fract() == 0.0 && n >= 0.0 && n <= f64::from(u32::MAX) {
            Ok(n as u32)
        } else {
            Err(ParamError::type_mismatch(name, "a non-negative integer"))
        }
    }

    fn bool_or(&self, name: &str, item_index: usize, fallback: bool) -> ParamResult<bool> {
        match self.get(name, item_index)? {
            None | Some(Value::Null) => Ok(fallback),
            Some(Value::Bool(b)) => Ok(b),
            Some(Value::String(s)) => match s.trim() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(ParamError::type_mismatch(name, "a boolean")),
            },
            Some(_) => Err(ParamError::type_mismatch(name, "a boolean")),
        }
    }

    /// Collection read. Absent, null, non-array and access-failing values all
    /// degrade to an empty list; access failures leave a warn-level
    /// breadcrumb instead of aborting the build.
    fn collection_or_empty(&self, name: &str, item_index: usize) -> Vec<Value> {
        match self.get(name, item_index) {
            Ok(Some(Value::Array(items))) => items,
            Ok(Some(Value::Null)) | Ok(None) => Vec::new(),
            Ok(Some(_)) => {
                tracing::warn!("parameter '{name}' is not an array, treating as absent");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!("parameter '{name}' is unavailable, treating as absent: {err}");
                Vec::new()
            }
        }
    }
}

/// In-memory source backed by a JSON object. Dotted names resolve by exact
/// key first, then by nested traversal.
#[derive(Clone, Debug, Default)]
pub struct MapParams {
    values: serde_json::Map<String, Value>,
}

impl MapParams {
    pub fn new(values: serde_json::Map<String, Value>) -> Self {
        Self { values }
    }
}

impl ParamSource for MapParams {
    fn get(&self, name: &str, _item_index: usize) -> ParamResult<Option<Value>> {
        if let Some(value) = self.values.get(name) {
            return Ok(Some(value.clone()));
        }

        let mut current: Option<&Value> = None;
        for part in name.split('.') {
            current = match current {
                None => self.values.get(part),
                Some(value) => value.get(part),
            };
            if current.is_none() {
                return Ok(None);
            }
        }
        Ok(current.cloned())
    }
}
