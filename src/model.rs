use serde_json::Value;

/// One processed element as sent to the composition service: kebab-case
/// keys, optional nested `settings` object.
pub type ApiElement = serde_json::Map<String, Value>;

/// The compiled top-level request body.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RequestBody {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub quality: String,
    pub cache: bool,
    pub draft: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "client-data", skip_serializing_if = "Option::is_none")]
    pub client_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exports: Option<Vec<Export>>,
    /// Rendered across the whole output, independent of any scene. Present
    /// only when at least one movie-level element exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<ApiElement>>,
    /// Always at least one scene.
    pub scenes: Vec<Scene>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub elements: Vec<ApiElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(rename = "background-color", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Entry transition from the previous scene. Never set on the first scene.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transition {
    pub style: String,
    pub duration: f64,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Export {
    pub destinations: Vec<Destination>,
}

impl Export {
    pub fn webhook(endpoint: impl Into<String>) -> Self {
        Self {
            destinations: vec![Destination::Webhook {
                endpoint: endpoint.into(),
            }],
        }
    }
}

/// Delivery target for the finished render.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Destination {
    Webhook {
        endpoint: String,
    },
    Ftp {
        host: String,
        username: String,
        password: String,
        path: String,
    },
    Email {
        to: String,
    },
}
