use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::LookupSettings;
use crate::domain::entities::column::LookupCandidate;
use crate::usecase::ports::lookup::{LookupClient, LookupError, LookupSource};

/// Posts an empty query to `{base_url}{endpoint}` and reads the candidates
/// from the `data` array of the response.
pub struct HttpLookupClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpLookupClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    pub fn from_settings(settings: &LookupSettings) -> Self {
        Self::new(settings.base_url.clone(), settings.token.clone())
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait(?Send)]
impl LookupClient for HttpLookupClient {
    async fn fetch(&self, source: &LookupSource) -> Result<Vec<LookupCandidate>, LookupError> {
        let url = self.url_for(&source.endpoint);
        let transport = |err: reqwest::Error| LookupError::Transport {
            endpoint: source.endpoint.clone(),
            message: err.to_string(),
        };

        let mut request = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&json!({ "filters": [], "sorts": [] }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(url = %url, "fetching lookup candidates");
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                endpoint: source.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|err| LookupError::Decode {
            endpoint: source.endpoint.clone(),
            message: err.to_string(),
        })?;
        candidates_from_response(&body, source)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Maps `{"data": [{"id": .., <label fields>..}, ..]}` to candidates. The
/// label joins the source's label fields with spaces and falls back to the
/// id when none of them is present.
pub fn candidates_from_response(
    body: &Value,
    source: &LookupSource,
) -> Result<Vec<LookupCandidate>, LookupError> {
    let decode = |message: &str| LookupError::Decode {
        endpoint: source.endpoint.clone(),
        message: message.to_string(),
    };

    let items = body
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| decode("missing `data` array"))?;

    items
        .iter()
        .map(|item| {
            let id = item
                .get("id")
                .and_then(scalar_text)
                .ok_or_else(|| decode("item without `id`"))?;
            let label = source
                .label_fields
                .iter()
                .filter_map(|field| item.get(field).and_then(scalar_text))
                .collect::<Vec<_>>()
                .join(" ");
            let label = if label.is_empty() { id.clone() } else { label };
            Ok(LookupCandidate { id, label })
        })
        .collect()
}
