use crate::foundation::error::{CardError, CardResult};
use crate::generation::workflow::{BackgroundGenerator, GenerationResponse};
use async_trait::async_trait;
use serde::Serialize;

#[derive(Serialize)]
struct GenerationRequestBody<'a> {
    prompt: &'a str,
}

/// [`BackgroundGenerator`] backed by an HTTP endpoint.
///
/// Sends `POST {"prompt": ...}` and expects `{"success": true, "imageUrl": ...}` or
/// `{"success": false, "error": ...}`.
#[derive(Clone, Debug)]
pub struct HttpBackgroundGenerator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBackgroundGenerator {
    /// Create a generator posting to `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> CardResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cardstyle/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CardError::generation(format!("HTTP client error: {e}")))?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Create a generator reusing an existing client.
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Target URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BackgroundGenerator for HttpBackgroundGenerator {
    #[tracing::instrument(level = "debug", skip_all, fields(endpoint = %self.endpoint))]
    async fn request(&self, prompt: &str) -> CardResult<GenerationResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&GenerationRequestBody { prompt })
            .send()
            .await
            .map_err(|e| CardError::generation(format!("request failed: {e}")))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CardError::generation(format!("failed to read response: {e}")))?;

        match serde_json::from_slice::<GenerationResponse>(&bytes) {
            Ok(body) => Ok(body),
            Err(_) if !status.is_success() => {
                Err(CardError::generation(format!("service returned HTTP {status}")))
            }
            Err(e) => Err(CardError::generation(format!("malformed response: {e}"))),
        }
    }
}
