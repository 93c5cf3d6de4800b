use async_trait::async_trait;
use foranki_core::{
    Card, CardId, CardService, CardUpdate, CoreError, Created, GenerateRequest, GenerateResponse,
    Generation, GenerationService, Modified, ModifyRequest, NewCard,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

pub mod config;

pub use config::ApiConfig;

/// Card and generation endpoints of one API server.
///
/// Every call is a single request: no retry, no timeout, no cancellation.
pub struct HttpService {
    client: Client,
    config: ApiConfig,
}

impl HttpService {
    pub fn new(config: ApiConfig) -> Result<Self, CoreError> {
        let client = Client::builder().build().map_err(from_reqwest)?;
        Ok(Self { client, config })
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, CoreError> {
        let resp = req.send().await.map_err(from_reqwest)?;
        let status = resp.status();
        debug!(url = %resp.url(), status = status.as_u16(), "api response");
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.bytes().await.unwrap_or_default();
        let message = error_message(&body);
        warn!(status = status.as_u16(), message = message.as_deref().unwrap_or(""), "api error");
        Err(CoreError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, CoreError> {
        let resp = self.send(req).await?;
        let body = resp.bytes().await.map_err(from_reqwest)?;
        serde_json::from_slice(&body).map_err(|e| CoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CardService for HttpService {
    async fn list_cards(&self) -> Result<Vec<Card>, CoreError> {
        self.send_json(self.client.get(self.config.url("cards"))).await
    }

    async fn create_card(&self, card: &NewCard) -> Result<CardId, CoreError> {
        let created: Created = self
            .send_json(self.client.post(self.config.url("cards")).json(card))
            .await?;
        Ok(created.id)
    }

    async fn update_card(&self, id: CardId, update: &CardUpdate) -> Result<(), CoreError> {
        let url = self.config.url(&format!("cards/{id}"));
        self.send(self.client.put(url).json(update)).await?;
        Ok(())
    }

    async fn delete_card(&self, id: CardId) -> Result<(), CoreError> {
        let url = self.config.url(&format!("cards/{id}"));
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}

#[async_trait]
impl GenerationService for HttpService {
    async fn generate(&self, prompt: &str) -> Result<Generation, CoreError> {
        let body = GenerateRequest {
            prompt: prompt.to_string(),
        };
        let raw: GenerateResponse = self
            .send_json(self.client.post(self.config.url("generate")).json(&body))
            .await?;
        Ok(raw.into())
    }

    async fn modify(&self, request: &ModifyRequest) -> Result<Modified, CoreError> {
        self.send_json(self.client.post(self.config.url("generate/modify")).json(request))
            .await
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    detail: Option<serde_json::Value>,
}

/// `message` first, then a plain-string `detail` as FastAPI sends it.
fn error_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    parsed
        .message
        .filter(|m| !m.is_empty())
        .or_else(|| parsed.detail.and_then(|d| d.as_str().map(str::to_string)))
        .filter(|m| !m.is_empty())
}

fn from_reqwest(e: reqwest::Error) -> CoreError {
    if e.is_decode() {
        CoreError::Decode(e.to_string())
    } else if e.is_builder() {
        CoreError::Unknown
    } else {
        CoreError::Transport(e.to_string())
    }
}
