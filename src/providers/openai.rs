use async_trait::async_trait;
use log::{debug, trace, error};
use reqwest::StatusCode;

use crate::error::Error;
use crate::request::{
  ChatCompletionRequest
, ChatCompletionResponse
, ErrorEnvelope
};

/// OpenAI-compatible chat-completion client
///
/// Holds one pooled `reqwest::Client`, so a single instance serves any
/// number of concurrent requests. No timeout is set beyond reqwest's own.
#[derive(Clone)]
pub struct OpenAiClient
{   api_key: String
  , base_url: String
  , http_client: reqwest::Client
}

impl std::fmt::Debug for OpenAiClient
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   f.debug_struct("OpenAiClient")
          .field("base_url", &self.base_url)
          .finish_non_exhaustive()
    }
}

impl OpenAiClient
{   /// Create a client for `base_url` (e.g. `https://api.openai.com/v1`)
    pub fn new(
      api_key: impl Into<String>
    , base_url: impl Into<String>
    ) -> Self
    {   let base_url: String = base_url.into();
        debug!("Creating OpenAiClient for {}", base_url);
        OpenAiClient
        {   api_key: api_key.into()
          , base_url: base_url.trim_end_matches('/').to_string()
          , http_client: reqwest::Client::new()
        }
    }

    /// Client described by a generator config
    pub fn from_config(config: &crate::GeneratorConfig) -> Self
    {   OpenAiClient::new(config.api_key.trim(), config.endpoint())
    }

    pub fn base_url(&self) -> &str
    {   &self.base_url
    }

    fn completions_url(&self) -> String
    {   format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl super::ChatClient for OpenAiClient
{   async fn complete(
      &self
    , request: &ChatCompletionRequest
    ) -> crate::Result<ChatCompletionResponse>
    {   debug!(
          "Sending chat completion: model={} messages={}",
          request.model,
          request.messages.len()
        );
        trace!("Chat completion request: {:?}", request);

        let response = self.http_client
          .post(self.completions_url())
          .bearer_auth(&self.api_key)
          .json(request)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            e
          })?;

        let status = response.status();
        trace!("Chat completion status: {}", status);

        if !status.is_success()
        {   let body = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            let err = status_error(status, &body);
            error!("Chat completion failed: {}", err);
            return Err(err);
        }

        let reply = response.json::<ChatCompletionResponse>().await
          .map_err(|e| {
            error!("Parse error: {}", e);
            e
          })?;
        Ok(reply)
    }
}

/// Map a non-success status and its body to an error
fn status_error(status: StatusCode, body: &str) -> Error
{   let message = serde_json::from_str::<ErrorEnvelope>(body)
      .map(|envelope| envelope.error.message)
      .unwrap_or_else(|_| body.trim().to_string());

    match status
    {   StatusCode::UNAUTHORIZED
      | StatusCode::FORBIDDEN => Error::Unauthorized(message)
      , StatusCode::TOO_MANY_REQUESTS => Error::RateLimitExceeded
      , _ => Error::ApiError
        {   status: status.as_u16()
          , message
        }
    }
}
