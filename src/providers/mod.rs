//! Chat-completion transports

use async_trait::async_trait;

use crate::request::{ChatCompletionRequest, ChatCompletionResponse};

pub mod openai;

// Re-export for convenience
pub use openai::OpenAiClient;

/// Capability to send a conversation and receive the service's reply
///
/// Implementations must tolerate concurrent outstanding requests on a
/// shared reference. Errors are returned to the generator's caller
/// unchanged.
#[async_trait]
pub trait ChatClient: Send + Sync
{   async fn complete(
      &self
    , request: &ChatCompletionRequest
    ) -> crate::Result<ChatCompletionResponse>;
}

#[async_trait]
impl<C> ChatClient for std::sync::Arc<C>
where C: ChatClient + ?Sized
{   async fn complete(
      &self
    , request: &ChatCompletionRequest
    ) -> crate::Result<ChatCompletionResponse>
    {   (**self).complete(request).await
    }
}
