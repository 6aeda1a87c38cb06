//! Commit message generation from a git diff

use async_trait::async_trait;
use log::{debug, error};

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::prompt::build_conversation;
use crate::providers::{ChatClient, OpenAiClient};
use crate::request::ChatCompletionRequest;
use crate::text::normalize;

/// Anything that can turn a diff into a commit message
#[async_trait]
pub trait MessageGenerator: Send + Sync
{   /// Describe `diff` as a commit message
    ///
    /// With `delimiter`, the lines of the message are joined by it instead
    /// of newlines.
    async fn generate(
      &self
    , diff: &str
    , delimiter: Option<&str>
    ) -> Result<String>;
}

/// One-shot commit message generator over a chat-completion service
///
/// Stateless between calls: every `generate` builds its own conversation
/// from the fixed prompt, so a shared instance can serve concurrent calls.
#[derive(Debug)]
pub struct CommitMessageGenerator<C = OpenAiClient>
{   config: GeneratorConfig
  , client: C
}

impl CommitMessageGenerator<OpenAiClient>
{   /// Generator backed by the HTTP client described by `config`
    ///
    /// Fails with a configuration error, before any client is built, when
    /// the API key is missing or a parameter is out of range.
    pub fn new(config: GeneratorConfig) -> Result<Self>
    {   config.validate()?;
        let client = OpenAiClient::from_config(&config);
        Ok(CommitMessageGenerator { config, client })
    }
}

impl<C: ChatClient> CommitMessageGenerator<C>
{   /// Generator using a caller-supplied chat client
    pub fn with_client(config: GeneratorConfig, client: C) -> Result<Self>
    {   config.validate()?;
        debug!("Creating CommitMessageGenerator, model={}", config.model());
        Ok(CommitMessageGenerator { config, client })
    }

    pub fn config(&self) -> &GeneratorConfig
    {   &self.config
    }

    pub fn client(&self) -> &C
    {   &self.client
    }

    /// Request for `diff` with configured or default parameters
    pub fn build_request(&self, diff: &str) -> ChatCompletionRequest
    {   ChatCompletionRequest
        {   model: self.config.model().to_string()
          , messages: build_conversation(diff)
          , temperature: self.config.temperature()
          , max_tokens: self.config.max_tokens()
        }
    }

    /// Send `diff` to the service and return the normalized reply
    ///
    /// Transport failures are returned as the client reported them. A
    /// reply without text, or with only whitespace, yields
    /// [`Error::NoCommitMessage`]. Nothing is retried.
    pub async fn generate(
      &self
    , diff: &str
    , delimiter: Option<&str>
    ) -> Result<String>
    {   if let Some(delim) = delimiter
        {   if delim.contains(|c: char| c == '\n' || c == '\r')
            {   return Err(Error::InvalidConfiguration(
                  "delimiter must not contain line breaks".to_string()
                ));
            }
        }

        let request = self.build_request(diff);
        debug!("Generating commit message for {} byte diff", diff.len());

        let response = self.client.complete(&request).await?;

        let raw = response.first_content().unwrap_or_default();
        let message = normalize(raw, delimiter);
        if message.is_empty()
        {   error!("Chat reply contained no commit message");
            return Err(Error::NoCommitMessage);
        }

        debug!("Generated commit message ({} chars)", message.len());
        Ok(message)
    }
}

#[async_trait]
impl<C: ChatClient> MessageGenerator for CommitMessageGenerator<C>
{   async fn generate(
      &self
    , diff: &str
    , delimiter: Option<&str>
    ) -> Result<String>
    {   CommitMessageGenerator::generate(self, diff, delimiter).await
    }
}
