//! Wire types for the chat-completion endpoint

use serde::{Deserialize, Serialize};

use crate::PromptMessage;

/// Outbound chat-completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest
{   pub model: String
  , pub messages: Vec<PromptMessage>
  , pub temperature: f32
  , pub max_tokens: u32
}

impl ChatCompletionRequest
{   /// Content of the last user message, i.e. the diff being described
    pub fn last_user_content(&self) -> Option<&str>
    {   self.messages
          .iter()
          .rev()
          .find(|m| m.role == crate::Role::User)
          .map(|m| m.content.as_str())
    }
}

/// Inbound chat-completion response
///
/// Only `choices[0].message.content` is consumed; every other field the
/// service sends is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse
{   #[serde(default)]
    pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Choice
{   #[serde(default)]
    pub message: Option<ReplyMessage>
  , #[serde(default)]
    pub finish_reason: Option<String>
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyMessage
{   #[serde(default)]
    pub role: Option<String>
  , #[serde(default)]
    pub content: Option<String>
}

impl ChatCompletionResponse
{   /// Response carrying a single assistant reply
    pub fn from_content(content: impl Into<String>) -> Self
    {   ChatCompletionResponse
        {   choices: vec![
              Choice
              {   message: Some(ReplyMessage
                  {   role: Some("assistant".to_string())
                    , content: Some(content.into())
                  })
                , finish_reason: Some("stop".to_string())
              }
            ]
        }
    }

    /// Text of the first choice, if the service produced any
    pub fn first_content(&self) -> Option<&str>
    {   self.choices
          .first()
          .and_then(|c| c.message.as_ref())
          .and_then(|m| m.content.as_deref())
    }
}

/// Error body returned by OpenAI-compatible services
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope
{   pub error: ErrorDetail
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorDetail
{   pub message: String
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn unknown_fields_are_ignored()
    {   let body = r#"{
          "id": "chatcmpl-1",
          "object": "chat.completion",
          "usage": {"total_tokens": 12},
          "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "Fix: typo"},
            "finish_reason": "stop"
          }]
        }"#;
        let response: ChatCompletionResponse
          = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_content(), Some("Fix: typo"));
    }

    #[test]
    fn missing_content_reads_as_none()
    {   let body = r#"{"choices": [{"message": {"role": "assistant"}}]}"#;
        let response: ChatCompletionResponse
          = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_content(), None);

        let empty: ChatCompletionResponse
          = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.first_content(), None);
    }
}
