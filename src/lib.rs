pub mod error;
pub mod config;
pub mod prompt;
pub mod providers;
pub mod request;
pub mod text;
pub mod generator;
use serde::{Deserialize, Serialize};

/*

commitgen turns a staged git diff into a conventional commit message by
asking an OpenAI-compatible chat endpoint, then tidies the reply.

commitgen/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports and shared message types
│   ├── error.rs        # Error enum and its three kinds
│   ├── config.rs       # GeneratorConfig, defaults, loaders
│   ├── prompt.rs       # Fixed one-shot prompt table
│   ├── request.rs      # Chat-completion wire types
│   ├── text.rs         # Reply normalization
│   ├── generator.rs    # CommitMessageGenerator
│   └── providers/
│       ├── mod.rs      # ChatClient capability
│       └── openai.rs   # reqwest-backed ChatClient
└── tests/

*/

pub use config::GeneratorConfig;
pub use error::{Error, ErrorKind, Result};
pub use generator::{CommitMessageGenerator, MessageGenerator};
pub use providers::{ChatClient, OpenAiClient};

// ===== Conversation types =====

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role
{   /// Instructions that frame the whole exchange
    System
  , /// Caller input (example diff or the real diff)
    User
  , /// Model output (the example answer)
    Assistant
}

/// A single role-tagged message of the conversation history
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PromptMessage
{   pub role: Role
  , pub content: String
}

impl PromptMessage
{   pub fn new(role: Role, content: impl Into<String>) -> Self
    {   PromptMessage
        {   role
          , content: content.into()
        }
    }
}
