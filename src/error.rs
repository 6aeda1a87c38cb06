use std::fmt;

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind
{   /// Bad or missing configuration, raised before any request is sent
    Configuration
  , /// Failure reported by the chat transport, passed through untouched
    Transport
  , /// The service answered but produced no usable commit message
    GenerationFailed
}

/// Error type for commit message generation
/// Implements Clone so results can be fanned out to several callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// API key is missing or blank
    MissingApiKey
  , /// A configuration value is out of range or malformed
    InvalidConfiguration(String)
  , /// Request could not be delivered
    HttpError(String)
  , /// Service rejected the credential (401/403)
    Unauthorized(String)
  , /// Rate limit exceeded (429)
    RateLimitExceeded
  , /// Any other non-success status
    ApiError
    {   status: u16
      , message: String
    }
  , /// Failed to decode the service response
    ParseError(String)
  , /// Response carried no commit message text
    NoCommitMessage
}

impl Error
{   /// Which of the three failure families this error belongs to
    pub fn kind(&self) -> ErrorKind
    {   match self
        {   Error::MissingApiKey
          | Error::InvalidConfiguration(_) => ErrorKind::Configuration
          , Error::HttpError(_)
          | Error::Unauthorized(_)
          | Error::RateLimitExceeded
          | Error::ApiError { .. }
          | Error::ParseError(_) => ErrorKind::Transport
          , Error::NoCommitMessage => ErrorKind::GenerationFailed
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingApiKey => {
              write!(f, "Missing API key")
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::Unauthorized(msg) => {
              write!(f, "Unauthorized: {}", msg)
            }
          , Error::RateLimitExceeded => {
              write!(f, "API rate limit exceeded")
            }
          , Error::ApiError { status, message } => {
              write!(f, "API error ({}): {}", status, message)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::NoCommitMessage => {
              write!(f,
                "No commit message was produced, try again"
              )
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error
{   fn from(e: reqwest::Error) -> Self
    {   if e.is_decode()
        {   Error::ParseError(e.to_string())
        } else
        {   Error::HttpError(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
