//! Generator configuration and its documented defaults

use serde::{Deserialize, Serialize};
use log::debug;

use crate::error::{Error, Result};

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-16k";
/// Low sampling temperature keeps phrasing close to deterministic
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
/// Commit messages are short, so output is capped well below model limits
pub const DEFAULT_MAX_TOKENS: u32 = 196;
/// Base URL used when no custom endpoint is configured
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Accepted sampling temperature range
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

const ENV_API_KEY: &str = "OPENAI_API_KEY";
const ENV_CUSTOM_ENDPOINT: &str = "OPENAI_CUSTOM_ENDPOINT";
const ENV_MODEL: &str = "OPENAI_MODEL";
const ENV_TEMPERATURE: &str = "OPENAI_TEMPERATURE";
const ENV_MAX_TOKENS: &str = "OPENAI_MAX_TOKENS";

/// Generator configuration
///
/// Unset optional values fall back to the `DEFAULT_*` constants. An
/// explicit `temperature` of `0.0` is kept as is.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig
{   /// Credential sent as a bearer token
    #[serde(default)]
    pub api_key: String
  , /// API base URL (if custom)
    #[serde(default)]
    pub custom_endpoint: Option<String>
  , /// Model identifier
    #[serde(default, alias = "gptVersion")]
    pub model: Option<String>
  , /// Sampling temperature, 0.0 to 2.0
    #[serde(default)]
    pub temperature: Option<f32>
  , /// Max tokens to generate
    #[serde(default)]
    pub max_tokens: Option<u32>
}

impl std::fmt::Debug for GeneratorConfig
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   f.debug_struct("GeneratorConfig")
          .field("api_key", &"<redacted>")
          .field("custom_endpoint", &self.custom_endpoint)
          .field("model", &self.model)
          .field("temperature", &self.temperature)
          .field("max_tokens", &self.max_tokens)
          .finish()
    }
}

impl GeneratorConfig
{   /// Config with only a credential; everything else defaults
    pub fn new(api_key: impl Into<String>) -> Self
    {   GeneratorConfig
        {   api_key: api_key.into()
          , custom_endpoint: None
          , model: None
          , temperature: None
          , max_tokens: None
        }
    }

    pub fn with_custom_endpoint(
      mut self
    , endpoint: impl Into<String>
    ) -> Self
    {   self.custom_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self
    {   self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self
    {   self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self
    {   self.max_tokens = Some(max_tokens);
        self
    }

    /// Parse a JSON settings object
    ///
    /// Keys follow the editor settings layout: `apiKey`, `customEndpoint`,
    /// `model` (or `gptVersion`), `temperature`, `maxTokens`.
    pub fn from_json(json: &str) -> Result<Self>
    {   serde_json::from_str(json)
          .map_err(|e| Error::InvalidConfiguration(e.to_string()))
    }

    /// Read configuration from `OPENAI_*` environment variables
    pub fn from_env() -> Result<Self>
    {   Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where F: Fn(&str) -> Option<String>
    {   debug!("Loading generator config from environment");
        let present = |name: &str| {
          lookup(name).filter(|v| !v.trim().is_empty())
        };

        let temperature = match present(ENV_TEMPERATURE)
        {   Some(raw) => Some(raw.trim().parse::<f32>().map_err(|_| {
              Error::InvalidConfiguration(
                format!("{} is not a number: {}", ENV_TEMPERATURE, raw)
              )
            })?)
          , None => None
        };

        let max_tokens = match present(ENV_MAX_TOKENS)
        {   Some(raw) => Some(raw.trim().parse::<u32>().map_err(|_| {
              Error::InvalidConfiguration(
                format!(
                  "{} is not a positive integer: {}",
                  ENV_MAX_TOKENS, raw
                )
              )
            })?)
          , None => None
        };

        Ok(GeneratorConfig
        {   api_key: lookup(ENV_API_KEY).unwrap_or_default()
          , custom_endpoint: present(ENV_CUSTOM_ENDPOINT)
          , model: present(ENV_MODEL)
          , temperature
          , max_tokens
        })
    }

    /// Check the credential and the generation parameters
    pub fn validate(&self) -> Result<()>
    {   if self.api_key.trim().is_empty()
        {   return Err(Error::MissingApiKey);
        }

        if let Some(t) = self.temperature
        {   if !TEMPERATURE_RANGE.contains(&t)
            {   return Err(Error::InvalidConfiguration(
                  format!("temperature must be within 0.0..=2.0, got {}", t)
                ));
            }
        }

        if self.max_tokens == Some(0)
        {   return Err(Error::InvalidConfiguration(
              "max_tokens must be positive".to_string()
            ));
        }

        if let Some(model) = &self.model
        {   if model.trim().is_empty()
            {   return Err(Error::InvalidConfiguration(
                  "model must not be blank".to_string()
                ));
            }
        }

        Ok(())
    }

    /// Base URL for the chat service, without a trailing slash
    pub fn endpoint(&self) -> &str
    {   self.custom_endpoint
          .as_deref()
          .map(str::trim)
          .filter(|e| !e.is_empty())
          .unwrap_or(DEFAULT_ENDPOINT)
          .trim_end_matches('/')
    }

    pub fn model(&self) -> &str
    {   self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn temperature(&self) -> f32
    {   self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn max_tokens(&self) -> u32
    {   self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use std::collections::HashMap;

    fn lookup_from(
      vars: &[(&str, &str)]
    ) -> impl Fn(&str) -> Option<String>
    {   let map: HashMap<String, String> = vars
          .iter()
          .map(|(k, v)| (k.to_string(), v.to_string()))
          .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_only_when_unset()
    {   let config = GeneratorConfig::new("sk-test");
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.temperature(), DEFAULT_TEMPERATURE);
        assert_eq!(config.max_tokens(), DEFAULT_MAX_TOKENS);
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn zero_temperature_is_a_real_override()
    {   let config = GeneratorConfig::new("sk-test")
          .with_temperature(0.0);
        assert_eq!(config.temperature(), 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_key_is_rejected()
    {   assert_eq!(
          GeneratorConfig::new("   ").validate()
        , Err(Error::MissingApiKey)
        );
    }

    #[test]
    fn out_of_range_values_are_rejected()
    {   let hot = GeneratorConfig::new("sk").with_temperature(2.5);
        assert!(matches!(
          hot.validate()
        , Err(Error::InvalidConfiguration(_))
        ));

        let empty = GeneratorConfig::new("sk").with_max_tokens(0);
        assert!(matches!(
          empty.validate()
        , Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn custom_endpoint_is_trimmed()
    {   let config = GeneratorConfig::new("sk")
          .with_custom_endpoint("  https://llm.internal/v1/  ");
        assert_eq!(config.endpoint(), "https://llm.internal/v1");

        let blank = GeneratorConfig::new("sk")
          .with_custom_endpoint("   ");
        assert_eq!(blank.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn json_accepts_settings_key_names()
    {   let config = GeneratorConfig::from_json(r#"{
          "apiKey": "sk-json",
          "gptVersion": "gpt-4",
          "temperature": 0,
          "maxTokens": 64
        }"#).unwrap();

        assert_eq!(config.api_key, "sk-json");
        assert_eq!(config.model(), "gpt-4");
        assert_eq!(config.temperature, Some(0.0));
        assert_eq!(config.max_tokens(), 64);
    }

    #[test]
    fn env_lookup_parses_numbers()
    {   let config = GeneratorConfig::from_lookup(lookup_from(&[
          (ENV_API_KEY, "sk-env")
        , (ENV_TEMPERATURE, "0.7")
        , (ENV_MAX_TOKENS, "120")
        , (ENV_MODEL, "")
        ])).unwrap();

        assert_eq!(config.api_key, "sk-env");
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.max_tokens, Some(120));
        assert_eq!(config.model, None);
    }

    #[test]
    fn env_lookup_rejects_garbage()
    {   let result = GeneratorConfig::from_lookup(lookup_from(&[
          (ENV_API_KEY, "sk-env")
        , (ENV_MAX_TOKENS, "lots")
        ]));
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }
}
