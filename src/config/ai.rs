//! AI endpoint configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// AI endpoint configuration as loaded. Nothing here has a default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AiConfig {
    /// Bearer token for the completion endpoint
    pub api_key: Option<Secret<String>>,

    /// Full chat-completion URL
    pub endpoint: Option<String>,

    /// Model identifier sent with each request
    pub model: Option<String>,
}

/// One of the three required AI settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiSetting {
    ApiKey,
    Endpoint,
    Model,
}

impl AiSetting {
    /// Environment variable that supplies this setting
    pub fn env_var(&self) -> &'static str {
        match self {
            AiSetting::ApiKey => "REPLY_COACH__AI__API_KEY",
            AiSetting::Endpoint => "REPLY_COACH__AI__ENDPOINT",
            AiSetting::Model => "REPLY_COACH__AI__MODEL",
        }
    }

    /// What the user should do about it
    pub fn remediation(&self) -> &'static str {
        match self {
            AiSetting::ApiKey => "set it to the API key issued by your model provider",
            AiSetting::Endpoint => {
                "set it to the full chat-completion URL, e.g. https://api.example.com/v1/chat/completions"
            }
            AiSetting::Model => "set it to the model identifier your provider expects",
        }
    }
}

impl std::fmt::Display for AiSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.env_var(), self.remediation())
    }
}

/// Validated AI settings, ready to build a provider from
#[derive(Debug, Clone)]
pub struct AiSettings {
    pub api_key: Secret<String>,
    pub endpoint: String,
    pub model: String,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl AiConfig {
    /// Builds a config from explicit values
    pub fn new(
        api_key: Option<&str>,
        endpoint: Option<&str>,
        model: Option<&str>,
    ) -> Self {
        Self {
            api_key: api_key.map(|k| Secret::new(k.to_string())),
            endpoint: endpoint.map(str::to_string),
            model: model.map(str::to_string),
        }
    }

    /// Every required setting that is absent or blank, in a fixed order
    pub fn missing_settings(&self) -> Vec<AiSetting> {
        let mut missing = Vec::new();
        if present(self.api_key.as_ref().map(|k| k.expose_secret().as_str())).is_none() {
            missing.push(AiSetting::ApiKey);
        }
        if present(self.endpoint.as_deref()).is_none() {
            missing.push(AiSetting::Endpoint);
        }
        if present(self.model.as_deref()).is_none() {
            missing.push(AiSetting::Model);
        }
        missing
    }

    /// Check if all three settings are present
    pub fn is_configured(&self) -> bool {
        self.missing_settings().is_empty()
    }

    /// Validate AI configuration, reporting every missing setting at once
    pub fn validate(&self) -> Result<AiSettings, ValidationError> {
        let missing = self.missing_settings();
        if !missing.is_empty() {
            return Err(ValidationError::MissingAiSettings(missing));
        }

        let endpoint = present(self.endpoint.as_deref())
            .unwrap_or_default()
            .to_string();
        let scheme_ok = reqwest::Url::parse(&endpoint)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !scheme_ok {
            return Err(ValidationError::InvalidEndpoint(endpoint));
        }

        let api_key = self
            .api_key
            .as_ref()
            .map(|k| Secret::new(k.expose_secret().trim().to_string()))
            .ok_or(ValidationError::MissingAiSettings(vec![AiSetting::ApiKey]))?;

        Ok(AiSettings {
            api_key,
            endpoint,
            model: present(self.model.as_deref())
                .unwrap_or_default()
                .to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: Option<&str> = Some("sk-test");
    const URL: Option<&str> = Some("https://api.example.com/v1/chat/completions");
    const MODEL: Option<&str> = Some("test-model");

    #[test]
    fn test_complete_config_validates() {
        let settings = AiConfig::new(KEY, URL, MODEL).validate().unwrap();
        assert_eq!(settings.api_key.expose_secret(), "sk-test");
        assert_eq!(settings.endpoint, "https://api.example.com/v1/chat/completions");
        assert_eq!(settings.model, "test-model");
    }

    #[test]
    fn test_each_subset_of_missing_settings_is_reported_exactly() {
        for mask in 0u8..8 {
            let key = if mask & 1 == 0 { KEY } else { None };
            let url = if mask & 2 == 0 { URL } else { None };
            let model = if mask & 4 == 0 { MODEL } else { None };

            let mut expected = Vec::new();
            if mask & 1 != 0 {
                expected.push(AiSetting::ApiKey);
            }
            if mask & 2 != 0 {
                expected.push(AiSetting::Endpoint);
            }
            if mask & 4 != 0 {
                expected.push(AiSetting::Model);
            }

            let config = AiConfig::new(key, url, model);
            assert_eq!(config.missing_settings(), expected, "mask {mask}");
            match config.validate() {
                Ok(_) => assert!(expected.is_empty()),
                Err(err) => assert_eq!(err, ValidationError::MissingAiSettings(expected)),
            }
        }
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let config = AiConfig::new(Some("  "), Some(""), Some("\t"));
        assert_eq!(
            config.missing_settings(),
            vec![AiSetting::ApiKey, AiSetting::Endpoint, AiSetting::Model]
        );
    }

    #[test]
    fn test_non_http_endpoint_is_rejected() {
        let err = AiConfig::new(KEY, Some("ftp://example.com"), MODEL)
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidEndpoint("ftp://example.com".into()));

        assert!(AiConfig::new(KEY, Some("not a url"), MODEL).validate().is_err());
    }

    #[test]
    fn test_debug_output_redacts_key() {
        let config = AiConfig::new(Some("sk-very-secret"), URL, MODEL);
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }

    #[test]
    fn test_missing_message_names_env_vars() {
        let err = ValidationError::MissingAiSettings(vec![AiSetting::ApiKey, AiSetting::Model]);
        assert_eq!(
            err.to_string(),
            "Missing AI settings: REPLY_COACH__AI__API_KEY, REPLY_COACH__AI__MODEL"
        );
    }
}
