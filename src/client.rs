use reqwest::Client;
use std::time::Duration;

use crate::types::{GenerateRequest, Role};
use crate::wire::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    SystemInstruction,
};
use crate::Error;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Placeholder value shipped in .env templates; treated the same as no key.
const PLACEHOLDER_API_KEY: &str = "your_gemini_api_key_here";

/// Environment variable holding the credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Client for the Gemini `generateContent` endpoint, authenticated with an
/// API key passed as a query parameter.
#[derive(Debug)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client. Fails without network access if the key is empty
    /// or still the placeholder.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a new client with a custom base URL (for testing).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, Error> {
        let api_key = api_key.into();
        if api_key.is_empty() || api_key == PLACEHOLDER_API_KEY {
            return Err(Error::config(format!(
                "{API_KEY_VAR} environment variable not set or is placeholder"
            )));
        }

        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a new client from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var(API_KEY_VAR).unwrap_or_default();
        Self::new(api_key)
    }

    /// Convert a request to the provider wire format.
    fn convert_request(request: &GenerateRequest) -> GenerateContentRequest {
        let contents = request
            .messages
            .iter()
            .map(|msg| Content {
                role: provider_role(msg.role).to_string(),
                parts: vec![Part {
                    text: msg.content.clone(),
                }],
            })
            .collect();

        let system_instruction = request
            .system_instruction
            .as_ref()
            .map(|text| SystemInstruction {
                parts: vec![Part { text: text.clone() }],
            });

        let generation_config = Some(GenerationConfig {
            temperature: request.temperature,
            max_output_tokens: request.max_output_tokens,
        });

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    /// Get the API endpoint for a model. The key is appended separately as a
    /// query parameter.
    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Perform a single `generateContent` call and return the answer text.
    ///
    /// One attempt, binary outcome: any transport failure, non-success status
    /// or missing text field is an error.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<String, Error> {
        let body = Self::convert_request(request);

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(Error::api(status.as_u16(), error_text));
        }

        let text = response.text().await?;
        let result: GenerateContentResponse = serde_json::from_str(&text)?;

        result
            .first_text()
            .map(str::to_string)
            .ok_or(Error::NoContent)
    }
}

/// Role mapping for the provider: assistant turns become "model", everything
/// else is "user".
fn provider_role(role: Role) -> &'static str {
    match role {
        Role::Assistant => "model",
        Role::User => "user",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Message;
    use serde_json::json;

    fn request() -> GenerateRequest {
        GenerateRequest {
            model: "gemini-2.0-flash-exp".to_string(),
            messages: vec![Message::user("Hello")],
            system_instruction: Some("Be brief.".to_string()),
            temperature: Some(0.4),
            max_output_tokens: Some(1500),
        }
    }

    #[test]
    fn placeholder_key_is_rejected() {
        let client = GeminiClient::new("your_gemini_api_key_here");
        assert!(matches!(client, Err(Error::Config(_))));
    }

    #[test]
    fn empty_key_is_rejected() {
        let client = GeminiClient::new("");
        assert!(matches!(client, Err(Error::Config(_))));
    }

    #[test]
    fn real_key_is_accepted() {
        assert!(GeminiClient::new("test-api-key").is_ok());
    }

    #[test]
    fn assistant_maps_to_model_role() {
        assert_eq!(provider_role(Role::Assistant), "model");
        assert_eq!(provider_role(Role::User), "user");
    }

    #[test]
    fn request_serializes_to_camel_case_wire_format() {
        let body = GeminiClient::convert_request(&request());
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "Hello"}]}
                ],
                "systemInstruction": {"parts": [{"text": "Be brief."}]},
                "generationConfig": {"temperature": 0.4, "maxOutputTokens": 1500}
            })
        );
    }

    #[test]
    fn assistant_turns_are_converted() {
        let mut request = request();
        request.messages.push(Message::assistant("Hi there"));

        let body = GeminiClient::convert_request(&request);
        assert_eq!(body.contents.len(), 2);
        assert_eq!(body.contents[1].role, "model");
        assert_eq!(body.contents[1].parts[0].text, "Hi there");
    }

    #[test]
    fn endpoint_includes_model_and_method() {
        let client = GeminiClient::with_base_url("test-api-key", "http://localhost:1234/").unwrap();
        assert_eq!(
            client.endpoint("gemini-2.0-flash-exp"),
            "http://localhost:1234/models/gemini-2.0-flash-exp:generateContent"
        );
    }
}
