//! Interchangeable text-generation backends.
//!
//! Each variant owns one request/response shape. Which one is used comes from
//! configuration only; the prompt never influences the choice.

use std::{fmt, str::FromStr};

use reqwest::Client;
use serde_json::{json, Map, Value};

use super::parse::strip_prompt_prefix;
use crate::{
    config::{BackendKind, BackendSettings},
    error::GenerationError,
};

/// Name of the length field in a completion-style request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthParam {
    #[default]
    MaxLength,
    MaxNewTokens,
}

impl LengthParam {
    fn key(self) -> &'static str {
        match self {
            Self::MaxLength => "max_length",
            Self::MaxNewTokens => "max_new_tokens",
        }
    }
}

impl FromStr for LengthParam {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "max_length" => Ok(Self::MaxLength),
            "max_new_tokens" => Ok(Self::MaxNewTokens),
            other => Err(format!("unknown length parameter `{other}`")),
        }
    }
}

/// Per-call sampling options.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: Option<f32>,
    pub do_sample: Option<bool>,
}

impl GenerationOptions {
    pub fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens,
            temperature,
            top_p: Some(0.95),
            do_sample: Some(true),
        }
    }
}

/// Hosted inference API: `{inputs, parameters}` in, `[{generated_text}]` out.
#[derive(Clone)]
pub struct CompletionBackend {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub length_param: LengthParam,
}

/// Chat-completion API: `{model, messages, ...}` in, `choices[0].message.content` out.
#[derive(Clone)]
pub struct ChatBackend {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub system_prompt: Option<String>,
}

/// Locally hosted model server: `{model, prompt, stream, options}` in, `response` out.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    pub endpoint: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub enum Backend {
    Completion(CompletionBackend),
    Chat(ChatBackend),
    Local(LocalBackend),
    Disabled,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Completion(_) => "completion",
            Self::Chat(_) => "chat",
            Self::Local(_) => "local",
            Self::Disabled => "none",
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Send `prompt` and return the generated text, trimmed.
    pub async fn generate(
        &self,
        http: &Client,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        match self {
            Self::Completion(backend) => backend.generate(http, prompt, options).await,
            Self::Chat(backend) => backend.generate(http, prompt, options).await,
            Self::Local(backend) => backend.generate(http, prompt, options).await,
            Self::Disabled => Err(GenerationError::Disabled),
        }
    }
}

impl From<&BackendSettings> for Backend {
    fn from(settings: &BackendSettings) -> Self {
        match settings.kind {
            BackendKind::Completion => Self::Completion(CompletionBackend {
                endpoint: settings.endpoint.clone(),
                api_key: settings.api_key.clone(),
                length_param: settings.length_param,
            }),
            BackendKind::Chat => Self::Chat(ChatBackend {
                endpoint: settings.endpoint.clone(),
                api_key: settings.api_key.clone(),
                model: settings.model.clone(),
                system_prompt: settings.system_prompt.clone(),
            }),
            BackendKind::Local => Self::Local(LocalBackend {
                endpoint: settings.endpoint.clone(),
                model: settings.model.clone(),
            }),
            BackendKind::None => Self::Disabled,
        }
    }
}

impl CompletionBackend {
    async fn generate(
        &self,
        http: &Client,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential {
                backend: "completion",
            })?;

        let mut parameters = Map::new();
        parameters.insert(self.length_param.key().into(), json!(options.max_tokens));
        parameters.insert("temperature".into(), json!(options.temperature));
        if let Some(top_p) = options.top_p {
            parameters.insert("top_p".into(), json!(top_p));
        }
        if let Some(do_sample) = options.do_sample {
            parameters.insert("do_sample".into(), json!(do_sample));
        }
        let body = json!({ "inputs": prompt, "parameters": parameters });

        let payload = post_json(http, &self.endpoint, Some(api_key), &body).await?;
        let first = match &payload {
            Value::Array(items) => items.first(),
            other => Some(other),
        };
        let text = first
            .and_then(|item| item.get("generated_text"))
            .and_then(Value::as_str)
            .ok_or(GenerationError::Malformed("missing generated_text"))?;
        Ok(strip_prompt_prefix(text, prompt).to_string())
    }
}

impl ChatBackend {
    async fn generate(
        &self,
        http: &Client,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential { backend: "chat" })?;

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(json!({ "role": "system", "content": system }));
        }
        messages.push(json!({ "role": "user", "content": prompt }));
        let body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": options.temperature,
            "max_tokens": options.max_tokens,
        });

        let payload = post_json(http, &self.endpoint, Some(api_key), &body).await?;
        payload
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(|text| text.trim().to_string())
            .ok_or(GenerationError::Malformed("missing choices[0].message.content"))
    }
}

impl LocalBackend {
    async fn generate(
        &self,
        http: &Client,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": { "temperature": options.temperature },
        });

        let payload = post_json(http, &self.endpoint, None, &body).await?;
        payload
            .get("response")
            .and_then(Value::as_str)
            .map(|text| text.trim().to_string())
            .ok_or(GenerationError::Malformed("missing response"))
    }
}

async fn post_json(
    http: &Client,
    endpoint: &str,
    api_key: Option<&str>,
    body: &Value,
) -> Result<Value, GenerationError> {
    let mut request = http.post(endpoint).json(body);
    if let Some(key) = api_key {
        request = request.bearer_auth(key);
    }
    let resp = request.send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(GenerationError::Status(status));
    }
    Ok(resp.json::<Value>().await?)
}

impl fmt::Debug for CompletionBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionBackend")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("length_param", &self.length_param)
            .finish()
    }
}

impl fmt::Debug for ChatBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatBackend")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt)
            .finish()
    }
}
