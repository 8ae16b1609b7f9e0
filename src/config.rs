//! Runtime configuration utilities for bookclub.

use std::{env, fmt, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};

use crate::{catalog::cover::DEFAULT_COVERS_BASE, generate::backend::LengthParam};

const DEFAULT_CATALOG_URL: &str = "https://openlibrary.org/search.json";
const DEFAULT_CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_LOCAL_ENDPOINT: &str = "http://localhost:11434/api/generate";

/// Which generation backend shape to speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Completion,
    Chat,
    Local,
    None,
}

impl BackendKind {
    fn default_model(self) -> &'static str {
        match self {
            Self::Completion => "gpt2",
            Self::Chat => "gpt-3.5-turbo",
            Self::Local => "llama3",
            Self::None => "",
        }
    }

    fn default_endpoint(self, model: &str) -> String {
        match self {
            Self::Completion => format!("https://api-inference.huggingface.co/models/{model}"),
            Self::Chat => DEFAULT_CHAT_ENDPOINT.to_string(),
            Self::Local => DEFAULT_LOCAL_ENDPOINT.to_string(),
            Self::None => String::new(),
        }
    }

    fn default_timeout(self) -> Duration {
        match self {
            Self::Completion => Duration::from_secs(25),
            _ => Duration::from_secs(60),
        }
    }

    fn credential_var(self) -> Option<&'static str> {
        match self {
            Self::Completion => Some("HUGGINGFACE_TOKEN"),
            Self::Chat => Some("OPENAI_API_KEY"),
            Self::Local | Self::None => None,
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "completion" | "huggingface" => Ok(Self::Completion),
            "chat" | "openai" => Ok(Self::Chat),
            "local" | "ollama" => Ok(Self::Local),
            "none" | "off" => Ok(Self::None),
            other => Err(format!("unknown generation backend `{other}`")),
        }
    }
}

/// Generation backend configuration.
#[derive(Clone)]
pub struct BackendSettings {
    pub kind: BackendKind,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
    pub length_param: LengthParam,
    pub system_prompt: Option<String>,
}

impl fmt::Debug for BackendSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSettings")
            .field("kind", &self.kind)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .field("length_param", &self.length_param)
            .field("system_prompt", &self.system_prompt)
            .finish()
    }
}

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Book-search endpoint.
    pub catalog_search_url: String,
    /// Base URL for cover images.
    pub covers_base_url: String,
    pub catalog_timeout: Duration,
    pub backend: BackendSettings,
    /// Default number of discussion questions per book.
    pub question_count: usize,
    /// Substitute template text when the backend yields nothing.
    pub fallback_templates: bool,
    pub fallback_seed: u64,
    pub cache_capacity: Option<usize>,
    pub cache_ttl: Option<Duration>,
    /// Books generated concurrently; 1 keeps generation sequential.
    pub fanout: usize,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve settings through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let kind = match get("GENERATION_BACKEND") {
            Some(raw) => raw
                .parse::<BackendKind>()
                .map_err(|e| anyhow!(e))
                .context("parsing GENERATION_BACKEND")?,
            None if get("HUGGINGFACE_TOKEN").is_some() => BackendKind::Completion,
            None => BackendKind::None,
        };
        let model = get("GENERATION_MODEL").unwrap_or_else(|| kind.default_model().to_string());
        let endpoint = get("GENERATION_ENDPOINT").unwrap_or_else(|| kind.default_endpoint(&model));
        let api_key = get("GENERATION_API_KEY")
            .or_else(|| kind.credential_var().and_then(|var| get(var)));
        let temperature = parse_or(&get, "GENERATION_TEMPERATURE", 0.8_f32)?;
        let timeout = parse_opt::<u64, _>(&get, "GENERATION_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or_else(|| kind.default_timeout());
        let length_param = match get("COMPLETION_LENGTH_PARAM") {
            Some(raw) => raw
                .parse::<LengthParam>()
                .map_err(|e| anyhow!(e))
                .context("parsing COMPLETION_LENGTH_PARAM")?,
            None => LengthParam::default(),
        };

        let backend = BackendSettings {
            kind,
            endpoint,
            api_key,
            model,
            temperature,
            timeout,
            length_param,
            system_prompt: get("CHAT_SYSTEM_PROMPT"),
        };

        Ok(Self {
            catalog_search_url: get("CATALOG_SEARCH_URL")
                .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
            covers_base_url: get("COVERS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_COVERS_BASE.to_string()),
            catalog_timeout: Duration::from_secs(parse_or(&get, "CATALOG_TIMEOUT_SECS", 10)?),
            backend,
            question_count: parse_or(&get, "QUESTION_COUNT", 5)?,
            fallback_templates: parse_or(&get, "FALLBACK_TEMPLATES", false)?,
            fallback_seed: parse_or(&get, "FALLBACK_SEED", 0)?,
            cache_capacity: parse_opt(&get, "CACHE_CAPACITY")?,
            cache_ttl: parse_opt::<u64, _>(&get, "CACHE_TTL_SECS")?.map(Duration::from_secs),
            fanout: parse_or(&get, "FANOUT", 1_usize)?.max(1),
        })
    }
}

fn parse_opt<T, G>(get: &G, name: &str) -> anyhow::Result<Option<T>>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    get(name)
        .map(|raw| raw.trim().parse::<T>().with_context(|| format!("parsing {name}")))
        .transpose()
}

fn parse_or<T, G>(get: &G, name: &str, default: T) -> anyhow::Result<T>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(parse_opt(get, name)?.unwrap_or(default))
}
