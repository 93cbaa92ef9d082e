use std::env;
use std::time::Duration;

use quiz_core::model::{Difficulty, QuestionKind};
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";
pub const DEFAULT_AMOUNT: u8 = 10;
/// Largest batch Open Trivia DB serves in one call.
pub const MAX_AMOUNT: u8 = 50;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Parameters of one batch fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchRequest {
    amount: u8,
    kind: QuestionKind,
    category: Option<u32>,
    difficulty: Option<Difficulty>,
}

impl Default for BatchRequest {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT,
            kind: QuestionKind::Multiple,
            category: None,
            difficulty: None,
        }
    }
}

impl BatchRequest {
    /// # Errors
    ///
    /// Returns `ConfigError::AmountOutOfRange` unless `1 <= amount <= MAX_AMOUNT`.
    pub fn new(amount: u32) -> Result<Self, ConfigError> {
        let in_range = u8::try_from(amount)
            .ok()
            .filter(|amount| (1..=MAX_AMOUNT).contains(amount));
        let Some(amount) = in_range else {
            return Err(ConfigError::AmountOutOfRange {
                amount,
                max: MAX_AMOUNT,
            });
        };
        Ok(Self {
            amount,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_kind(mut self, kind: QuestionKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<u32>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Option<Difficulty>) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn amount(&self) -> u8 {
        self.amount
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn category(&self) -> Option<u32> {
        self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }
}

/// Where and what to fetch.
#[derive(Clone, Debug)]
pub struct TriviaConfig {
    pub endpoint: Url,
    pub request: BatchRequest,
    pub timeout: Duration,
}

impl TriviaConfig {
    /// Default request and timeout against the provider rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if `base_url` is not an http(s) url.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: endpoint_for(base_url)?,
            request: BatchRequest::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Read `QUIZ_API_BASE_URL`, `QUIZ_AMOUNT`, `QUIZ_TYPE`, `QUIZ_CATEGORY`,
    /// `QUIZ_DIFFICULTY` and `QUIZ_TIMEOUT_SECS`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` with an injectable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| lookup(key).filter(|raw| !raw.trim().is_empty());
        let base_url = value("QUIZ_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;

        if let Some(raw) = value("QUIZ_AMOUNT") {
            config.request = BatchRequest::new(parse_amount(&raw)?)?;
        }
        if let Some(raw) = value("QUIZ_TYPE") {
            config.request = config.request.with_kind(parse_kind(&raw)?);
        }
        if let Some(raw) = value("QUIZ_CATEGORY") {
            config.request = config.request.with_category(Some(parse_category(&raw)?));
        }
        if let Some(raw) = value("QUIZ_DIFFICULTY") {
            config.request = config.request.with_difficulty(Some(parse_difficulty(&raw)?));
        }
        if let Some(raw) = value("QUIZ_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout { raw: raw.clone() })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Point the client at another provider root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if `base_url` is not an http(s) url.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.endpoint = endpoint_for(base_url)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_request(mut self, request: BatchRequest) -> Self {
        self.request = request;
        self
    }
}

/// Resolve the `api.php` endpoint under `base_url`.
fn endpoint_for(base_url: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        raw: base_url.to_string(),
        reason,
    };

    let mut base = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", base.scheme())));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("api.php").map_err(|e| invalid(e.to_string()))
}

fn parse_amount(raw: &str) -> Result<u32, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidAmount {
        raw: raw.to_string(),
    })
}

fn parse_category(raw: &str) -> Result<u32, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidCategory {
        raw: raw.to_string(),
    })
}

fn parse_difficulty(raw: &str) -> Result<Difficulty, ConfigError> {
    Difficulty::parse(raw).ok_or_else(|| ConfigError::InvalidDifficulty {
        raw: raw.to_string(),
    })
}

fn parse_kind(raw: &str) -> Result<QuestionKind, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "multiple" => Ok(QuestionKind::Multiple),
        "boolean" => Ok(QuestionKind::Boolean),
        _ => Err(ConfigError::InvalidKind {
            raw: raw.to_string(),
        }),
    }
}
