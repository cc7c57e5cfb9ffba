use thiserror::Error;

/// Failure modes of a single generation call.
///
/// Every variant renders through [`GenerationError::to_output`] as
/// `"Error: <message>"`, which is what the output area shows in place of the
/// model's text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("HTTP client unavailable: {0}")]
    MissingDependency(String),

    #[error("Configuration Error: {0}")]
    Configuration(String),

    #[error("Request Error: {0}")]
    Transport(String),

    #[error("HTTP Error: {status_code} - {message}")]
    Http { status_code: u16, message: String },

    #[error("Response Error: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    /// Whether a later attempt with the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            GenerationError::Transport(_) => true,
            GenerationError::Http { status_code, .. } => {
                *status_code == 429 || *status_code >= 500
            }
            _ => false,
        }
    }

    /// Text shown in the output area where a response would otherwise appear.
    pub fn to_output(&self) -> String {
        format!("Error: {}", self)
    }
}

/// Result of one generation call: the model's text or a tagged failure.
pub type GenerationResult = Result<String, GenerationError>;

/// Display form of a [`GenerationResult`].
pub fn render_result(result: &GenerationResult) -> String {
    match result {
        Ok(text) => text.clone(),
        Err(e) => e.to_output(),
    }
}

/// Non-fatal warnings raised by session actions before any generation call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Selecciona al menos un género.")]
    EmptySelection,

    #[error("Escribe una pregunta antes de enviarla.")]
    EmptyQuestion,

    #[error("Todavía no hay recomendaciones para guardar.")]
    NothingToSave,
}

/// Configuration and input-parsing errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Unknown genre: {0}")]
    UnknownGenre(String),

    #[error("Invalid year range {min}-{max}: years must lie within {lower}-{upper} and min must not exceed max")]
    InvalidYearRange {
        min: u16,
        max: u16,
        lower: u16,
        upper: u16,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
