use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(shiftboard::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(shiftboard::config))]
    Config(String),

    #[error("Invalid input: {0}")]
    #[diagnostic(code(shiftboard::input), help("times are written as HH:MM, days as monday..friday or all"))]
    Input(String),

    #[error("Chart rendering error: {0}")]
    #[diagnostic(code(shiftboard::render))]
    Render(String),

    #[error("Font error: {0}")]
    #[diagnostic(code(shiftboard::font))]
    Font(String),

    #[error(transparent)]
    #[diagnostic(code(shiftboard::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(shiftboard::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(shiftboard::other))]
    Other(String),
}

// Implement From for TOML serialization errors
impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Render(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type BoardResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create input errors
pub fn input_error(message: &str) -> Error {
    Error::Input(message.to_string())
}

/// Helper to create rendering errors
pub fn render_error(message: &str) -> Error {
    Error::Render(message.to_string())
}

/// Helper to create font errors
pub fn font_error(message: &str) -> Error {
    Error::Font(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
