use thiserror::Error;

#[derive(Error, Debug)]
pub enum SonarError {
    #[error("{control} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        control: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scenario file parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV export failed: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, SonarError>;
