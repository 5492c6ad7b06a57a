use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Invalid target month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Malformed availability record at line {line}: {reason}")]
    MalformedAvailability { line: u64, reason: String },

    #[error("Malformed holiday record at line {line}: {reason} (holidays should be in MM/DD/YYYY format)")]
    MalformedHoliday { line: u64, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RosterResult<T> = Result<T, RosterError>;
