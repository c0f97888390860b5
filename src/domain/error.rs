//! Domain error types.

/// A parse error with position information for strategy text parsing.
#[derive(Debug, Clone, thiserror::Error)]
#[error("parse error at position {position}: {message}")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    /// Format the error with a caret pointing at the error position in the input.
    pub fn display_with_context(&self, input: &str) -> String {
        let caret = " ".repeat(self.position) + "^";
        format!(
            "{input}\n{caret}\n{err}",
            input = input,
            caret = caret,
            err = self
        )
    }
}

/// Top-level error type for stratbench.
#[derive(Debug, thiserror::Error)]
pub enum StratbenchError {
    #[error("price series is empty")]
    EmptySeries,

    #[error("price series dates not strictly increasing at bar {index}")]
    OutOfOrder { index: usize },

    #[error("non-positive or non-finite price at bar {index}")]
    InvalidPrice { index: usize },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    StrategyParse(#[from] ParseError),

    #[error("invalid strategy: {reason}")]
    StrategyInvalid { reason: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StratbenchError> for std::process::ExitCode {
    fn from(err: &StratbenchError) -> Self {
        let code: u8 = match err {
            StratbenchError::Io(_) => 1,
            StratbenchError::ConfigParse { .. }
            | StratbenchError::ConfigMissing { .. }
            | StratbenchError::ConfigInvalid { .. } => 2,
            StratbenchError::Data { .. } | StratbenchError::NoData { .. } => 3,
            StratbenchError::StrategyParse(_) | StratbenchError::StrategyInvalid { .. } => 4,
            StratbenchError::EmptySeries
            | StratbenchError::OutOfOrder { .. }
            | StratbenchError::InvalidPrice { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
