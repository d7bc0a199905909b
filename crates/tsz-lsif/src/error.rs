//! Error kinds for the indexer (§7) and scoped-resource guards (§5, §9).

use thiserror::Error;

/// One variant per §7 error kind.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("configuration error: {detail}")]
    Config { detail: String },

    #[error("protocol violation: {detail}")]
    ProtocolViolation { detail: String },

    /// Never returned to a caller: caught at the point of detection, logged,
    /// and the offending identifier is skipped (§7 propagation policy).
    #[error("compiler fault at {file}:{offset}: {detail}")]
    CompilerFault {
        file: String,
        offset: u32,
        detail: String,
    },

    #[error("internal symbol leaked outside its scope: {symbol_key} referenced from {file}:{offset}")]
    InternalSymbolLeak {
        symbol_key: String,
        file: String,
        offset: u32,
    },

    #[error("state assertion failed: {detail}")]
    StateAssertion { detail: String },
}

impl IndexError {
    pub fn protocol_violation(detail: impl Into<String>) -> Self {
        IndexError::ProtocolViolation {
            detail: detail.into(),
        }
    }

    pub fn state_assertion(detail: impl Into<String>) -> Self {
        IndexError::StateAssertion {
            detail: detail.into(),
        }
    }
}
