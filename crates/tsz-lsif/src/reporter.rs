//! Reports `InternalSymbolLeak` occurrences (§4.5 "Internal-symbol
//! reports", §7).
//!
//! Lenient mode logs a warning and continues; strict mode turns the same
//! occurrence into a fatal `IndexError`.

use tracing::warn;

use crate::error::IndexError;

pub struct Reporter {
    strict: bool,
}

impl Reporter {
    pub fn new(strict: bool) -> Self {
        Reporter { strict }
    }

    /// A non-exported symbol was referenced from outside its single
    /// declaration's emit-scope.
    pub fn internal_symbol_leak(
        &self,
        symbol_key: &str,
        file: &str,
        offset: u32,
    ) -> Result<(), IndexError> {
        if self.strict {
            return Err(IndexError::InternalSymbolLeak {
                symbol_key: symbol_key.to_string(),
                file: file.to_string(),
                offset,
            });
        }
        warn!(symbol_key, file, offset, "internal symbol referenced outside its scope");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_mode_never_errors() {
        let reporter = Reporter::new(false);
        assert!(reporter.internal_symbol_leak("k", "a.ts", 10).is_ok());
    }

    #[test]
    fn strict_mode_is_fatal() {
        let reporter = Reporter::new(true);
        let err = reporter.internal_symbol_leak("k", "a.ts", 10).unwrap_err();
        assert!(matches!(err, IndexError::InternalSymbolLeak { .. }));
    }
}
