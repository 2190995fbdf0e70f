// decoder.rs - Genotype token decoders

use super::allele::{AlleleAlphabet, AlleleCall};
use std::fmt::Debug;

/// Default missing marker of the 0/1/2 encoding
pub const DEFAULT_BINARY_MISSING: &str = "-";

/// Strategy turning one whitespace-delimited genotype token into an allele call.
///
/// Decoders are selected once per run and shared by both input layouts.
pub trait GenotypeDecoder: Send + Sync + Debug {
    /// Decode a single token; the error is a human-readable reason
    fn parse_token(&self, token: &str) -> Result<AlleleCall, String>;

    /// Alphabet whose indices the decoded calls refer to
    fn alphabet(&self) -> &AlleleAlphabet;

    fn name(&self) -> &'static str;
}

/// 0/1/2 encoding: 0 → (0,0), 1 → (1,0), 2 → (1,1)
#[derive(Debug, Clone)]
pub struct BinaryDecoder {
    alphabet: AlleleAlphabet,
    missing: String,
}

impl BinaryDecoder {
    pub fn new(missing: impl Into<String>) -> Self {
        Self {
            alphabet: AlleleAlphabet::binary(),
            missing: missing.into(),
        }
    }
}

impl Default for BinaryDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY_MISSING)
    }
}

impl GenotypeDecoder for BinaryDecoder {
    fn parse_token(&self, token: &str) -> Result<AlleleCall, String> {
        match token {
            "0" => Ok(AlleleCall::Called(0, 0)),
            "1" => Ok(AlleleCall::Called(1, 0)),
            "2" => Ok(AlleleCall::Called(1, 1)),
            t if t == self.missing => Ok(AlleleCall::Missing),
            _ => Err(format!(
                "Running in binary mode, but the value is not one of 0,1,2,{}. Perhaps binary mode should be off?",
                self.missing
            )),
        }
    }

    fn alphabet(&self) -> &AlleleAlphabet {
        &self.alphabet
    }

    fn name(&self) -> &'static str {
        "binary"
    }
}

/// Comma-joined allele symbol pairs such as `A,T`
#[derive(Debug, Clone)]
pub struct SymbolDecoder {
    alphabet: AlleleAlphabet,
    missing: String,
}

impl SymbolDecoder {
    pub fn new(alphabet: AlleleAlphabet, missing: impl Into<String>) -> Self {
        Self {
            alphabet,
            missing: missing.into(),
        }
    }
}

impl GenotypeDecoder for SymbolDecoder {
    fn parse_token(&self, token: &str) -> Result<AlleleCall, String> {
        let mut parts = token.split(',');
        let (first, second) = match (parts.next(), parts.next(), parts.next()) {
            (Some(first), Some(second), None) => (first, second),
            _ => return Err("Expected a pair of comma-separated allele symbols".to_string()),
        };

        if first == self.missing || second == self.missing {
            return Ok(AlleleCall::Missing);
        }

        let resolve = |symbol: &str| {
            self.alphabet
                .index_of(symbol)
                .ok_or_else(|| format!("Allele symbol '{}' is not in the allele alphabet", symbol))
        };

        Ok(AlleleCall::Called(resolve(first)?, resolve(second)?))
    }

    fn alphabet(&self) -> &AlleleAlphabet {
        &self.alphabet
    }

    fn name(&self) -> &'static str {
        "symbols"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_decoder() {
        let decoder = BinaryDecoder::default();
        assert_eq!(decoder.parse_token("0").unwrap(), AlleleCall::Called(0, 0));
        assert_eq!(decoder.parse_token("1").unwrap(), AlleleCall::Called(1, 0));
        assert_eq!(decoder.parse_token("2").unwrap(), AlleleCall::Called(1, 1));
        assert_eq!(decoder.parse_token("-").unwrap(), AlleleCall::Missing);

        let error = decoder.parse_token("A,T").unwrap_err();
        assert!(error.contains("binary mode"));
        assert!(decoder.parse_token("3").is_err());
    }

    #[test]
    fn test_binary_decoder_custom_missing() {
        let decoder = BinaryDecoder::new("9");
        assert_eq!(decoder.parse_token("9").unwrap(), AlleleCall::Missing);
        assert!(decoder.parse_token("-").is_err());
    }

    #[test]
    fn test_symbol_decoder() {
        let alphabet = AlleleAlphabet::parse("A,C,T,G").unwrap();
        let decoder = SymbolDecoder::new(alphabet, "N");

        assert_eq!(decoder.parse_token("A,G").unwrap(), AlleleCall::Called(0, 3));
        // Order inside the call is preserved
        assert_eq!(decoder.parse_token("G,A").unwrap(), AlleleCall::Called(3, 0));
        assert_eq!(decoder.parse_token("N,A").unwrap(), AlleleCall::Missing);
        assert_eq!(decoder.parse_token("C,N").unwrap(), AlleleCall::Missing);
    }

    #[test]
    fn test_symbol_decoder_errors() {
        let alphabet = AlleleAlphabet::parse("A,C,T,G").unwrap();
        let decoder = SymbolDecoder::new(alphabet, "N");

        assert!(decoder.parse_token("A,X").unwrap_err().contains("'X'"));
        assert!(decoder.parse_token("A").is_err());
        assert!(decoder.parse_token("A,C,T").is_err());
    }
}
