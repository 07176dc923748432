use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Length in characters of every encoded SAID.
pub const SAID_LEN: usize = 44;

/// Character the placeholder is made of while a SAID is being computed.
pub const PLACEHOLDER_CHAR: char = '#';

/// Size of the raw digest every supported code produces.
pub const DIGEST_SIZE: usize = 32;

/// Supported digest algorithms, keyed by their one-character derivation code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestCode {
    /// Blake3-256 (code `E`, the default).
    #[default]
    #[serde(rename = "E")]
    Blake3,
    /// SHA2-256 (code `I`).
    #[serde(rename = "I")]
    Sha256,
}

impl DigestCode {
    /// All codes this crate can compute.
    pub const ALL: [DigestCode; 2] = [DigestCode::Blake3, DigestCode::Sha256];

    /// The code character prefixed to encoded SAIDs.
    pub fn code(&self) -> &'static str {
        match self {
            DigestCode::Blake3 => "E",
            DigestCode::Sha256 => "I",
        }
    }

    /// Looks up a code from its prefix character.
    pub fn from_code(code: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| ValidationError::UnsupportedCode(code.to_string()))
    }

    /// Dummy value of the exact encoded length, written into the label
    /// field while the containing object is digested.
    pub fn placeholder(&self) -> String {
        PLACEHOLDER_CHAR.to_string().repeat(SAID_LEN)
    }

    /// Hashes `bytes` with this algorithm.
    pub fn digest(&self, bytes: &[u8]) -> [u8; DIGEST_SIZE] {
        match self {
            DigestCode::Blake3 => *blake3::hash(bytes).as_bytes(),
            DigestCode::Sha256 => {
                let mut out = [0u8; DIGEST_SIZE];
                out.copy_from_slice(&Sha256::digest(bytes));
                out
            }
        }
    }

    /// Encodes a raw digest as a qualified base64 SAID.
    ///
    /// A zero lead byte pads the digest to a multiple of three bytes; the
    /// resulting leading `A` is then replaced by the code character.
    pub fn encode(&self, raw: &[u8; DIGEST_SIZE]) -> Said {
        let mut padded = Vec::with_capacity(DIGEST_SIZE + 1);
        padded.push(0u8);
        padded.extend_from_slice(raw);
        let b64 = URL_SAFE_NO_PAD.encode(&padded);
        Said(format!("{}{}", self.code(), &b64[1..]))
    }

    /// Digests `bytes` and encodes the result.
    pub fn said_of(&self, bytes: &[u8]) -> Said {
        self.encode(&self.digest(bytes))
    }
}

impl fmt::Display for DigestCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DigestCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blake3" | "blake3-256" => Ok(DigestCode::Blake3),
            "sha256" | "sha2-256" => Ok(DigestCode::Sha256),
            other => Self::from_code(other),
        }
    }
}

/// A self-addressing identifier: derivation code plus base64url digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Said(String);

impl Said {
    /// Parses and validates an encoded SAID.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let re = Regex::new(r"^[A-Za-z0-9_-]{44}$").expect("invalid regex");
        if !re.is_match(&s) {
            return Err(ValidationError::PatternMismatch {
                field: "said",
                value: s,
            });
        }
        DigestCode::from_code(&s[..1])?;
        Ok(Self(s))
    }

    /// Derivation code this SAID was computed with.
    pub fn code(&self) -> DigestCode {
        // Validated on construction.
        DigestCode::from_code(&self.0[..1]).unwrap_or_default()
    }

    /// Decodes the raw digest bytes.
    pub fn digest_bytes(&self) -> Result<[u8; DIGEST_SIZE], ValidationError> {
        let padded = URL_SAFE_NO_PAD
            .decode(format!("A{}", &self.0[1..]))
            .map_err(|e| ValidationError::PatternMismatch {
                field: "said",
                value: format!("{} ({})", self.0, e),
            })?;
        match padded.split_first() {
            Some((0, raw)) if raw.len() == DIGEST_SIZE => {
                let mut out = [0u8; DIGEST_SIZE];
                out.copy_from_slice(raw);
                Ok(out)
            }
            _ => Err(ValidationError::PatternMismatch {
                field: "said",
                value: self.0.clone(),
            }),
        }
    }

    /// Borrows the encoded form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Said {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Said {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Said {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Said> for String {
    fn from(said: Said) -> Self {
        said.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_matches_encoded_length() {
        for code in DigestCode::ALL {
            let said = code.said_of(b"anything");
            assert_eq!(code.placeholder().len(), said.as_str().len());
            assert_eq!(said.as_str().len(), SAID_LEN);
            assert!(said.as_str().starts_with(code.code()));
        }
    }

    #[test]
    fn sha256_digest_matches_known_vector() {
        let raw = DigestCode::Sha256.digest(b"");
        assert_eq!(
            hex::encode(raw),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            DigestCode::Sha256.encode(&raw).as_str(),
            "IOOwxEKY_BwUmvv0yJlvuSQnrkHkZJuTTKSVmRt4UrhV"
        );
    }

    #[test]
    fn encoded_said_decodes_to_raw_digest() {
        let raw = DigestCode::Blake3.digest(b"schema");
        let said = DigestCode::Blake3.encode(&raw);
        let parsed = Said::parse(said.as_str()).unwrap();
        assert_eq!(parsed.code(), DigestCode::Blake3);
        assert_eq!(parsed.digest_bytes().unwrap(), raw);
    }

    #[test]
    fn parse_rejects_bad_shapes() {
        assert!(Said::parse("").is_err());
        assert!(Said::parse("#".repeat(SAID_LEN)).is_err());
        // Unknown derivation code.
        assert!(Said::parse(format!("Z{}", "A".repeat(SAID_LEN - 1))).is_err());
    }

    #[test]
    fn codes_parse_from_names_and_characters() {
        assert_eq!("E".parse::<DigestCode>().unwrap(), DigestCode::Blake3);
        assert_eq!("blake3".parse::<DigestCode>().unwrap(), DigestCode::Blake3);
        assert_eq!("I".parse::<DigestCode>().unwrap(), DigestCode::Sha256);
        assert!("X".parse::<DigestCode>().is_err());
    }
}
