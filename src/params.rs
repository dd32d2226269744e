//! Per-call parameters: mode, digest algorithm, digit count, period, drift offset.
//!
//! Nothing here is persisted; a `Parameters` value is built (or deserialized
//! from the host application's configuration) and passed into each call.

use core::convert::TryFrom;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// How the counter is derived
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// RFC 6238: `floor((now + offset) / period)`
    TimeStep,
    /// Counter is the creation time embedded in the secret; valid for one period
    ExpiringSecret,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Sha1 => "SHA1",
            Algorithm::Sha256 => "SHA256",
            Algorithm::Sha512 => "SHA512",
        }
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Sha1
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts `SHA1`, `sha-1`, `Sha256`, `SHA-512` etc.
impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "").as_str() {
            "SHA1" => Ok(Algorithm::Sha1),
            "SHA256" => Ok(Algorithm::Sha256),
            "SHA512" => Ok(Algorithm::Sha512),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Number of decimal digits in a code
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Digits {
    Six,
    Seven,
    Eight,
}

impl Digits {
    pub fn count(self) -> u32 {
        match self {
            Digits::Six => 6,
            Digits::Seven => 7,
            Digits::Eight => 8,
        }
    }

    /// `10^digits`
    pub fn modulus(self) -> u32 {
        10u32.pow(self.count())
    }
}

impl Default for Digits {
    fn default() -> Self {
        Digits::Six
    }
}

impl TryFrom<u32> for Digits {
    type Error = Error;

    fn try_from(digits: u32) -> Result<Self, Self::Error> {
        match digits {
            6 => Ok(Digits::Six),
            7 => Ok(Digits::Seven),
            8 => Ok(Digits::Eight),
            other => Err(Error::InvalidDigits(other)),
        }
    }
}

impl From<Digits> for u32 {
    fn from(digits: Digits) -> u32 {
        digits.count()
    }
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

pub const DEFAULT_PERIOD: u64 = 30;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Parameters {
    pub digits: Digits,
    /// Window length (time-step) or lifetime (expiring secret), in seconds
    pub period: u64,
    /// Drift offset in seconds, added to the current time. Time-step mode only.
    pub offset: i64,
    pub algorithm: Algorithm,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            digits: Digits::default(),
            period: DEFAULT_PERIOD,
            offset: 0,
            algorithm: Algorithm::default(),
        }
    }
}

impl Parameters {
    pub fn with_digits(self, digits: Digits) -> Self {
        Self { digits, ..self }
    }

    pub fn with_period(self, period: u64) -> Self {
        Self { period, ..self }
    }

    pub fn with_offset(self, offset: i64) -> Self {
        Self { offset, ..self }
    }

    pub fn with_algorithm(self, algorithm: Algorithm) -> Self {
        Self { algorithm, ..self }
    }
}
