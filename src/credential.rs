//! Structured view of a caller's secret string.
//!
//! On the wire a secret is upper-case base32; an expiring secret additionally
//! carries its creation time as 8 trailing hex characters. Everything past
//! parsing works on [`Credential`], never on string slices.

use core::fmt;

use crate::{base32, Error, Mode, Result};

/// Minimum secret length, in base32 characters
pub const MIN_SECRET_LEN: usize = 16;

/// Width of the hex creation-time suffix of an expiring secret
pub const TIMESTAMP_LEN: usize = 8;

#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    TimeStep { key: Vec<u8> },
    Expiring { key: Vec<u8>, created_at: u64 },
}

/// Checks length and charset, then decodes.
pub fn decode_secret(secret: &str) -> Result<Vec<u8>> {
    let len = secret.chars().count();
    if len < MIN_SECRET_LEN || len % 8 != 0 {
        return Err(Error::InvalidLength(len));
    }
    base32::decode(secret)
}

fn decode_timestamp(suffix: &str) -> Result<u64> {
    if suffix.len() != TIMESTAMP_LEN || !suffix.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidTimestamp(suffix.to_string()));
    }
    u64::from_str_radix(suffix, 16).map_err(|_| Error::InvalidTimestamp(suffix.to_string()))
}

pub(crate) fn encode_timestamp(created_at: u64) -> Result<String> {
    if created_at > u64::from(u32::MAX) {
        return Err(Error::TimestampOutOfRange(created_at));
    }
    Ok(format!("{:08x}", created_at))
}

impl Credential {
    pub fn parse(secret: &str, mode: Mode) -> Result<Self> {
        match mode {
            Mode::TimeStep => Ok(Credential::TimeStep {
                key: decode_secret(secret)?,
            }),
            Mode::ExpiringSecret => {
                let split = secret
                    .char_indices()
                    .rev()
                    .nth(TIMESTAMP_LEN - 1)
                    .map(|(index, _)| index)
                    .ok_or_else(|| Error::InvalidLength(secret.chars().count()))?;
                let (prefix, suffix) = secret.split_at(split);
                let key = decode_secret(prefix)?;
                let created_at = decode_timestamp(suffix)?;
                Ok(Credential::Expiring { key, created_at })
            }
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Credential::TimeStep { .. } => Mode::TimeStep,
            Credential::Expiring { .. } => Mode::ExpiringSecret,
        }
    }

    /// The HMAC key
    pub fn key(&self) -> &[u8] {
        match self {
            Credential::TimeStep { key } | Credential::Expiring { key, .. } => key,
        }
    }

    /// `created_at + period` for expiring credentials
    pub fn expires_at(&self, period: u64) -> Option<u64> {
        match self {
            Credential::TimeStep { .. } => None,
            Credential::Expiring { created_at, .. } => Some(created_at.saturating_add(period)),
        }
    }

    /// The external string form, as handed to callers and authenticator apps.
    ///
    /// Fails for expiring credentials created after `u32::MAX`.
    pub fn secret_string(&self) -> Result<String> {
        match self {
            Credential::TimeStep { key } => Ok(base32::encode(key)),
            Credential::Expiring { key, created_at } => {
                Ok(base32::encode(key) + &encode_timestamp(*created_at)?)
            }
        }
    }
}

/// Key bytes are never printed
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::TimeStep { key } => f
                .debug_struct("TimeStep")
                .field("key_len", &key.len())
                .finish(),
            Credential::Expiring { key, created_at } => f
                .debug_struct("Expiring")
                .field("key_len", &key.len())
                .field("created_at", created_at)
                .finish(),
        }
    }
}
