//! Errors returned by the library.
//!
//! Every variant is detected before any cryptographic work is done.
//! A code that simply does not match is *not* an error, see
//! [`Verification`](crate::verify::Verification).

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Secret length is not at least 16 characters, or not a multiple of 8
    #[error("invalid secret length {0}: must be at least 16 and a multiple of 8")]
    InvalidLength(usize),

    /// Secret contains a character outside `A-Z2-7`
    #[error("invalid base32 character {0:?} in secret")]
    InvalidCharset(char),

    /// Digit count outside {6, 7, 8}
    #[error("invalid number of digits {0}: must be 6, 7 or 8")]
    InvalidDigits(u32),

    /// Digest algorithm other than SHA1, SHA256 or SHA512
    #[error("unsupported algorithm {0:?}: must be SHA1, SHA256 or SHA512")]
    UnsupportedAlgorithm(String),

    /// Expiring secret used at or after `created_at + period`
    #[error("secret created at {created_at} expired at {expired_at}")]
    Expired { created_at: u64, expired_at: u64 },

    /// Period of zero seconds
    #[error("invalid period {0}: must be a positive number of seconds")]
    InvalidPeriod(u64),

    /// Embedded creation timestamp missing or not hexadecimal
    #[error("invalid embedded timestamp {0:?}")]
    InvalidTimestamp(String),

    /// Creation time past `u32::MAX`, which 8 hex digits cannot hold
    #[error("creation time {0} does not fit in 8 hex digits")]
    TimestampOutOfRange(u64),

    /// Missing account/secret, or a colon in account or issuer
    #[error("invalid otpauth URI input: {0}")]
    InvalidUriInput(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;
