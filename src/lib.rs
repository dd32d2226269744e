//! # One-time passwords for second-factor authentication.
//!
//! Two modes are supported:
//! - **time-step** ([RFC 6238][rfc6238]): the counter is `floor((now + offset) / period)`,
//!   interoperable with standard authenticator apps
//! - **expiring secret**: the secret string carries its own creation time as a hex
//!   suffix; the code is fixed for that instant and rejected once `period` seconds
//!   have passed
//!
//! Both reduce to the HOTP primitive ([RFC 4226][rfc4226]): HMAC-SHA1/256/512 over an
//! 8-byte big-endian counter, followed by dynamic truncation to 6, 7 or 8 decimal digits.
//!
//! The pipeline, leaf first:
//! - [`base32`]: secret codec (RFC 4648 alphabet, no padding)
//! - [`secret`]: random secret generation from the OS CSPRNG
//! - [`credential`]: parsing a secret string into key bytes (and creation time)
//! - [`counter`]: counter derivation and expiry checks, against a [`clock::Clock`]
//! - [`hotp`]: HMAC and truncation
//! - [`verify`]: constant-time comparison against a presented code
//!
//! [`uri`] builds the `otpauth://` enrollment URI; [`authenticator`] and [`cli`]
//! make up the command-line front end.
//!
//! ```
//! use otpkit::{clock::FixedClock, hotp, verify, Digits, Mode, Parameters, Verification};
//!
//! // b"12345678901234567890", the RFC 4226 test key
//! let secret = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";
//! let params = Parameters::default().with_digits(Digits::Eight);
//! let clock = FixedClock(59);
//!
//! let otp = hotp::code_at(secret, Mode::TimeStep, &params, &clock)?;
//! assert_eq!(otp.to_string(), "94287082");
//!
//! let verification = verify::verify_with("94287082", secret, Mode::TimeStep, &params, &clock)?;
//! assert_eq!(verification, Verification::Valid);
//! # Ok::<(), otpkit::Error>(())
//! ```
//!
//! All operations are synchronous and keep no state between calls.
//!
//! [rfc4226]: https://tools.ietf.org/html/rfc4226
//! [rfc6238]: https://tools.ietf.org/html/rfc6238

pub mod authenticator;
pub mod base32;
pub mod cli;
pub mod clock;
pub mod counter;
pub mod credential;
mod error;
pub mod hotp;
pub mod params;
pub mod secret;
pub mod uri;
pub mod verify;

pub use credential::Credential;
pub use error::{Error, Result};
pub use hotp::Otp;
pub use params::{Algorithm, Digits, Mode, Parameters, DEFAULT_PERIOD};
pub use verify::Verification;
