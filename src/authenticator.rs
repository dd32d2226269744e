//! The command layer driven by the CLI.
//!
//! Command inputs (`GenerateSecret`, `Generate`, `Verify`, `SetupUri`) are
//! plain Rust structs, which keeps argument parsing out of the logic: the
//! `Authenticator` only sees typed requests and a [`Clock`].

use log::{debug, info};
use rand_core::OsRng;

use crate::clock::{format_timestamp, Clock, Expiry};
use crate::{counter, hotp, secret, uri, verify};
use crate::{Credential, Mode, Otp, Parameters, Result, Verification};

/// Runs commands against one clock (the system clock, or a pinned timestamp)
pub struct Authenticator<C>
where
    C: Clock,
{
    clock: C,
}

#[derive(Clone, Debug, PartialEq)]
/// Creates a new random secret
pub struct GenerateSecret {
    /// Number of base32 characters, excluding any timestamp suffix
    pub length: usize,
    pub mode: Mode,
}

#[derive(Clone, PartialEq)]
/// Computes the current code for a secret
pub struct Generate {
    pub secret: String,
    pub mode: Mode,
    pub parameters: Parameters,
    /// Timestamp (seconds since UNIX epoch) to use instead of the wall clock
    pub timestamp: Option<u64>,
}

#[derive(Clone, PartialEq)]
/// Checks a code presented by the user
pub struct Verify {
    pub code: String,
    pub secret: String,
    pub mode: Mode,
    pub parameters: Parameters,
    pub timestamp: Option<u64>,
}

#[derive(Clone, PartialEq)]
/// Builds the `otpauth://` URI for enrolling a secret in an authenticator app
pub struct SetupUri {
    /// Account name, e.g. `alice@example.com`
    pub account: String,
    pub issuer: Option<String>,
    pub secret: String,
    pub parameters: Parameters,
}

#[derive(Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Command {
    GenerateSecret(GenerateSecret),
    Generate(Generate),
    Verify(Verify),
    SetupUri(SetupUri),
}

impl Command {
    /// The pinned timestamp, if the command takes one
    pub fn timestamp(&self) -> Option<u64> {
        match self {
            Command::Generate(generate) => generate.timestamp,
            Command::Verify(verify) => verify.timestamp,
            Command::GenerateSecret(_) | Command::SetupUri(_) => None,
        }
    }
}

/// A single reading of `clock`, so the code and its deadline share one instant
struct Pinned<'a, C: ?Sized> {
    clock: &'a C,
    now: u64,
}

impl<C: Clock + ?Sized> Clock for Pinned<'_, C> {
    fn now(&self) -> u64 {
        self.now
    }

    fn elapsed_and_expired(&self, reference: u64, deadline: u64) -> Expiry {
        self.clock.elapsed_and_expired(reference, deadline)
    }
}

/// A generated code, with how long it stays valid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratedCode {
    pub otp: Otp,
    /// Unix time at which the code stops being accepted
    pub valid_until: u64,
}

impl<C: Clock> Authenticator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn generate_secret(&self, parameters: &GenerateSecret) -> Result<String> {
        debug!("generate secret {:?}", parameters);
        secret::generate_with(parameters.length, parameters.mode, &mut OsRng, &self.clock)
    }

    /// Computes the code for `secret` at the clock's current time.
    pub fn generate(&self, parameters: &Generate) -> Result<GeneratedCode> {
        let Generate { secret, mode, parameters, .. } = parameters;
        debug!("generate {:?} {:?}", mode, parameters);

        let credential = Credential::parse(secret, *mode)?;
        let now = self.clock.now();
        let pinned = Pinned { clock: &self.clock, now };
        let otp = hotp::code_for(&credential, parameters, &pinned)?;

        let valid_until = match credential.expires_at(parameters.period) {
            Some(expires_at) => expires_at,
            None => now.saturating_add(counter::seconds_remaining(now, parameters.offset, parameters.period)?),
        };
        info!("code valid until {}", format_timestamp(valid_until));

        Ok(GeneratedCode { otp, valid_until })
    }

    pub fn verify(&self, parameters: &Verify) -> Result<Verification> {
        let Verify { code, secret, mode, parameters, .. } = parameters;
        debug!("verify {:?} {:?}", mode, parameters);

        let verification = verify::verify_with(code, secret, *mode, parameters, &self.clock)?;
        info!("code is {:?}", verification);
        Ok(verification)
    }

    pub fn setup_uri(&self, parameters: &SetupUri) -> Result<String> {
        let SetupUri { account, issuer, secret, parameters } = parameters;
        debug!("setup uri for {:?} ({:?})", account, issuer);
        uri::build(account, issuer.as_deref(), secret, parameters)
    }
}
