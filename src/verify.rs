//! Checking a code supplied by the prover.
//!
//! There is no look-around window: to accept codes from adjacent time steps,
//! call again with `offset` shifted by `±period`.

use log::debug;
use subtle::ConstantTimeEq as _;

use crate::clock::{Clock, SystemClock};
use crate::{hotp, Mode, Parameters, Result};

/// Outcome of a verification that got as far as comparing codes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verification {
    Valid,
    Invalid,
}

impl Verification {
    pub fn is_valid(self) -> bool {
        self == Verification::Valid
    }
}

pub fn verify(candidate: &str, secret: &str, mode: Mode, params: &Parameters) -> Result<Verification> {
    verify_with(candidate, secret, mode, params, &SystemClock)
}

/// Regenerates the expected code and compares it with `candidate` in constant time.
///
/// Any error from code generation (malformed secret, expired secret, zero
/// period) is returned unchanged; a wrong code is `Ok(Verification::Invalid)`.
pub fn verify_with(
    candidate: &str,
    secret: &str,
    mode: Mode,
    params: &Parameters,
    clock: &dyn Clock,
) -> Result<Verification> {
    let expected = hotp::code_at(secret, mode, params, clock)?.to_string();

    let verification = if bool::from(expected.as_bytes().ct_eq(candidate.as_bytes())) {
        Verification::Valid
    } else {
        Verification::Invalid
    };
    debug!("verification {:?}", verification);
    Ok(verification)
}
