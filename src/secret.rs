//! Random secret generation.
//!
//! Symbols are drawn from the operating system's CSPRNG. Each random byte is
//! reduced to 5 bits, which keeps the choice uniform over the 32 symbols.

use log::info;
use rand_core::{CryptoRng, OsRng, RngCore};

use crate::base32::ALPHABET;
use crate::clock::{format_timestamp, Clock, SystemClock};
use crate::credential::{encode_timestamp, MIN_SECRET_LEN};
use crate::{Error, Mode, Result};

/// Length used when the caller has no preference (160 bits of key)
pub const DEFAULT_SECRET_LEN: usize = 32;

/// Generates a secret of `length` base32 characters.
///
/// In [`Mode::ExpiringSecret`], the current time is appended as 8 hex digits,
/// so the returned string is `length + 8` characters long. Times past
/// `u32::MAX` fail with [`Error::TimestampOutOfRange`].
pub fn generate(length: usize, mode: Mode) -> Result<String> {
    generate_with(length, mode, &mut OsRng, &SystemClock)
}

pub fn generate_with<R>(length: usize, mode: Mode, rng: &mut R, clock: &dyn Clock) -> Result<String>
where
    R: RngCore + CryptoRng,
{
    if length < MIN_SECRET_LEN || length % 8 != 0 {
        return Err(Error::InvalidLength(length));
    }

    let mut random = vec![0u8; length];
    rng.fill_bytes(&mut random);
    let mut secret: String = random
        .iter()
        .map(|byte| ALPHABET[(byte & 0x1f) as usize] as char)
        .collect();

    if mode == Mode::ExpiringSecret {
        let created_at = clock.now();
        secret.push_str(&encode_timestamp(created_at)?);
        info!("generated expiring secret, created at {}", format_timestamp(created_at));
    } else {
        info!("generated {}-character secret", length);
    }

    Ok(secret)
}
