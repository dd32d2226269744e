//! Counter derivation for both modes, packed per RFC 4226 §5.2.

use log::{debug, info};

use crate::clock::{format_timestamp, Clock};
use crate::{Credential, Error, Parameters, Result};

/// `floor((now + offset) / period)`, with the shifted time clamped to `0..=u64::MAX`.
pub fn time_step(now: u64, offset: i64, period: u64) -> Result<u64> {
    let period = checked_period(period)?;
    Ok(shifted(now, offset) / period)
}

/// Seconds until the time-step window containing `now + offset` closes.
pub fn seconds_remaining(now: u64, offset: i64, period: u64) -> Result<u64> {
    let period = checked_period(period)?;
    Ok(period - shifted(now, offset) % period)
}

fn checked_period(period: u64) -> Result<u64> {
    if period == 0 {
        return Err(Error::InvalidPeriod(period));
    }
    Ok(period)
}

fn shifted(now: u64, offset: i64) -> u64 {
    (now as i128 + offset as i128).clamp(0, u64::MAX as i128) as u64
}

/// 8-byte big-endian counter
pub fn pack(counter: u64) -> [u8; 8] {
    counter.to_be_bytes()
}

/// Derives the counter for `credential` at the clock's current time.
///
/// Time-step credentials use the rolling window; `offset` only applies here.
/// Expiring credentials authenticate their creation instant, and are rejected
/// once `now >= created_at + period`.
pub fn resolve(credential: &Credential, params: &Parameters, clock: &dyn Clock) -> Result<[u8; 8]> {
    let now = clock.now();
    let counter = match credential {
        Credential::TimeStep { .. } => time_step(now, params.offset, params.period)?,
        Credential::Expiring { created_at, .. } => {
            let period = checked_period(params.period)?;
            let deadline = created_at.saturating_add(period);
            let expiry = clock.elapsed_and_expired(now, deadline);
            if expiry.expired {
                info!(
                    "secret created at {} expired {}s ago",
                    format_timestamp(*created_at),
                    expiry.elapsed
                );
                return Err(Error::Expired {
                    created_at: *created_at,
                    expired_at: deadline,
                });
            }
            *created_at
        }
    };
    debug!("{:?} counter {} at {}", credential.mode(), counter, now);
    Ok(pack(counter))
}
