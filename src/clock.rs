//! Wall-clock and expiry arithmetic.
//!
//! Only the expiring-secret mode needs `elapsed_and_expired`; time-step mode
//! just reads `now`. Tests pin time with [`FixedClock`].

use chrono::{TimeZone as _, Utc};

/// Outcome of comparing a reference time against a deadline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Expiry {
    /// Seconds from `deadline` to `reference`; negative while still valid
    pub elapsed: i64,
    pub expired: bool,
}

/// Source of the current time (seconds since the UNIX epoch)
pub trait Clock {
    fn now(&self) -> u64;

    fn elapsed_and_expired(&self, reference: u64, deadline: u64) -> Expiry {
        let elapsed = (i128::from(reference) - i128::from(deadline))
            .clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;
        Expiry { elapsed, expired: reference >= deadline }
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> u64 {
        (**self).now()
    }

    fn elapsed_and_expired(&self, reference: u64, deadline: u64) -> Expiry {
        (**self).elapsed_and_expired(reference, deadline)
    }
}

/// The system wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // clamp pre-epoch clocks to zero
        Utc::now().timestamp().max(0) as u64
    }
}

/// A clock stuck at one instant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

/// RFC 3339 rendering of a unix timestamp, for logs and CLI output.
pub fn format_timestamp(unix_seconds: u64) -> String {
    match Utc.timestamp_opt(unix_seconds as i64, 0).single() {
        Some(datetime) => datetime.to_rfc3339(),
        None => unix_seconds.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_boundary() {
        let clock = FixedClock(0);
        assert_eq!(clock.elapsed_and_expired(129, 130), Expiry { elapsed: -1, expired: false });
        assert_eq!(clock.elapsed_and_expired(130, 130), Expiry { elapsed: 0, expired: true });
        assert_eq!(clock.elapsed_and_expired(131, 130), Expiry { elapsed: 1, expired: true });
    }

    #[test]
    fn elapsed_saturates_far_from_deadline() {
        let clock = FixedClock(0);
        assert_eq!(
            clock.elapsed_and_expired(u64::MAX, 0),
            Expiry { elapsed: i64::MAX, expired: true }
        );
        assert_eq!(
            clock.elapsed_and_expired(0, u64::MAX),
            Expiry { elapsed: i64::MIN, expired: false }
        );
        assert_eq!(
            clock.elapsed_and_expired(1 << 63, 1_030),
            Expiry { elapsed: i64::MAX, expired: true }
        );
    }

    #[test]
    fn system_clock_is_recent() {
        // 2020-01-01
        assert!(SystemClock.now() > 1_577_836_800);
    }

    #[test]
    fn formats_rfc3339() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00+00:00");
        assert_eq!(format_timestamp(1_111_111_109), "2005-03-18T01:58:29+00:00");
    }
}
