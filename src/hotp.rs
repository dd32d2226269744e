//! HMAC-based one-time passwords (RFC 4226), and the full secret-to-code pipeline.

use core::fmt;

use hmac::{Hmac, Mac};
use log::debug;
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::clock::{Clock, SystemClock};
use crate::{counter, Algorithm, Credential, Digits, Mode, Parameters, Result};

/// A one-time password
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Otp {
    value: u32,
    digits: Digits,
}

impl Otp {
    /// Value in `0..10^digits`
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn digits(&self) -> Digits {
        self.digits
    }
}

/// OTP codes are presented as left-zero-padded strings of exactly `digits` characters
impl fmt::Display for Otp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.value, width = self.digits.count() as usize)
    }
}

fn hmac_digest(algorithm: Algorithm, key: &[u8], message: &[u8]) -> Vec<u8> {
    match algorithm {
        Algorithm::Sha1 => {
            let mut mac = Hmac::<Sha1>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        Algorithm::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        Algorithm::Sha512 => {
            let mut mac = Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
    }
}

/// Dynamic truncation, RFC 4226 §5.3: the low nibble of the last byte selects
/// a 4-byte window, read big-endian with the top bit cleared.
fn truncate(digest: &[u8]) -> u32 {
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let window = [digest[offset], digest[offset + 1], digest[offset + 2], digest[offset + 3]];
    u32::from_be_bytes(window) & 0x7fff_ffff
}

/// Computes the code for raw key bytes and a packed counter.
///
/// Pure: no clock, no randomness, no logging of inputs.
pub fn compute_code(key: &[u8], counter: &[u8; 8], digits: Digits, algorithm: Algorithm) -> Otp {
    let digest = hmac_digest(algorithm, key, counter);
    Otp {
        value: truncate(&digest) % digits.modulus(),
        digits,
    }
}

/// Code for `secret` at the current time.
pub fn code(secret: &str, mode: Mode, params: &Parameters) -> Result<Otp> {
    code_at(secret, mode, params, &SystemClock)
}

/// Code for `secret` at the time given by `clock`.
///
/// All validation (secret length and charset, embedded timestamp, period,
/// expiry) happens before the HMAC is computed.
pub fn code_at(secret: &str, mode: Mode, params: &Parameters, clock: &dyn Clock) -> Result<Otp> {
    let credential = Credential::parse(secret, mode)?;
    code_for(&credential, params, clock)
}

pub fn code_for(credential: &Credential, params: &Parameters, clock: &dyn Clock) -> Result<Otp> {
    let counter = counter::resolve(credential, params, clock)?;
    debug!("computing {}-digit {} code", params.digits, params.algorithm);
    Ok(compute_code(credential.key(), &counter, params.digits, params.algorithm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::counter::pack;
    use crate::{base32, Error};

    const RFC4226_KEY: &[u8] = b"12345678901234567890";
    const RFC6238_KEY_SHA256: &[u8] = b"12345678901234567890123456789012";
    const RFC6238_KEY_SHA512: &[u8] =
        b"1234567890123456789012345678901234567890123456789012345678901234";

    #[test]
    fn rfc4226_truncated_values() {
        // Appendix D, "Truncated" column (decimal)
        let expected = [
            1284755224, 1094287082, 137359152, 1726969429, 1640338314,
            868254676, 1918287922, 82162583, 673399871, 645520489,
        ];
        for (counter, &value) in expected.iter().enumerate() {
            let digest = hmac_digest(Algorithm::Sha1, RFC4226_KEY, &pack(counter as u64));
            assert_eq!(truncate(&digest), value, "counter {}", counter);
        }
    }

    #[test]
    fn rfc4226_hotp_vectors() {
        let expected = [
            "755224", "287082", "359152", "969429", "338314",
            "254676", "287922", "162583", "399871", "520489",
        ];
        for (counter, code) in expected.iter().enumerate() {
            let otp = compute_code(RFC4226_KEY, &pack(counter as u64), Digits::Six, Algorithm::Sha1);
            assert_eq!(otp.to_string(), *code, "counter {}", counter);
        }
    }

    #[test]
    fn rfc6238_vectors() {
        let cases: &[(u64, &str, &str, &str)] = &[
            (59, "94287082", "46119246", "90693936"),
            (1111111109, "07081804", "68084774", "25091201"),
            (1111111111, "14050471", "67062674", "99943326"),
            (1234567890, "89005924", "91819424", "93441116"),
            (2000000000, "69279037", "90698825", "38618901"),
            (20000000000, "65353130", "77737706", "47863826"),
        ];
        for &(time, sha1, sha256, sha512) in cases {
            let counter = pack(counter::time_step(time, 0, 30).unwrap());
            for &(key, algorithm, expected) in &[
                (RFC4226_KEY, Algorithm::Sha1, sha1),
                (RFC6238_KEY_SHA256, Algorithm::Sha256, sha256),
                (RFC6238_KEY_SHA512, Algorithm::Sha512, sha512),
            ] {
                let otp = compute_code(key, &counter, Digits::Eight, algorithm);
                assert_eq!(otp.to_string(), expected, "{} at {}", algorithm, time);
            }
        }
    }

    #[test]
    fn rfc6238_from_base32_secret() {
        // the SHA1 seed is 20 bytes, i.e. 32 base32 characters
        let secret = base32::encode(RFC4226_KEY);
        let params = Parameters::default().with_digits(Digits::Eight);
        let otp = code_at(&secret, Mode::TimeStep, &params, &FixedClock(1111111109)).unwrap();
        assert_eq!(otp.to_string(), "07081804");

        let lower = secret.to_lowercase();
        let otp = code_at(&lower, Mode::TimeStep, &params, &FixedClock(59)).unwrap();
        assert_eq!(otp.to_string(), "94287082");
    }

    #[test]
    fn zero_padding() {
        let counter = pack(counter::time_step(1111111109, 0, 30).unwrap());
        let otp = compute_code(RFC4226_KEY, &counter, Digits::Eight, Algorithm::Sha1);
        assert_eq!(otp.value(), 7081804);
        assert_eq!(otp.to_string(), "07081804");

        // counter 7 truncates to 82162583

        let otp = compute_code(RFC4226_KEY, &pack(7), Digits::Seven, Algorithm::Sha1);
        assert_eq!(otp.value(), 2162583);
        assert_eq!(otp.to_string(), "2162583");

        let otp = Otp { value: 42, digits: Digits::Six };
        assert_eq!(otp.to_string(), "000042");
    }

    #[test]
    fn same_window_same_code() {
        let secret = base32::encode(RFC4226_KEY);
        let params = Parameters::default();
        let start = code_at(&secret, Mode::TimeStep, &params, &FixedClock(1_200)).unwrap();
        let end = code_at(&secret, Mode::TimeStep, &params, &FixedClock(1_229)).unwrap();
        let next = code_at(&secret, Mode::TimeStep, &params, &FixedClock(1_230)).unwrap();
        assert_eq!(start, end);
        assert_ne!(start, next);
    }

    #[test]
    fn expiring_code_is_fixed_until_expiry() {
        let secret = format!("{}{:08x}", base32::encode(RFC4226_KEY), 1_000u32);
        let params = Parameters::default();
        let first = code_at(&secret, Mode::ExpiringSecret, &params, &FixedClock(1_000)).unwrap();
        let last = code_at(&secret, Mode::ExpiringSecret, &params, &FixedClock(1_029)).unwrap();
        assert_eq!(first, last);
        assert_eq!(first, compute_code(RFC4226_KEY, &pack(1_000), Digits::Six, Algorithm::Sha1));
        assert_eq!(
            code_at(&secret, Mode::ExpiringSecret, &params, &FixedClock(1_031)),
            Err(Error::Expired { created_at: 1_000, expired_at: 1_030 })
        );
    }

    #[test]
    fn expiring_code_far_in_the_future() {
        let params = Parameters::default();
        assert_eq!(
            code_at("GEZDGNBVGY3TQOJQ000003e8", Mode::ExpiringSecret, &params, &FixedClock(1 << 63)),
            Err(Error::Expired { created_at: 1_000, expired_at: 1_030 })
        );
        assert_eq!(
            code_at("GEZDGNBVGY3TQOJQ000003e8", Mode::ExpiringSecret, &params, &FixedClock(u64::MAX)),
            Err(Error::Expired { created_at: 1_000, expired_at: 1_030 })
        );
    }

    #[test]
    fn rejects_malformed_secrets() {
        let params = Parameters::default();
        assert_eq!(
            code(&"A".repeat(15), Mode::TimeStep, &params),
            Err(Error::InvalidLength(15))
        );
        assert_eq!(
            code("GEZDGNBVGY3TQOJ1", Mode::TimeStep, &params),
            Err(Error::InvalidCharset('1'))
        );
        assert_eq!(
            code("GEZDGNBVGY3TQOJ8", Mode::TimeStep, &params),
            Err(Error::InvalidCharset('8'))
        );
    }
}
