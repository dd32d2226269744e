//! `otpauth://` setup URIs, as scanned by authenticator apps.
//!
//! cf. <https://github.com/google/google-authenticator/wiki/Key-Uri-Format>
//! e.g. `otpauth://totp/Example:alice@google.com?secret=JBSWY3DPEHPK3PXP&issuer=Example`

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::{Algorithm, Digits, Error, Parameters, Result, DEFAULT_PERIOD};

/// Unreserved characters, plus `@` which is common in account names
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'@');

#[derive(Clone, Debug)]
pub struct UriBuilder<'a> {
    account: &'a str,
    secret: &'a str,
    issuer: Option<&'a str>,
    params: Parameters,
}

impl<'a> UriBuilder<'a> {
    pub fn new(account: &'a str, secret: &'a str) -> Self {
        Self {
            account,
            secret,
            issuer: None,
            params: Parameters::default(),
        }
    }

    pub fn issuer(mut self, issuer: &'a str) -> Self {
        self.issuer = Some(issuer);
        self
    }

    pub fn parameters(mut self, params: Parameters) -> Self {
        self.params = params;
        self
    }

    /// `algorithm`, `digits` and `period` are only emitted when they differ
    /// from what authenticator apps assume.
    pub fn build(&self) -> Result<String> {
        if self.account.is_empty() {
            return Err(Error::InvalidUriInput("account is required"));
        }
        if self.secret.is_empty() {
            return Err(Error::InvalidUriInput("secret is required"));
        }
        if self.account.contains(':') {
            return Err(Error::InvalidUriInput("account must not contain ':'"));
        }
        let issuer = self.issuer.filter(|issuer| !issuer.is_empty());
        if issuer.map_or(false, |issuer| issuer.contains(':')) {
            return Err(Error::InvalidUriInput("issuer must not contain ':'"));
        }

        let account = utf8_percent_encode(self.account, COMPONENT);
        let mut uri = match issuer {
            Some(issuer) => format!(
                "otpauth://totp/{}:{}",
                utf8_percent_encode(issuer, COMPONENT),
                account
            ),
            None => format!("otpauth://totp/{}", account),
        };

        uri.push_str("?secret=");
        uri.push_str(self.secret);
        let Parameters { algorithm, digits, period, .. } = self.params;
        if algorithm != Algorithm::default() {
            uri.push_str(&format!("&algorithm={}", algorithm));
        }
        if digits != Digits::default() {
            uri.push_str(&format!("&digits={}", digits));
        }
        if period != DEFAULT_PERIOD {
            uri.push_str(&format!("&period={}", period));
        }
        if let Some(issuer) = issuer {
            uri.push_str(&format!("&issuer={}", utf8_percent_encode(issuer, COMPONENT)));
        }

        Ok(uri)
    }
}

/// Shorthand for [`UriBuilder`] with an optional issuer.
pub fn build(account: &str, issuer: Option<&str>, secret: &str, params: &Parameters) -> Result<String> {
    let builder = UriBuilder::new(account, secret).parameters(*params);
    match issuer {
        Some(issuer) => builder.issuer(issuer).build(),
        None => builder.build(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "JBSWY3DPEHPK3PXP";

    #[test]
    fn google_example() {
        let uri = UriBuilder::new("alice@google.com", SECRET)
            .issuer("Example")
            .build()
            .unwrap();
        assert_eq!(
            uri,
            "otpauth://totp/Example:alice@google.com?secret=JBSWY3DPEHPK3PXP&issuer=Example"
        );
    }

    #[test]
    fn without_issuer() {
        let uri = build("alice", None, SECRET, &Parameters::default()).unwrap();
        assert_eq!(uri, "otpauth://totp/alice?secret=JBSWY3DPEHPK3PXP");

        // empty issuer is no issuer
        let uri = build("alice", Some(""), SECRET, &Parameters::default()).unwrap();
        assert_eq!(uri, "otpauth://totp/alice?secret=JBSWY3DPEHPK3PXP");
    }

    #[test]
    fn non_default_parameters() {
        let params = Parameters::default()
            .with_algorithm(Algorithm::Sha512)
            .with_digits(Digits::Eight)
            .with_period(60)
            .with_offset(30);
        let uri = build("bob", Some("ACME Co"), SECRET, &params).unwrap();
        assert_eq!(
            uri,
            "otpauth://totp/ACME%20Co:bob?secret=JBSWY3DPEHPK3PXP\
             &algorithm=SHA512&digits=8&period=60&issuer=ACME%20Co"
        );
    }

    #[test]
    fn escapes_label() {
        let uri = build("john doe/ops", Some("A&B"), SECRET, &Parameters::default()).unwrap();
        assert_eq!(
            uri,
            "otpauth://totp/A%26B:john%20doe%2Fops?secret=JBSWY3DPEHPK3PXP&issuer=A%26B"
        );
    }

    #[test]
    fn rejects_bad_input() {
        let params = Parameters::default();
        assert_eq!(
            build("", None, SECRET, &params),
            Err(Error::InvalidUriInput("account is required"))
        );
        assert_eq!(
            build("alice", None, "", &params),
            Err(Error::InvalidUriInput("secret is required"))
        );
        assert_eq!(
            build("alice:work", None, SECRET, &params),
            Err(Error::InvalidUriInput("account must not contain ':'"))
        );
        assert_eq!(
            build("alice", Some("Ex:ample"), SECRET, &params),
            Err(Error::InvalidUriInput("issuer must not contain ':'"))
        );
    }
}
