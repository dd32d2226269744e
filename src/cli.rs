use core::convert::TryFrom;

use anyhow::{Error, Result};
use clap::{crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};

use crate::authenticator::{Command, Generate, GenerateSecret, SetupUri, Verify};
use crate::secret::DEFAULT_SECRET_LEN;
use crate::{Algorithm, Digits, Mode, Parameters};

const ABOUT: &str = "
Generates and verifies one-time passwords: RFC 6238 time-step codes, compatible
with authenticator apps, and codes bound to short-lived expiring secrets.
";

const MODES: &[&str] = &["time-step", "expiring"];
const ALGORITHMS: &[&str] = &["SHA1", "SHA256", "SHA512"];

fn mode_arg() -> Arg<'static, 'static> {
    Arg::with_name("mode")
        .short("m")
        .long("mode")
        .help("time-step: rolling TOTP window; expiring: secret carries its creation time")
        .value_name("MODE")
        .possible_values(MODES)
        .default_value("time-step")
}

fn timestamp_arg() -> Arg<'static, 'static> {
    Arg::with_name("timestamp")
        .short("t")
        .long("timestamp")
        .help("timestamp to use instead of the current time, as seconds since the UNIX epoch")
        .value_name("TIMESTAMP")
        .required(false)
}

/// Adds `--digits`, `--period`, `--offset` and `--algorithm`
fn with_parameters(command: App<'static, 'static>) -> App<'static, 'static> {
    let args = vec![
        Arg::with_name("digits")
            .short("d")
            .long("digits")
            .help("number of digits in the code")
            .value_name("DIGITS")
            .possible_values(&["6", "7", "8"])
            .default_value("6"),
        Arg::with_name("period")
            .short("p")
            .long("period")
            .help("time step (time-step mode) or lifetime (expiring mode), in seconds")
            .value_name("SECONDS")
            .default_value("30"),
        Arg::with_name("offset")
            .short("o")
            .long("offset")
            .help("clock drift correction in seconds, added to the current time (time-step mode)")
            .value_name("SECONDS")
            .allow_hyphen_values(true)
            .default_value("0"),
        Arg::with_name("algorithm")
            .short("a")
            .long("algorithm")
            .help("HMAC digest algorithm")
            .value_name("ALGORITHM")
            .possible_values(ALGORITHMS)
            .case_insensitive(true)
            .default_value("SHA1"),
    ];
    args.into_iter().fold(command, |command, arg| command.arg(arg))
}

pub fn app() -> clap::App<'static, 'static> {

    let app = App::new("otpkit")
        .version(crate_version!())
        .about(ABOUT)
        .setting(AppSettings::SubcommandRequiredElseHelp)

        .arg(Arg::with_name("verbose")
             .short("v")
             .long("verbose")
             .multiple(true)
             .help("log more (-v: info, -vv: debug)")
        )

        .subcommand(SubCommand::with_name("secret")
            .about("generate a random base32 secret")
            .arg(Arg::with_name("length")
                 .short("l")
                 .long("length")
                 .help("number of base32 characters, at least 16 and a multiple of 8")
                 .value_name("LENGTH")
                 .default_value("32")
             )
            .arg(mode_arg())
        )

        .subcommand(with_parameters(SubCommand::with_name("code")
            .about("compute the current code for a secret")
            .arg(Arg::with_name("secret")
                 .help("the base32 secret, e.g. JBSWY3DPEHPK3PXPJBSWY3DPEHPK3PXP")
                 .value_name("SECRET")
                 .required(true)
             )
            .arg(mode_arg())
            .arg(timestamp_arg())
        ))

        .subcommand(with_parameters(SubCommand::with_name("verify")
            .about("check a code against a secret; exits with 1 if the code is wrong")
            .arg(Arg::with_name("code")
                 .help("the code to check")
                 .value_name("CODE")
                 .required(true)
             )
            .arg(Arg::with_name("secret")
                 .help("the base32 secret the code was derived from")
                 .value_name("SECRET")
                 .required(true)
             )
            .arg(mode_arg())
            .arg(timestamp_arg())
        ))

        // cf. https://github.com/google/google-authenticator/wiki/Key-Uri-Format
        // eg. otpauth://totp/Example:alice@google.com?secret=JBSWY3DPEHPK3PXP&issuer=Example

        .subcommand(with_parameters(SubCommand::with_name("uri")
            .about("print the otpauth:// URI to enroll a secret in an authenticator app")
            .arg(Arg::with_name("secret")
                 .help("the base32 secret")
                 .value_name("SECRET")
                 .required(true)
             )
            .arg(Arg::with_name("account")
                 .long("account")
                 .help("account name, e.g. alice@example.com")
                 .value_name("ACCOUNT")
                 .required(true)
             )
            .arg(Arg::with_name("issuer")
                 .long("issuer")
                 .help("service or organisation issuing the secret")
                 .value_name("ISSUER")
                 .required(false)
             )
        ))
    ;

    app

}

/// Maps a `--mode` value; clap has already restricted it to `MODES`.
fn mode(args: &ArgMatches<'static>) -> Result<Mode> {
    match args.value_of("mode") {
        Some("expiring") => Ok(Mode::ExpiringSecret),
        Some("time-step") | None => Ok(Mode::TimeStep),
        Some(other) => Err(anyhow::anyhow!("unknown mode {}", other)),
    }
}

fn parameters(args: &ArgMatches<'static>) -> Result<Parameters> {
    let mut parameters = Parameters::default();
    if let Some(digits) = args.value_of("digits") {
        parameters = parameters.with_digits(Digits::try_from(digits.parse::<u32>()?)?);
    }
    if let Some(period) = args.value_of("period") {
        parameters = parameters.with_period(period.parse()?);
    }
    if let Some(offset) = args.value_of("offset") {
        parameters = parameters.with_offset(offset.parse()?);
    }
    if let Some(algorithm) = args.value_of("algorithm") {
        parameters = parameters.with_algorithm(algorithm.parse::<Algorithm>()?);
    }
    Ok(parameters)
}

fn timestamp(args: &ArgMatches<'static>) -> Result<Option<u64>> {
    match args.value_of("timestamp") {
        Some(s) => Ok(Some(s.parse()?)),
        None => Ok(None),
    }
}

fn required(args: &ArgMatches<'static>, name: &str) -> Result<String> {
    args.value_of(name)
        .map(String::from)
        .ok_or_else(|| anyhow::anyhow!("missing {}", name))
}

impl TryFrom<&'_ clap::ArgMatches<'static>> for Command {
    type Error = Error;
    fn try_from(args: &clap::ArgMatches<'static>) -> Result<Self> {
        if let Some(command) = args.subcommand_matches("secret") {
            let length = match command.value_of("length") {
                Some(s) => s.parse()?,
                None => DEFAULT_SECRET_LEN,
            };
            return Ok(Command::GenerateSecret(GenerateSecret {
                length,
                mode: mode(command)?,
            }));
        }

        if let Some(command) = args.subcommand_matches("code") {
            return Ok(Command::Generate(Generate {
                secret: required(command, "secret")?,
                mode: mode(command)?,
                parameters: parameters(command)?,
                timestamp: timestamp(command)?,
            }));
        }

        if let Some(command) = args.subcommand_matches("verify") {
            return Ok(Command::Verify(Verify {
                code: required(command, "code")?,
                secret: required(command, "secret")?,
                mode: mode(command)?,
                parameters: parameters(command)?,
                timestamp: timestamp(command)?,
            }));
        }

        if let Some(command) = args.subcommand_matches("uri") {
            return Ok(Command::SetupUri(SetupUri {
                account: required(command, "account")?,
                issuer: command.value_of("issuer").map(String::from),
                secret: required(command, "secret")?,
                parameters: parameters(command)?,
            }));
        }

        Err(anyhow::anyhow!("Unexpected case"))
    }
}
