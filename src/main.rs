use core::convert::TryFrom;

use anyhow::Result;
use log::{info, LevelFilter};

use otpkit::{
    authenticator::{Authenticator, Command},
    cli,
    clock::{format_timestamp, Clock, FixedClock, SystemClock},
    Verification,
};

/// Exit status for a well-formed but wrong code; errors exit with 2.
const EXIT_INVALID: i32 = 1;
const EXIT_ERROR: i32 = 2;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn run() -> Result<i32> {
    let args = init_app();
    init_logger(args.occurrences_of("verbose"))?;

    let command = Command::try_from(&args)?;

    let clock: Box<dyn Clock> = match command.timestamp() {
        Some(timestamp) => {
            info!("using timestamp {}", format_timestamp(timestamp));
            Box::new(FixedClock(timestamp))
        }
        None => Box::new(SystemClock),
    };
    let authenticator = Authenticator::new(clock);

    match command {
        Command::GenerateSecret(generate_secret) => {
            println!("{}", authenticator.generate_secret(&generate_secret)?);
        }
        Command::Generate(generate) => {
            let generated = authenticator.generate(&generate)?;
            println!("{}", generated.otp);
            // stdout stays a bare code for scripts
            eprintln!("valid until {}", format_timestamp(generated.valid_until));
        }
        Command::Verify(verify) => match authenticator.verify(&verify)? {
            Verification::Valid => println!("valid"),
            Verification::Invalid => {
                println!("invalid");
                return Ok(EXIT_INVALID);
            }
        },
        Command::SetupUri(setup_uri) => {
            println!("{}", authenticator.setup_uri(&setup_uri)?);
        }
    }

    Ok(0)
}

pub fn init_app() -> clap::ArgMatches<'static> {
    let app = cli::app();
    let matches = app.get_matches();
    matches
}

pub fn init_logger(verbosity: u64) -> Result<()> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    simple_logger::SimpleLogger::new().with_level(level).init()?;
    Ok(())
}
