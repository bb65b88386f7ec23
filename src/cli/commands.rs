use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Duration flag: one or more number+unit segments (`5s`, `500ms`,
/// `1m30s`, `1h`) or bare seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationArg(pub Duration);

impl FromStr for DurationArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || format!("Invalid duration: {s}. Use e.g. '5s', '500ms', '1m30s' or '1h'");

        // Bare seconds
        if let Ok(secs) = s.parse::<u64>() {
            return Ok(DurationArg(Duration::from_secs(secs)));
        }

        let mut total = Duration::ZERO;
        let mut rest = s;
        while !rest.is_empty() {
            let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            if digits == 0 {
                return Err(invalid());
            }
            let value: u64 = rest[..digits].parse().map_err(|_| invalid())?;
            rest = &rest[digits..];

            let unit_len = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
            let segment = match &rest[..unit_len] {
                "ms" => Duration::from_millis(value),
                "s" => Duration::from_secs(value),
                "m" => Duration::from_secs(value.saturating_mul(60)),
                "h" => Duration::from_secs(value.saturating_mul(3600)),
                _ => return Err(invalid()),
            };
            rest = &rest[unit_len..];
            total = total.checked_add(segment).ok_or_else(invalid)?;
        }
        Ok(DurationArg(total))
    }
}

impl std::fmt::Display for DurationArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "site-registry-client",
    about = "Register users and manage site records on a name registry"
)]
pub struct Opt {
    #[arg(short, long, global = true, help = "Registry endpoint, e.g. 127.0.0.1:3000")]
    pub endpoint: Option<String>,
    #[arg(short, long, global = true, help = "Request timeout (default 5s)")]
    pub timeout: Option<DurationArg>,
    #[arg(
        short = 'z',
        long = "pow-zeros",
        global = true,
        help = "Required number of leading zeros in the proof-of-work digest (default 4)"
    )]
    pub pow_zeros: Option<usize>,
    #[arg(
        long = "pow-timeout",
        global = true,
        help = "Give up the proof-of-work search after this long"
    )]
    pub pow_timeout: Option<DurationArg>,
    #[arg(short, long, global = true, help = "TOML config file")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        name = "register",
        about = "Register a new user with the key in PUBLIC_KEY"
    )]
    Register {
        #[arg(short, long, help = "User to register")]
        name: String,
    },
    #[command(name = "set_site", about = "Create a new site or update an existing one")]
    SetSite {
        #[arg(long, help = "Site to create or update")]
        site: String,
        #[arg(short, long, help = "Site's address")]
        address: String,
        #[arg(short = 'E', long, help = "Site's expiration timestamp")]
        expires: i64,
        #[arg(short = 's', long, help = "Site's owner")]
        owner: String,
        #[arg(
            short = 'f',
            long = "signature-filename",
            help = "PEM file with the owner's EC private key"
        )]
        signature_filename: PathBuf,
    },
    #[command(name = "get_site", about = "Get a site's address by its name")]
    GetSite {
        #[arg(short, long, help = "Site to find")]
        site: String,
    },
    #[command(name = "keygen", about = "Generate a P-256 key pair for signing site updates")]
    Keygen {
        #[arg(
            short,
            long = "out-dir",
            default_value = ".",
            help = "Directory for private.pem and public.pem"
        )]
        out_dir: PathBuf,
    },
    #[command(
        name = "verify_signature",
        about = "Check an ownership signature against a public key"
    )]
    VerifySignature {
        #[arg(
            short = 'k',
            long = "public-key-file",
            help = "SPKI PEM or hex public key file"
        )]
        public_key_file: PathBuf,
        #[arg(short = 's', long, help = "Site's owner")]
        owner: String,
        #[arg(long, help = "Site name")]
        site: String,
        #[arg(long, help = "Timestamp the signature was made for")]
        timestamp: i64,
        #[arg(long, help = "Hex DER signature")]
        signature: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Opt::command().debug_assert();
    }

    #[test]
    fn test_duration_arg() {
        assert_eq!(
            "5s".parse::<DurationArg>().unwrap().0,
            Duration::from_secs(5)
        );
        assert_eq!(
            "500ms".parse::<DurationArg>().unwrap().0,
            Duration::from_millis(500)
        );
        assert_eq!(
            "2m".parse::<DurationArg>().unwrap().0,
            Duration::from_secs(120)
        );
        assert_eq!(
            "1h".parse::<DurationArg>().unwrap().0,
            Duration::from_secs(3600)
        );
        assert_eq!("7".parse::<DurationArg>().unwrap().0, Duration::from_secs(7));
        assert!("soon".parse::<DurationArg>().is_err());
        assert!("-1s".parse::<DurationArg>().is_err());
        assert!("".parse::<DurationArg>().is_err());
        assert!("5x".parse::<DurationArg>().is_err());
        assert!("s5".parse::<DurationArg>().is_err());
    }

    #[test]
    fn test_compound_duration_arg() {
        assert_eq!(
            "1m30s".parse::<DurationArg>().unwrap().0,
            Duration::from_secs(90)
        );
        assert_eq!(
            "1h2m3s".parse::<DurationArg>().unwrap().0,
            Duration::from_secs(3723)
        );
        assert_eq!(
            "2s500ms".parse::<DurationArg>().unwrap().0,
            Duration::from_millis(2500)
        );
        assert!("1m30".parse::<DurationArg>().is_err());
    }

    #[test]
    fn test_parse_register() {
        let opt = Opt::try_parse_from([
            "site-registry-client",
            "register",
            "--name",
            "alice",
            "-e",
            "localhost:3000",
            "-z",
            "2",
        ])
        .unwrap();

        assert_eq!(opt.endpoint.as_deref(), Some("localhost:3000"));
        assert_eq!(opt.pow_zeros, Some(2));
        assert!(matches!(opt.command, Command::Register { name } if name == "alice"));
    }

    #[test]
    fn test_parse_set_site() {
        let opt = Opt::try_parse_from([
            "site-registry-client",
            "--endpoint",
            "localhost:3000",
            "--timeout",
            "10s",
            "set_site",
            "--site",
            "example",
            "--address",
            "1.2.3.4",
            "--expires",
            "1700000000",
            "--owner",
            "alice",
            "-f",
            "private.pem",
        ])
        .unwrap();

        assert_eq!(opt.timeout, Some(DurationArg(Duration::from_secs(10))));
        match opt.command {
            Command::SetSite {
                site,
                address,
                expires,
                owner,
                signature_filename,
            } => {
                assert_eq!(site, "example");
                assert_eq!(address, "1.2.3.4");
                assert_eq!(expires, 1700000000);
                assert_eq!(owner, "alice");
                assert_eq!(signature_filename, PathBuf::from("private.pem"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_set_site_requires_key_file() {
        let result = Opt::try_parse_from([
            "site-registry-client",
            "set_site",
            "--site",
            "example",
            "--address",
            "1.2.3.4",
            "--expires",
            "1700000000",
            "--owner",
            "alice",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_get_site_requires_site() {
        assert!(Opt::try_parse_from(["site-registry-client", "get_site"]).is_err());
        let opt =
            Opt::try_parse_from(["site-registry-client", "get_site", "-s", "example"]).unwrap();
        assert!(matches!(opt.command, Command::GetSite { site } if site == "example"));
    }
}
