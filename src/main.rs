use clap::Parser;
use log::{error, info, LevelFilter};
use site_registry_client::cli::Command;
use site_registry_client::config::{FileSettings, Overrides, Settings};
use site_registry_client::core::verify_ownership;
use site_registry_client::keys::load_public_key_file;
use site_registry_client::{
    ClientError, GetSiteRequest, Opt, OwnerKey, ProofOfWork, RegisterRequest, RegistryClient,
    RegistryRequest, SetSiteRequest,
};
use std::process;

fn main() {
    // Info by default, RUST_LOG overrides it
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let opt = Opt::parse();

    // Any error ends the process with exit code 1
    if let Err(e) = run_command(opt) {
        error!("{e}");
        process::exit(1);
    }
}

// Each subcommand maps to one registry call, except keygen and
// verify_signature which stay local
fn run_command(opt: Opt) -> Result<(), ClientError> {
    match &opt.command {
        // New user, public key taken from PUBLIC_KEY
        Command::Register { name } => {
            let settings = resolve_settings(&opt)?;
            let pubkey = Settings::public_key_from_env()?;
            let mut request = RegisterRequest::new(name, &pubkey)?;
            stamp_and_send(&settings, &mut request)?;
        }
        Command::SetSite {
            site,
            address,
            expires,
            owner,
            signature_filename,
        } => {
            // The signature goes in before the nonce search starts
            let settings = resolve_settings(&opt)?;
            let mut request = SetSiteRequest::new(site, address, *expires, owner)?;
            let key = OwnerKey::from_pem_file(signature_filename)?;
            request.sign(&key)?;
            stamp_and_send(&settings, &mut request)?;
        }
        // Lookup only, still needs a valid nonce
        Command::GetSite { site } => {
            let settings = resolve_settings(&opt)?;
            let mut request = GetSiteRequest::new(site)?;
            stamp_and_send(&settings, &mut request)?;
        }
        // Writes private.pem and public.pem, no network
        Command::Keygen { out_dir } => {
            let key = OwnerKey::generate();
            let (private_path, public_path) = key.write_pem_files(out_dir)?;
            println!("Private key: {}", private_path.display());
            println!("Public key:  {}", public_path.display());
            println!();
            print!("{}", key.public_key_pem()?);
        }
        Command::VerifySignature {
            public_key_file,
            owner,
            site,
            timestamp,
            signature,
        } => {
            // Same check the registry runs on set_site
            let public_key = load_public_key_file(public_key_file)?;
            if verify_ownership(&public_key, owner, site, *timestamp, signature)? {
                println!("Signature is successfully verified!");
            } else {
                return Err(ClientError::Signing(format!(
                    "signature does not match {owner}{site}{timestamp}"
                )));
            }
        }
    }
    Ok(())
}

// Flags win over the config file, which wins over defaults
fn resolve_settings(opt: &Opt) -> Result<Settings, ClientError> {
    let file = match &opt.config {
        Some(path) => FileSettings::load(path)?,
        None => FileSettings::default(),
    };
    let overrides = Overrides {
        endpoint: opt.endpoint.clone(),
        timeout: opt.timeout.map(|t| t.0),
        difficulty: opt.pow_zeros,
        pow_timeout: opt.pow_timeout.map(|t| t.0),
    };
    Settings::resolve(overrides, file)
}

// Proof-of-work runs last so the nonce covers the final body
fn stamp_and_send<R: RegistryRequest>(
    settings: &Settings,
    request: &mut R,
) -> Result<(), ClientError> {
    let pow =
        ProofOfWork::new(settings.difficulty)?.with_cancellation(settings.pow_cancellation());
    info!(
        "Searching nonce for /{} with {} leading zeros",
        R::PATH,
        pow.difficulty()
    );
    pow.run(request)?;

    // The body is sent byte for byte as it was hashed
    let client = RegistryClient::new(&settings.endpoint, settings.timeout)?;
    let response = client.send(request)?;
    // 4xx and 5xx replies are printed, not treated as failures
    println!("Status: {}", response.status);
    println!("Response: {}", response.body);
    Ok(())
}
