use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use powerdns_api::{ApiConfig, Endpoint, NewZone, SoaParams, Timers, ZoneKind};
use tracing::info;

/// Create a zone with its SOA and NS records on a PowerDNS server.
#[derive(Parser, Debug)]
#[command(author, version, about, rename_all = "kebab-case")]
struct Cli {
    /// PowerDNS API URL (e.g. http://127.0.0.1:8081/api/v1)
    #[arg(short = 'A', long, value_name = "URL")]
    api: String,
    /// PowerDNS API key
    #[arg(short = 'K', long, value_name = "KEY")]
    apikey: String,
    /// Zone name
    #[arg(short = 'z', long, value_name = "FQDN")]
    zone: String,
    /// SOA origin (primary nameserver)
    #[arg(short = 'o', long, value_name = "FQDN")]
    origin: String,
    /// SOA contact, in name form (admin.example.tld.)
    #[arg(short = 'c', long, value_name = "FQDN")]
    contact: String,
    /// Nameservers, comma separated
    #[arg(short = 'd', long, value_name = "FQDN,...", value_delimiter = ',', required = true)]
    dns: Vec<String>,
    /// SOA timers: refresh retry expire minimum
    #[arg(short = 't', long, value_name = "TIMERS", default_value = "28800 7200 604800 86400")]
    timers: Timers,
    /// PowerDNS server ID
    #[arg(long, value_name = "ID", default_value = "localhost")]
    server: String,
    /// Zone kind (Native, Master, Slave)
    #[arg(long, value_name = "KIND", default_value = "Master")]
    kind: ZoneKind,
    /// Skip TLS certificate verification
    #[arg(long)]
    insecure: bool,
    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let zone_name =
        normalize_fqdn(&cli.zone).with_context(|| format!("invalid zone '{}'", cli.zone))?;
    let origin =
        normalize_fqdn(&cli.origin).with_context(|| format!("invalid origin '{}'", cli.origin))?;
    let contact = normalize_fqdn(&cli.contact)
        .with_context(|| format!("invalid contact '{}'", cli.contact))?;
    let nameservers = cli
        .dns
        .iter()
        .map(|ns| normalize_fqdn(ns).with_context(|| format!("invalid nameserver '{ns}'")))
        .collect::<Result<Vec<_>>>()?;

    let mut config = ApiConfig::new(&cli.api, &cli.apikey).with_verify_tls(!cli.insecure);
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let endpoint = Endpoint::new(config).context("failed to set up the API client")?;
    let server = endpoint.server(&cli.server);

    let request = NewZone::new(&zone_name, cli.kind)
        .with_nameservers(nameservers)
        .with_soa(SoaParams::new(origin, contact).with_timers(cli.timers));
    info!(zone = %zone_name, server = %cli.server, "creating zone");

    let zone = server
        .create_zone(request)
        .await
        .with_context(|| format!("failed to create zone {zone_name}"))?;

    println!("{}", zone.name());
    Ok(())
}

fn normalize_fqdn(input: &str) -> Result<String> {
    let trimmed = input.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        bail!("FQDN cannot be empty");
    }
    Ok(format!("{}.", trimmed))
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
