//! `dmrp-opnums`: prints resolved opnum tables and probes the default handlers.

use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context as _};
use bytes::Bytes;
use clap::{Parser, Subcommand, ValueEnum};
use dmrp_core::{MsgPackCodec, WireError};
use dmrp_server::dispatch::{CallContext, InterfaceDef, Lookup, SlotKind, WireMessage};
use dmrp_server::interfaces::dm_notify::{
    register_dm_notify_server, DmNotifyRequest, UnimplementedDmNotifyServer, DM_NOTIFY,
};
use dmrp_server::interfaces::unknown::{UnknownRequest, UNKNOWN};
use dmrp_server::interfaces::volume_client::{
    register_volume_client_server, UnimplementedVolumeClientServer, VolumeClientRequest,
    VOLUME_CLIENT,
};
use dmrp_server::interfaces::volume_client3::{
    register_volume_client3_server, UnimplementedVolumeClient3Server, VolumeClient3Request,
    VOLUME_CLIENT3,
};
use dmrp_server::interfaces::volume_client4::{
    register_volume_client4_server, UnimplementedVolumeClient4Server, VolumeClient4Request,
    VOLUME_CLIENT4,
};
use dmrp_server::interfaces::{self, CATALOGUE};
use dmrp_server::{build_call_pipeline, Call, InterfaceRouter, ServerConfig};
use serde::Serialize;
use tower::{Service, ServiceExt};
use tracing::{error, info, Subscriber};
use tracing_subscriber::EnvFilter;

/// Opnums past the end of each table that `probe` also exercises.
const PROBE_OVERRUN: u32 = 4;

#[derive(Debug, Parser)]
#[command(name = "dmrp-opnums", version, about = "Inspect and probe DMRP opnum tables")]
struct Cli {
    /// Restrict output to one interface (case-insensitive name).
    #[arg(long, global = true)]
    interface: Option<String>,

    /// Emit the table as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    log_format: LogFormat,

    #[arg(long, env = "DMRP_MAX_CONCURRENT_CALLS", default_value_t = 1000)]
    max_concurrent_calls: u32,

    #[arg(long, env = "DMRP_CALL_TIMEOUT_MS", default_value_t = 30_000)]
    call_timeout_ms: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the resolved opnum table (default).
    Table,
    /// Send a default request for every opnum to the default handlers and
    /// check the answers.
    Probe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Compact,
    Json,
}

impl Cli {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            max_concurrent_calls: self.max_concurrent_calls,
            default_call_timeout_ms: self.call_timeout_ms,
            ..ServerConfig::default()
        }
    }

    fn selected(&self) -> anyhow::Result<Vec<&'static InterfaceDef>> {
        match &self.interface {
            Some(name) => interfaces::find(name)
                .map(|def| vec![def])
                .with_context(|| format!("unknown interface {name:?}")),
            None => Ok(CATALOGUE.to_vec()),
        }
    }
}

// ---------------------------------------------------------------------------
// Telemetry
// ---------------------------------------------------------------------------

fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("invalid log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal());

    let subscriber: Box<dyn Subscriber + Send + Sync> = match format {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    };
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct Row {
    interface: &'static str,
    opnum: u32,
    owner: &'static str,
    name: Option<&'static str>,
    kind: &'static str,
    request: Option<&'static str>,
    response: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct Table {
    interface: &'static str,
    syntax: String,
    base: Option<&'static str>,
    base_opnums: u32,
    opnum_end: u32,
    rows: Vec<Row>,
}

fn table(def: &'static InterfaceDef) -> Table {
    let rows = (0..def.opnum_end())
        .map(|opnum| {
            let resolved = def.resolve(opnum);
            let (name, kind, request, response) = match resolved.lookup {
                Lookup::Operation(slot) => match slot.kind {
                    SlotKind::Operation { request, response } => {
                        (Some(slot.name), "operation", Some(request), Some(response))
                    }
                    SlotKind::Reserved => (Some(slot.name), "reserved", None, None),
                },
                Lookup::Reserved(slot) => (Some(slot.name), "reserved", None, None),
                Lookup::Unknown => (None, "unknown", None, None),
            };
            Row {
                interface: def.name,
                opnum,
                owner: resolved.owner.name,
                name,
                kind,
                request,
                response,
            }
        })
        .collect();

    Table {
        interface: def.name,
        syntax: def.syntax.to_string(),
        base: def.base.map(|b| b.name),
        base_opnums: def.base_opnums(),
        opnum_end: def.opnum_end(),
        rows,
    }
}

fn print_tables(tables: &[Table], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tables)?);
        return Ok(());
    }
    for table in tables {
        println!(
            "{} {} (base {}, opnums {}..{})",
            table.interface,
            table.syntax,
            table.base.unwrap_or("-"),
            table.base_opnums,
            table.opnum_end
        );
        for row in &table.rows {
            println!(
                "  {:>3}  {:<9} {:<40} {}",
                row.opnum,
                row.kind,
                row.name.unwrap_or("-"),
                if row.owner == table.interface {
                    String::new()
                } else {
                    format!("[{}]", row.owner)
                }
            );
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Probe
// ---------------------------------------------------------------------------

fn default_request<M: WireMessage>(opnum: u32) -> Result<Bytes, WireError> {
    match M::default_for(opnum) {
        Some(msg) => msg.encode(&MsgPackCodec),
        None => Ok(Bytes::new()),
    }
}

/// Default request bytes for `opnum` on `def`, or `None` for an interface
/// the probe has no default server for.
fn probe_payload(def: &'static InterfaceDef, opnum: u32) -> Option<Result<Bytes, WireError>> {
    if opnum < def.base_opnums() {
        return Some(default_request::<UnknownRequest>(opnum));
    }
    if std::ptr::eq(def, &VOLUME_CLIENT) {
        Some(default_request::<VolumeClientRequest>(opnum))
    } else if std::ptr::eq(def, &VOLUME_CLIENT3) {
        Some(default_request::<VolumeClient3Request>(opnum))
    } else if std::ptr::eq(def, &VOLUME_CLIENT4) {
        Some(default_request::<VolumeClient4Request>(opnum))
    } else if std::ptr::eq(def, &DM_NOTIFY) {
        Some(default_request::<DmNotifyRequest>(opnum))
    } else {
        None
    }
}

async fn probe(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = cli.server_config();
    let mut router = InterfaceRouter::from_config(&config);
    register_volume_client_server(
        &mut router,
        Arc::new(UnimplementedVolumeClientServer::default()),
        MsgPackCodec,
    )?;
    register_volume_client3_server(
        &mut router,
        Arc::new(UnimplementedVolumeClient3Server::default()),
        MsgPackCodec,
    )?;
    register_volume_client4_server(
        &mut router,
        Arc::new(UnimplementedVolumeClient4Server::default()),
        MsgPackCodec,
    )?;
    register_dm_notify_server(
        &mut router,
        Arc::new(UnimplementedDmNotifyServer::default()),
        MsgPackCodec,
    )?;
    let mut pipeline = build_call_pipeline(router, &config);

    let mut call_id = 0_u64;
    let mut violations = 0_usize;
    for def in cli.selected()? {
        if std::ptr::eq(def, &UNKNOWN) {
            if cli.interface.is_some() {
                bail!("IUnknown has no standalone server; probe a derived interface");
            }
            continue;
        }

        for opnum in 0..def.opnum_end() + PROBE_OVERRUN {
            let Some(payload) = probe_payload(def, opnum) else {
                bail!("no default server for {}", def.name);
            };
            call_id += 1;
            let call = Call::new(
                CallContext::new(call_id, config.default_call_timeout_ms),
                def.syntax,
                opnum,
                payload?,
            );
            let result = ServiceExt::ready(&mut pipeline).await?.call(call).await;

            let live = matches!(def.resolve(opnum).lookup, Lookup::Operation(_));
            let conforms = match &result {
                Ok(None) => !live,
                Ok(Some(_)) => false,
                Err(fault) => live && fault.error.is_not_implemented(),
            };
            if !conforms {
                violations += 1;
                error!(
                    interface = def.name,
                    opnum,
                    live,
                    result = ?result.as_ref().map(Option::is_some).map_err(ToString::to_string),
                    "probe violation"
                );
            }
        }
        info!(interface = def.name, opnums = def.opnum_end() + PROBE_OVERRUN, "probed");
    }

    if violations == 0 {
        println!("probe passed: {call_id} calls");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("probe failed: {violations} of {call_id} calls violated the dispatch rules");
        Ok(ExitCode::FAILURE)
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    init_tracing(cli.log_format)?;
    match cli.command.as_ref().unwrap_or(&Command::Table) {
        Command::Table => {
            let tables: Vec<Table> = cli.selected()?.into_iter().map(table).collect();
            print_tables(&tables, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Probe => probe(&cli).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("dmrp-opnums: {err:#}");
            ExitCode::FAILURE
        }
    }
}
