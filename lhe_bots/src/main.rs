//! Limit Hold'em bot over raw engine snapshots.
//!
//! Reads the acting player's snapshot as JSON, encodes it into the agent
//! observation, lets an agent choose an action id, and prints the legal
//! move that id resolves to.

mod agent;

use anyhow::{Context, Result, anyhow};
use lhe_env::{
    ActionSpace, CardIndexTable, EnvConfig, RawState, StateEncoder, codec::write_prefixed,
};
use log::{debug, info};
use pico_args::Arguments;
use serde_json::json;
use std::{
    fs::{File, OpenOptions},
    io::{self, BufReader, Read},
    path::PathBuf,
    sync::Arc,
};

use agent::{Agent, FixedAgent, RandomAgent};

const HELP: &str = "\
Encode a limit hold'em snapshot and choose a legal move

USAGE:
  lhe_bots [OPTIONS]

OPTIONS:
  --state       PATH    JSON snapshot to encode  [default: stdin]
  --card-index  PATH    Card index JSON table    [default: env LHE_CARD_INDEX_PATH or built-in]
  --action      ID      Action id to decode      [default: random legal id]
  --seed        N       Seed for the random agent
  --out         PATH    Append the observation as a length-prefixed record

FLAGS:
  -h, --help            Print help information

ENVIRONMENT:
  LHE_CARD_INDEX_PATH   Card index JSON table
  LHE_MAX_ROUNDS        Betting rounds reserved in the observation [default: 4]
  RUST_LOG              Log filter (e.g. debug)
";

struct Args {
    state: Option<PathBuf>,
    card_index: Option<PathBuf>,
    action: Option<usize>,
    seed: Option<u64>,
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        state: pargs.opt_value_from_str("--state")?,
        card_index: pargs.opt_value_from_str("--card-index")?,
        action: pargs.opt_value_from_str("--action")?,
        seed: pargs.opt_value_from_str("--seed")?,
        out: pargs.opt_value_from_str("--out")?,
    };

    env_logger::builder().format_target(false).init();

    run(args)
}

fn run(args: Args) -> Result<()> {
    let mut config = EnvConfig::from_env();
    if args.card_index.is_some() {
        config.card_index_path = args.card_index;
    }
    config.validate()?;

    let table = match &config.card_index_path {
        Some(path) => CardIndexTable::from_path(path)
            .with_context(|| format!("failed to load card index table {}", path.display()))?,
        None => CardIndexTable::standard(),
    };
    let encoder = StateEncoder::with_max_rounds(Arc::new(table), config.max_rounds);
    info!(
        "Encoder ready: observation length {}",
        encoder.observation_len()
    );

    let state = read_state(args.state.as_ref())?;
    let extracted = encoder
        .encode(&state)
        .context("failed to encode snapshot")?;
    debug!("Legal action ids: {:?}", extracted.legal_actions);

    let mut agent: Box<dyn Agent> = match args.action {
        Some(id) => Box::new(FixedAgent(id)),
        None => Box::new(RandomAgent::new(args.seed)),
    };
    let action_id = agent
        .step(&extracted)
        .ok_or_else(|| anyhow!("agent produced no action"))?;
    let action = ActionSpace::new().decode(action_id, &state.legal_actions)?;
    info!("Agent chose id {action_id}, playing {action}");

    if let Some(path) = &args.out {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        write_prefixed(&mut file, &extracted.obs)?;
        debug!("Appended observation to {}", path.display());
    }

    let report = json!({
        "obs_len": extracted.obs.len(),
        "active_slots": extracted.obs.active_slots(),
        "legal_actions": extracted.legal_actions,
        "action_id": action_id,
        "action": action,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn read_state(path: Option<&PathBuf>) -> Result<RawState> {
    let reader: Box<dyn Read> = match path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    serde_json::from_reader(reader).context("snapshot is not a valid raw state")
}
