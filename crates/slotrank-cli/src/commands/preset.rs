use std::path::PathBuf;

use clap::Subcommand;
use slotrank_core::{MeetingRequest, PresetStore};

use super::io::{print_json, read_json};

#[derive(Subcommand)]
pub enum PresetAction {
    /// Store a request payload under KEY
    Save {
        key: String,
        /// Payload file (reads stdin when omitted)
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
    /// Print a stored payload
    Show { key: String },
    /// List stored keys
    List,
    /// Remove a stored payload
    Delete { key: String },
    /// Rank a stored request
    Run {
        key: String,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
}

pub fn run(action: PresetAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = PresetStore::open_default()?;
    match action {
        PresetAction::Save { key, input } => {
            let payload: serde_json::Value = read_json(input.as_deref())?;
            store.save(&key, payload)?;
            println!("saved preset: {key}");
        }
        PresetAction::Show { key } => {
            let payload = store
                .get(&key)
                .ok_or_else(|| format!("unknown preset: {key}"))?;
            print_json(payload, true)?;
        }
        PresetAction::List => {
            for key in store.list() {
                println!("{key}");
            }
        }
        PresetAction::Delete { key } => {
            if !store.delete(&key)? {
                return Err(format!("unknown preset: {key}").into());
            }
            println!("deleted preset: {key}");
        }
        PresetAction::Run { key, pretty } => {
            let payload = store
                .get(&key)
                .cloned()
                .ok_or_else(|| format!("unknown preset: {key}"))?;
            let request: MeetingRequest = serde_json::from_value(payload)
                .map_err(|e| format!("preset {key} is not a valid request: {e}"))?;
            let result = super::suggest::run_request(request, None)?;
            print_json(&result, pretty)?;
        }
    }
    Ok(())
}
