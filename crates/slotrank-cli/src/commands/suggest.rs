use std::path::PathBuf;

use clap::Args;
use slotrank_core::{suggest, Config, MeetingRequest, SuggestionSet};

use super::io::{print_json, read_json};

#[derive(Args)]
pub struct SuggestArgs {
    /// Request file (reads stdin when omitted)
    #[arg(long, short)]
    pub input: Option<PathBuf>,
    /// Override the request's top_k
    #[arg(long)]
    pub top_k: Option<i64>,
    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: SuggestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let request: MeetingRequest = read_json(args.input.as_deref())?;
    let result = run_request(request, args.top_k)?;
    print_json(&result, args.pretty)
}

/// Run `request` against the configured defaults.
pub fn run_request(
    mut request: MeetingRequest,
    top_k: Option<i64>,
) -> Result<SuggestionSet, Box<dyn std::error::Error>> {
    if top_k.is_some() {
        request.top_k = top_k;
    }
    let defaults = Config::load()?.engine_defaults()?;
    Ok(suggest(request, &defaults)?)
}
