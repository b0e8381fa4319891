use std::path::PathBuf;

use clap::Args;
use slotrank_core::{AvailabilityPayload, AvailabilityTransformer, Config};

use super::io::{print_json, read_json};

#[derive(Args)]
pub struct TransformArgs {
    /// Availability payload file (reads stdin when omitted)
    #[arg(long, short)]
    pub input: Option<PathBuf>,
    /// Rank the transformed request instead of printing it
    #[arg(long)]
    pub suggest: bool,
    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: TransformArgs) -> Result<(), Box<dyn std::error::Error>> {
    let payload: AvailabilityPayload = read_json(args.input.as_deref())?;
    let config = Config::load()?;
    let transformer = AvailabilityTransformer::with_settings(config.transform_settings());
    let request = transformer.transform(payload)?;

    if args.suggest {
        let result = super::suggest::run_request(request, None)?;
        print_json(&result, args.pretty)
    } else {
        print_json(&request, args.pretty)
    }
}
