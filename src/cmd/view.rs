use crate::reports;
use clap::Args;
use keyrank::analyzer::Analyzer;
use keyrank::api;
use keyrank::geometry::GeometryModel;
use keyrank::store::OrderedList;
use keyrank::{KeyRankError, KrResult, Ngram};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Ranking file to show
    pub output: PathBuf,

    /// Start at this ngram, given as key indices ("0,1") or symbols ("th")
    #[arg(long)]
    pub goto: Option<String>,

    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Print rows as JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

fn resolve_goto(text: &str, geometry: &GeometryModel) -> KrResult<Ngram> {
    match text.parse::<Ngram>() {
        Ok(ngram) => Ok(ngram),
        Err(_) => geometry.ngram_from_symbols(text),
    }
}

pub fn run(args: ViewArgs, geometry: Arc<GeometryModel>) -> KrResult<()> {
    // Read-only snapshot; the viewer never writes
    let store = OrderedList::open(&args.output)?;
    let analyzer = Analyzer::new(geometry);

    let start = match &args.goto {
        Some(text) => {
            let ngram = resolve_goto(text, analyzer.geometry())?;
            store.rank_of(&ngram).ok_or_else(|| {
                KeyRankError::Validation(format!("{} is not in the ranking", ngram))
            })?
        }
        None => 0,
    };

    let rows = api::rows(&analyzer, &store, start, args.limit)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        reports::print_ranking(&rows, store.len());
    }
    Ok(())
}
