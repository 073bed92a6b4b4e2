use crate::reports;
use clap::Args;
use keyrank::api::{self, Workbench};
use keyrank::config::Config;
use keyrank::geometry::GeometryModel;
use keyrank::store::OrderedList;
use keyrank::{KeyRankError, KrResult};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: Config,

    /// Ranking file to check
    pub output: PathBuf,
}

pub fn run(args: CheckArgs, config: Config, geometry: Arc<GeometryModel>) -> KrResult<()> {
    let store = OrderedList::open(&args.output)?;
    let issues: Vec<(usize, String)> = api::audit_store(&geometry, &store)
        .into_iter()
        .map(|(rank, e)| (rank, e.to_string()))
        .collect();

    if !issues.is_empty() {
        let progress = api::Progress {
            placed: store.len(),
            total: store.len(),
        };
        reports::print_check(&geometry, progress, &issues);
        return Err(KeyRankError::Validation(format!(
            "{} ranked ngrams do not match the geometry",
            issues.len()
        )));
    }

    let bench = Workbench::open(geometry.clone(), &args.output, &config.ngrams)?;
    reports::print_check(&geometry, bench.progress(), &issues);
    Ok(())
}
