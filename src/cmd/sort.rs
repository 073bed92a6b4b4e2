use crate::reports;
use clap::Args;
use keyrank::analyzer::EffortModel;
use keyrank::api::Workbench;
use keyrank::config::Config;
use keyrank::geometry::GeometryModel;
use keyrank::ranking::{Comparison, RuleJudge, SessionState};
use keyrank::KrResult;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SortArgs {
    #[command(flatten)]
    pub config: Config,

    /// Ranking file, created if missing
    pub output: PathBuf,

    /// Answer comparisons with the effort rule instead of asking
    #[arg(long, default_value_t = false)]
    pub auto: bool,

    /// Stop after placing this many ngrams
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
}

pub fn run(args: SortArgs, config: Config, geometry: Arc<GeometryModel>) -> KrResult<()> {
    let mut bench = Workbench::open(geometry, &args.output, &config.ngrams)?;
    let limit = args.count.unwrap_or(usize::MAX);

    let placed = if args.auto {
        let model = EffortModel::from_weights(&config.rules)?;
        let mut judge = RuleJudge::new(bench.analyzer().clone(), model);

        let mut placed = 0;
        while placed < limit {
            match bench.place_next_with(&mut judge)? {
                Some((ngram, rank)) => {
                    println!("{} -> rank {}", ngram, rank);
                    placed += 1;
                }
                None => break,
            }
        }
        placed
    } else {
        let stdin = io::stdin();
        interactive(&mut bench, stdin.lock(), limit)?
    };

    let progress = bench.progress();
    info!("Session placed {} ngrams", placed);
    println!(
        "Placed {} ngrams this session; {} of {} ranked.",
        placed, progress.placed, progress.total
    );
    Ok(())
}

/// Reads one answer per line until the queue is empty, the limit is reached,
/// or the user quits. Each placement is committed as soon as it is decided.
fn interactive<R: BufRead>(bench: &mut Workbench, mut input: R, limit: usize) -> KrResult<usize> {
    let mut placed = 0;
    let mut line = String::new();

    while placed < limit {
        if bench.ranker().state() == SessionState::Idle && bench.submit_next()?.is_none() {
            println!("Every ngram is ranked.");
            break;
        }

        match bench.ranker().state() {
            SessionState::Decided { ngram, .. } => {
                let rank = bench.ranker_mut().commit()?;
                let symbols = bench.geometry().symbols_of(&ngram)?;
                println!("Placed {} ({}) at rank {}", ngram, symbols, rank);
                placed += 1;
            }
            SessionState::AwaitingComparison { ngram, candidate, .. } => {
                let ranker = bench.ranker();
                let new_facts = bench.analyzer().analyze(&ngram)?;
                let cand_facts = bench.analyzer().analyze(&candidate)?;
                let window = ranker.search_window().unwrap_or_default();
                let rank = ranker.store().rank_of(&candidate).unwrap_or_default();
                reports::print_comparison(
                    &new_facts,
                    &cand_facts,
                    rank,
                    &window,
                    bench.progress(),
                    ranker.comparisons_made(),
                );

                line.clear();
                if input.read_line(&mut line)? == 0 {
                    bench.cancel();
                    break;
                }

                match line.trim() {
                    "q" => {
                        bench.cancel();
                        break;
                    }
                    "u" => {
                        if !bench.ranker_mut().undo() {
                            println!("Nothing to undo.");
                        }
                    }
                    "r" => {
                        bench.ranker_mut().restart();
                    }
                    answer => match answer.parse::<Comparison>() {
                        Ok(comparison) => {
                            bench.ranker_mut().answer(comparison)?;
                        }
                        Err(_) => println!("Unknown answer '{}'.", answer),
                    },
                }
            }
            SessionState::Idle => break,
        }
    }

    Ok(placed)
}
