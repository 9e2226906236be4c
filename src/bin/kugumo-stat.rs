use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use itertools::Itertools;
use kugumo::corpus::CorpusStore;
use kugumo::criteria::SearchCriteria;
use kugumo::engine::Engine;
use kugumo::errors::Result;
use kugumo::information;
use log::{error, info};
use std::cmp::Reverse;
use std::process;
use std::sync::Arc;

const TOP_TOKENS: usize = 10;

/// Report statistics for a poem corpus or a filtered subset of it
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Corpus file (JSON)
    infile: String,
    /// Keyword filter (substring of the poem text)
    #[arg(short, long)]
    keyword: Option<String>,
    /// Tag filter (substring of the tag list)
    #[arg(short, long)]
    tag: Option<String>,
    /// Source filter (substring)
    #[arg(short, long)]
    source: Option<String>,
    /// Location filter (exact)
    #[arg(short, long)]
    location: Option<String>,
    /// How many of the most frequent tokens to list
    #[arg(long, default_value_t = TOP_TOKENS)]
    top: usize,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn report(counts: &[(&str, usize)], label: &str) {
    if counts.is_empty() {
        return;
    }
    println!("{label}:");
    for (value, n) in counts {
        println!("- {value}: {n}");
    }
}

fn process(args: &Args) -> Result<()> {
    info!(target: "kugumo", "read: {}", args.infile);
    let store = CorpusStore::load(&args.infile)?;
    let engine = Engine::new(Arc::new(store));
    let criteria = SearchCriteria::from_parts(
        args.keyword.as_deref(),
        args.tag.as_deref(),
        args.source.as_deref(),
        args.location.as_deref(),
    );
    let poems = engine.matching(&criteria);
    let ntokens: usize = poems.iter().map(|p| p.tokens.len()).sum();
    let token_counts = information::token_counts(&poems);
    println!("criteria: {}", criteria.pretty());
    println!("poems: {} (of {})", poems.len(), engine.store().len());
    println!("tokens: {ntokens} ({} distinct)", token_counts.len());
    report(&information::location_counts(&poems), "by location");
    report(&information::source_counts(&poems), "by source");
    report(&information::age_counts(&poems), "by age");
    report(&information::tag_counts(&poems), "by tag");
    let top = token_counts
        .iter()
        .copied()
        .sorted_by_key(|&(_, n)| Reverse(n))
        .take(args.top)
        .collect_vec();
    report(&top, "top tokens");
    Ok(())
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    match process(&args) {
        Ok(()) => (),
        Err(e) => {
            error!(target: "kugumo", "{e}");
            process::exit(1);
        }
    }
}
