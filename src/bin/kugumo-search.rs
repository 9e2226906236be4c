use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use kugumo::corpus::CorpusStore;
use kugumo::criteria::SearchCriteria;
use kugumo::engine::Engine;
use kugumo::errors::Result;
use kugumo::output::{DisplayRecord, OError};
use log::{error, info};
use std::sync::Arc;
use std::{error, fs, io, process};

/// Search a poem corpus and emit the matching records as JSON
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
    /// Read criteria from a JSON request file instead
    #[arg(long, conflicts_with_all = ["keyword", "tag", "source", "location"])]
    request: Option<String>,
    /// Output file (JSON); stdout if omitted
    #[arg(short, long)]
    output: Option<String>,
    /// Pretty print results
    #[arg(short, long)]
    pretty: bool,
    /// Report errors as a JSON file
    #[arg(long)]
    error_file: Option<String>,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn get_criteria(args: &Args) -> Result<SearchCriteria> {
    match &args.request {
        Some(path) => {
            info!(target: "kugumo", "read request: {path}");
            let data = fs::read_to_string(path)?;
            SearchCriteria::from_json(&data)
        }
        None => Ok(SearchCriteria::from_parts(
            args.keyword.as_deref(),
            args.tag.as_deref(),
            args.source.as_deref(),
            args.location.as_deref(),
        )),
    }
}

fn write_results<W: io::Write>(writer: W, pretty: bool, results: &[DisplayRecord]) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, results)?;
    } else {
        serde_json::to_writer(writer, results)?;
    }
    Ok(())
}

fn process(args: &Args) -> Result<()> {
    info!(target: "kugumo", "read: {}", args.infile);
    let store = CorpusStore::load(&args.infile)?;
    let engine = Engine::new(Arc::new(store));
    let criteria = get_criteria(args)?;
    let results = engine.search(&criteria);
    info!(target: "kugumo", "{}: {} poems", criteria.pretty(), results.len());
    match &args.output {
        Some(path) => {
            let file = fs::File::create(path)?;
            write_results(io::BufWriter::new(file), args.pretty, &results)?;
        }
        None => {
            write_results(io::stdout().lock(), args.pretty, &results)?;
            println!();
        }
    }
    Ok(())
}

fn store_error(error_file: &str, e: &dyn error::Error) -> Result<()> {
    let error = OError {
        error: format!("{e}"),
    };
    let file = fs::File::create(error_file)?;
    let writer = io::BufWriter::new(file);
    serde_json::to_writer(writer, &error)?;
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
            match args.error_file {
                Some(filename) => match store_error(&filename, &*e) {
                    Ok(()) => {
                        info!(target: "kugumo", "error reported: {e}");
                    }
                    Err(e2) => {
                        error!(target: "kugumo", "{e}");
                        error!(target: "kugumo", "{e2}");
                    }
                },
                None => error!(target: "kugumo", "{e}"),
            }
            process::exit(1);
        }
    }
}
