use anyhow::{Context, Result};
use clap::Parser;
use cliclack::log;
use kugumo::corpus::CorpusStore;
use kugumo::criteria::SearchCriteria;
use kugumo::engine::Engine;
use kugumo::information;
use kugumo::input::IPoem;
use std::sync::Arc;
use std::{fs, io};

/// Explore a poem corpus interactively
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Corpus file (JSON)
    infile: String,
    /// Default output file for saved records
    #[arg(long, default_value = "results.json")]
    outfile: String,
}

#[derive(Clone, PartialEq, Eq)]
enum Field {
    Location,
    Tag,
    Source,
}

#[derive(Clone, PartialEq, Eq)]
enum Action {
    Keyword,
    Pick(Field),
    Clear,
    SaveRecords,
    SaveCloudText,
    Quit,
}

fn pick_value(label: &str, counts: &[(&str, usize)], total: usize) -> Result<Option<String>> {
    let mut items = vec![];
    items.push((None, format!("Any {label}"), ""));
    for &(value, count) in counts {
        items.push((Some(value), format!("{value} ({count}/{total} poems)"), ""));
    }
    let choice = cliclack::select(format!("Which {label}?"))
        .items(&items)
        .interact()?;
    Ok(choice.map(|v| v.to_owned()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    cliclack::intro("kugumo-explore")?;
    log::info(format!("Reading {}...", args.infile))?;
    let indata =
        fs::read_to_string(&args.infile).with_context(|| format!("cannot read {}", args.infile))?;
    let poems: Vec<IPoem> =
        serde_json::from_str(&indata).with_context(|| format!("cannot parse {}", args.infile))?;
    let engine = Engine::new(Arc::new(CorpusStore::from_poems(poems)));
    let mut keyword: Option<String> = None;
    let mut tag: Option<String> = None;
    let mut source: Option<String> = None;
    let mut location: Option<String> = None;
    loop {
        let criteria = SearchCriteria::from_parts(
            keyword.as_deref(),
            tag.as_deref(),
            source.as_deref(),
            location.as_deref(),
        );
        let matched = engine.matching(&criteria);
        let options = textwrap::Options::new(70).subsequent_indent(" ");
        let line = format!(
            "{}: {} of {} poems match",
            criteria.pretty(),
            matched.len(),
            engine.store().len()
        );
        cliclack::note("Criteria", textwrap::fill(&line, &options))?;

        let mut items = vec![];
        items.push((Action::Keyword, "Set the keyword filter", ""));
        items.push((Action::Pick(Field::Location), "Pick a location", ""));
        items.push((Action::Pick(Field::Tag), "Pick a tag", ""));
        items.push((Action::Pick(Field::Source), "Pick a source", ""));
        if !criteria.is_empty() {
            items.push((Action::Clear, "Clear all criteria", ""));
        }
        items.push((
            Action::SaveRecords,
            "Write matching records to a JSON file",
            "",
        ));
        items.push((Action::SaveCloudText, "Write word-cloud text to a file", ""));
        items.push((Action::Quit, "Quit", ""));
        let choice = cliclack::select("Action?").items(&items).interact()?;
        match choice {
            Action::Quit => break,
            Action::Keyword => {
                let current = keyword.clone().unwrap_or_default();
                let entered: String = cliclack::input("Keyword (substring of the poem text)")
                    .default_input(&current)
                    .interact()?;
                keyword = Some(entered);
            }
            Action::Pick(Field::Location) => {
                location = pick_value(
                    "location",
                    &information::location_counts(&matched),
                    matched.len(),
                )?;
            }
            Action::Pick(Field::Tag) => {
                tag = pick_value("tag", &information::tag_counts(&matched), matched.len())?;
            }
            Action::Pick(Field::Source) => {
                source = pick_value(
                    "source",
                    &information::source_counts(&matched),
                    matched.len(),
                )?;
            }
            Action::Clear => {
                keyword = None;
                tag = None;
                source = None;
                location = None;
            }
            Action::SaveRecords => {
                let filename: String = cliclack::input("file name")
                    .default_input(&args.outfile)
                    .interact()?;
                let file = fs::File::create(&filename)?;
                let writer = io::BufWriter::new(file);
                serde_json::to_writer_pretty(writer, &engine.search(&criteria))?;
                log::info(format!("Wrote {} records to {}", matched.len(), filename))?;
            }
            Action::SaveCloudText => {
                let filename: String = cliclack::input("file name")
                    .default_input("cloud.txt")
                    .interact()?;
                fs::write(&filename, engine.aggregate_tokens(&criteria))
                    .with_context(|| format!("cannot write {filename}"))?;
                log::info(format!("Wrote cloud text to {filename}"))?;
            }
        }
    }
    cliclack::outro("Bye!")?;
    Ok(())
}
