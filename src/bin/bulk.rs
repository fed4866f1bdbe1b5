use clap::Parser;
use log::{info, warn};
use pss_assessment::bulk::score_row;
use pss_assessment::{read_bulk, write_results, Error, Instrument, Scorer, PSS10};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Score a CSV of respondents (id followed by one answer per question)
#[derive(Parser)]
struct Args {
    path: PathBuf,
    /// Instrument definition (JSON) to use instead of the built-in PSS-10
    #[arg(long, env = "PSS_INSTRUMENT")]
    instrument: Option<PathBuf>,
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    let custom;
    let instrument: &Instrument = match args.instrument {
        Some(ref path) => {
            custom = Instrument::from_path(path)?;
            &custom
        }
        None => &PSS10,
    };
    let scorer = Scorer::new(instrument);
    info!(
        "scoring {} with '{}'",
        args.path.display(),
        scorer.instrument().name
    );

    let reader = BufReader::new(File::open(&args.path)?);
    let mut rows = Vec::new();
    let mut skipped = 0;
    for row in read_bulk(reader) {
        match row.and_then(|(id, answers)| score_row(&scorer, id, &answers)) {
            Ok(scored) => rows.push(scored),
            Err(e) => {
                warn!("skipping row: {}", e);
                skipped += 1;
            }
        }
    }
    info!("scored {} rows, skipped {}", rows.len(), skipped);

    write_results(std::io::stdout().lock(), &rows)
}
