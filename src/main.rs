use std::io::{stdin, ErrorKind};
use std::path::PathBuf;

use clap::Parser;
use log::info;
use pss_assessment::{AnswerSheet, Error, Instrument, PSS10};

#[derive(Parser)]
#[command(about = "Answer the Perceived Stress Scale interactively")]
struct Args {
    /// Instrument definition (JSON) to use instead of the built-in PSS-10
    #[arg(long, env = "PSS_INSTRUMENT")]
    instrument: Option<PathBuf>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    let custom;
    let instrument: &Instrument = match args.instrument {
        Some(path) => {
            custom = Instrument::from_path(&path)?;
            info!("using instrument '{}' from {}", custom.name, path.display());
            &custom
        }
        None => &PSS10,
    };

    let mut buffer = String::new();
    let mut sheet = AnswerSheet::new(instrument);

    println!("{}", instrument.name);
    println!("{}", instrument.preamble);
    println!();
    while let Some(question) = sheet.next_question() {
        println!("{}. {}", question.id, question.text);
        for option in instrument.options() {
            print!("  {} => {}", option.value, option.label);
        }
        loop {
            println!();
            if stdin().read_line(&mut buffer)? == 0 {
                return Err(std::io::Error::new(
                    ErrorKind::UnexpectedEof,
                    "input ended before every question was answered",
                )
                .into());
            }
            let stored = store_answer(buffer.trim(), &mut sheet);
            buffer.clear();
            if stored {
                break;
            }
            print!("Please answer with a number from 0 to 4.");
        }
        println!();
    }

    let assessment = sheet.assess()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    println!("Your score: {} / {}", assessment.score, assessment.max_score);
    println!("{}", assessment.level);
    println!("{}", assessment.description);
    println!();
    for recommendation in &assessment.recommendations {
        println!("  - {}", recommendation);
    }
    if !assessment.content.is_empty() {
        println!();
        for item in &assessment.content {
            let premium = if item.premium { " [premium]" } else { "" };
            println!("  * {} ({:?}, {}){}", item.title, item.kind, item.duration, premium);
        }
    }
    Ok(())
}

fn store_answer(value: &str, sheet: &mut AnswerSheet) -> bool {
    value
        .parse::<i32>()
        .map_or(false, |value| sheet.push(value).is_ok())
}
