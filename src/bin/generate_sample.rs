//! Generate a synthetic plate-reader export as a JSON workbook.
//!
//! The first sheet is `Input` with the five template rows; measurement cells
//! are floats and the replicate-count column is an integer, so the file
//! exercises the float-only filtering of `picogreen analyze`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use picogreen::error::AppError;
use picogreen::io::sample::{SamplePlate, synthetic_plate};

#[derive(Debug, Parser)]
#[command(name = "generate-sample", about = "Write a synthetic Picogreen plate export")]
struct Args {
    /// Output workbook (.json).
    #[arg(default_value = "sample_plate.json")]
    output: PathBuf,

    /// RNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Fluorescence per pg/µl.
    #[arg(long, default_value_t = 12.5)]
    slope: f64,

    /// Blank fluorescence.
    #[arg(long, default_value_t = 180.0)]
    blank: f64,

    /// True concentration of the undiluted sample [pg/µl].
    #[arg(long, default_value_t = 8000.0)]
    concentration: f64,

    /// Relative noise on every reading.
    #[arg(long, default_value_t = 0.02)]
    noise: f64,
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let plate = SamplePlate {
        slope: args.slope,
        blank: args.blank,
        concentration: args.concentration,
        noise: args.noise,
    };
    let workbook = synthetic_plate(&plate, args.seed)?;

    let path = &args.output;
    workbook.write_json(path)?;
    println!("Wrote synthetic plate to '{}'", path.display());
    Ok(())
}
