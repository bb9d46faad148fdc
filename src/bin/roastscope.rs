use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use std::io;
use std::path::PathBuf;

use roastscope::roast::{generate_roast, RoastOpts, RoastResult};
use roastscope::rows;

#[derive(Parser, Debug)]
#[command(name = "roastscope", version, about = "Behavioral-pattern roast of a social export")]
struct Cli {
    /// Export JSON file (`-` for stdin)
    input: String,

    /// Target calendar year (defaults to the current year)
    #[arg(long = "year")]
    year: Option<i32>,

    /// Seed the flavor/phrase RNG for reproducible output
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Pretty-print the result JSON
    #[arg(long = "pretty", default_value_t = false)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let export = if cli.input == "-" {
        rows::read_export(io::stdin().lock())?
    } else {
        rows::load_export(&PathBuf::from(&cli.input))?
    };

    let mut opts = RoastOpts::from_system_time();
    if let Some(year) = cli.year {
        opts.target_year = year;
    }

    let result: RoastResult = match cli.seed {
        Some(seed) => generate_roast(&export, &opts, &mut StdRng::seed_from_u64(seed)),
        None => generate_roast(&export, &opts, &mut rand::rng()),
    };

    let out = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{out}");
    Ok(())
}
