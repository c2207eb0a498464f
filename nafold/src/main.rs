mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use nafold_rs::{FoldOptions, Folded, fold_many};
use tracing::{debug, info};

/// Predict the minimum free energy (kcal/mol) of a nucleic acid sequence
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// DNA or RNA sequence(s) to fold
    #[arg(required = true)]
    seq: Vec<String>,

    /// The temperature in celsius
    #[arg(short, long, default_value_t = 37.0)]
    temp: f64,

    /// Energy units per kcal/mol used while folding
    #[arg(long, default_value_t = 100)]
    scale: i64,

    /// List every structure of the fold with its free energy
    #[arg(short, long)]
    structs: bool,

    /// Increase logging, repeat for more (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all logging
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::setup_logging(args.verbose, args.quiet)?;
    debug!(?args, "parsed arguments");

    let options = FoldOptions::default()
        .with_temp(args.temp)
        .with_scale(args.scale);
    info!(seqs = args.seq.len(), temp = args.temp, "folding");

    let results = fold_many(&args.seq, &options);
    for (seq, folded) in args.seq.iter().zip(results) {
        let folded = folded.with_context(|| format!("failed to fold {seq}"))?;
        print_fold(seq, &folded, args.structs);
    }

    Ok(())
}

fn print_fold(seq: &str, folded: &Folded, structs: bool) {
    println!("{seq}");
    println!("{}", folded.dot_bracket());

    if structs {
        println!("{:>4} {:>4} {:>7}  description", "i", "j", "ddg");
        for value in folded.values() {
            let (i, j) = value.ij[0];
            println!("{i:>4} {j:>4} {:>7.2}  {}", value.e, value.desc);
        }
    }

    println!("{:.2}", folded.mfe());
}
