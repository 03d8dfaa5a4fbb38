//! MESI cache-coherence simulator CLI.
//!
//! This binary wires the command line to the `mesi_core` library. It performs:
//! 1. **Argument parsing:** Trace prefix, cache geometry, and output path.
//! 2. **Simulation:** Builds the four-core system and runs it to completion.
//! 3. **Reporting:** Writes the statistics report to the output file, falling
//!    back to stdout with a warning if the file cannot be opened.

use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::process;

use mesi_core::config::{CacheGeometry, Config};
use mesi_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "mesisim",
    author,
    version,
    about = "Cycle-accurate MESI snooping-bus cache coherence simulator",
    long_about = "Simulates four cores with private L1 caches kept coherent by the MESI \
protocol over a shared snooping bus.\n\nEach core replays <prefix>_proc0.trace .. \
<prefix>_proc3.trace; every line is an R/W operation and a 32-bit hex address.\n\n\
Example:\n  mesisim -t traces/app1 -s 5 -E 2 -b 5 -o app1.out"
)]
struct Cli {
    /// Name of the parallel application (e.g. app1) whose four traces are used.
    #[arg(short = 't', long = "trace")]
    trace: String,

    /// Number of set index bits (sets per cache = 2^s).
    #[arg(short = 's', long = "set-bits", default_value_t = 6)]
    set_bits: u32,

    /// Associativity (cache lines per set).
    #[arg(short = 'E', long = "assoc", default_value_t = 2)]
    assoc: u32,

    /// Number of block bits (block size = 2^b bytes).
    #[arg(short = 'b', long = "block-bits", default_value_t = 5)]
    block_bits: u32,

    /// Write the report to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config::new(
        cli.trace,
        CacheGeometry::new(cli.set_bits, cli.assoc, cli.block_bits),
    );

    let mut sim = match Simulator::new(config) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    };

    sim.run();
    let report = sim.report();

    match cli.output {
        Some(path) => match File::create(&path) {
            Ok(mut file) => {
                if let Err(err) = report.write_to(&mut file) {
                    eprintln!("Error writing {}: {}", path.display(), err);
                    process::exit(1);
                }
            }
            Err(err) => {
                eprintln!(
                    "warning: cannot open output file {}: {}; writing to stdout",
                    path.display(),
                    err
                );
                print!("{}", report);
            }
        },
        None => print!("{}", report),
    }
}
