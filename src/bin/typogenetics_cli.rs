use rand::seq::SliceRandom;
use serde::Serialize;
use std::env;
use typogenetics::{enzyme::Enzyme, population::Simulation, strand::Strand};

const DEFAULT_GENERATIONS: u64 = 1000;
const DEFAULT_REPORT_EVERY: u64 = 100;
const MOST_COMMON_STRANDS: usize = 10;

#[derive(Serialize)]
struct EnzymeSummary {
    amino_acids: String,
    length: usize,
    binding_preference: String,
}

#[derive(Serialize)]
struct OperateSummary {
    strand: String,
    enzyme: String,
    bound_at: usize,
    products: Vec<String>,
}

fn usage() {
    eprintln!(
        "Usage:\n  \
  typogenetics_cli --version\n  \
  typogenetics_cli decode GENES\n  \
  typogenetics_cli operate STRAND ENZYME [INDEX]\n  \
  typogenetics_cli simulate [--generations N] [--seed S] [--report-every R]\n\n  \
  GENES and STRAND are base sequences over A/C/G/T; ENZYME is a list of\n  \
  instruction names joined by ' - ', e.g. 'rpy - cop - rpu - cut'.\n  \
  Without INDEX, a random binding site is chosen."
    );
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Could not serialize JSON output: {e}"))?;
    println!("{text}");
    Ok(())
}

fn summarize_enzyme(enzyme: &Enzyme) -> EnzymeSummary {
    EnzymeSummary {
        amino_acids: enzyme.to_string(),
        length: enzyme.len(),
        binding_preference: enzyme.binding_preference().to_string(),
    }
}

fn decode(genes: &str) -> Result<(), String> {
    let enzymes = Enzyme::from_gene_sequence(genes).map_err(|e| e.to_string())?;
    let summaries: Vec<EnzymeSummary> = enzymes.iter().map(summarize_enzyme).collect();
    print_json(&summaries)
}

fn operate(strand: &str, enzyme: &str, index: Option<&String>) -> Result<(), String> {
    let strand = Strand::from_sequence(strand).map_err(|e| e.to_string())?;
    let enzyme: Enzyme = enzyme.parse().map_err(|e: anyhow::Error| e.to_string())?;

    let bound_at = match index {
        Some(index) => index
            .parse::<usize>()
            .map_err(|_| format!("Invalid binding index '{index}'"))?,
        None => {
            let sites = enzyme.binding_sites(&strand);
            *sites.choose(&mut rand::thread_rng()).ok_or_else(|| {
                format!(
                    "No binding site for base {} on '{strand}'",
                    enzyme.binding_preference()
                )
            })?
        }
    };

    let strand_code = strand.to_string();
    let products = enzyme
        .operate(strand, bound_at)
        .map_err(|e| e.to_string())?;
    print_json(&OperateSummary {
        strand: strand_code,
        enzyme: enzyme.to_string(),
        bound_at,
        products: products.iter().map(|product| product.to_string()).collect(),
    })
}

fn simulate(args: &[String]) -> Result<(), String> {
    let mut generations = DEFAULT_GENERATIONS;
    let mut report_every = DEFAULT_REPORT_EVERY;
    let mut seed = None;

    let mut args = args.iter();
    while let Some(arg) = args.next() {
        let value = match arg.as_str() {
            "--generations" | "--report-every" | "--seed" => args
                .next()
                .ok_or_else(|| format!("Missing value for {arg}"))?,
            other => return Err(format!("Unknown simulate option '{other}'")),
        };
        match arg.as_str() {
            "--generations" => {
                generations = value
                    .parse()
                    .map_err(|e| format!("Invalid generation count: {e}"))?;
            }
            "--report-every" => {
                report_every = value
                    .parse()
                    .map_err(|e| format!("Invalid report interval: {e}"))?;
            }
            _ => {
                seed = Some(value.parse().map_err(|e| format!("Invalid seed: {e}"))?);
            }
        }
    }

    let mut simulation = Simulation::new(seed);
    while simulation.generation() < generations {
        let batch = report_every.min(generations - simulation.generation());
        simulation.run(batch).map_err(|e| e.to_string())?;
        print_json(&simulation.report(MOST_COMMON_STRANDS))?;
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() <= 1 {
        usage();
        return Err("Missing command".to_string());
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("typogenetics {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    match args[1].as_str() {
        "decode" => {
            if args.len() <= 2 {
                usage();
                return Err("Missing gene sequence".to_string());
            }
            decode(&args[2])
        }
        "operate" => {
            if args.len() <= 3 {
                usage();
                return Err("operate requires: STRAND ENZYME [INDEX]".to_string());
            }
            operate(&args[2], &args[3], args.get(4))
        }
        "simulate" => simulate(&args[2..]),
        command => {
            usage();
            Err(format!("Unknown command '{command}'"))
        }
    }
}
