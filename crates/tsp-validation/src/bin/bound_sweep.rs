//! bound-sweep: cross-checks branch and bound against enumeration on random
//! symmetric instances and writes one CSV row per instance.

use clap::Parser;
use crossbeam_channel::unbounded;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::thread;
use tsp_core::MIN_CITIES;
use tsp_validation::{random_symmetric_matrix, validate_instance, InstanceReport};

#[derive(Parser, Debug)]
#[command(name = "bound-sweep")]
#[command(about = "Validate branch-and-bound bounds against brute force")]
#[command(version)]
struct Args {
    /// Smallest instance size
    #[arg(long, default_value_t = 3)]
    min_cities: usize,

    /// Largest instance size (enumeration is factorial; keep this small)
    #[arg(long, default_value_t = 8)]
    max_cities: usize,

    /// Instances per size
    #[arg(short, long, default_value_t = 20)]
    instances: usize,

    /// Base seed; instance k of size n uses seed + n * instances + k
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Largest off-diagonal cost
    #[arg(long, default_value_t = 100)]
    max_cost: u64,

    /// Worker threads
    #[arg(short, long, default_value_t = 4)]
    workers: usize,

    /// Output CSV file
    #[arg(short, long, default_value = "bound_sweep.csv")]
    output: PathBuf,

    /// Print the unsound reports as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct Job {
    index: usize,
    n: usize,
    seed: u64,
}

fn main() {
    if let Err(e) = run() {
        log::error!("bound-sweep failed: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .init();

    let min_cities = args.min_cities.max(MIN_CITIES);
    if args.max_cities < min_cities {
        return Err(format!(
            "max-cities ({}) must be at least {min_cities}",
            args.max_cities
        )
        .into());
    }

    let (job_tx, job_rx) = unbounded::<Job>();
    let (report_tx, report_rx) = unbounded();

    let mut total = 0;
    for n in min_cities..=args.max_cities {
        for k in 0..args.instances {
            let seed = args
                .seed
                .wrapping_add((n * args.instances + k) as u64);
            job_tx.send(Job { index: total, n, seed })?;
            total += 1;
        }
    }
    drop(job_tx);
    log::info!(
        "sweeping {total} instances (n = {min_cities}..={}) on {} workers",
        args.max_cities,
        args.workers.max(1)
    );

    let max_cost = args.max_cost;
    thread::scope(|scope| {
        for _ in 0..args.workers.max(1) {
            let job_rx = job_rx.clone();
            let report_tx = report_tx.clone();
            scope.spawn(move || {
                for job in job_rx.iter() {
                    let mut rng = Xoshiro256PlusPlus::seed_from_u64(job.seed);
                    let report = random_symmetric_matrix(job.n, max_cost, &mut rng)
                        .and_then(|m| validate_instance(&m));
                    if report_tx.send((job.index, job.seed, report)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(report_tx);

    let mut reports: Vec<(usize, u64, InstanceReport)> = Vec::with_capacity(total);
    for (index, seed, report) in report_rx.iter() {
        reports.push((index, seed, report?));
    }
    reports.sort_by_key(|(index, _, _)| *index);

    let mut out = BufWriter::new(File::create(&args.output)?);
    writeln!(out, "seed,{}", InstanceReport::CSV_HEADER)?;
    for (_, seed, report) in &reports {
        writeln!(out, "{seed},{}", report.to_csv_row())?;
    }
    out.flush()?;

    let unsound: Vec<&InstanceReport> = reports
        .iter()
        .map(|(_, _, r)| r)
        .filter(|r| !r.is_sound())
        .collect();
    let mean_gap = reports.iter().map(|(_, _, r)| r.tight_root_gap).sum::<f64>()
        / reports.len().max(1) as f64;
    log::info!(
        "{} instances, {} unsound, mean root gap {:.4}, written to {}",
        reports.len(),
        unsound.len(),
        mean_gap,
        args.output.display()
    );

    if args.json && !unsound.is_empty() {
        println!("{}", serde_json::to_string_pretty(&unsound)?);
    }
    if !unsound.is_empty() {
        return Err(format!("{} unsound instances", unsound.len()).into());
    }
    Ok(())
}
