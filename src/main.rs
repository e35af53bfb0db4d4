// Entry point: loads a scenario, runs the sampling engine, reports per-column
// stats and optionally writes the sample matrix as CSV.
mod cli;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use argoscope::{RunConfig, Sampler};

fn main() -> Result<()> {
    let args = cli::Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).context("setting tracing subscriber")?;

    let mut config = RunConfig::load_or_default(&args.scenario_path);
    if let Some(n) = args.samples {
        config.sampling.n_samples = n;
    }
    if let Some(seed) = args.seed {
        config.sampling.seed = seed;
    }
    if let Some(workers) = args.workers {
        config.sampling.workers = workers;
    }

    let set = config.argument_set()?;
    let attacks = config.attacks(&set)?;
    info!(
        arguments = ?set.labels(),
        attacks = attacks.len(),
        n_samples = config.sampling.n_samples,
        seed = config.sampling.seed,
        "scenario loaded"
    );

    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_for_ctrlc = stop_flag.clone();
    ctrlc::set_handler(move || {
        stop_flag_for_ctrlc.store(true, Ordering::SeqCst);
    })
    .context("setting ctrl-c handler")?;

    let sampler = Sampler::new(&set, &attacks, &config.controlled_map(), config.sample_params())?
        .with_stop_flag(stop_flag);
    let matrix = if config.sampling.workers > 1 {
        sampler.run_parallel(config.sampling.workers)?
    } else {
        sampler.run()?
    };
    info!(
        rows = matrix.n_rows(),
        cols = matrix.n_cols(),
        "sampling finished"
    );

    for (j, label) in set.labels().iter().enumerate() {
        println!(
            "{label}: min {:.6}  mean {:.6}  max {:.6}",
            matrix.column_min(j),
            matrix.column_mean(j),
            matrix.column_max(j)
        );
    }

    if let Some(path) = &args.out {
        let mut file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
        matrix
            .write_csv(set.labels(), &mut file)
            .with_context(|| format!("writing {path}"))?;
        info!(path = %path, "sample matrix written");
    }

    Ok(())
}
