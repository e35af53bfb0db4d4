use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Scenario path (TOML); a template is written if the file is missing
    #[arg(value_name = "SCENARIO_PATH", default_value = "scenario.toml")]
    pub scenario_path: String,

    /// Override the number of samples
    #[arg(long)]
    pub samples: Option<usize>,

    /// Override the random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the worker thread count (1 = sequential)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Write the sample matrix to a CSV file
    #[arg(long)]
    pub out: Option<String>,

    /// Verbose logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
