//! Command line tool for fission product element distributions

// standard library
use std::path::PathBuf;
use std::str::FromStr;

// external crates
use clap::{ArgAction, Parser};
use log::{error, info};

// ftools modules
use ftools::chain::{compute_element_distribution, Config, ElementYield, DEFAULT_MAX_DEPTH};
use ftools::format::{f, table_row, NumFormat};
use ftools::iaea::{DataCache, IaeaProvider, Nuclide, DEFAULT_TIMEOUT};

/// Decayed fission product yields by element
///
/// Independent thermal fission yields for the fissile nuclide are fetched
/// from the IAEA chart of nuclides. Every product is decayed through all
/// nuclides with half-lives below the cutoff and the remaining atoms per
/// fission are summed by element.
#[derive(Parser, Debug)]
#[command(name = "ftools", version, about, long_about)]
struct Cli {
    /// Fissile nuclide, e.g. pu241, Pu-241, 241Pu
    nuclide: String,

    /// Half-life cutoff (years)
    #[arg(short, long, default_value_t = 31.0)]
    years: f64,

    /// Decay time (years), defaults to the cutoff
    #[arg(short, long)]
    elapsed_years: Option<f64>,

    /// Ignore independent yields below this
    #[arg(short, long, default_value_t = 1e-4)]
    min_yield: f64,

    /// Recursion limit for decay chains
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Directory for cached IAEA data
    #[arg(short, long, default_value = "./data")]
    cache: PathBuf,

    /// Request timeout (s)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT)]
    timeout: u64,

    /// Write results as JSON
    #[arg(short, long)]
    json: bool,

    /// Remove all cached data before running
    #[arg(long)]
    clear_cache: bool,

    /// Show a progress bar
    #[arg(short, long)]
    progress: bool,

    /// Verbose logging (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            cutoff_years: self.years,
            elapsed_years: self.elapsed_years.unwrap_or(self.years),
            min_yield: self.min_yield,
            max_depth: self.max_depth,
            progress: self.progress,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging_init(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        error!("{e}");
        let mut source = e.source();
        while let Some(cause) = source {
            error!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let fissile = Nuclide::from_str(&cli.nuclide)?.to_isotope()?;

    let cache = DataCache::new(&cli.cache).with_timeout(cli.timeout);
    if cli.clear_cache {
        cache.clear()?;
    }

    let config = cli.config();
    info!(
        "Decaying fission products of {fissile} for {} years, cutoff {} years",
        config.elapsed_years, config.cutoff_years
    );

    let provider = IaeaProvider::new(cache);
    let rows = compute_element_distribution(fissile, provider.clone(), &provider, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_table(&rows);
    }

    Ok(())
}

fn print_table(rows: &[ElementYield]) {
    for row in rows {
        println!(
            "{}",
            table_row(&[f!("{:<2}", row.symbol), f!("{:.6}", row.fraction)])
        );
    }
    let total: f64 = rows.iter().map(|r| r.fraction).sum();
    info!("Total of {} atoms per fission", total.sci(5, 2));
}

fn logging_init(verbose: u8, quiet: bool) {
    let result = stderrlog::new()
        .modules(["ftools", "ftools_chain", "ftools_iaea"])
        .quiet(quiet)
        .verbosity(usize::from(verbose) + 2)
        .show_module_names(verbose > 1)
        .init();

    if let Err(e) = result {
        eprintln!("Unable to initialise logging: {e}");
    }
}
