use cidr_calculator::output::{print_conflicts_csv, print_descriptor, print_summary};
use cidr_calculator::{AddressIndex, Config, ReindexWorker, Resolver};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Csv,
    Summary,
}

/// Resolve CIDR notations and check them against a data-center catalog.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CIDR to resolve or check, e.g. 10.0.0.0/24
    cidr: Option<String>,

    /// Check the CIDR for conflicts with the catalog
    #[arg(short, long)]
    check: bool,

    /// Data center keys or names to check against, repeatable
    #[arg(short = 'd', long = "data-center")]
    data_centers: Vec<String>,

    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Directory of network documents
    #[arg(long)]
    documents_dir: Option<PathBuf>,

    #[arg(long)]
    catalog_file: Option<PathBuf>,

    /// Seconds between index rebuilds
    #[arg(long)]
    reindex_interval: Option<u64>,

    /// Keep the index worker running until Ctrl-C
    #[arg(short, long)]
    watch: bool,
}

fn init_logging() {
    if log4rs::init_file("log4rs.yml", Default::default()).is_ok() {
        return;
    }
    let stderr = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l:5})} {t} - {m}{n}")))
        .build();
    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info));
    match config {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("Error initializing logging: {e}");
            }
        }
        Err(e) => eprintln!("Error building logging config: {e}"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    init_logging();
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(dir) = cli.documents_dir {
        config.documents_dir = dir;
    }
    if let Some(file) = cli.catalog_file {
        config.catalog_file = file;
    }
    if let Some(secs) = cli.reindex_interval.filter(|s| *s > 0) {
        config.reindex_interval = Duration::from_secs(secs);
    }

    let index = Arc::new(AddressIndex::open(config.index_options()));
    let (worker, ready) =
        ReindexWorker::new(index.clone(), config.documents_dir.clone(), config.reindex_interval).spawn()?;
    if let Err(e) = ready.wait().await {
        log::warn!("Serving from the last persisted index: {e}");
    }
    let resolver = Resolver::from_config(index, &config);

    let outcome = run_query(&resolver, cli.cidr.as_deref(), cli.check, &cli.data_centers, cli.format);

    if cli.watch {
        log::info!("Watching {}, Ctrl-C to stop", config.documents_dir.display());
        tokio::signal::ctrl_c().await?;
    }
    worker.shutdown().await?;
    log::info!("#End main()");
    outcome
}

fn run_query(
    resolver: &Resolver,
    cidr: Option<&str>,
    check: bool,
    data_centers: &[String],
    format: Format,
) -> Result<(), Box<dyn Error>> {
    let Some(cidr) = cidr else {
        return Ok(());
    };
    if check {
        let result = resolver.check_conflicts(cidr, data_centers)?;
        match format {
            Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            Format::Csv => print_conflicts_csv(&result),
            Format::Summary => print_summary(&result),
        }
    } else {
        let subnet = resolver.resolve(cidr)?;
        match format {
            Format::Json => println!("{}", serde_json::to_string_pretty(&subnet)?),
            Format::Csv | Format::Summary => print_descriptor(&subnet),
        }
    }
    Ok(())
}
