use citymatch::cli::{execute, load_records, parse_log_level, Args};
use citymatch::CityCache;
use clap::Parser;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_log_level(&args.log_level))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting CityMatch v{}", env!("CARGO_PKG_VERSION"));
    info!("City table: {:?}", args.data);

    let records = load_records(&args.data)?;
    info!("Loaded {} city records", records.len());

    let cache = CityCache::new(records);
    let output = execute(&args.command, &cache)?;
    println!("{output}");
    Ok(())
}
