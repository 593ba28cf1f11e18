use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{value_parser, Arg, ArgMatches, Command};
use dotenv::dotenv;
use tracing::{error, info, warn};

use dumpster_site::app::app::{App, AppResult};
use dumpster_site::app::prerender::prerender;
use dumpster_site::config::{AppConfig, MongoConfig, SeedConfig};
use dumpster_site::repository::catalog_repo::MongoCatalogRepository;
use dumpster_site::repository::location_repo::MongoLocationRepository;
use dumpster_site::repository::mongo;
use dumpster_site::service::location_service::LocationServiceImpl;
use dumpster_site::service::seed_service::{SeedDataset, SeedService, SeedServiceImpl};
use dumpster_site::util::logger::Logger;
use dumpster_site::view::layout::SiteInfo;

fn cli() -> Command {
    Command::new("dumpster-site")
        .about("Dumpster rental site: web server, data seeding and static export")
        .subcommand(Command::new("serve").about("Run the web server (default)"))
        .subcommand(
            Command::new("seed")
                .about("Upsert the JSON datasets into MongoDB")
                .arg(
                    Arg::new("data-dir")
                        .long("data-dir")
                        .value_name("DIR")
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory holding states.json, cities.json, dumpster_sizes.json and service_types.json"),
                )
                .arg(
                    Arg::new("batch-size")
                        .long("batch-size")
                        .value_name("N")
                        .value_parser(value_parser!(usize))
                        .help("Concurrent city upserts per batch"),
                ),
        )
        .subcommand(
            Command::new("prerender")
                .about("Write every page and the sitemap to a directory")
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_name("DIR")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
}

async fn serve() -> AppResult<()> {
    let app = App::new().await?;
    app.start().await
}

async fn seed(args: &ArgMatches) -> AppResult<()> {
    let mut config = SeedConfig::from_env()?;
    if let Some(dir) = args.get_one::<PathBuf>("data-dir") {
        config.data_dir = dir.clone();
    }
    if let Some(batch_size) = args.get_one::<usize>("batch-size") {
        config.batch_size = *batch_size;
    }
    config.validate()?;

    let dataset = SeedDataset::load(&config.data_dir)?;
    let db = mongo::connect(&MongoConfig::from_env()?).await?;
    mongo::ensure_indexes(&db).await?;

    let seeder = SeedServiceImpl::new(
        Arc::new(MongoLocationRepository::new(&db)),
        Arc::new(MongoCatalogRepository::new(&db)),
        config.batch_size,
    );
    seeder.run(&dataset).await?;
    Ok(())
}

async fn export(args: &ArgMatches) -> AppResult<()> {
    let out = args
        .get_one::<PathBuf>("out")
        .cloned()
        .ok_or("--out is required")?;
    let config = AppConfig::from_env();
    let db = mongo::connect(&MongoConfig::from_env()?).await?;
    let service = LocationServiceImpl::new(
        Arc::new(MongoLocationRepository::new(&db)),
        Arc::new(MongoCatalogRepository::new(&db)),
    );
    prerender(&service, &SiteInfo::from(&config), &out).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let dotenv_result = dotenv();

    // Guards flush the file writers on drop
    let _logger = match Logger::new() {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialise logging: {}", e);
            process::exit(1);
        }
    };

    match dotenv_result {
        Ok(_) => info!("Loaded .env file"),
        Err(e) => warn!("Failed to load .env file: {} (using system env vars)", e),
    }

    let matches = cli().get_matches();
    let result = match matches.subcommand() {
        Some(("seed", args)) => seed(args).await,
        Some(("prerender", args)) => export(args).await,
        _ => serve().await,
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
