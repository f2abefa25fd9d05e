use anyhow::Context;
use argo_processor::cli::{self, Args};
use argo_processor::view::{FloatSummary, summarize};
use argo_processor::{AggregationCache, IngestionPipeline};
use clap::Parser;
use std::process;

const EXIT_NOT_FOUND: i32 = 2;

fn main() {
    // Parse command line arguments
    let args = Args::parse();
    cli::setup_logging(&args);

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(run(args)) {
        Ok(code) => process::exit(code),
        Err(error) => {
            // Pass-level failure: nothing could be served
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

async fn run(args: Args) -> anyhow::Result<i32> {
    let config = args
        .load_config()
        .context("Failed to load configuration")?;
    let limits = config.view;

    let cache = AggregationCache::new(IngestionPipeline::new(config));

    if let Some(id) = &args.float_id {
        let Some(record) = cache.get_one(id).await.context("Failed to build aggregate")? else {
            eprintln!("Float not found: {}", id);
            return Ok(EXIT_NOT_FOUND);
        };

        if args.json {
            let summary = FloatSummary::from_record(&record, &limits);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            cli::print_record(&record);
        }
        return Ok(0);
    }

    let aggregate = cache.get_all().await.context("Failed to build aggregate")?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summarize(&aggregate, &limits))?
        );
    } else {
        cli::print_aggregate(&aggregate);
    }

    Ok(0)
}
