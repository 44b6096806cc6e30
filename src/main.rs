// src/main.rs

use typedag::listing::{self, ListingParams};
use typedag::{Pipeline, cli, logging};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("typedag error: {err:?}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;

    let pipeline = Pipeline::new(listing::steps())?;

    if args.dry_run {
        for (idx, batch) in pipeline.plan()?.iter().enumerate() {
            println!("batch {idx}: {}", batch.join(", "));
        }
        return Ok(());
    }

    let params = ListingParams {
        origin: args.origin,
        path: args.path,
        site_code: args.site,
    };

    let store = pipeline.build_with(params).await?;
    let view = listing::to_view(&store)?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
