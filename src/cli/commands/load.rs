//! `load`: import a Parquet file into the collection.

use super::shared::{load_store_config, print_load_report, setup_logging};
use crate::cli::args::LoadArgs;
use crate::config::LoaderConfig;
use crate::error::{RecordsError, Result};
use crate::loader::BulkLoader;
use crate::models::LoadReport;
use crate::store::{MongoStore, RecordStore};
use tracing::{debug, info};

pub async fn run_load(args: LoadArgs) -> Result<LoadReport> {
    setup_logging(&args.log);
    debug!("Command line arguments: {:?}", args);

    let config = args.apply(LoaderConfig::from_env());
    config.validate()?;

    let loader = BulkLoader::new(config).with_progress(args.show_progress());

    let report = if loader.config().dry_run {
        loader.dry_run().await?
    } else {
        let store_config = load_store_config(&args.store)?;
        let store = MongoStore::connect(&store_config).await?;

        let outcome = tokio::select! {
            result = loader.load_into(&store) => result,
            _ = tokio::signal::ctrl_c() => Err(RecordsError::Interrupted {
                reason: "load interrupted by user".to_string(),
            }),
        };
        store.close().await;
        outcome?
    };

    info!(
        "Loaded {} of {} rows from {}",
        report.records_inserted,
        report.rows_read,
        report.input_path.display()
    );
    if args.show_progress() {
        print_load_report(&report);
    }

    Ok(report)
}
