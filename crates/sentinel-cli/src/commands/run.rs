use sentinel_core::errors::{PipelineError, SentinelErrorCode};
use sentinel_core::SentinelConfig;
use sentinel_engine::notify::DeliveryStatus;
use sentinel_engine::pipeline::{ComparisonOutcome, ScanOutcome, SentinelRunner};
use sentinel_storage::migrations;
use sentinel_storage::DatabaseManager;

pub fn init_db(config: &SentinelConfig) -> Result<(), String> {
    let path = config.storage.effective_db_path();
    let db = DatabaseManager::open(&path).map_err(|e| e.coded_string())?;
    let version = db
        .with_writer(migrations::current_version)
        .map_err(|e| e.coded_string())?;
    println!("store ready at {} (schema v{version})", path.display());
    Ok(())
}

pub fn scan(config: &SentinelConfig, target: &str, baseline: bool) -> Result<(), String> {
    let runner = SentinelRunner::from_config(config);
    match runner.scan(target, baseline).map_err(coded)? {
        ScanOutcome::NoBaseline => {
            println!("no baseline exists for {target}; run a baseline scan first");
        }
        ScanOutcome::Recorded { summary, comparison } => {
            println!(
                "{} recorded: inspection {}, {} new barriers, {} duplicates skipped",
                if baseline { "baseline scan" } else { "scan" },
                summary.inspection_id,
                summary.inserted_count(),
                summary.duplicates
            );
            if let Some(comparison) = comparison {
                print_comparison(&comparison);
            }
        }
    }
    Ok(())
}

pub fn compare_baseline(config: &SentinelConfig, url: &str) -> Result<(), String> {
    let runner = SentinelRunner::from_config(config);
    let outcome = runner.compare_baseline(url).map_err(coded)?;
    print_comparison(&outcome);
    Ok(())
}

fn print_comparison(outcome: &ComparisonOutcome) {
    match outcome {
        ComparisonOutcome::NoComparisonTarget => {
            println!("no non-baseline inspection to compare");
        }
        ComparisonOutcome::Compared { regressions, delivery } => {
            let count = regressions.regressions.len();
            match delivery {
                DeliveryStatus::Suppressed => println!("no regressions detected"),
                DeliveryStatus::Delivered => {
                    println!("{count} regressions detected; notification sent")
                }
                DeliveryStatus::Failed { reason } => {
                    println!("{count} regressions detected; notification failed: {reason}")
                }
            }
        }
    }
}

fn coded(e: PipelineError) -> String {
    e.coded_string()
}
