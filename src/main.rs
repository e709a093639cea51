#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod attack;
mod keychain;
mod ledger_handler;
mod logger;
mod pipeline;
mod submission;
mod telemetry;
mod validation;

use crate::attack::AttackKind;
use crate::keychain::Keychain;
use crate::ledger_handler::{MemoryLedger, RestLedger};
use crate::pipeline::Pipeline;
use crate::submission::{SubmissionReport, SubmitterConfig};
use crate::telemetry::CandidateUpdate;
use crate::validation::ValidationConfig;
use std::collections::HashSet;
use std::{env, sync::Arc, time::Duration};
use tokio::io::{AsyncBufReadExt, BufReader};

const FLUSH_INTERVAL: Duration = Duration::from_secs(5);
const FLUSH_BATCH: usize = 50;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() {
    let pipeline = Arc::new(init().await);

    let flusher = Arc::clone(&pipeline);
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(FLUSH_INTERVAL).await;
            flush(&flusher).await;
        }
    });

    // The feed delivers one JSON CandidateUpdate per line on stdin.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                match serde_json::from_str::<CandidateUpdate>(trimmed) {
                    Ok(candidate) => {
                        pipeline.validate_and_queue(candidate).await;
                    }
                    Err(err) => warn!("unparseable update dropped: {err}"),
                }
            }
            Ok(None) => break,
            Err(err) => fatal!("feed read failed: {err}"),
        }
    }

    info!("feed closed, flushing {} pending record(s)", pipeline.pending_count().await);
    while pipeline.pending_count().await > 0 {
        flush(&pipeline).await;
    }
}

async fn init() -> Pipeline {
    let validation = ValidationConfig::default();
    let keychain = match env::var("LEDGER_BASE_URL") {
        Ok(url) => {
            info!("submitting to the ledger at {url}");
            Keychain::new(
                Arc::new(RestLedger::new(&url)),
                validation,
                SubmitterConfig::default(),
            )
        }
        Err(_) => {
            info!("LEDGER_BASE_URL not set, running against the in-memory ledger");
            Keychain::new(
                Arc::new(MemoryLedger::new(validation)),
                validation,
                SubmitterConfig::default(),
            )
        }
    };
    let pipeline = Pipeline::new(keychain);
    if let Err(err) = pipeline.rebuild_state().await {
        fatal!("could not rebuild state from the ledger: {err}");
    }
    pipeline
}

async fn flush(pipeline: &Pipeline) {
    let report = pipeline.submit_pending(FLUSH_BATCH).await;
    if report.outcomes().is_empty() {
        return;
    }
    info!("{report}");
    if env::var("SIMULATE_ATTACKS").is_ok() {
        attack_drill(pipeline, &report).await;
    }
}

/// Runs every attack kind against each aircraft the flush just confirmed.
/// Drills go through the identical validate-then-submit path as real
/// traffic, so a committed drill means a mistuned plausibility ceiling.
async fn attack_drill(pipeline: &Pipeline, report: &SubmissionReport) {
    let store = pipeline.keychain().store();
    let mut drilled: HashSet<&str> = HashSet::new();
    for outcome in report.outcomes() {
        if !outcome.status().is_confirmed() || !drilled.insert(outcome.aircraft_id()) {
            continue;
        }
        let Some(target) = store.get(outcome.aircraft_id()).await else {
            continue;
        };
        for kind in [AttackKind::Replay, AttackKind::Spoof, AttackKind::Tamper] {
            pipeline.simulate_attack(kind, &target).await;
        }
    }
}
