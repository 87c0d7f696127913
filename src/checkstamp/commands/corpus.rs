//! # Corpus-wide Stamping
//!
//! Stamps every document the store lists. Documents are handled in fixed batches of
//! [`BATCH_SIZE`]: each document in a batch runs on the blocking pool at the same time,
//! the batch is awaited as a whole, progress is reported, and the loop sleeps for
//! [`BATCH_YIELD`] before starting the next one.
//!
//! A document that fails to read or write is logged, counted as processed, and adds
//! nothing. It never stops the batch or the run.

use crate::commands::helpers::{created_dates, files, fix_document};
use crate::commands::{CmdMessage, CmdResult};
use crate::config::StampConfig;
use crate::error::Result;
use crate::model::DocumentId;
use crate::progress::ProgressSink;
use crate::store::DocumentStore;
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

pub const BATCH_SIZE: usize = 10;
pub const BATCH_YIELD: Duration = Duration::from_millis(10);

pub const CORPUS_FAILED: &str = "Error occurred while processing vault. Check the log for details.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusReport {
    pub total: usize,
    pub processed: usize,
    pub added: usize,
    /// Size of each batch, in processing order
    pub batch_sizes: Vec<usize>,
    pub failed: Vec<DocumentId>,
}

pub async fn run<S, P>(
    store: Arc<S>,
    config: &StampConfig,
    now: DateTime<Local>,
    progress: &mut P,
) -> Result<CmdResult>
where
    S: DocumentStore + 'static,
    P: ProgressSink + ?Sized,
{
    let mut result = CmdResult::default();

    let ids = match store.list_documents() {
        Ok(ids) => ids,
        Err(e) => {
            error!(error = %e, "could not enumerate documents");
            result.add_message(CmdMessage::error(CORPUS_FAILED));
            return Ok(result);
        }
    };

    let mut report = CorpusReport {
        total: ids.len(),
        ..CorpusReport::default()
    };
    progress.set_message(&format!("Processing {}...", files(report.total)));

    for (batch_no, batch) in ids.chunks(BATCH_SIZE).enumerate() {
        let handles: Vec<_> = batch
            .iter()
            .cloned()
            .map(|id| {
                let store = Arc::clone(&store);
                let config = config.clone();
                let doc = id.clone();
                let handle = tokio::task::spawn_blocking(move || {
                    fix_document(store.as_ref(), &doc, &config, now)
                });
                (id, handle)
            })
            .collect();

        let mut batch_added = 0;
        for (id, handle) in handles {
            report.processed += 1;
            match handle.await {
                Ok(Ok(added)) => batch_added += added,
                Ok(Err(e)) => {
                    error!(path = %id, error = %e, "failed to stamp document");
                    report.failed.push(id);
                }
                Err(e) => {
                    error!(path = %id, error = %e, "stamping task did not complete");
                    report.failed.push(id);
                }
            }
        }

        report.added += batch_added;
        report.batch_sizes.push(batch.len());
        debug!(batch = batch_no + 1, size = batch.len(), batch_added, "batch complete");

        progress.set_message(&format!(
            "Processed {}/{} files... ({} added)",
            report.processed,
            report.total,
            created_dates(report.added)
        ));
        tokio::time::sleep(BATCH_YIELD).await;
    }

    progress.hide();
    info!(
        added = report.added,
        processed = report.processed,
        failed = report.failed.len(),
        "corpus run complete"
    );

    result.add_message(CmdMessage::success(format!(
        "Added {} across {}",
        created_dates(report.added),
        files(report.processed)
    )));
    if !report.failed.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "{} could not be processed. Check the log for details.",
            files(report.failed.len())
        )));
    }

    result.added = report.added;
    result.corpus = Some(report);
    Ok(result)
}
