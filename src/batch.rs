//! Batch orchestration: one export per selected target, failures recorded
//! and never fatal to the rest of the batch.

use crate::connection::ConnectionDescriptor;
use crate::export::Exporter;
use crate::{log_debug, log_error, log_info};
use std::{
    io,
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender, TryRecvError},
    },
    thread,
};

const WORKER_LOST_DIAGNOSTIC: &str = "backup worker stopped before reporting a result";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    Succeeded { artifact: String },
    Failed { diagnostic: String },
}

/// Result of exporting one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupOutcome {
    pub target: String,
    pub status: OutcomeStatus,
}

impl BackupOutcome {
    pub fn succeeded(target: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            status: OutcomeStatus::Succeeded { artifact: artifact.into() },
        }
    }

    pub fn failed(target: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            status: OutcomeStatus::Failed { diagnostic: diagnostic.into() },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Succeeded { .. })
    }
}

/// Outcomes in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    outcomes: Vec<BackupOutcome>,
}

impl BatchResult {
    pub fn new(outcomes: Vec<BackupOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[BackupOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    /// `(target, artifact)` for every successful export.
    pub fn artifacts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|outcome| match &outcome.status {
            OutcomeStatus::Succeeded { artifact } => Some((outcome.target.as_str(), artifact.as_str())),
            OutcomeStatus::Failed { .. } => None,
        })
    }

    /// `(target, diagnostic)` for every failed export.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|outcome| match &outcome.status {
            OutcomeStatus::Failed { diagnostic } => Some((outcome.target.as_str(), diagnostic.as_str())),
            OutcomeStatus::Succeeded { .. } => None,
        })
    }
}

/// Messages sent from the batch worker to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// Export of `targets[index]` is about to start.
    Started { index: usize, total: usize, target: String },
    Recorded(BackupOutcome),
    Completed(BatchResult),
}

/// Export every target in order, recording each outcome.
///
/// `on_event` sees `Started` before and `Recorded` after each export; the
/// final result is returned rather than reported through the callback.
pub fn run_batch<F>(connection: &ConnectionDescriptor, targets: &[String], exporter: &dyn Exporter, mut on_event: F) -> BatchResult
where
    F: FnMut(BatchEvent),
{
    let total = targets.len();
    let mut outcomes = Vec::with_capacity(total);

    for (index, target) in targets.iter().enumerate() {
        on_event(BatchEvent::Started {
            index,
            total,
            target: target.clone(),
        });

        let outcome = match exporter.export(connection, target) {
            Ok(artifact) => {
                log_debug!("Backup {}/{} of '{}' succeeded: {}", index + 1, total, target, artifact);
                BackupOutcome::succeeded(target.clone(), artifact)
            }
            Err(err) => {
                log_error!("Backup {}/{} of '{}' failed: {}", index + 1, total, target, err);
                BackupOutcome::failed(target.clone(), err.diagnostic())
            }
        };

        on_event(BatchEvent::Recorded(outcome.clone()));
        outcomes.push(outcome);
    }

    BatchResult::new(outcomes)
}

/// Receiving side of a dispatched batch.
#[derive(Debug)]
pub struct BatchHandle {
    receiver: Receiver<BatchEvent>,
    targets: Vec<String>,
    recorded: Vec<BackupOutcome>,
    finished: bool,
}

impl BatchHandle {
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Next pending event without blocking.
    ///
    /// Yields exactly one `Completed`. If the worker goes away without
    /// sending it, the completion is built from what was recorded, with
    /// every unreported target marked failed.
    pub fn try_next(&mut self) -> Option<BatchEvent> {
        if self.finished {
            return None;
        }

        match self.receiver.try_recv() {
            Ok(event) => Some(self.observe(event)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(self.synthesize_completion()),
        }
    }

    /// Block until the next event arrives.
    pub fn next_blocking(&mut self) -> Option<BatchEvent> {
        if self.finished {
            return None;
        }

        match self.receiver.recv() {
            Ok(event) => Some(self.observe(event)),
            Err(_) => Some(self.synthesize_completion()),
        }
    }

    fn observe(&mut self, event: BatchEvent) -> BatchEvent {
        match &event {
            BatchEvent::Recorded(outcome) => self.recorded.push(outcome.clone()),
            BatchEvent::Completed(_) => self.finished = true,
            BatchEvent::Started { .. } => {}
        }
        event
    }

    fn synthesize_completion(&mut self) -> BatchEvent {
        log_error!(
            "Backup worker disconnected after {} of {} outcomes",
            self.recorded.len(),
            self.targets.len()
        );
        let mut outcomes = std::mem::take(&mut self.recorded);
        for target in self.targets.iter().skip(outcomes.len()) {
            outcomes.push(BackupOutcome::failed(target.clone(), WORKER_LOST_DIAGNOSTIC));
        }
        self.finished = true;
        BatchEvent::Completed(BatchResult::new(outcomes))
    }
}

/// Run a batch on a dedicated worker thread.
///
/// The worker owns its copy of the connection and target list; the caller
/// polls the returned handle from the UI loop. Once started a batch cannot
/// be cancelled.
pub fn dispatch_batch(connection: ConnectionDescriptor, targets: Vec<String>, exporter: Arc<dyn Exporter>) -> io::Result<BatchHandle> {
    let (tx, rx): (Sender<BatchEvent>, Receiver<BatchEvent>) = mpsc::channel();
    let worker_targets = targets.clone();

    log_info!("Dispatching backup of {} database(s) on {}", targets.len(), connection.label());

    thread::Builder::new().name("backup-batch".to_string()).spawn(move || {
        let progress_tx = tx.clone();
        let result = run_batch(&connection, &worker_targets, exporter.as_ref(), |event| {
            let _ = progress_tx.send(event);
        });
        log_info!(
            "Backup batch finished: {} succeeded, {} failed",
            result.success_count(),
            result.failure_count()
        );
        let _ = tx.send(BatchEvent::Completed(result));
    })?;

    Ok(BatchHandle {
        receiver: rx,
        targets,
        recorded: Vec::new(),
        finished: false,
    })
}

#[cfg(test)]
#[path = "test/batch.rs"]
mod tests;
