// src/orchestrator.rs

use std::{sync::Arc, thread};

use crossbeam::channel;

use crate::{
    dispatcher::ToggleDispatcher,
    errors::{LedgerError, MutationError},
    executor::{RevertExecutor, RevertReport, SweepPolicy},
};

/// Work the UI hands off to a background thread.
#[derive(Debug, Clone)]
pub enum TweakTask {
    Set { key: String, on: bool },
    RevertAll { policy: SweepPolicy },
}

/// Result of a processed task.
#[derive(Debug)]
pub enum TaskResult {
    Toggled {
        key: String,
        on: bool,
        result: Result<(), MutationError>,
    },
    Reverted {
        report: Result<RevertReport, LedgerError>,
        /// Outcome of applying the sweep policy to the ledger.
        settled: Result<(), LedgerError>,
    },
}

/// Runs each task on its own thread and collects results for the UI loop.
pub struct TaskOrchestrator {
    dispatcher: Arc<ToggleDispatcher>,
    executor: Arc<RevertExecutor>,
    result_receiver: channel::Receiver<TaskResult>,
    result_sender: channel::Sender<TaskResult>,
}

impl TaskOrchestrator {
    pub fn new(dispatcher: Arc<ToggleDispatcher>, executor: Arc<RevertExecutor>) -> Self {
        let (result_sender, result_receiver) = channel::unbounded::<TaskResult>();
        Self {
            dispatcher,
            executor,
            result_receiver,
            result_sender,
        }
    }

    /// Submits a new task to be processed.
    pub fn submit(&self, task: TweakTask) {
        let result_sender = self.result_sender.clone();
        let dispatcher = Arc::clone(&self.dispatcher);
        let executor = Arc::clone(&self.executor);

        thread::spawn(move || {
            let result = match task {
                TweakTask::Set { key, on } => {
                    let result = dispatcher.set_toggle(&key, on);
                    TaskResult::Toggled { key, on, result }
                }
                TweakTask::RevertAll { policy } => match executor.revert_all() {
                    Ok(report) => {
                        let settled = executor.settle(&report, policy);
                        TaskResult::Reverted {
                            report: Ok(report),
                            settled,
                        }
                    }
                    Err(e) => TaskResult::Reverted {
                        report: Err(e),
                        settled: Ok(()),
                    },
                },
            };
            if let Err(e) = result_sender.send(result) {
                tracing::error!("Failed to send result: {:?}", e);
            }
        });
    }

    /// Attempts to receive a task result without blocking.
    pub fn try_recv_result(&self) -> Option<TaskResult> {
        self.result_receiver.try_recv().ok()
    }
}
