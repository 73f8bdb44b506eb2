// pixconv/src/processors/batch.rs
use crate::core::engine::{ConversionReport, TaskOutcome};
use crate::core::planner::ConversionTask;
use crate::core::{ConvertError, Result};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;

/// Runs conversion tasks on a bounded worker pool and waits for all of them.
pub struct BatchProcessor {
    thread_pool: Option<rayon::ThreadPool>,
    fail_fast: bool,
    show_progress: bool,
}

impl BatchProcessor {
    /// `max_threads == 0` uses rayon's global pool (one worker per CPU).
    pub fn new(max_threads: usize, fail_fast: bool) -> Result<Self> {
        let thread_pool = if max_threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(max_threads)
                .build()
                .map_err(|e| {
                    ConvertError::ProcessingError(format!("Failed to create thread pool: {}", e))
                })?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            thread_pool,
            fail_fast,
            show_progress: true,
        })
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Executes `convert` for every task. Outcomes are folded into `report`
    /// in task order once every task has finished.
    pub fn execute<F>(
        &self,
        tasks: &[ConversionTask],
        report: &mut ConversionReport,
        convert: F,
    ) -> Result<()>
    where
        F: Fn(&ConversionTask) -> Result<TaskOutcome> + Sync,
    {
        if tasks.is_empty() {
            return Ok(());
        }

        let pb = self.create_progress_bar(tasks.len());

        let results = self.install(|| {
            if self.fail_fast {
                // Short-circuits on the first failure; that error aborts the run.
                tasks
                    .par_iter()
                    .progress_with(pb.clone())
                    .map(&convert)
                    .collect::<Result<Vec<TaskOutcome>>>()
                    .map(|outcomes| outcomes.into_iter().map(Ok).collect::<Vec<_>>())
            } else {
                Ok(tasks
                    .par_iter()
                    .progress_with(pb.clone())
                    .map(&convert)
                    .collect::<Vec<Result<TaskOutcome>>>())
            }
        });

        pb.finish_and_clear();

        for (task, result) in tasks.iter().zip(results?) {
            match result {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    log::error!(
                        "Failed to convert {} -> {}: {}",
                        task.source.display(),
                        task.target.display(),
                        e
                    );
                    report.failures.push((task.target.clone(), e.to_string()));
                }
            }
        }

        Ok(())
    }

    fn install<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.thread_pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}
