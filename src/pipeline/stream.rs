//! Multi-threaded streaming over an ingestion source.
//!
//! The source is read lazily on a feeder thread. Posts are numbered and fanned
//! out to worker threads over a bounded channel, and results come back over a
//! second bounded channel. The calling thread re-sequences them so the sink
//! sees results in submission order, however the workers interleave.
//!
//! At most `queue_capacity` posts are in flight between the feeder and the
//! sink. The feeder takes a credit before sending a post and the collector
//! returns it once the result has reached the sink, so a slow post at the
//! head of the stream stalls the feeder instead of growing the reorder
//! buffer.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crossbeam_channel::bounded;
use log::{debug, info, warn};

use crate::error::{Result, SentigeoError};
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::{BatchSummary, Pipeline, ProcessResult};
use crate::record::RawPost;

const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Processes a stream of posts on a pool of worker threads.
#[derive(Debug, Clone)]
pub struct StreamProcessor {
    pipeline: Arc<Pipeline>,
    workers: usize,
    queue_capacity: usize,
}

impl StreamProcessor {
    /// Create a processor with one worker per CPU.
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        StreamProcessor {
            pipeline,
            workers: num_cpus::get(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    /// Create a processor sized by the configuration.
    pub fn from_config(pipeline: Arc<Pipeline>, config: &PipelineConfig) -> Self {
        Self::new(pipeline)
            .with_workers(config.workers)
            .with_queue_capacity(config.queue_capacity)
    }

    /// Set the number of worker threads (at least one).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the number of posts allowed in flight (at least one).
    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run the source to completion, handing every result to `sink` in order.
    ///
    /// Source items that are errors are logged and counted as skipped. An
    /// error returned by the sink stops the stream and is returned.
    pub fn run<S, F>(&self, source: S, mut sink: F) -> Result<BatchSummary>
    where
        S: IntoIterator<Item = Result<RawPost>>,
        S::IntoIter: Send,
        F: FnMut(ProcessResult) -> Result<()>,
    {
        let start = Instant::now();
        let source = source.into_iter();
        let (job_tx, job_rx) = bounded::<(u64, RawPost)>(self.queue_capacity);
        let (result_tx, result_rx) = bounded::<(u64, ProcessResult)>(self.queue_capacity);
        let (credit_tx, credit_rx) = bounded::<()>(self.queue_capacity);
        for _ in 0..self.queue_capacity {
            credit_tx
                .send(())
                .map_err(|_| SentigeoError::other("stream credit channel closed"))?;
        }

        let summary = thread::scope(|scope| -> Result<BatchSummary> {
            for worker_id in 0..self.workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                let pipeline = &self.pipeline;

                scope.spawn(move || {
                    for (seq, post) in job_rx {
                        let result = pipeline.process(&post);
                        if result_tx.send((seq, result)).is_err() {
                            break;
                        }
                    }
                    debug!("stream worker {worker_id} finished");
                });
            }
            drop(job_rx);
            drop(result_tx);

            let feeder = scope.spawn(move || {
                let mut seq = 0u64;
                let mut skipped = 0;
                for item in source {
                    match item {
                        Ok(post) => {
                            if credit_rx.recv().is_err() || job_tx.send((seq, post)).is_err() {
                                break;
                            }
                            seq += 1;
                        }
                        Err(error) => {
                            warn!("skipping input item: {error}");
                            skipped += 1;
                        }
                    }
                }
                skipped
            });

            let mut summary = BatchSummary::default();
            let mut pending: BTreeMap<u64, ProcessResult> = BTreeMap::new();
            let mut next = 0u64;
            let mut sink_error = None;

            'collect: for (seq, result) in result_rx.iter() {
                pending.insert(seq, result);
                while let Some(result) = pending.remove(&next) {
                    next += 1;
                    summary.record(&result);
                    if let Err(error) = sink(result) {
                        sink_error = Some(error);
                        break 'collect;
                    }
                    // The feeder may already be done.
                    let _ = credit_tx.send(());
                }
            }
            // Unblocks workers and the feeder when the sink gave up early.
            drop(result_rx);
            drop(credit_tx);

            summary.skipped = feeder
                .join()
                .map_err(|_| SentigeoError::other("stream feeder thread panicked"))?;

            match sink_error {
                Some(error) => Err(error),
                None => Ok(summary),
            }
        })?;

        info!(
            "stream with {} workers: {summary} in {:?}",
            self.workers,
            start.elapsed()
        );
        Ok(summary)
    }

    /// Run the source to completion and collect results in order.
    pub fn collect<S>(&self, source: S) -> Result<(Vec<ProcessResult>, BatchSummary)>
    where
        S: IntoIterator<Item = Result<RawPost>>,
        S::IntoIter: Send,
    {
        let mut results = Vec::new();
        let summary = self.run(source, |result| {
            results.push(result);
            Ok(())
        })?;
        Ok((results, summary))
    }
}
