use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use parking_lot::Mutex;

use crate::config::RuleGroup;
use crate::error::{AggregateError, Result};
use crate::fetch::RuleFetcher;
use crate::format::SourceFormat;
use crate::merge::merge;
use crate::normalize::normalize;
use crate::parser::parse;
use crate::types::RuleSet;

/// Logger callback type for per-source and per-group progress lines
type LoggerCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Default number of in-flight fetches per group
pub const DEFAULT_WORKERS: usize = 5;

/// Group aggregator.
///
/// Fans one fetch+parse+normalize pipeline per URL out over a bounded
/// worker pool, waits for all of them (the fan-in barrier), then merges
/// the collected rule sets through redundancy elimination. A single
/// source's failure never aborts its group; the source is logged and
/// excluded from the merge. No rule data is shared between workers:
/// each owns its rule set until it lands in the result vector, and the
/// merge runs single-threaded after the barrier.
pub struct Aggregator<F> {
    fetcher: F,
    workers: usize,
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
    logger: Option<LoggerCallback>,
}

impl<F: RuleFetcher> Aggregator<F> {
    /// Create an aggregator over a fetcher.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            workers: DEFAULT_WORKERS,
            deadline: None,
            cancel: None,
            logger: None,
        }
    }

    /// Set the worker limit (in-flight fetches per group, minimum 1).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Stop scheduling new fetches once this instant passes. Sources
    /// that completed earlier are still merged.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set an external cancellation flag, checked before each fetch.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Set logger for per-source and per-group progress lines.
    pub fn with_logger<L>(mut self, logger: L) -> Self
    where
        L: Fn(&str) + Send + Sync + 'static,
    {
        self.logger = Some(Box::new(logger));
        self
    }

    fn log(&self, msg: &str) {
        if let Some(ref logger) = self.logger {
            logger(msg);
        }
    }

    fn cancelled(&self) -> bool {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return true;
            }
        }
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Aggregate one group: concurrent fan-out over its URLs, fan-in,
    /// then merge. The merged result is identical regardless of fetch
    /// completion order. An empty result means the group produced no
    /// usable rules and no artifact should be written for it.
    pub fn aggregate(&self, group: &RuleGroup) -> RuleSet {
        self.log(&format!(
            "group '{}': {} sources",
            group.name,
            group.urls.len()
        ));

        let queue: Mutex<VecDeque<&str>> =
            Mutex::new(group.urls.iter().map(String::as_str).collect());
        let results: Mutex<Vec<RuleSet>> = Mutex::new(Vec::new());
        let workers = self.workers.min(group.urls.len());

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| loop {
                    if self.cancelled() {
                        let remaining = std::mem::take(&mut *queue.lock());
                        if !remaining.is_empty() {
                            self.log(&format!(
                                "group '{}': cancelled, skipping {} remaining sources",
                                group.name,
                                remaining.len()
                            ));
                        }
                        break;
                    }
                    let url = queue.lock().pop_front();
                    let Some(url) = url else { break };
                    match self.process_source(url) {
                        Ok(set) => {
                            self.log(&format!("{url}: {} entries", set.len()));
                            results.lock().push(set);
                        }
                        Err(e) => self.log(&format!("skipping {url}: {e}")),
                    }
                });
            }
        });

        let merged = merge(results.into_inner());
        self.log(&format!(
            "group '{}': {} entries after merge",
            group.name,
            merged.len()
        ));
        merged
    }

    /// One source pipeline: resolve the format hint, fetch, parse,
    /// normalize.
    fn process_source(&self, url: &str) -> Result<RuleSet> {
        let format = SourceFormat::detect(url)
            .ok_or_else(|| AggregateError::UnsupportedFormat(url.to_string()))?;
        self.log(&format!("fetching {url}"));
        let body = self.fetcher.fetch(url)?;
        let doc = parse(&body, format)?;
        Ok(normalize(&doc))
    }
}
