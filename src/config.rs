//! Configuration management for the social graph analyzer

/// Default configuration for the social graph analyzer
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum local-moving passes across all aggregation levels
    pub max_passes: usize,

    /// Number of items returned by each recommender
    pub top_k: usize,

    /// Number of nodes reported as influential
    pub influential_count: usize,

    /// Number of worker threads (0 = use all available cores)
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_passes: 300,
            top_k: 5,
            influential_count: 10,
            threads: 0,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(max_passes: usize, top_k: usize, influential_count: usize, threads: usize) -> Self {
        Self {
            max_passes,
            top_k,
            influential_count,
            threads,
        }
    }

    /// Resolve the worker thread count, falling back to the number of cores
    pub fn worker_threads(&self) -> usize {
        if self.threads > 0 {
            self.threads
        } else {
            num_cpus::get()
        }
    }
}
