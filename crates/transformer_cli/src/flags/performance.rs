use clap::Args;

fn default_parallel_calls() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[derive(Args, Debug, Clone)]
pub struct PerformanceArgs {
    /// Parallel calls for the input pipeline map. Defaults to the host CPU count.
    #[arg(long = "num_parallel_calls", visible_alias = "npc", default_value_t = default_parallel_calls())]
    pub num_parallel_calls: usize,

    /// Use synthetic data instead of reading from data_dir.
    #[arg(long = "use_synthetic_data", visible_alias = "synth", action)]
    pub use_synthetic_data: bool,

    /// All-reduce algorithm for cross-device gradient aggregation.
    #[arg(long = "all_reduce_alg", visible_alias = "ara")]
    pub all_reduce_alg: Option<String>,
}
