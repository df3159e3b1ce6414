use clap::Args;

/// TPU selection. Running on a TPU forces static batch shapes and Cloud Storage paths.
#[derive(Args, Debug, Clone)]
pub struct DeviceArgs {
    /// Name of the Cloud TPU to use (also accepts a grpc:// address).
    #[arg(long = "tpu")]
    pub tpu: Option<String>,

    #[arg(long = "tpu_zone")]
    pub tpu_zone: Option<String>,

    #[arg(long = "tpu_gcp_project")]
    pub tpu_gcp_project: Option<String>,

    /// Number of shards (TPU chips).
    #[arg(long = "num_tpu_shards", default_value_t = 8)]
    pub num_tpu_shards: usize,
}

impl DeviceArgs {
    pub fn on_tpu(&self) -> bool {
        crate::flags::is_set(&self.tpu)
    }
}
