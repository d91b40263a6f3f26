use serde::{Deserialize, Serialize};

use dienest::io::ext_repr::{ExtJob, ExtNestingResult};

use crate::config::CliConfig;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct JobOutput {
    #[serde(flatten)]
    pub job: ExtJob,
    pub solution: ExtNestingResult,
    /// Number of manual adjustments of the job that were rejected
    pub n_rejected_adjustments: usize,
    pub config: CliConfig,
}
