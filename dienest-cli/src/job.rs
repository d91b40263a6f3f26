use anyhow::{Context, Result};
use log::{info, warn};
use thousands::Separable;

use dienest::engine::NestingEngine;
use dienest::entities::{Layout, NestingResult};
use dienest::io::ext_repr::ExtJob;
use dienest::io::import;

use crate::config::CliConfig;

/// Outcome of a job: the nesting result after replaying the manual adjustments.
#[derive(Debug)]
pub struct JobSolution {
    pub result: NestingResult,
    /// Final layout, used for rendering
    pub layout: Layout,
    pub n_rejected_adjustments: usize,
}

/// Nests the die lines of `ext_job` and replays its manual adjustments in order.
/// Rejected adjustments are logged and skipped.
pub fn solve_job(ext_job: &ExtJob, config: &CliConfig) -> Result<JobSolution> {
    let job = import::import_job(ext_job)?;
    let spacing = job.request.options.spacing;
    let engine = NestingEngine::new(job.catalog, config.engine);

    let result = engine
        .optimize(&job.request)
        .with_context(|| format!("could not nest job {:?}", job.name))?;

    info!(
        "[JOB] {} of {} units placed, utilization {:.3}%",
        result.n_placed().separate_with_commas(),
        result.n_requested.separate_with_commas(),
        result.utilization()
    );

    let session = engine.open_session(&result, spacing)?;
    let n_rejected_adjustments = job
        .adjustments
        .iter()
        .filter(|adjustment| match session.adjust(adjustment) {
            Ok(_) => {
                info!("[JOB] applied adjustment of placement {}", adjustment.placement_id);
                false
            }
            Err(err) => {
                warn!("[JOB] skipping adjustment of placement {}: {err}", adjustment.placement_id);
                true
            }
        })
        .count();

    let layout = session.into_layout();
    let result = NestingResult {
        placements: layout.placements().to_vec(),
        metrics: layout.metrics(),
        ..result
    };

    Ok(JobSolution {
        result,
        layout,
        n_rejected_adjustments,
    })
}
