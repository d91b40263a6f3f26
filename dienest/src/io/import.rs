use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use log::debug;

use crate::catalog::InMemoryCatalog;
use crate::entities::{
    DieLine, DieLineId, DieLineQuantity, Margins, NestingRequest, PlacementId, Sheet, SheetId, SheetRequest,
};
use crate::geometry::geo_enums::Rotation;
use crate::geometry::primitives::Point;
use crate::io::ext_repr::{ExtAdjustment, ExtDieLine, ExtJob, ExtMargins, ExtNestingRequest, ExtSheet};
use crate::packing::Adjustment;

/// A job converted into its internal representation.
#[derive(Debug)]
pub struct Job {
    pub name: String,
    pub catalog: InMemoryCatalog,
    pub request: NestingRequest,
    pub adjustments: Vec<Adjustment>,
}

pub fn import_die_line(ext_die_line: &ExtDieLine) -> Result<DieLine> {
    let outline = ext_die_line
        .outline
        .as_ref()
        .map(|o| o.0.iter().map(|&p| Point::from(p)).collect_vec());
    let die_line = DieLine::new(
        DieLineId(ext_die_line.id),
        ext_die_line.width,
        ext_die_line.height,
        outline,
    )
    .with_context(|| format!("invalid die line {}", ext_die_line.id))?;
    Ok(die_line.with_source(&ext_die_line.name, &ext_die_line.file_type))
}

pub fn import_margins(ext_margins: &ExtMargins) -> Margins {
    Margins {
        top: ext_margins.top,
        bottom: ext_margins.bottom,
        left: ext_margins.left,
        right: ext_margins.right,
    }
}

pub fn import_sheet(ext_sheet: &ExtSheet) -> Result<Sheet> {
    let request = SheetRequest {
        name: ext_sheet.name.clone(),
        width: ext_sheet.width,
        height: ext_sheet.height,
        margins: import_margins(&ext_sheet.margins),
        material: ext_sheet.material.clone(),
    };
    Sheet::new(SheetId(ext_sheet.id), request).with_context(|| format!("invalid sheet {}", ext_sheet.id))
}

pub fn import_request(ext_request: &ExtNestingRequest) -> Result<NestingRequest> {
    let request = NestingRequest {
        sheet_id: ext_request.sheet_id.map(SheetId),
        die_lines: ext_request
            .die_lines
            .iter()
            .map(|d| DieLineQuantity {
                die_line_id: DieLineId(d.die_line_id),
                quantity: d.quantity,
            })
            .collect(),
        options: ext_request.options.clone(),
    };
    request.options.validate().context("invalid nesting options")?;
    Ok(request)
}

pub fn import_adjustment(ext_adjustment: &ExtAdjustment) -> Result<Adjustment> {
    let rotation = Rotation::from_degrees(ext_adjustment.rotation)
        .with_context(|| format!("invalid adjustment of placement {}", ext_adjustment.placement_id))?;
    Ok(Adjustment {
        placement_id: PlacementId(ext_adjustment.placement_id),
        x: ext_adjustment.x,
        y: ext_adjustment.y,
        rotation,
    })
}

/// Imports a job and stores its die lines and sheets in a fresh [`InMemoryCatalog`].
pub fn import_job(ext_job: &ExtJob) -> Result<Job> {
    ensure!(
        ext_job.die_lines.iter().map(|dl| dl.id).all_unique(),
        "die line ids should be unique, ids: {:?}",
        ext_job.die_lines.iter().map(|dl| dl.id).sorted().collect_vec()
    );
    ensure!(
        ext_job.sheets.iter().map(|s| s.id).all_unique(),
        "sheet ids should be unique, ids: {:?}",
        ext_job.sheets.iter().map(|s| s.id).sorted().collect_vec()
    );

    let catalog = InMemoryCatalog::new();
    for ext_die_line in &ext_job.die_lines {
        catalog.insert_die_line(import_die_line(ext_die_line)?);
    }
    for ext_sheet in &ext_job.sheets {
        catalog.put_sheet(import_sheet(ext_sheet)?);
    }

    let request = import_request(&ext_job.request)?;
    let adjustments = ext_job
        .adjustments
        .iter()
        .map(import_adjustment)
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "[IMPORT] job {:?}: {} die lines, {} sheets, {} units requested",
        ext_job.name,
        ext_job.die_lines.len(),
        ext_job.sheets.len(),
        request.total_quantity()
    );

    Ok(Job {
        name: ext_job.name.clone(),
        catalog,
        request,
        adjustments,
    })
}
