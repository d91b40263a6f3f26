use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};

use dienest::io::export;
use dienest::io::ext_repr::ExtJob;
use dienest::io::svg::layout_to_svg;
use dienest_cli::config::CliConfig;
use dienest_cli::io;
use dienest_cli::io::cli::Cli;
use dienest_cli::io::output::JobOutput;
use dienest_cli::job::solve_job;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            CliConfig::default()
        }
        Some(config_file) => io::read_json(&config_file).context("incorrect config file format")?,
    };

    info!("[MAIN] Successfully parsed CliConfig: {config:?}");

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("invalid input file name: {}", args.input_file.display()))?;

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!("could not create solution folder: {}", args.solution_folder.display())
        })?;
    }

    let ext_job: ExtJob = io::read_json(&args.input_file)?;
    let solution = solve_job(&ext_job, &config)?;

    {
        let output = JobOutput {
            solution: export::export_result(&solution.result),
            n_rejected_adjustments: solution.n_rejected_adjustments,
            job: ext_job,
            config,
        };
        let solution_path = args.solution_folder.join(format!("sol_{input_file_stem}.json"));
        io::write_json(&output, Path::new(&solution_path))?;
    }

    {
        let svg_path = args.solution_folder.join(format!("sol_{input_file_stem}.svg"));
        let svg = layout_to_svg(&solution.layout, config.svg_draw_options);
        io::write_svg(&svg, Path::new(&svg_path))?;
    }

    Ok(())
}
