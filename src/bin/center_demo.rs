//! Demo driver: load an eye crop, estimate its centre, dump diagnostics.
//!
//! Usage: `center_demo <config.json>` — see [`RuntimeConfig`] for the schema.
use eye_center_detector::config::{load_config, RuntimeConfig};
use eye_center_detector::image::io::{
    grayscale_to_f32, load_grayscale_image, save_score_map, write_json_file,
};
use eye_center_detector::EyeCenterEstimator;
use std::env;
use std::process::ExitCode;

fn run(config: RuntimeConfig) -> Result<(), String> {
    let gray = load_grayscale_image(&config.input_path)?;
    let crop = grayscale_to_f32(gray.as_view());
    println!(
        "loaded {} ({}x{})",
        config.input_path.display(),
        crop.w,
        crop.h
    );

    let mut estimator = EyeCenterEstimator::new(crop.h, crop.w, config.params);
    let report = estimator.estimate_with_diagnostics(&crop);

    let center = report.result.center;
    if center.is_valid() {
        println!(
            "center=({}, {}) score={:.6} evaluations={} latency_ms={:.3}",
            center.x,
            center.y,
            report.result.score,
            report.search.evaluations,
            report.result.latency_ms
        );
    } else {
        println!("image too small to analyse");
    }
    for stage in &report.timing.stages {
        println!("  {:<10} {:.3} ms", stage.label, stage.elapsed_ms);
    }

    if let Some(path) = &config.output.json_out {
        write_json_file(&report, path)?;
        println!("report written to {}", path.display());
    }
    if let Some(path) = &config.output.score_map_out {
        save_score_map(estimator.score_map(), path)?;
        println!("score map written to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let Some(config_path) = env::args().nth(1) else {
        eprintln!("usage: center_demo <config.json>");
        return ExitCode::FAILURE;
    };
    let config = match load_config(config_path.as_ref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
