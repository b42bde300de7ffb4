use std::fs;
use std::process;

use anyhow::Context;
use chrono::Utc;
use log::{error, info};

use prevalence_estimator::report::{self, Attachment, AttachmentRole, RunLog};
use prevalence_estimator::{ExchangeDirs, PrevalenceError, ingest, run_pipeline};

fn main() {
    let dirs = std::env::args()
        .nth(1)
        .map_or_else(ExchangeDirs::platform_default, ExchangeDirs::new);

    if let Err(err) = fs::create_dir_all(dirs.attachments_dir()) {
        eprintln!(
            "cannot create attachments directory {}: {err}",
            dirs.attachments_dir().display()
        );
        process::exit(1);
    }
    init_logging(&dirs);

    let mut runlog = RunLog::new();
    runlog.heading("Model Execution Summary");
    runlog.paragraph("Model: Undetected Prevalence Estimator");
    runlog.paragraph(format!(
        "Date: {} GMT",
        Utc::now().format("%Y-%m-%d %H:%M:%S")
    ));
    info!("Model: Undetected Prevalence Estimator");
    info!("Exchange directory: {}", dirs.base.display());

    let exit_code = match run(&dirs, &mut runlog) {
        Ok(()) => 0,
        Err(err) => {
            error!("{err:#}");
            runlog.subheading("ERROR");
            runlog.paragraph(err.to_string());
            err.downcast_ref::<PrevalenceError>()
                .map_or(1, PrevalenceError::exit_code)
        }
    };

    // The narrative and manifest are written even for a failed run so the
    // warehouse can surface the explanation to the user
    let mut attachments = vec![
        Attachment::new(
            "execution_log.log",
            "text/plain",
            AttachmentRole::Downloadable,
        ),
        Attachment::new("info.html", "text/html", AttachmentRole::Feedback),
    ];
    if exit_code == 0 {
        attachments.push(Attachment::new(
            "output.json",
            "application/json",
            AttachmentRole::Primary,
        ));
    }
    if let Err(err) = persist_run_artifacts(&dirs, &runlog, &attachments) {
        error!("failed to persist run artifacts: {err:#}");
        process::exit(if exit_code == 0 { 1 } else { exit_code });
    }

    process::exit(exit_code);
}

/// Load the exchange files, run the pipeline and write the report exports.
fn run(dirs: &ExchangeDirs, runlog: &mut RunLog) -> anyhow::Result<()> {
    let params = ingest::load_params(&dirs.params_file())
        .context("Parameters (params.json) file could not be read")?;
    if let Some(area) = &params.provider_area {
        runlog.paragraph(format!("Provider area: {area}"));
    }
    runlog.subheading("User provided parameters");
    runlog.paragraph(format!("alpha: {}", params.parameters.alpha));
    runlog.paragraph(format!("sensitivity: {}", params.parameters.sensitivity));

    let areas = ingest::load_areas(&dirs.areas_file()).context(
        "Subadmin areas (sub_administrative_area.ndJson) file was expected but not found",
    )?;
    let demography = ingest::load_demography(&dirs.demography_file(), &areas)
        .context("Demography (demography.ndJson) file was expected but not found")?;
    runlog.subheading("Demographic data");
    for metric in &demography.metrics {
        runlog.paragraph(metric.clone());
    }

    let samples = ingest::load_samples(&dirs.samples_file())
        .context("Sample (sample.ndJson) file was expected but not found")?;

    let report = run_pipeline(
        samples,
        &areas,
        &demography.records,
        &params.parameters,
        runlog,
    )?;

    report::write_output_json(&report, &dirs.attachment("output.json"))?;
    report::write_output_csv(
        &report,
        &dirs.attachment("SimpleUndetectedPrevalenceEstimatorOutput.csv"),
    )?;
    runlog.heading("Model Exports");
    runlog.paragraph("Model exports successfully created.");
    info!(
        "Report assembled for {} sub-areas ({} estimated)",
        report.rows.len(),
        report.estimated_count()
    );
    Ok(())
}

fn persist_run_artifacts(
    dirs: &ExchangeDirs,
    runlog: &RunLog,
    attachments: &[Attachment],
) -> anyhow::Result<()> {
    let info_path = dirs.attachment("info.html");
    fs::write(&info_path, runlog.to_html())
        .with_context(|| format!("writing {}", info_path.display()))?;
    report::write_manifest(attachments, &dirs.attachments_manifest())?;
    Ok(())
}

/// Route log output into the downloadable execution log, falling back to
/// stderr when the attachments directory is not writable.
fn init_logging(dirs: &ExchangeDirs) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match fs::File::create(dirs.attachment("execution_log.log")) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(err) => eprintln!("falling back to stderr logging: {err}"),
    }
    builder.init();
}
