use std::path::PathBuf;

use qarep_core::report_io::report_date;
use qarep_core::{backend_report, consolidated, frontend_report};

use crate::cli::{BackendArgs, ConsolidatedArgs, FrontendArgs};
use crate::run_error::RunError;

fn now() -> String {
    report_date(&chrono::Local::now())
}

fn or_defaults(dirs: Vec<PathBuf>, defaults: fn() -> Vec<PathBuf>) -> Vec<PathBuf> {
    if dirs.is_empty() { defaults() } else { dirs }
}

pub fn backend(args: BackendArgs) -> Result<(), RunError> {
    let sources = or_defaults(args.source_dirs, backend_report::default_source_dirs);
    let results = backend_report::collect(&sources);
    tracing::info!(files = results.files.len(), tests = results.results.tests, "junit reports parsed");

    let out_dir = args.reports.reports_dir.join("backend");
    let paths = backend_report::write_backend_report(&results, &out_dir, &now())?;

    println!("report: {}", paths.summary.display());
    if let Some(details) = &paths.details {
        println!("details: {}", details.display());
    }
    Ok(())
}

pub fn frontend(args: FrontendArgs) -> Result<(), RunError> {
    let projects = or_defaults(args.project_dirs, frontend_report::default_project_dirs);
    let results = frontend_report::collect(&projects);

    let out_dir = args.reports.reports_dir.join("frontend");
    let paths = frontend_report::write_frontend_report(&results, &out_dir, &now())?;

    println!("report: {}", paths.summary.display());
    if let Some(coverage) = &paths.coverage {
        println!("coverage: {}", coverage.display());
    }
    if let Some(details) = &paths.details {
        println!("details: {}", details.display());
    }
    Ok(())
}

pub fn consolidated(args: ConsolidatedArgs) -> Result<(), RunError> {
    let report = consolidated::write_consolidated_report(&args.reports.reports_dir, &now())?;

    println!("report: {}", report.path.display());
    println!();
    println!("summary");
    let components = [
        ("Backend", &report.inputs.backend),
        ("Frontend", &report.inputs.frontend),
    ];
    for (name, summary) in components {
        if let Some(s) = summary {
            println!("  {name}: {}/{} passed", s.passed, s.total);
        }
    }
    Ok(())
}
