use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use log::info;

use resample_cv::config::ReportConfig;
use resample_cv::data::loader::load_file;
use resample_cv::report::Report;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let Some(data_path) = args.next() else {
        bail!("usage: resample-cv <data-file> [config.json]");
    };
    let config = match args.next() {
        Some(path) => ReportConfig::from_path(&path)?,
        None => ReportConfig::default(),
    };

    let dataset = load_file(&data_path)
        .with_context(|| format!("loading {}", data_path.display()))?;
    let report = Report::run(Arc::new(dataset), &config)?;

    print!("{report}");
    if let Some(best) = report.best() {
        info!("best model: {}", best.name);
    }
    Ok(())
}
