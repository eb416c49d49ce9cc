use std::path::{
    Path,
    PathBuf,
};

use anyhow::ensure;
use clap::Args;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use log::{
    warn,
    LevelFilter,
};

use crate::strings::utils as strings;

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(short, long, default_value_t = false, help = strings::VERBOSE)]
    pub verbose: bool,
}

impl UtilsArgs {
    pub fn setup(&self) -> anyhow::Result<()> {
        let level = if self.verbose {
            LevelFilter::Debug
        }
        else {
            LevelFilter::Info
        };
        pretty_env_logger::formatted_builder()
            .filter_level(level)
            .parse_default_env()
            .try_init()?;
        Ok(())
    }
}

pub fn validate_input<P: AsRef<Path>>(path: P) -> anyhow::Result<PathBuf> {
    let path = path.as_ref();
    ensure!(path.exists(), "Input file {} does not exist", path.display());
    ensure!(path.is_file(), "Input path {} is not a file", path.display());
    Ok(path.to_path_buf())
}

pub fn validate_output<P: AsRef<Path>>(path: P) -> anyhow::Result<PathBuf> {
    let path = path.as_ref();
    ensure!(!path.is_dir(), "Output path {} is a directory", path.display());
    if let Some(parent) = path.parent() {
        ensure!(
            parent.as_os_str().is_empty() || parent.is_dir(),
            "Output directory {} does not exist",
            parent.display()
        );
    }
    if path.exists() {
        warn!("{} will be overwritten", path.display());
    }
    Ok(path.to_path_buf())
}

pub fn init_progress(total: Option<usize>) -> anyhow::Result<ProgressBar> {
    let progress_bar = match total {
        Some(total) => {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] \
                         [{bar:40.cyan/blue}] {pos:>3.green}/{len:3} {msg}",
                    )?
                    .progress_chars("#>-"),
            );
            bar
        },
        None => {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
            );
            spinner
        },
    };
    progress_bar.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(progress_bar)
}
