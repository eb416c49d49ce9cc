use std::path::PathBuf;

use clap::Args;
use console::style;
use log::info;
use vartable::prelude::*;
use vartable::tools::master::DEFAULT_MASTER_OUTPUT;

use crate::strings::master as strings;
use crate::utils::{
    init_progress,
    validate_input,
    validate_output,
};
use crate::PipelineCommand;

#[derive(Args, Debug, Clone)]
pub(crate) struct MasterArgs {
    #[arg(required = true, help = strings::CLINVAR)]
    clinvar: PathBuf,

    #[arg(required = true, help = strings::REVEL)]
    revel: PathBuf,

    #[arg(required = true, help = strings::DOSAGE)]
    dosage: PathBuf,

    #[arg(short = 'o', long, default_value = DEFAULT_MASTER_OUTPUT, help = strings::OUTPUT)]
    output: PathBuf,

    #[arg(short = 'n', long = "n-rows", help = strings::N_ROWS)]
    n_rows: Option<usize>,

    #[arg(short = 'l', long, default_value_t = 6, help = strings::LEVEL)]
    level: u32,
}

impl PipelineCommand for MasterArgs {
    fn run(&self) -> anyhow::Result<()> {
        let clinvar_path = validate_input(&self.clinvar)?;
        let revel_path = validate_input(&self.revel)?;
        let dosage_path = validate_input(&self.dosage)?;
        let output = validate_output(&self.output)?;

        let config = MasterConfig::default()
            .with_output(output)
            .with_n_rows(self.n_rows)
            .with_compression_level(self.level);

        let progress = init_progress(Some(5))?;

        progress.set_message("Reading ClinVar");
        let mut clinvar = ClinvarTable::from_path(&clinvar_path, config.n_rows)?;
        progress.inc(1);

        progress.set_message("Cleaning ClinVar");
        clinvar.clean()?;
        progress.inc(1);

        progress.set_message("Reading REVEL and dosage");
        let revel = RevelTable::from_path(&revel_path, config.n_rows)?;
        let dosage = DosageTable::from_path(&dosage_path, config.n_rows)?;
        progress.inc(1);

        progress.set_message("Joining");
        let mut table = config.assemble(clinvar, revel, dosage)?;
        progress.inc(1);

        progress.set_message("Writing");
        config.write(&mut table)?;
        progress.inc(1);
        progress.finish_and_clear();

        info!("Master table written to {}", config.output.display());
        eprintln!(
            "{} {} rows to {}",
            style("Wrote").green().bold(),
            table.height(),
            config.output.display()
        );
        Ok(())
    }
}
