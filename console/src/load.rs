use std::path::PathBuf;

use clap::Args;
use console::style;
use log::info;
use vartable::prelude::*;

use crate::strings::load as strings;
use crate::utils::{
    validate_input,
    validate_output,
};
use crate::PipelineCommand;

#[derive(Args, Debug, Clone)]
pub(crate) struct LoadArgs {
    #[arg(required = true, help = strings::INPUT)]
    input: PathBuf,

    #[arg(help = strings::N_ROWS)]
    n_rows: Option<usize>,

    #[arg(short = 'o', long, help = strings::OUTPUT)]
    output: Option<PathBuf>,
}

impl LoadArgs {
    fn export<T: Table>(
        &self,
        mut table: T,
    ) -> anyhow::Result<()> {
        if let Some(output) = &self.output {
            validate_output(output)?;
        }
        let written = table.export(self.output.as_deref())?;
        eprintln!(
            "{} {} rows to {}",
            style("Wrote").green().bold(),
            table.height(),
            written.display()
        );
        Ok(())
    }
}

/// Loads a ClinVar VCF, derives the summary columns and exports it.
#[derive(Args, Debug, Clone)]
pub(crate) struct ClinvarArgs {
    #[clap(flatten)]
    args: LoadArgs,
}

impl PipelineCommand for ClinvarArgs {
    fn run(&self) -> anyhow::Result<()> {
        let input = validate_input(&self.args.input)?;
        let mut table = ClinvarTable::from_path(&input, self.args.n_rows)?;
        info!(
            "Meta-information block: {} lines, {} INFO keys described",
            table.meta().n_meta_rows(),
            table.meta().fields().len()
        );
        table.clean()?;
        self.args.export(table)
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct DosageArgs {
    #[clap(flatten)]
    args: LoadArgs,
}

impl PipelineCommand for DosageArgs {
    fn run(&self) -> anyhow::Result<()> {
        let input = validate_input(&self.args.input)?;
        let table = DosageTable::from_path(&input, self.args.n_rows)?;
        self.args.export(table)
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct RevelArgs {
    #[clap(flatten)]
    args: LoadArgs,
}

impl PipelineCommand for RevelArgs {
    fn run(&self) -> anyhow::Result<()> {
        let input = validate_input(&self.args.input)?;
        let table = RevelTable::from_path(&input, self.args.n_rows)?;
        self.args.export(table)
    }
}
