use std::path::PathBuf;

use clap::Args;
use vartable::prelude::*;

use crate::strings::meta as strings;
use crate::utils::validate_input;
use crate::PipelineCommand;

#[derive(Args, Debug, Clone)]
pub(crate) struct MetaArgs {
    #[arg(required = true, help = strings::INPUT)]
    input: PathBuf,
}

impl PipelineCommand for MetaArgs {
    fn run(&self) -> anyhow::Result<()> {
        let input = validate_input(&self.input)?;
        let meta = MetaInfo::from_path(input)?;
        println!("{}", meta.to_json()?);
        Ok(())
    }
}
