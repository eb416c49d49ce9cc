mod load;
mod master;
mod meta;
mod strings;
mod utils;

use clap::{
    Parser,
    Subcommand,
};
use load::{
    ClinvarArgs,
    DosageArgs,
    RevelArgs,
};
use master::MasterArgs;
use meta::MetaArgs;
use utils::UtilsArgs;
use wild::ArgsOs;

pub(crate) trait PipelineCommand {
    fn run(&self) -> anyhow::Result<()>;
}

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Clean a ClinVar VCF and export it as CSV
    Clinvar {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  ClinvarArgs,
    },

    /// Export the ClinGen dosage curation list as CSV
    Dosage {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  DosageArgs,
    },

    /// Export the REVEL score table as CSV
    Revel {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  RevelArgs,
    },

    /// Join all three sources into the ACMG59 master table
    Master {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  MasterArgs,
    },

    /// Print INFO key descriptions of a VCF as JSON
    Meta {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  MetaArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match cli.command {
        MainMenu::Clinvar { utils, args } => {
            utils.setup()?;
            args.run()?;
        },
        MainMenu::Dosage { utils, args } => {
            utils.setup()?;
            args.run()?;
        },
        MainMenu::Revel { utils, args } => {
            utils.setup()?;
            args.run()?;
        },
        MainMenu::Master { utils, args } => {
            utils.setup()?;
            args.run()?;
        },
        MainMenu::Meta { utils, args } => {
            utils.setup()?;
            args.run()?;
        },
    }
    Ok(())
}
