//! # vartable
//!
//! `vartable` is a Rust library and command-line tool that turns public
//! variant annotation releases into a single flat table. It reads the ClinVar
//! VCF, the ClinGen dosage sensitivity curation list and the REVEL score
//! table, normalizes the packed `key=value;...` INFO annotations into
//! columns, derives a few classification labels and joins everything into a
//! master table restricted to the ACMG SF v2.0 genes.
//!
//! All tables are held as Polars [`DataFrame`](polars::prelude::DataFrame)s.
//! Processing is batch-only: each input is read whole, transformed and
//! written to one output file.
//!
//! ## Key Features
//!
//! * **Loaders**: one builder ([`TableReaderBuilder`]) for the three
//!   formats, with transparent decompression of gzip, zip, zstd, bzip2, xz and
//!   lz4 inputs (feature-gated).
//! * **INFO decoding**: [`InfoFields`] decodes one annotation string,
//!   [`ClinvarTable::split_info_columns`] expands a whole column into the
//!   union of keys seen across all rows.
//! * **Derived columns**: `GENE`, `MOLECULAR CONSEQUENCE`, `CLASS` and
//!   `IS_CONFLICTING`, see [`ClinvarTable::clean`].
//! * **Master table**: [`MasterTableBuilder`] joins REVEL with ClinVar on the
//!   variant coordinates, attaches dosage curation by gene and keeps the
//!   ACMG59 genes only.
//! * **Export**: [`TableWriter`] writes CSV, compressed according to the
//!   output extension, and only publishes the file once it is complete.
//!
//! Number of threads used by Polars can be configured with the
//! `VARTABLE_NUM_THREADS` environment variable.
//!
//! ## Structure
//!
//! * [`data_structs`]: table wrappers, the INFO decoder, meta-information
//!   parsing and the static gene and classification lists.
//! * [`io`]: reading and writing of tables and compression handling.
//! * [`tools`]: the master table pipeline.
//! * [`utils`]: column helpers and builder macros.
//!
//! ## Usage
//!
//! ### Cleaning a ClinVar release
//!
//! ```no_run
//! use vartable::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut clinvar = ClinvarTable::from_path("clinvar_20210710.vcf.gz", None)?;
//!     clinvar.clean()?;
//!     // Written to clinvar_20210710_processed.csv
//!     let output = clinvar.export(None)?;
//!     println!("Wrote {}", output.display());
//!     Ok(())
//! }
//! ```
//!
//! ### Reading INFO descriptions
//!
//! ```no_run
//! use vartable::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let meta = MetaInfo::from_path("clinvar_20210710.vcf.gz")?;
//!     println!("{:?}", meta.description("CLNSIG"));
//!     Ok(())
//! }
//! ```
//!
//! ### Building the master table
//!
//! ```no_run
//! use std::path::PathBuf;
//! use vartable::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = MasterConfig::default()
//!         .with_output(PathBuf::from("master_table.csv.zip"));
//!     let table = config.run(
//!         "clinvar_20210710.vcf.gz",
//!         "revel_grch38_all_chromosomes.csv.zip",
//!         "ClinGen_gene_curation_list_GRCh37.tsv",
//!     )?;
//!     println!("{} variants", table.height());
//!     Ok(())
//! }
//! ```

#[ctor::ctor]
fn init() {
    if let Ok(n) = std::env::var("VARTABLE_NUM_THREADS") {
        std::env::set_var("POLARS_MAX_THREADS", n)
    }
}

pub mod data_structs;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;

#[allow(unused_imports)]
use prelude::*;
