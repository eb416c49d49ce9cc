use std::path::{
    Path,
    PathBuf,
};

use polars::prelude::*;

use super::impl_table;
use crate::io::read::TableReaderBuilder;
use crate::io::schema::SourceType;

/// Gene symbol column of the ClinGen curation table.
pub const GENE_SYMBOL_COL: &str = "#Gene Symbol";

/// Curation columns not carried into the combined table.
pub const DOSAGE_UNUSED_COLUMNS: [&str; 19] = [
    "cytoBand",
    "Genomic Location",
    "Haploinsufficiency PMID1",
    "Haploinsufficiency PMID2",
    "Haploinsufficiency PMID3",
    "Haploinsufficiency PMID4",
    "Haploinsufficiency PMID5",
    "Haploinsufficiency PMID6",
    "Triplosensitivity Score",
    "Triplosensitivity Description",
    "Triplosensitivity PMID1",
    "Triplosensitivity PMID2",
    "Triplosensitivity PMID3",
    "Triplosensitivity PMID4",
    "Triplosensitivity PMID5",
    "Triplosensitivity PMID6",
    "Date Last Evaluated",
    "Loss phenotype OMIM ID",
    "Triplosensitive phenotype OMIM ID",
];

/// ClinGen dosage sensitivity curation table. Every column is a string.
#[derive(Debug, Clone)]
pub struct DosageTable {
    path: PathBuf,
    data: DataFrame,
}

impl_table!(DosageTable);

impl DosageTable {
    pub fn new(
        path: PathBuf,
        data: DataFrame,
    ) -> Self {
        Self { path, data }
    }

    pub fn from_path<P: AsRef<Path>>(
        path: P,
        n_rows: Option<usize>,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let loaded = TableReaderBuilder::default()
            .with_source_type(SourceType::Dosage)
            .with_n_rows(n_rows)
            .build(&path)?;
        Ok(Self {
            path,
            data: loaded.data,
        })
    }

    /// Drops the listed columns, failing on a name that is not present.
    pub fn drop_columns<S: AsRef<str>>(
        &mut self,
        columns: &[S],
    ) -> anyhow::Result<()> {
        crate::utils::drop_columns(&mut self.data, columns)
    }
}
