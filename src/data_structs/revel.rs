use std::path::{
    Path,
    PathBuf,
};

use polars::prelude::*;

use super::impl_table;
use crate::io::read::TableReaderBuilder;
use crate::io::schema::SourceType;

pub const CHR_COL: &str = "chr";
pub const HG19_POS_COL: &str = "hg19_pos";
pub const GRCH38_POS_COL: &str = "grch38_pos";
pub const REF_COL: &str = "ref";
pub const ALT_COL: &str = "alt";
pub const REVEL_COL: &str = "REVEL";

/// REVEL missense pathogenicity scores. `hg19_pos` is an integer and
/// `REVEL` a float, the rest are strings.
#[derive(Debug, Clone)]
pub struct RevelTable {
    path: PathBuf,
    data: DataFrame,
}

impl_table!(RevelTable);

impl RevelTable {
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
            .with_source_type(SourceType::Revel)
            .with_n_rows(n_rows)
            .build(&path)?;
        Ok(Self {
            path,
            data: loaded.data,
        })
    }

    pub fn drop_columns<S: AsRef<str>>(
        &mut self,
        columns: &[S],
    ) -> anyhow::Result<()> {
        crate::utils::drop_columns(&mut self.data, columns)
    }
}
