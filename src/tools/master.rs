use std::path::{
    Path,
    PathBuf,
};

use anyhow::Context;
use itertools::Itertools;
use log::{
    debug,
    info,
};
use polars::prelude::*;

use crate::data_structs::clinvar::{
    ClinvarTable,
    GENE_COL,
};
use crate::data_structs::dosage::{
    DosageTable,
    DOSAGE_UNUSED_COLUMNS,
    GENE_SYMBOL_COL,
};
use crate::data_structs::genes::ACMG59_SERIES;
use crate::data_structs::revel::{
    RevelTable,
    ALT_COL,
    CHR_COL,
    GRCH38_POS_COL,
    HG19_POS_COL,
    REF_COL,
};
use crate::data_structs::Table;
use crate::io::write::{
    TableWriter,
    DEFAULT_COMPRESSION_LEVEL,
};
use crate::utils::drop_columns;
use crate::with_field_fn;

pub const DEFAULT_MASTER_OUTPUT: &str = "master_table.csv.zip";

/// REVEL join keys, matched position-wise with [`CLINVAR_JOIN_KEYS`].
pub const REVEL_JOIN_KEYS: [&str; 4] = [CHR_COL, HG19_POS_COL, REF_COL, ALT_COL];
pub const CLINVAR_JOIN_KEYS: [&str; 4] = ["CHROM", "POS", "REF", "ALT"];

/// Columns removed from the combined table once all joins are done.
pub const MASTER_DROP_COLUMNS: [&str; 6] =
    ["CHROM", "POS", "REF", "ALT", GENE_SYMBOL_COL, GRCH38_POS_COL];

fn key_exprs(keys: &[&str]) -> Vec<Expr> {
    keys.iter().map(|k| col(*k)).collect_vec()
}

/// Lazy plan combining the three source tables into the master table.
///
/// The stages run in a fixed order: REVEL is inner-joined with ClinVar on
/// the variant coordinates, the dosage table is left-joined on the gene
/// symbol, rows outside the ACMG59 list are filtered out, and the join keys
/// are dropped on [`MasterTableBuilder::finish`].
pub struct MasterTableBuilder {
    plan: LazyFrame,
}

impl MasterTableBuilder {
    /// Inner join of `revel` with `clinvar` on `(chr, hg19_pos, ref, alt)` =
    /// `(CHROM, POS, REF, ALT)`. Key columns of both sides are kept.
    pub fn new(
        revel: DataFrame,
        clinvar: DataFrame,
    ) -> Self {
        let plan = revel.lazy().join(
            clinvar.lazy(),
            key_exprs(&REVEL_JOIN_KEYS),
            key_exprs(&CLINVAR_JOIN_KEYS),
            JoinArgs::new(JoinType::Inner).with_coalesce(JoinCoalesce::KeepColumns),
        );
        Self { plan }
    }

    /// Left join with the dosage table on `GENE` = `#Gene Symbol`.
    pub fn with_dosage(
        self,
        dosage: DataFrame,
    ) -> Self {
        let plan = self.plan.join(
            dosage.lazy(),
            [col(GENE_COL)],
            [col(GENE_SYMBOL_COL)],
            JoinArgs::new(JoinType::Left).with_coalesce(JoinCoalesce::KeepColumns),
        );
        Self { plan }
    }

    /// Keeps rows whose `GENE` is one of
    /// [`ACMG59_GENES`](crate::data_structs::genes::ACMG59_GENES). Null genes are
    /// dropped.
    pub fn filter_genes(self) -> Self {
        let plan = self
            .plan
            .filter(col(GENE_COL).is_in(lit(ACMG59_SERIES.clone())));
        Self { plan }
    }

    pub fn finish(self) -> anyhow::Result<DataFrame> {
        let mut data = self.plan.collect()?;
        drop_columns(&mut data, &MASTER_DROP_COLUMNS)?;
        Ok(data)
    }
}

/// Settings of the master table pipeline.
#[derive(Debug, Clone)]
pub struct MasterConfig {
    /// Destination file. Compression follows its extension.
    pub output:              PathBuf,
    /// Dosage columns dropped before the gene join
    pub dosage_drop_columns: Vec<String>,
    pub compression_level:   u32,
    /// Row limit applied to every input. `None` reads everything.
    pub n_rows:              Option<usize>,
}

impl Default for MasterConfig {
    fn default() -> Self {
        Self {
            output:              PathBuf::from(DEFAULT_MASTER_OUTPUT),
            dosage_drop_columns: DOSAGE_UNUSED_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            compression_level:   DEFAULT_COMPRESSION_LEVEL,
            n_rows:              None,
        }
    }
}

impl MasterConfig {
    with_field_fn!(output, PathBuf);
    with_field_fn!(dosage_drop_columns, Vec<String>);
    with_field_fn!(compression_level, u32);
    with_field_fn!(n_rows, Option<usize>);

    /// Joins already loaded tables. `clinvar` is expected to be cleaned,
    /// i.e. to carry the `GENE` column.
    pub fn assemble(
        &self,
        clinvar: ClinvarTable,
        revel: RevelTable,
        mut dosage: DosageTable,
    ) -> anyhow::Result<DataFrame> {
        dosage
            .drop_columns(&self.dosage_drop_columns)
            .context("Failed to prepare dosage table")?;
        debug!(
            "Joining {} REVEL rows with {} ClinVar rows",
            revel.height(),
            clinvar.height()
        );
        let data = MasterTableBuilder::new(revel.into_data(), clinvar.into_data())
            .with_dosage(dosage.into_data())
            .filter_genes()
            .finish()
            .context("Failed to assemble master table")?;
        info!(
            "Master table: {} rows x {} columns",
            data.height(),
            data.width()
        );
        Ok(data)
    }

    pub fn write(
        &self,
        data: &mut DataFrame,
    ) -> anyhow::Result<()> {
        let writer = TableWriter::new(&self.output);
        #[cfg(feature = "compression")]
        let writer = writer.with_compression_level(self.compression_level);
        writer.write(data)
    }

    /// Loads all three inputs, cleans the ClinVar table, joins them and
    /// writes the result to [`MasterConfig::output`].
    pub fn run<P: AsRef<Path>>(
        &self,
        clinvar: P,
        revel: P,
        dosage: P,
    ) -> anyhow::Result<DataFrame> {
        let mut clinvar = ClinvarTable::from_path(clinvar, self.n_rows)?;
        clinvar.clean()?;
        let revel = RevelTable::from_path(revel, self.n_rows)?;
        let dosage = DosageTable::from_path(dosage, self.n_rows)?;

        let mut data = self.assemble(clinvar, revel, dosage)?;
        self.write(&mut data)?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structs::meta_info::MetaInfo;

    fn clinvar() -> ClinvarTable {
        let data = df!(
            "CHROM" => ["1", "1", "17"],
            "POS" => [100i64, 200, 300],
            "ID" => ["1", "2", "3"],
            "REF" => ["A", "C", "G"],
            "ALT" => ["G", "T", "A"],
            "GENE" => [Some("BRCA1"), Some("AGRN"), None],
        )
        .unwrap();
        ClinvarTable::new("clinvar.vcf".into(), data, MetaInfo::default())
    }

    fn revel_frame() -> DataFrame {
        df!(
            "chr" => ["1", "1", "17", "2"],
            "hg19_pos" => [100i64, 200, 300, 100],
            "grch38_pos" => ["99", "199", "299", "99"],
            "ref" => ["A", "C", "G", "A"],
            "alt" => ["G", "T", "A", "G"],
            "REVEL" => [0.9f64, 0.1, 0.5, 0.7],
        )
        .unwrap()
    }

    fn dosage_frame() -> DataFrame {
        df!(
            "#Gene Symbol" => ["BRCA1"],
            "Haploinsufficiency Score" => ["3"],
        )
        .unwrap()
    }

    #[test]
    fn builder_joins_filters_and_drops_keys() {
        let data = MasterTableBuilder::new(revel_frame(), clinvar().into_data())
            .with_dosage(dosage_frame())
            .filter_genes()
            .finish()
            .unwrap();

        assert_eq!(data.height(), 1);
        for dropped in MASTER_DROP_COLUMNS {
            assert!(data.get_column_index(dropped).is_none(), "{}", dropped);
        }
        let gene = data.column("GENE").unwrap().str().unwrap().get(0);
        assert_eq!(gene, Some("BRCA1"));
        let score = data
            .column("Haploinsufficiency Score")
            .unwrap()
            .str()
            .unwrap()
            .get(0);
        assert_eq!(score, Some("3"));
    }

    #[test]
    fn dosage_without_match_leaves_nulls() {
        let dosage = df!(
            "#Gene Symbol" => ["TP53"],
            "Haploinsufficiency Score" => ["1"],
        )
        .unwrap();
        let data = MasterTableBuilder::new(revel_frame(), clinvar().into_data())
            .with_dosage(dosage)
            .filter_genes()
            .finish()
            .unwrap();
        assert_eq!(data.height(), 1);
        assert_eq!(
            data.column("Haploinsufficiency Score")
                .unwrap()
                .null_count(),
            1
        );
    }

    #[test]
    fn gene_filter_agrees_with_membership() {
        let genes = ["BRCA1", "AGRN", "CACNA1S", "brca1", "TP53"];
        let n = genes.len();
        let positions = (1..=n as i64).collect::<Vec<_>>();
        let clinvar = df!(
            "CHROM" => vec!["1"; n],
            "POS" => positions.clone(),
            "ID" => genes.to_vec(),
            "REF" => vec!["A"; n],
            "ALT" => vec!["G"; n],
            "GENE" => genes.to_vec(),
        )
        .unwrap();
        let revel = df!(
            "chr" => vec!["1"; n],
            "hg19_pos" => positions,
            "grch38_pos" => vec!["."; n],
            "ref" => vec!["A"; n],
            "alt" => vec!["G"; n],
            "REVEL" => vec![0.5f64; n],
        )
        .unwrap();
        let data = MasterTableBuilder::new(revel, clinvar)
            .with_dosage(dosage_frame())
            .filter_genes()
            .finish()
            .unwrap();

        let kept = data
            .column("GENE")
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .sorted()
            .collect::<Vec<_>>();
        let expected = genes
            .iter()
            .copied()
            .filter(|gene| crate::data_structs::genes::is_acmg59(gene))
            .collect::<Vec<_>>();
        assert_eq!(kept, expected);
        assert_eq!(kept, ["BRCA1", "CACNA1S", "TP53"]);
    }

    #[test]
    fn default_config_targets_zipped_csv() {
        let config = MasterConfig::default();
        assert_eq!(config.output, PathBuf::from("master_table.csv.zip"));
        assert_eq!(config.dosage_drop_columns.len(), 19);
        let config = config
            .with_output("out.csv".into())
            .with_n_rows(Some(10));
        assert_eq!(config.n_rows, Some(10));
        assert_eq!(config.output, PathBuf::from("out.csv"));
    }

    #[test]
    fn assemble_requires_dosage_columns_to_drop() {
        let config = MasterConfig::default();
        let revel = RevelTable::new("revel.csv".into(), revel_frame());
        let dosage = DosageTable::new("dosage.tsv".into(), dosage_frame());
        assert!(config.assemble(clinvar(), revel, dosage).is_err());

        let config = config.with_dosage_drop_columns(vec![]);
        let revel = RevelTable::new("revel.csv".into(), revel_frame());
        let dosage = DosageTable::new("dosage.tsv".into(), dosage_frame());
        let data = config.assemble(clinvar(), revel, dosage).unwrap();
        assert_eq!(data.height(), 1);
    }
}
