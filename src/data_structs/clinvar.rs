use std::path::{
    Path,
    PathBuf,
};

use anyhow::ensure;
use hashbrown::HashSet;
use indexmap::IndexSet;
use itertools::Itertools;
use log::{
    debug,
    info,
    warn,
};
use polars::prelude::*;

use super::classification::{
    simplify_class_name,
    ClassBucket,
};
use super::impl_table;
use super::info_field::InfoFields;
use super::meta_info::MetaInfo;
use crate::io::read::TableReaderBuilder;
use crate::io::schema::SourceType;
use crate::utils::{
    drop_columns,
    has_column,
    retain_columns,
};

pub const INFO_COL: &str = "INFO";
pub const GENEINFO_COL: &str = "GENEINFO";
pub const MC_COL: &str = "MC";
pub const CLNSIG_COL: &str = "CLNSIG";
pub const CLNSIGCONF_COL: &str = "CLNSIGCONF";

pub const GENE_COL: &str = "GENE";
pub const MOL_CONSEQ_COL: &str = "MOLECULAR CONSEQUENCE";
pub const CLASS_COL: &str = "CLASS";
pub const IS_CONFLICTING_COL: &str = "IS_CONFLICTING";

/// Prefix given to INFO keys that clash with an existing column.
pub const INFO_COLLISION_PREFIX: &str = "INFO_";

pub const UNCERTAIN_CONSEQUENCE: &str = "uncertain";

/// Columns kept by [`ClinvarTable::drop_columns`] when no explicit list is
/// given.
pub const COMMONLY_USED_COLUMNS: [&str; 15] = [
    "CHROM",
    "POS",
    "ID",
    "REF",
    "ALT",
    "CLNHGVS",
    "CLNREVSTAT",
    CLNSIG_COL,
    "CLNVC",
    "ORIGIN",
    CLNSIGCONF_COL,
    CLASS_COL,
    GENE_COL,
    MOL_CONSEQ_COL,
    IS_CONFLICTING_COL,
];

/// Gene symbol from a `GENEINFO` value: everything left of the first `:`.
///
/// `AGRN:375790` gives `AGRN`. Multi-gene values such as
/// `GENE1:1|GENE2:2` keep only the first symbol.
pub fn gene_symbol(gene_info: &str) -> &str {
    gene_info
        .split_once(':')
        .map_or(gene_info, |(symbol, _)| symbol)
}

/// Consequence term from an `MC` value of the form `SO:xxxxxxx|term`.
///
/// Anything that does not split on `|` into exactly two parts, null included,
/// is [`UNCERTAIN_CONSEQUENCE`].
pub fn molecular_consequence(mc: Option<&str>) -> &str {
    match mc.map(|value| value.split('|').collect_vec()) {
        Some(parts) if parts.len() == 2 => parts[1],
        _ => UNCERTAIN_CONSEQUENCE,
    }
}

/// ClinVar variant table.
///
/// Holds the six columns read from the VCF (`CHROM`, `POS`, `ID`, `REF`,
/// `ALT`, `INFO`) until [`ClinvarTable::split_info_columns`] flattens the
/// INFO annotations into one column per key.
#[derive(Debug, Clone)]
pub struct ClinvarTable {
    path: PathBuf,
    data: DataFrame,
    meta: MetaInfo,
}

impl_table!(ClinvarTable);

impl ClinvarTable {
    pub fn new(
        path: PathBuf,
        data: DataFrame,
        meta: MetaInfo,
    ) -> Self {
        Self { path, data, meta }
    }

    /// Loads a ClinVar VCF, plain or compressed, reading at most `n_rows`
    /// records.
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        n_rows: Option<usize>,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let loaded = TableReaderBuilder::default()
            .with_source_type(SourceType::Clinvar)
            .with_n_rows(n_rows)
            .build(&path)?;
        Ok(Self {
            path,
            data: loaded.data,
            meta: loaded.meta.unwrap_or_default(),
        })
    }

    pub fn meta(&self) -> &MetaInfo {
        &self.meta
    }

    /// Decodes every INFO cell and appends one string column per key.
    ///
    /// The set of columns is the union of keys over all rows, in the order
    /// they are first met. Rows lacking a key get null. A key that
    /// matches an existing column name is added as `INFO_<key>`, with the
    /// prefix repeated until the name is unused.
    pub fn split_info_columns(&mut self) -> anyhow::Result<()> {
        if !has_column(&self.data, INFO_COL) {
            return Ok(());
        }
        let decoded = self
            .data
            .column(INFO_COL)?
            .str()?
            .into_iter()
            .map(|cell| cell.map(InfoFields::decode).unwrap_or_default())
            .collect_vec();

        let mut keys: IndexSet<&str> = IndexSet::new();
        for fields in decoded.iter() {
            keys.extend(fields.keys());
        }
        debug!("Discovered {} INFO keys: {:?}", keys.len(), keys);

        let mut columns = Vec::with_capacity(keys.len());
        let mut taken: HashSet<String> = HashSet::new();
        for key in keys {
            let mut name = key.to_string();
            while has_column(&self.data, &name) || taken.contains(&name) {
                name = format!("{}{}", INFO_COLLISION_PREFIX, name);
            }
            if name != key {
                warn!(
                    "INFO key '{}' clashes with an existing column, stored as '{}'",
                    key, name
                );
            }
            taken.insert(name.clone());
            let values = decoded
                .iter()
                .map(|fields| fields.get(key))
                .collect_vec();
            columns.push(Column::new(name.into(), values));
        }
        self.data.hstack_mut(&columns)?;
        Ok(())
    }

    /// Adds `GENE` from `GENEINFO`. No-op when `GENEINFO` is absent.
    pub fn create_gene_column(&mut self) -> anyhow::Result<()> {
        if !has_column(&self.data, GENEINFO_COL) {
            return Ok(());
        }
        let gene: StringChunked = self
            .data
            .column(GENEINFO_COL)?
            .str()?
            .into_iter()
            .map(|cell| cell.map(gene_symbol))
            .collect();
        self.data
            .with_column(gene.with_name(GENE_COL.into()).into_series())?;
        Ok(())
    }

    /// Adds `MOLECULAR CONSEQUENCE` from `MC`. No-op when `MC` is absent.
    pub fn create_mol_conseq_column(&mut self) -> anyhow::Result<()> {
        if !has_column(&self.data, MC_COL) {
            return Ok(());
        }
        let consequence: StringChunked = self
            .data
            .column(MC_COL)?
            .str()?
            .into_iter()
            .map(|cell| Some(molecular_consequence(cell)))
            .collect();
        self.data.with_column(
            consequence
                .with_name(MOL_CONSEQ_COL.into())
                .into_series(),
        )?;
        Ok(())
    }

    /// Adds `CLASS` from `CLNSIG`. No-op when `CLNSIG` is absent.
    pub fn create_class_column(&mut self) -> anyhow::Result<()> {
        if !has_column(&self.data, CLNSIG_COL) {
            return Ok(());
        }
        let class: StringChunked = self
            .data
            .column(CLNSIG_COL)?
            .str()?
            .into_iter()
            .map(|cell| {
                Some(
                    cell.map_or(ClassBucket::Other, simplify_class_name)
                        .as_str(),
                )
            })
            .collect();
        self.data
            .with_column(class.with_name(CLASS_COL.into()).into_series())?;
        Ok(())
    }

    /// Adds `IS_CONFLICTING`: whether `CLNSIGCONF` is set. Every row is
    /// `false` when the table has no `CLNSIGCONF` column.
    pub fn create_is_conflicting_column(&mut self) -> anyhow::Result<()> {
        let conflicting = if has_column(&self.data, CLNSIGCONF_COL) {
            self.data
                .column(CLNSIGCONF_COL)?
                .is_not_null()
        }
        else {
            BooleanChunked::full(
                IS_CONFLICTING_COL.into(),
                false,
                self.data.height(),
            )
        };
        self.data.with_column(
            conflicting
                .with_name(IS_CONFLICTING_COL.into())
                .into_series(),
        )?;
        Ok(())
    }

    /// With `None`, keeps only [`COMMONLY_USED_COLUMNS`] that are present, in
    /// table order. With a list, drops exactly those columns and fails if
    /// one of them does not exist.
    pub fn drop_columns(
        &mut self,
        columns: Option<&[&str]>,
    ) -> anyhow::Result<()> {
        match columns {
            Some(columns) => drop_columns(&mut self.data, columns),
            None => retain_columns(&mut self.data, &COMMONLY_USED_COLUMNS),
        }
    }

    /// Runs the whole derivation stage: INFO expansion, `GENE`,
    /// `MOLECULAR CONSEQUENCE`, `CLASS`, `IS_CONFLICTING`, then projection
    /// onto the commonly used columns.
    pub fn clean(&mut self) -> anyhow::Result<()> {
        self.split_info_columns()?;
        self.create_gene_column()?;
        self.create_mol_conseq_column()?;
        self.create_class_column()?;
        self.create_is_conflicting_column()?;
        self.drop_columns(None)?;
        info!(
            "Cleaned ClinVar table: {} rows x {} columns",
            self.data.height(),
            self.data.width()
        );
        Ok(())
    }

    /// Left-joins `other` on the given key columns. Key columns of both sides
    /// are kept; clashing non-key names from `other` get a `_right` suffix.
    pub fn left_join(
        &mut self,
        other: &DataFrame,
        left_on: &[&str],
        right_on: &[&str],
    ) -> anyhow::Result<()> {
        ensure!(
            left_on.len() == right_on.len(),
            "Join key lists differ in length: {} vs {}",
            left_on.len(),
            right_on.len()
        );
        let joined = self
            .data
            .clone()
            .lazy()
            .join(
                other.clone().lazy(),
                left_on.iter().map(|c| col(*c)).collect_vec(),
                right_on.iter().map(|c| col(*c)).collect_vec(),
                JoinArgs::new(JoinType::Left).with_coalesce(JoinCoalesce::KeepColumns),
            )
            .collect()?;
        self.data = joined;
        Ok(())
    }
}
