//! Helpers shared by the loaders, the derivation stage and the assembler.
//!
//! Key functionalities include:
//!
//! - All-string schemas for tables whose column set is only known at runtime.
//! - Column projection helpers (strict drop, ordered retain) over polars
//!   `DataFrame`s.
//! - Macros for common struct operations (getter functions, builder-style
//!   `with_*` methods).
//! - Deriving default output names from input paths.

use std::path::{
    Path,
    PathBuf,
};

use anyhow::Context;
use itertools::Itertools;
use polars::prelude::*;

/// Creates a schema where every column is read as a string.
pub(crate) fn string_schema<S: AsRef<str>>(names: &[S]) -> Schema {
    Schema::from_iter(
        names
            .iter()
            .map(|name| (PlSmallStr::from(name.as_ref()), DataType::String)),
    )
}

pub fn has_column(
    df: &DataFrame,
    name: &str,
) -> bool {
    df.get_column_index(name).is_some()
}

/// Drops every listed column. Fails on the first name that is not present,
/// leaving the frame untouched.
pub fn drop_columns<S: AsRef<str>>(
    df: &mut DataFrame,
    names: &[S],
) -> anyhow::Result<()> {
    if let Some(missing) = names
        .iter()
        .map(AsRef::as_ref)
        .find(|name| !has_column(df, name))
    {
        anyhow::bail!("Column '{}' not found, cannot drop it", missing)
    }
    for name in names {
        df.drop_in_place(name.as_ref())?;
    }
    Ok(())
}

/// Keeps only the columns found in `keep`, in the frame's own order.
pub fn retain_columns<S: AsRef<str>>(
    df: &mut DataFrame,
    keep: &[S],
) -> anyhow::Result<()> {
    let to_drop = df
        .get_column_names()
        .into_iter()
        .filter(|name| {
            !keep
                .iter()
                .any(|k| k.as_ref() == name.as_str())
        })
        .map(|name| name.to_string())
        .collect_vec();
    drop_columns(df, &to_drop)
}

/// File name without directories and without anything after the first dot,
/// e.g. `data/clinvar_20210710.vcf.gz` gives `clinvar_20210710`.
pub fn file_stem<P: AsRef<Path>>(path: P) -> anyhow::Result<String> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Path {} has no file name", path.display()))?;
    Ok(name
        .split('.')
        .next()
        .unwrap_or(name)
        .to_string())
}

/// Default export location for a processed table: `<stem>_processed.csv` in
/// the working directory.
pub fn default_output_path<P: AsRef<Path>>(input: P) -> anyhow::Result<PathBuf> {
    Ok(PathBuf::from(format!("{}_processed.csv", file_stem(input)?)))
}

#[macro_export]
macro_rules! getter_fn {
    ($field_name: ident, $field_type: ty) => {
        pub fn $field_name(&self) -> &$field_type {
            &self.$field_name
        }
    };
}

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
            self.$field_name = value;
            self
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df!(
            "CHROM" => ["1", "X"],
            "POS" => [100i64, 200],
            "INFO" => ["A=1", "B=2"],
            "GENE" => ["AGRN", "BRCA1"],
        )
        .unwrap()
    }

    fn names(df: &DataFrame) -> Vec<&str> {
        df.get_column_names()
            .into_iter()
            .map(|s| s.as_str())
            .collect()
    }

    #[test]
    fn drop_columns_preserves_order() {
        let mut df = frame();
        drop_columns(&mut df, &["POS", "INFO"]).unwrap();
        assert_eq!(names(&df), ["CHROM", "GENE"]);
    }

    #[test]
    fn drop_unknown_column_fails_untouched() {
        let mut df = frame();
        assert!(drop_columns(&mut df, &["POS", "NOPE"]).is_err());
        assert_eq!(df.width(), 4);
    }

    #[test]
    fn retain_keeps_frame_order() {
        let mut df = frame();
        retain_columns(&mut df, &["GENE", "CHROM", "MISSING"]).unwrap();
        assert_eq!(names(&df), ["CHROM", "GENE"]);
    }

    #[test]
    fn stem_stops_at_first_dot() {
        assert_eq!(
            file_stem("data/raw/clinvar_20210710.vcf.gz").unwrap(),
            "clinvar_20210710"
        );
        assert_eq!(
            default_output_path("revel_grch38_all_chromosomes.csv.zip").unwrap(),
            PathBuf::from("revel_grch38_all_chromosomes_processed.csv")
        );
    }
}
