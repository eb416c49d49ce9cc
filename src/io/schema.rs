use std::fmt::Display;
use std::str::FromStr;

use polars::prelude::*;

/// Supported input table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    /// ClinVar VCF: `##` meta block, `#CHROM` header, tab separated
    Clinvar,
    /// REVEL scores: comma separated, header on the first line
    Revel,
    /// ClinGen dosage sensitivity curation list: free-text preamble, tab
    /// separated, `#` comments
    Dosage,
}

impl FromStr for SourceType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clinvar" | "vcf" => Ok(SourceType::Clinvar),
            "revel" => Ok(SourceType::Revel),
            "dosage" | "clingen" => Ok(SourceType::Dosage),
            other => anyhow::bail!("Unknown source type '{}'", other),
        }
    }
}

impl Display for SourceType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let str = match self {
            SourceType::Clinvar => "clinvar",
            SourceType::Revel => "revel",
            SourceType::Dosage => "dosage",
        };
        write!(f, "{}", str)
    }
}

impl SourceType {
    /// Column names assigned after reading. `None` keeps the file header.
    pub const fn col_names(&self) -> Option<&[&'static str]> {
        match self {
            Self::Clinvar => Some(&["CHROM", "POS", "ID", "REF", "ALT", "INFO"]),
            Self::Revel | Self::Dosage => None,
        }
    }

    /// Positions of the columns to read. `None` reads every column.
    pub fn projection(&self) -> Option<Vec<usize>> {
        match self {
            // QUAL and FILTER are skipped
            Self::Clinvar => Some(vec![0, 1, 2, 3, 4, 7]),
            Self::Revel | Self::Dosage => None,
        }
    }

    /// Columns cast away from string once the table is read. Everything not
    /// listed stays a string, which keeps contigs like `X` or `MT` intact.
    pub const fn typed_columns(&self) -> &[(&'static str, DataType)] {
        match self {
            Self::Clinvar => &[("POS", DataType::Int64)],
            Self::Revel => {
                &[
                    ("hg19_pos", DataType::Int64), // hg19_pos
                    ("REVEL", DataType::Float64),  // REVEL
                ]
            },
            Self::Dosage => &[],
        }
    }

    /// Returns chromosome column name.
    pub const fn chr_col(&self) -> Option<&'static str> {
        match self {
            Self::Clinvar => Some("CHROM"),
            Self::Revel => Some("chr"),
            Self::Dosage => None,
        }
    }

    /// Returns position column name used for joining.
    pub const fn position_col(&self) -> Option<&'static str> {
        match self {
            Self::Clinvar => Some("POS"),
            Self::Revel => Some("hg19_pos"),
            Self::Dosage => None,
        }
    }

    pub const fn separator(&self) -> u8 {
        match self {
            Self::Clinvar | Self::Dosage => b'\t',
            Self::Revel => b',',
        }
    }

    /// Creates CSV read options for this format.
    pub fn read_options(&self) -> CsvReadOptions {
        let parse_options = CsvParseOptions::default()
            .with_separator(self.separator())
            .with_try_parse_dates(false);

        let parse_options = match self {
            // INFO values may hold '#' and '"'
            Self::Clinvar => parse_options.with_quote_char(None),
            Self::Dosage => {
                parse_options
                    .with_quote_char(None)
                    .with_comment_prefix(Some("#"))
            },
            Self::Revel => parse_options,
        };

        CsvReadOptions::default()
            .with_has_header(!matches!(self, Self::Dosage))
            .with_infer_schema_length(Some(0))
            .with_projection(self.projection().map(Arc::new))
            .with_parse_options(parse_options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_type_names_round_trip() {
        for source in [SourceType::Clinvar, SourceType::Revel, SourceType::Dosage] {
            assert_eq!(SourceType::from_str(&source.to_string()).unwrap(), source);
        }
        assert!(SourceType::from_str("bismark").is_err());
    }

    #[test]
    fn clinvar_reads_six_of_eight_columns() {
        let projection = SourceType::Clinvar.projection().unwrap();
        let names = SourceType::Clinvar.col_names().unwrap();
        assert_eq!(projection.len(), names.len());
        assert!(!projection.contains(&5) && !projection.contains(&6));
    }

    #[test]
    fn join_columns_are_typed_alike() {
        let clinvar = SourceType::Clinvar;
        let revel = SourceType::Revel;
        let dtype_of = |source: SourceType, name: &str| {
            source
                .typed_columns()
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, d)| d.clone())
        };
        assert_eq!(
            dtype_of(clinvar, clinvar.position_col().unwrap()),
            dtype_of(revel, revel.position_col().unwrap())
        );
        assert_eq!(dtype_of(clinvar, clinvar.chr_col().unwrap()), None);
        assert_eq!(dtype_of(revel, revel.chr_col().unwrap()), None);
    }
}
