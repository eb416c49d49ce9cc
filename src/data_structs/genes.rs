use once_cell::sync::Lazy;
use polars::prelude::*;

/// ACMG SF v2.0 list of 59 genes with actionable secondary findings.
pub const ACMG59_GENES: [&str; 59] = [
    "BRCA1", "BRCA2", "TP53", "STK11", "MLH1", "MSH2", "MSH6", "PMS2", "APC",
    "MUTYH", "BMPR1A", "SMAD4", "VHL", "MEN1", "RET", "PTEN", "RB1", "SDHD",
    "SDHAF2", "SDHC", "SDHB", "TSC1", "TSC2", "WT1", "NF2", "COL3A1", "FBN1",
    "TGFBR1", "TGFBR2", "SMAD3", "ACTA2", "MYH11", "MYBPC3", "MYH7", "TNNT2",
    "TNNI3", "TPM1", "MYL3", "ACTC1", "PRKAG2", "GLA", "MYL2", "LMNA", "RYR2",
    "PKP2", "DSP", "DSC2", "TMEM43", "DSG2", "KCNQ1", "KCNH2", "SCN5A", "LDLR",
    "APOB", "PCSK9", "ATP7B", "OTC", "RYR1", "CACNA1S",
];

/// [`ACMG59_GENES`] as a string series, the right-hand side of `is_in`
/// filters.
pub static ACMG59_SERIES: Lazy<Series> =
    Lazy::new(|| Series::new("acmg59".into(), ACMG59_GENES));

pub fn is_acmg59(gene: &str) -> bool {
    ACMG59_GENES.contains(&gene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_has_59_distinct_symbols() {
        let distinct: hashbrown::HashSet<_> = ACMG59_GENES.iter().collect();
        assert_eq!(distinct.len(), 59);
    }

    #[test]
    fn series_mirrors_list() {
        assert_eq!(ACMG59_SERIES.len(), 59);
        assert_eq!(ACMG59_SERIES.dtype(), &DataType::String);
        let from_series = ACMG59_SERIES
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect::<Vec<_>>();
        assert_eq!(from_series, ACMG59_GENES);
    }

    #[test]
    fn membership_is_exact() {
        assert!(is_acmg59("BRCA1"));
        assert!(is_acmg59("CACNA1S"));
        assert!(!is_acmg59("brca1"));
        assert!(!is_acmg59("AGRN"));
    }
}
