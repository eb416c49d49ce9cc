use std::io::BufRead;
use std::path::Path;

use anyhow::Context;
use indexmap::IndexMap;
use log::debug;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::Serialize;

use crate::io::open_decoded;

const META_PREFIX: &str = "##";
const INFO_PREFIX: &str = "##INFO=";

static ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ID=(\w+)").expect("valid regex"));
static DESCRIPTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"Description="(.*)""#).expect("valid regex"));

/// Descriptions of INFO keys declared in the `##` meta-information block of a
/// VCF file, together with the number of meta lines preceding the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetaInfo {
    fields:      IndexMap<String, String>,
    n_meta_rows: usize,
}

impl MetaInfo {
    crate::getter_fn!(fields, IndexMap<String, String>);

    /// Number of leading `##` lines. The header line sits right after them.
    pub fn n_meta_rows(&self) -> usize {
        self.n_meta_rows
    }

    pub fn description(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Scans lines while they start with `##`.
    ///
    /// `##INFO=` lines that lack an `ID` or a `Description` are counted but
    /// not indexed.
    pub fn from_reader<R: BufRead>(reader: R) -> anyhow::Result<Self> {
        let mut meta = MetaInfo::default();
        for line in reader.lines() {
            let line = line?;
            if !line.starts_with(META_PREFIX) {
                break;
            }
            meta.n_meta_rows += 1;
            if !line.starts_with(INFO_PREFIX) {
                continue;
            }
            let id = ID_RE
                .captures(&line)
                .and_then(|c| c.get(1));
            let description = DESCRIPTION_RE
                .captures(&line)
                .and_then(|c| c.get(1));
            if let (Some(id), Some(description)) = (id, description) {
                meta.fields.insert(
                    id.as_str().to_string(),
                    description.as_str().to_string(),
                );
            }
        }
        debug!(
            "Meta-information: {} lines, {} INFO keys",
            meta.n_meta_rows,
            meta.fields.len()
        );
        Ok(meta)
    }

    /// Reads the meta block of a (possibly compressed) VCF file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let handle = open_decoded(path)?;
        Self::from_reader(std::io::BufReader::new(handle)).with_context(|| {
            format!("Failed to read meta-information of {}", path.display())
        })
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&self.fields)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const HEADER: &str = "##fileformat=VCFv4.1\n\
        ##fileDate=2021-07-10\n\
        ##source=ClinVar\n\
        ##INFO=<ID=ALLELEID,Number=1,Type=Integer,Description=\"the ClinVar Allele ID\">\n\
        ##INFO=<ID=CLNSIG,Number=.,Type=String,Description=\"Clinical significance for this single variant\">\n\
        #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
        1\t69134\t1\tA\tG\t.\t.\tALLELEID=1\n";

    #[test]
    fn parses_info_descriptions() {
        let meta = MetaInfo::from_reader(Cursor::new(HEADER)).unwrap();
        assert_eq!(meta.description("ALLELEID"), Some("the ClinVar Allele ID"));
        assert_eq!(
            meta.description("CLNSIG"),
            Some("Clinical significance for this single variant")
        );
        assert_eq!(meta.fields().len(), 2);
    }

    #[test]
    fn counts_meta_rows() {
        let meta = MetaInfo::from_reader(Cursor::new(HEADER)).unwrap();
        let expected = HEADER
            .lines()
            .filter(|l| l.starts_with("##"))
            .count();
        assert_eq!(meta.n_meta_rows(), expected);
        assert_eq!(meta.n_meta_rows(), 5);
    }

    #[test]
    fn malformed_info_lines_are_skipped() {
        let text = "##INFO=<Number=1,Type=Integer>\n\
            ##INFO=<ID=RS,Number=.>\n\
            ##INFO=<ID=GENEINFO,Description=\"Gene(s) for the variant\">\n\
            #CHROM\n";
        let meta = MetaInfo::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(meta.n_meta_rows(), 3);
        assert_eq!(meta.fields().len(), 1);
        assert_eq!(meta.description("GENEINFO"), Some("Gene(s) for the variant"));
    }

    #[test]
    fn last_duplicate_wins() {
        let text = "##INFO=<ID=MC,Description=\"old\">\n\
            ##INFO=<ID=MC,Description=\"new\">\n";
        let meta = MetaInfo::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(meta.description("MC"), Some("new"));
        assert_eq!(meta.n_meta_rows(), 2);
    }

    #[test]
    fn serializes_descriptions() {
        let meta = MetaInfo::from_reader(Cursor::new(HEADER)).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&meta.to_json().unwrap()).unwrap();
        assert_eq!(json["ALLELEID"], "the ClinVar Allele ID");
    }
}
