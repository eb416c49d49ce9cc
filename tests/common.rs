#![allow(dead_code)]
use std::fs::File;
use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use vartable::io::compression::Compression;

pub const VCF_META: &str = "##fileformat=VCFv4.1\n\
    ##fileDate=2021-07-10\n\
    ##source=ClinVar\n\
    ##reference=GRCh37\n\
    ##ID=<Description=\"ClinVar Variation ID\">\n\
    ##INFO=<ID=ALLELEID,Number=1,Type=Integer,Description=\"the ClinVar Allele ID\">\n\
    ##INFO=<ID=CLNSIG,Number=.,Type=String,Description=\"Clinical significance for this single variant\">\n\
    ##INFO=<ID=CLNSIGCONF,Number=.,Type=String,Description=\"Conflicting clinical significance for this single variant\">\n\
    ##INFO=<ID=GENEINFO,Number=1,Type=String,Description=\"Gene(s) for the variant reported as gene symbol:gene id. The gene symbol and id are delimited by a colon (:) and each pair is delimited by a vertical bar (|)\">\n\
    ##INFO=<ID=MC,Number=.,Type=String,Description=\"comma separated list of molecular consequence in the form of Sequence Ontology ID|molecular_consequence\">\n";

pub const VCF_HEADER: &str = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";

pub const REVEL_HEADER: &str = "chr,hg19_pos,grch38_pos,ref,alt,aaref,aaalt,REVEL\n";

pub const DOSAGE_PREAMBLE: &str = "#ClinGen Gene Curation Results\n\
    #13 Jul,2021\n\
    #Genomic Locations are reported on GRCh37 (hg19): GCF_000001405.13\n\
    #https://www.ncbi.nlm.nih.gov/projects/dbvar/clingen\n\
    #to create link: https://www.ncbi.nlm.nih.gov/projects/dbvar/clingen/clingen_gene.cgi?sym=\n";

pub const DOSAGE_COLUMNS: [&str; 25] = [
    "#Gene Symbol",
    "Gene ID",
    "cytoBand",
    "Genomic Location",
    "Haploinsufficiency Score",
    "Haploinsufficiency Description",
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
    "Haploinsufficiency Disease ID",
    "Triplosensitivity Disease ID",
];

/// `(CHROM, POS, ID, REF, ALT, INFO)`
pub type VcfRecord<'a> = (&'a str, i64, &'a str, &'a str, &'a str, &'a str);

/// `(chr, hg19_pos, grch38_pos, ref, alt, REVEL)`
pub type RevelRecord<'a> = (&'a str, i64, &'a str, &'a str, &'a str, f64);

pub fn vcf_text(records: &[VcfRecord]) -> String {
    let mut text = format!("{}{}", VCF_META, VCF_HEADER);
    for (chrom, pos, id, reference, alt, info) in records {
        text.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t.\t.\t{}\n",
            chrom, pos, id, reference, alt, info
        ));
    }
    text
}

pub fn revel_text(records: &[RevelRecord]) -> String {
    let mut text = REVEL_HEADER.to_string();
    for (chr, hg19_pos, grch38_pos, reference, alt, score) in records {
        text.push_str(&format!(
            "{},{},{},{},{},R,W,{}\n",
            chr, hg19_pos, grch38_pos, reference, alt, score
        ));
    }
    text
}

/// ClinGen table with the full header. Each gene gets a haploinsufficiency
/// score, remaining fields are filled with placeholders.
pub fn dosage_text(genes: &[(&str, &str)]) -> String {
    let mut text = DOSAGE_PREAMBLE.to_string();
    text.push_str(&DOSAGE_COLUMNS.join("\t"));
    text.push('\n');
    for (i, (gene, score)) in genes.iter().enumerate() {
        let mut fields = vec![gene.to_string(), (i + 1).to_string()];
        fields.extend((2..DOSAGE_COLUMNS.len()).map(|j| format!("v{}", j)));
        fields[4] = score.to_string();
        text.push_str(&fields.join("\t"));
        text.push('\n');
    }
    text
}

pub fn init_logger() {
    let _ = pretty_env_logger::formatted_builder()
        .is_test(true)
        .try_init();
}

/// Writes `text` to `dir/name`, compressed according to the extension.
pub fn write_file(
    dir: &Path,
    name: &str,
    text: &str,
) -> anyhow::Result<PathBuf> {
    init_logger();
    let path = dir.join(name);
    let entry = name.strip_suffix(".zip").unwrap_or(name);
    let mut encoder =
        Compression::from_path(&path).get_encoder(File::create(&path)?, 6, entry)?;
    encoder.write_all(text.as_bytes())?;
    encoder.finish()?;
    Ok(path)
}

pub fn column_names(df: &polars::prelude::DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}
