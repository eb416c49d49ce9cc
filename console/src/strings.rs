macro_rules! define_strings {
    (
        $($name:ident = $value:literal);*$(;)?
    ) => {
        $(
            pub const $name: &str = $value;
        )*
    };
}

pub mod load {
    define_strings! {
        INPUT =
            "Path of the input file. Compressed files (.gz, .zip, .zst, .bz2, \
            .xz, .lz4) are decoded according to their extension.";
        N_ROWS =
            "Number of data rows to read. Reads the whole file if omitted.";
        OUTPUT =
            "Path for the processed table. Defaults to \
            <input name up to the first dot>_processed.csv in the working \
            directory.";
    }
}

pub mod master {
    define_strings! {
        CLINVAR =
            "Path of the ClinVar VCF file.";
        REVEL =
            "Path of the REVEL score table (comma separated).";
        DOSAGE =
            "Path of the ClinGen dosage sensitivity curation list (tab \
            separated).";
        OUTPUT =
            "Path for the master table. Compression is chosen from the \
            extension.";
        N_ROWS =
            "Number of data rows to read from every input. Reads whole files \
            if omitted.";
        LEVEL =
            "Compression level of the output file.";
    }
}

pub mod meta {
    define_strings! {
        INPUT =
            "Path of the VCF file whose INFO descriptions are printed as JSON.";
    }
}

pub mod utils {
    define_strings! {
        VERBOSE =
            "Print debug messages. RUST_LOG overrides the level when set.";
    }
}
