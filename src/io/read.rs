use std::fmt;
use std::io::{
    BufRead,
    BufReader,
    Cursor,
    Read,
    Seek,
    SeekFrom,
};
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    bail,
    ensure,
    Context,
};
use itertools::Itertools;
use log::{
    debug,
    info,
};
use polars::io::mmap::MmapBytesReader;
use polars::prelude::*;

use crate::data_structs::meta_info::MetaInfo;
#[cfg(feature = "compression")]
use crate::io::compression::Compression;
use crate::io::open_decoded;
use crate::io::schema::SourceType;
use crate::utils::string_schema;

/// A table as it comes out of a loader.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub data: DataFrame,
    /// Meta-information block, only present for VCF input
    pub meta: Option<MetaInfo>,
}

pub struct TableReaderBuilder {
    source_type: SourceType,
    n_rows:      Option<usize>,
    #[cfg(feature = "compression")]
    compression: Option<Compression>,
}

impl Default for TableReaderBuilder {
    fn default() -> Self {
        Self {
            source_type: SourceType::Clinvar,
            n_rows: None,
            #[cfg(feature = "compression")]
            compression: None,
        }
    }
}

impl TableReaderBuilder {
    pub fn with_source_type(
        mut self,
        source_type: SourceType,
    ) -> Self {
        self.source_type = source_type;
        self
    }

    /// Limits the number of data rows read. `None` reads the whole file.
    pub fn with_n_rows(
        mut self,
        n_rows: Option<usize>,
    ) -> Self {
        self.n_rows = n_rows;
        self
    }

    /// Overrides the codec otherwise guessed from the file extension.
    #[cfg(feature = "compression")]
    pub fn with_compression(
        mut self,
        compression: Compression,
    ) -> Self {
        self.compression = Some(compression);
        self
    }
}

impl TableReaderBuilder {
    fn get_file_handle(
        &self,
        path: &Path,
    ) -> anyhow::Result<Box<dyn MmapBytesReader>> {
        #[cfg(feature = "compression")]
        {
            if let Some(compression) = &self.compression {
                let file = std::fs::File::open(path)
                    .with_context(|| format!("Failed to open {}", path.display()))?;
                return compression.get_decoder(file);
            }
        }

        open_decoded(path)
    }

    fn read_clinvar(
        &self,
        mut handle: Box<dyn MmapBytesReader>,
    ) -> anyhow::Result<LoadedTable> {
        let meta = MetaInfo::from_reader(BufReader::new(&mut handle))?;
        handle.seek(SeekFrom::Start(0))?;
        check_field_counts(
            BufReader::new(&mut handle),
            meta.n_meta_rows() + 1,
            '\t',
            FieldCount::AtLeast(VCF_MIN_FIELDS),
            self.n_rows,
        )?;
        handle.seek(SeekFrom::Start(0))?;

        let data = self
            .source_type
            .read_options()
            .with_skip_rows(meta.n_meta_rows())
            .with_n_rows(self.n_rows)
            .into_reader_with_file_handle(handle)
            .finish()?;

        Ok(LoadedTable {
            data,
            meta: Some(meta),
        })
    }

    fn read_dosage(
        &self,
        mut handle: Box<dyn MmapBytesReader>,
    ) -> anyhow::Result<LoadedTable> {
        let mut text = String::new();
        handle.read_to_string(&mut text)?;

        let (header, body_start) =
            locate_tab_header(&text).context("No tab-delimited header line found")?;
        debug!("Dosage header: {:?}", header);
        let schema = string_schema(&header);
        let body = &text[body_start..];
        check_field_counts(
            Cursor::new(text.as_bytes()),
            text[..body_start].lines().count(),
            '\t',
            FieldCount::Exact(header.len()),
            self.n_rows,
        )?;

        let has_data = body
            .lines()
            .any(|line| !line.trim().is_empty() && !line.starts_with('#'));
        if !has_data {
            return Ok(LoadedTable {
                data: DataFrame::empty_with_schema(&schema),
                meta: None,
            });
        }

        let data = self
            .source_type
            .read_options()
            .with_schema(Some(Arc::new(schema)))
            .with_n_rows(self.n_rows)
            .into_reader_with_file_handle(Cursor::new(body.as_bytes().to_vec()))
            .finish()?;

        Ok(LoadedTable { data, meta: None })
    }

    fn read_plain(
        &self,
        mut handle: Box<dyn MmapBytesReader>,
    ) -> anyhow::Result<LoadedTable> {
        let separator = self.source_type.separator() as char;
        let mut header = String::new();
        BufReader::new(&mut handle).read_line(&mut header)?;
        let n_fields = header
            .trim_end_matches(['\r', '\n'])
            .split(separator)
            .count();
        handle.seek(SeekFrom::Start(0))?;
        check_field_counts(
            BufReader::new(&mut handle),
            1,
            separator,
            FieldCount::Exact(n_fields),
            self.n_rows,
        )?;
        handle.seek(SeekFrom::Start(0))?;

        let data = self
            .source_type
            .read_options()
            .with_n_rows(self.n_rows)
            .into_reader_with_file_handle(handle)
            .finish()?;
        Ok(LoadedTable { data, meta: None })
    }

    /// Renames positional columns and casts the typed ones.
    fn finalize(
        &self,
        mut data: DataFrame,
    ) -> anyhow::Result<DataFrame> {
        if let Some(names) = self.source_type.col_names() {
            ensure!(
                data.width() == names.len(),
                "Expected {} columns, found {}",
                names.len(),
                data.width()
            );
            data.set_column_names(names.iter().copied())?;
        }

        let casts = self
            .source_type
            .typed_columns()
            .iter()
            .map(|(name, dtype)| col(*name).strict_cast(dtype.clone()))
            .collect_vec();
        if casts.is_empty() {
            return Ok(data);
        }
        Ok(data.lazy().with_columns(casts).collect()?)
    }

    pub fn build_from_handle(
        self,
        handle: Box<dyn MmapBytesReader>,
    ) -> anyhow::Result<LoadedTable> {
        let mut loaded = match self.source_type {
            SourceType::Clinvar => self.read_clinvar(handle)?,
            SourceType::Dosage => self.read_dosage(handle)?,
            SourceType::Revel => self.read_plain(handle)?,
        };
        loaded.data = self.finalize(loaded.data)?;
        Ok(loaded)
    }

    pub fn build<P: AsRef<Path>>(
        self,
        path: P,
    ) -> anyhow::Result<LoadedTable> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let source_type = self.source_type;
        let handle = self.get_file_handle(&path)?;
        let loaded = self
            .build_from_handle(handle)
            .with_context(|| {
                format!("Failed to read {} table from {}", source_type, path.display())
            })?;
        info!(
            "Read {} rows x {} columns from {}",
            loaded.data.height(),
            loaded.data.width(),
            path.display()
        );
        Ok(loaded)
    }
}

/// Fixed VCF columns: CHROM to INFO.
const VCF_MIN_FIELDS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldCount {
    Exact(usize),
    AtLeast(usize),
}

impl FieldCount {
    fn accepts(
        &self,
        n_fields: usize,
    ) -> bool {
        match self {
            FieldCount::Exact(n) => n_fields == *n,
            FieldCount::AtLeast(n) => n_fields >= *n,
        }
    }
}

impl fmt::Display for FieldCount {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            FieldCount::Exact(n) => write!(f, "{}", n),
            FieldCount::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// Checks the field count of every data line after the first `skip` lines.
///
/// Blank lines and `#` comments are ignored. Stops after `n_rows` data lines
/// when a limit is set. Line numbers in errors are 1-based.
fn check_field_counts<R: BufRead>(
    reader: R,
    skip: usize,
    separator: char,
    expected: FieldCount,
    n_rows: Option<usize>,
) -> anyhow::Result<()> {
    let mut checked = 0;
    for (idx, line) in reader.lines().enumerate().skip(skip) {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        if n_rows.is_some_and(|n| checked >= n) {
            break;
        }
        checked += 1;
        let n_fields = line.split(separator).count();
        if !expected.accepts(n_fields) {
            bail!(
                "Line {}: expected {} fields, found {}",
                idx + 1,
                expected,
                n_fields
            );
        }
    }
    Ok(())
}

/// Finds the first line with more than one tab-separated field.
/// Returns the trimmed field names and the byte offset right after that line.
fn locate_tab_header(text: &str) -> Option<(Vec<String>, usize)> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        offset += line.len();
        let fields = line
            .trim_end_matches(['\r', '\n'])
            .split('\t')
            .collect_vec();
        if fields.len() > 1 {
            let names = fields
                .into_iter()
                .map(|f| f.trim().to_string())
                .collect();
            return Some((names, offset));
        }
    }
    None
}
