use std::io::{
    BufWriter,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};

use anyhow::Context;
use log::{
    debug,
    info,
};
use polars::prelude::*;
use tempfile::NamedTempFile;

#[cfg(feature = "compression")]
use crate::io::compression::Compression;

pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Exports a table as comma-separated text with a header row. Nulls are
/// written as empty fields.
///
/// The file is first written next to its destination and moved into place
/// once the encoder has been finished, so a failed export never leaves a
/// truncated file behind.
pub struct TableWriter {
    path:              PathBuf,
    separator:         u8,
    #[cfg(feature = "compression")]
    compression:       Compression,
    #[cfg(feature = "compression")]
    compression_level: u32,
}

impl TableWriter {
    /// Compression, if enabled, is chosen from the extension of `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            #[cfg(feature = "compression")]
            compression: Compression::from_path(&path),
            #[cfg(feature = "compression")]
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            separator: b',',
            path,
        }
    }

    pub fn with_separator(
        mut self,
        separator: u8,
    ) -> Self {
        self.separator = separator;
        self
    }

    #[cfg(feature = "compression")]
    pub fn with_compression(
        mut self,
        compression: Compression,
    ) -> Self {
        self.compression = compression;
        self
    }

    #[cfg(feature = "compression")]
    pub fn with_compression_level(
        mut self,
        compression_level: u32,
    ) -> Self {
        self.compression_level = compression_level;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the single member inside a zip archive: the output file name
    /// without its `.zip` suffix.
    fn entry_name(&self) -> String {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("table.csv");
        name.strip_suffix(".zip")
            .unwrap_or(name)
            .to_string()
    }

    fn write_csv<W: Write>(
        &self,
        sink: &mut W,
        df: &mut DataFrame,
    ) -> anyhow::Result<()> {
        CsvWriter::new(sink)
            .include_header(true)
            .with_separator(self.separator)
            .finish(df)?;
        Ok(())
    }

    pub fn write(
        &self,
        df: &mut DataFrame,
    ) -> anyhow::Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let temp = NamedTempFile::new_in(&parent).with_context(|| {
            format!("Failed to create temporary file in {}", parent.display())
        })?;
        let handle = BufWriter::new(temp.reopen()?);

        #[cfg(feature = "compression")]
        {
            debug!(
                "Writing {} with {} compression (level {})",
                self.path.display(),
                self.compression.name(),
                self.compression_level
            );
            let mut encoder = self.compression.get_encoder(
                handle,
                self.compression_level,
                &self.entry_name(),
            )?;
            self.write_csv(&mut encoder, df)?;
            encoder.finish()?;
        }
        #[cfg(not(feature = "compression"))]
        {
            debug!("Writing {} ({})", self.path.display(), self.entry_name());
            let mut handle = handle;
            self.write_csv(&mut handle, df)?;
            handle.flush()?;
        }

        temp.persist(&self.path)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        info!(
            "Wrote {} rows x {} columns to {}",
            df.height(),
            df.width(),
            self.path.display()
        );
        Ok(())
    }
}
