#[cfg(feature = "compression")]
mod inner {
    use std::fs::File;
    use std::io::{
        copy,
        Seek,
        SeekFrom,
        Write,
    };
    use std::path::Path;

    use polars::io::mmap::MmapBytesReader;
    use tempfile::tempfile;
    use zip::write::SimpleFileOptions;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub enum Compression {
        #[default]
        None,
        Gz,
        Zstd,
        Lz4,
        Xz2,
        Bzip2,
        Zip,
    }

    impl Compression {
        pub fn name(&self) -> &str {
            match self {
                Compression::None => "none",
                Compression::Gz => "gzip",
                Compression::Zstd => "zstd",
                Compression::Lz4 => "lz4",
                Compression::Xz2 => "xz2",
                Compression::Bzip2 => "bzip2",
                Compression::Zip => "zip",
            }
        }

        /// Guesses the codec from the last extension of `path`.
        pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
            let extension = path
                .as_ref()
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase);
            match extension.as_deref() {
                Some("gz" | "bgz" | "gzip") => Compression::Gz,
                Some("zst" | "zstd") => Compression::Zstd,
                Some("lz4") => Compression::Lz4,
                Some("xz") => Compression::Xz2,
                Some("bz2") => Compression::Bzip2,
                Some("zip") => Compression::Zip,
                _ => Compression::None,
            }
        }

        /// Decodes the whole file into an anonymous temporary file, so the
        /// result can be seeked and memory-mapped by the CSV reader.
        pub fn get_decoder(
            &self,
            mut handle: File,
        ) -> anyhow::Result<Box<dyn MmapBytesReader>> {
            let mut temp_file = tempfile()?;

            match self {
                Compression::Gz => {
                    // Multi-member aware, bgzip output is a series of members
                    let mut decoder = flate2::read::MultiGzDecoder::new(handle);
                    copy(&mut decoder, &mut temp_file)?;
                },
                Compression::Zstd => {
                    let mut decoder = zstd::Decoder::new(handle)?;
                    copy(&mut decoder, &mut temp_file)?;
                },
                Compression::Lz4 => {
                    let mut decoder = lz4::Decoder::new(handle)?;
                    copy(&mut decoder, &mut temp_file)?;
                },
                Compression::Xz2 => {
                    let mut decoder = xz2::read::XzDecoder::new(handle);
                    copy(&mut decoder, &mut temp_file)?;
                },
                Compression::Bzip2 => {
                    let mut decoder = bzip2::read::BzDecoder::new(handle);
                    copy(&mut decoder, &mut temp_file)?;
                },
                Compression::Zip => {
                    let mut archive = zip::ZipArchive::new(handle)?;
                    anyhow::ensure!(archive.len() > 0, "Zip archive is empty");
                    // Only the first entry is read
                    let mut file_in_zip = archive.by_index(0)?;
                    copy(&mut file_in_zip, &mut temp_file)?;
                },
                Compression::None => {
                    handle.seek(SeekFrom::Start(0))?;
                    return Ok(Box::new(handle));
                },
            }

            temp_file.seek(SeekFrom::Start(0))?;
            Ok(Box::new(temp_file))
        }

        /// Wraps `handle` into an encoder. `entry_name` names the single
        /// archive member for [`Compression::Zip`] and is ignored otherwise.
        pub fn get_encoder<W: Write + Seek>(
            &self,
            handle: W,
            compression_level: u32,
            entry_name: &str,
        ) -> anyhow::Result<Encoder<W>> {
            let encoder = match self {
                Compression::Gz => Encoder::Gz(flate2::write::GzEncoder::new(
                    handle,
                    flate2::Compression::new(compression_level),
                )),
                Compression::Zstd => Encoder::Zstd(zstd::Encoder::new(
                    handle,
                    compression_level as i32,
                )?),
                Compression::Lz4 => {
                    let encoder = lz4::EncoderBuilder::new()
                        .level(compression_level)
                        .build(handle)?;
                    Encoder::Lz4(encoder)
                },
                Compression::Xz2 => Encoder::Xz2(xz2::write::XzEncoder::new(
                    handle,
                    compression_level,
                )),
                Compression::Bzip2 => Encoder::Bzip2(bzip2::write::BzEncoder::new(
                    handle,
                    bzip2::Compression::new(compression_level),
                )),
                Compression::Zip => {
                    let mut writer = zip::ZipWriter::new(handle);
                    writer.start_file(entry_name, SimpleFileOptions::default())?;
                    Encoder::Zip(writer)
                },
                Compression::None => Encoder::None(handle),
            };
            Ok(encoder)
        }
    }

    /// Compressing sink. Must be closed with [`Encoder::finish`], dropping it
    /// may leave a truncated stream.
    pub enum Encoder<W: Write + Seek> {
        None(W),
        Gz(flate2::write::GzEncoder<W>),
        Zstd(zstd::Encoder<'static, W>),
        Lz4(lz4::Encoder<W>),
        Xz2(xz2::write::XzEncoder<W>),
        Bzip2(bzip2::write::BzEncoder<W>),
        Zip(zip::ZipWriter<W>),
    }

    impl<W: Write + Seek> Encoder<W> {
        fn inner_mut(&mut self) -> &mut dyn Write {
            match self {
                Encoder::None(w) => w,
                Encoder::Gz(w) => w,
                Encoder::Zstd(w) => w,
                Encoder::Lz4(w) => w,
                Encoder::Xz2(w) => w,
                Encoder::Bzip2(w) => w,
                Encoder::Zip(w) => w,
            }
        }

        /// Writes trailers and returns the underlying sink.
        pub fn finish(self) -> anyhow::Result<W> {
            let mut sink = match self {
                Encoder::None(w) => w,
                Encoder::Gz(w) => w.finish()?,
                Encoder::Zstd(w) => w.finish()?,
                Encoder::Lz4(w) => {
                    let (w, result) = w.finish();
                    result?;
                    w
                },
                Encoder::Xz2(w) => w.finish()?,
                Encoder::Bzip2(w) => w.finish()?,
                Encoder::Zip(w) => w.finish()?,
            };
            sink.flush()?;
            Ok(sink)
        }
    }

    impl<W: Write + Seek> Write for Encoder<W> {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> std::io::Result<usize> {
            self.inner_mut().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.inner_mut().flush()
        }
    }
}

#[cfg(feature = "compression")]
pub use inner::*;

#[cfg(all(test, feature = "compression"))]
mod tests {
    use std::io::{
        Cursor,
        Read,
        Write,
    };

    use super::*;

    #[test]
    fn detects_codec_from_extension() {
        assert_eq!(Compression::from_path("clinvar.vcf.gz"), Compression::Gz);
        assert_eq!(Compression::from_path("revel.csv.zip"), Compression::Zip);
        assert_eq!(Compression::from_path("a.tsv.ZST"), Compression::Zstd);
        assert_eq!(Compression::from_path("a.bz2"), Compression::Bzip2);
        assert_eq!(Compression::from_path("a.tsv"), Compression::None);
        assert_eq!(Compression::from_path("noext"), Compression::None);
    }

    #[test]
    fn encode_then_decode_every_codec() -> anyhow::Result<()> {
        let payload = b"chr,hg19_pos,REVEL\n1,35142,0.027\n";
        for codec in [
            Compression::None,
            Compression::Gz,
            Compression::Zstd,
            Compression::Lz4,
            Compression::Xz2,
            Compression::Bzip2,
            Compression::Zip,
        ] {
            let file = tempfile::NamedTempFile::new()?;
            let mut encoder = codec.get_encoder(file.reopen()?, 6, "table.csv")?;
            encoder.write_all(payload)?;
            encoder.finish()?;

            let mut decoded = Vec::new();
            codec
                .get_decoder(file.reopen()?)?
                .read_to_end(&mut decoded)?;
            assert_eq!(decoded, payload, "codec {}", codec.name());
        }
        Ok(())
    }

    #[test]
    fn zip_encoder_names_its_entry() -> anyhow::Result<()> {
        let mut encoder =
            Compression::Zip.get_encoder(Cursor::new(Vec::new()), 6, "master_table.csv")?;
        encoder.write_all(b"a,b\n")?;
        let sink = encoder.finish()?;
        let mut archive = zip::ZipArchive::new(Cursor::new(sink.into_inner()))?;
        assert_eq!(archive.by_index(0)?.name(), "master_table.csv");
        Ok(())
    }
}
