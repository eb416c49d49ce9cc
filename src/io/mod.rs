pub mod compression;
pub mod read;
pub mod schema;
pub mod write;

use std::fs::File;
use std::path::Path;

use anyhow::Context;
use polars::io::mmap::MmapBytesReader;

/// Opens `path` for reading, transparently decoding it when the extension
/// names a known codec.
pub fn open_decoded<P: AsRef<Path>>(path: P) -> anyhow::Result<Box<dyn MmapBytesReader>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    #[cfg(feature = "compression")]
    {
        let compression = compression::Compression::from_path(path);
        compression
            .get_decoder(file)
            .with_context(|| {
                format!("Failed to decode {} as {}", path.display(), compression.name())
            })
    }
    #[cfg(not(feature = "compression"))]
    {
        Ok(Box::new(file))
    }
}
