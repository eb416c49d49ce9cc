pub mod classification;
pub mod clinvar;
pub mod dosage;
pub mod genes;
pub mod info_field;
pub mod meta_info;
pub mod revel;

use std::path::{
    Path,
    PathBuf,
};

use polars::prelude::DataFrame;

use crate::io::write::TableWriter;

/// A loaded input table together with the path it was read from.
pub trait Table: Sized {
    fn data(&self) -> &DataFrame;

    fn data_mut(&mut self) -> &mut DataFrame;

    fn into_data(self) -> DataFrame;

    /// Path the table was loaded from.
    fn path(&self) -> &Path;

    fn height(&self) -> usize {
        self.data().height()
    }

    /// `<input stem>_processed.csv` in the working directory.
    fn default_output_path(&self) -> anyhow::Result<PathBuf> {
        crate::utils::default_output_path(self.path())
    }

    /// Writes the table as CSV and returns where it went. `None` uses
    /// [`Table::default_output_path`].
    fn export(
        &mut self,
        output: Option<&Path>,
    ) -> anyhow::Result<PathBuf> {
        let output = match output {
            Some(path) => path.to_path_buf(),
            None => self.default_output_path()?,
        };
        TableWriter::new(&output).write(self.data_mut())?;
        Ok(output)
    }
}

macro_rules! impl_table {
    ($name: ident) => {
        impl $crate::data_structs::Table for $name {
            fn data(&self) -> &polars::prelude::DataFrame {
                &self.data
            }

            fn data_mut(&mut self) -> &mut polars::prelude::DataFrame {
                &mut self.data
            }

            fn into_data(self) -> polars::prelude::DataFrame {
                self.data
            }

            fn path(&self) -> &std::path::Path {
                &self.path
            }
        }
    };
}
pub(crate) use impl_table;
