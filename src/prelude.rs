pub use crate::data_structs::classification::{
    simplify_class_name,
    ClassBucket,
};
pub use crate::data_structs::clinvar::ClinvarTable;
pub use crate::data_structs::dosage::DosageTable;
pub use crate::data_structs::genes::{
    is_acmg59,
    ACMG59_GENES,
};
pub use crate::data_structs::info_field::InfoFields;
pub use crate::data_structs::meta_info::MetaInfo;
pub use crate::data_structs::revel::RevelTable;
pub use crate::data_structs::Table;
#[cfg(feature = "compression")]
pub use crate::io::compression::Compression;
pub use crate::io::read::{
    LoadedTable,
    TableReaderBuilder,
};
pub use crate::io::schema::SourceType;
pub use crate::io::write::TableWriter;
pub use crate::tools::master::{
    MasterConfig,
    MasterTableBuilder,
};
