//! Rendering of revisions: whole objects through an [`Encoder`], a summary
//! table, or just their names.

pub mod duration;
pub mod encoder;
pub mod name;
pub mod object;
pub mod revision;
pub mod table;

#[cfg(test)]
mod fixtures;

pub use encoder::{Encoder, JsonEncoder, YamlEncoder, encoder_for};
pub use name::NamePrinter;
pub use object::{ObjectPrinter, Printer};
pub use revision::RevisionPrinter;
pub use table::{TableColumn, TablePrinter};
