use pkg_history::Revision;
use pkg_printer::{NamePrinter, ObjectPrinter, RevisionPrinter, TableColumn, TablePrinter, encoder_for};
use std::io::Write;

/// Output format of the `get` table.
pub const OUTPUT_TABLE: &str = "table";
/// Table output with additional columns.
pub const OUTPUT_WIDE: &str = "wide";
/// Only `kind.group/name` per revision.
pub const OUTPUT_NAME: &str = "name";

/// How `get` prints a list of revisions.
pub enum ListPrinter {
    Table(TablePrinter),
    Names(NamePrinter),
    Objects(RevisionPrinter),
}

impl ListPrinter {
    pub fn print(&self, revisions: &[Revision], out: &mut dyn Write) -> anyhow::Result<()> {
        match self {
            ListPrinter::Table(p) => p.print(revisions, out),
            ListPrinter::Names(p) => p.print(revisions, out),
            ListPrinter::Objects(p) => p.print(revisions, out),
        }
    }
}

/// Printing options shared by `get` and `diff`. The table options only
/// apply to `get`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintFlags {
    pub output: String,
    pub template_only: bool,
    pub show_managed_fields: bool,
    pub no_headers: bool,
    pub show_labels: bool,
    pub label_columns: Vec<String>,
    pub show_kind: bool,
}

impl PrintFlags {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.show_managed_fields && self.template_only {
            anyhow::bail!("--show-managed-fields option can only be used with --template-only=false");
        }
        Ok(())
    }

    /// `Some` for the table formats, `None` for other output.
    pub fn table_printer(&self) -> Option<TablePrinter> {
        let mut columns = match self.output.as_str() {
            "" | OUTPUT_TABLE => TableColumn::default_columns(),
            OUTPUT_WIDE => TableColumn::wide_columns(),
            _ => return None,
        };
        columns.extend(self.label_columns.iter().map(|key| TableColumn::label(key)));
        if self.show_labels {
            columns.push(TableColumn::labels());
        }
        Some(
            TablePrinter::new(columns)
                .no_headers(self.no_headers)
                .show_kind(self.show_kind),
        )
    }

    /// Printer for a list of revisions in the selected format.
    pub fn list_printer(&self) -> anyhow::Result<ListPrinter> {
        if self.output == OUTPUT_NAME {
            return Ok(ListPrinter::Names(NamePrinter));
        }
        match self.table_printer() {
            Some(table) => Ok(ListPrinter::Table(table)),
            None => Ok(ListPrinter::Objects(RevisionPrinter::new(self.object_printer()?))),
        }
    }

    /// Printer for whole objects in the selected encoding.
    pub fn object_printer(&self) -> anyhow::Result<ObjectPrinter> {
        let encoder = encoder_for(&self.output)?;
        Ok(ObjectPrinter::new(encoder)
            .template_only(self.template_only)
            .show_managed_fields(self.show_managed_fields))
    }
}
