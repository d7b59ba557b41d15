use pkg_history::Revision;
use serde_json::{Value, json};
use std::io::Write;

use crate::object::ObjectPrinter;

/// Prints a set of revisions as one `v1` `List` object.
pub struct RevisionPrinter {
    delegate: ObjectPrinter,
}

impl RevisionPrinter {
    pub fn new(delegate: ObjectPrinter) -> Self {
        Self { delegate }
    }

    pub fn print(&self, revisions: &[Revision], out: &mut dyn Write) -> anyhow::Result<()> {
        let items = revisions
            .iter()
            .map(|r| self.delegate.printable(r))
            .collect::<anyhow::Result<Vec<Value>>>()?;

        let list = json!({
            "apiVersion": "v1",
            "kind": "List",
            "metadata": {"resourceVersion": ""},
            "items": items,
        });
        self.delegate.encoder().encode(&list, out)
    }
}
