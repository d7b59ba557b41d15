use pkg_history::Revision;
use serde_json::Value;
use std::io::Write;

use crate::encoder::{Encoder, YamlEncoder};

/// Prints a single revision.
pub trait Printer: Send + Sync {
    fn print(&self, revision: &Revision, out: &mut dyn Write) -> anyhow::Result<()>;
}

/// Prints a revision's full object, or only its pod template.
pub struct ObjectPrinter {
    encoder: Box<dyn Encoder>,
    template_only: bool,
    show_managed_fields: bool,
}

impl Default for ObjectPrinter {
    fn default() -> Self {
        Self::new(Box::new(YamlEncoder))
    }
}

impl ObjectPrinter {
    pub fn new(encoder: Box<dyn Encoder>) -> Self {
        Self {
            encoder,
            template_only: false,
            show_managed_fields: false,
        }
    }

    pub fn template_only(mut self, template_only: bool) -> Self {
        self.template_only = template_only;
        self
    }

    pub fn show_managed_fields(mut self, show: bool) -> Self {
        self.show_managed_fields = show;
        self
    }

    pub fn encoder(&self) -> &dyn Encoder {
        self.encoder.as_ref()
    }

    /// The object this printer would print for `revision`.
    ///
    /// Full objects lose their `managedFields` unless asked to keep them.
    /// Pod templates carry no `apiVersion` or `kind`.
    pub fn printable(&self, revision: &Revision) -> anyhow::Result<Value> {
        if self.template_only {
            let mut value = serde_json::to_value(revision.pod_template())?;
            if let Value::Object(map) = &mut value {
                map.remove("apiVersion");
                map.remove("kind");
            }
            return Ok(value);
        }

        let mut value = serde_json::to_value(revision.object())?;
        if !self.show_managed_fields
            && let Some(Value::Object(metadata)) = value.get_mut("metadata")
        {
            metadata.remove("managedFields");
        }
        Ok(value)
    }
}

impl Printer for ObjectPrinter {
    fn print(&self, revision: &Revision, out: &mut dyn Write) -> anyhow::Result<()> {
        let value = self.printable(revision)?;
        self.encoder.encode(&value, out)
    }
}
