use pkg_history::Revision;
use std::io::Write;

/// Prints `kind.group/name` of each revision object, one per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamePrinter;

impl NamePrinter {
    pub fn print(&self, revisions: &[Revision], out: &mut dyn Write) -> anyhow::Result<()> {
        for rev in revisions {
            writeln!(out, "{}/{}", rev.object().resource_type().kind_group(), rev.name())?;
        }
        Ok(())
    }
}
