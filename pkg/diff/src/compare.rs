use pkg_history::Revision;
use pkg_printer::Printer;
use pkg_types::meta::ObjectKey;
use pkg_types::workload::ResourceType;
use std::path::PathBuf;
use tracing::debug;

use crate::error::DiffError;
use crate::files::Files;
use crate::program::{DiffStatus, Program};

/// Compares two revisions with an external program.
pub struct DiffOrchestrator {
    printer: Box<dyn Printer>,
    program: Box<dyn Program>,
    temp_root: Option<PathBuf>,
}

impl DiffOrchestrator {
    pub fn new(printer: Box<dyn Printer>, program: Box<dyn Program>) -> Self {
        Self {
            printer,
            program,
            temp_root: None,
        }
    }

    /// Create temporary directories below `root` instead of the system temp dir.
    pub fn with_temp_root(mut self, root: PathBuf) -> Self {
        self.temp_root = Some(root);
        self
    }

    /// Print both revisions to `file_name` in two fresh directories and run
    /// the program on them, older revision first.
    ///
    /// Both directories are removed before returning. Cleanup failures are
    /// reported alongside any earlier error.
    pub async fn compare(&self, file_name: &str, a: &Revision, b: &Revision) -> Result<DiffStatus, DiffError> {
        let (from, to) = if a.number() > b.number() { (b, a) } else { (a, b) };

        let root = self.temp_root.clone().unwrap_or_else(std::env::temp_dir);
        let files = Files::new_in(&root, &dir_name(from), &dir_name(to))?;
        debug!(
            "Comparing revisions {} and {} in {} and {}",
            from.number(),
            to.number(),
            files.from().path().display(),
            files.to().path().display()
        );

        let result = self.run(&files, file_name, from, to).await;

        match (result, files.tear_down()) {
            (result, Ok(())) => result,
            (Ok(_), Err(cleanup)) => Err(cleanup),
            (Err(err), Err(cleanup)) => Err(DiffError::Combined(vec![err, cleanup])),
        }
    }

    async fn run(&self, files: &Files, file_name: &str, from: &Revision, to: &Revision) -> Result<DiffStatus, DiffError> {
        files.from().print(file_name, from, self.printer.as_ref())?;
        files.to().print(file_name, to, self.printer.as_ref())?;

        let status = self
            .program
            .run(files.from().path(), files.to().path())
            .await?;
        debug!("Diff program finished: {:?}", status);
        Ok(status)
    }
}

/// Directory name prefix for one side: `<number>-<name>`.
pub fn dir_name(revision: &Revision) -> String {
    format!("{}-{}", revision.number(), revision.name())
}

/// File name shared by both sides: `<kind>.<group>.<namespace>.<name>`.
pub fn file_name(resource: ResourceType, key: &ObjectKey) -> String {
    format!("{}.{}.{}", resource.kind_group(), key.namespace, key.name)
}
