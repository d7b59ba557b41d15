use pkg_history::Revision;
use pkg_printer::Printer;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::error::DiffError;

/// The two directories holding the printed sides of a comparison.
///
/// Some diff tools guess the input format from file names, so both sides
/// are written to files of the same name in different directories.
#[derive(Debug)]
pub struct Files {
    from: Version,
    to: Version,
}

impl Files {
    /// Create both directories in the system temp dir.
    pub fn new(from: &str, to: &str) -> Result<Self, DiffError> {
        Self::new_in(&std::env::temp_dir(), from, to)
    }

    /// Create both directories below `root`. If the second one cannot be
    /// created, the first is removed again.
    pub fn new_in(root: &Path, from: &str, to: &str) -> Result<Self, DiffError> {
        let from = Version::new_in(root, from)?;
        let to = match Version::new_in(root, to) {
            Ok(to) => to,
            Err(err) => {
                return Err(match from.tear_down() {
                    Ok(()) => err,
                    Err(cleanup) => DiffError::Combined(vec![err, cleanup]),
                });
            }
        };
        Ok(Self { from, to })
    }

    pub fn from(&self) -> &Version {
        &self.from
    }

    pub fn to(&self) -> &Version {
        &self.to
    }

    /// Remove both directories, reporting every failure.
    pub fn tear_down(self) -> Result<(), DiffError> {
        let errors = [self.from.tear_down().err(), self.to.tear_down().err()];
        match DiffError::combine(errors.into_iter().flatten()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// A temporary directory holding one side of a comparison.
#[derive(Debug)]
pub struct Version {
    dir: TempDir,
}

impl Version {
    /// Create a fresh directory named `<name>-<random suffix>` below `root`.
    pub fn new_in(root: &Path, name: &str) -> Result<Self, DiffError> {
        let dir = tempfile::Builder::new()
            .prefix(&format!("{}-", name))
            .tempdir_in(root)
            .map_err(|source| DiffError::Setup {
                name: name.to_string(),
                source,
            })?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Print `revision` into the file `file_name` of this directory.
    pub fn print(&self, file_name: &str, revision: &Revision, printer: &dyn Printer) -> Result<PathBuf, DiffError> {
        let path = self.dir.path().join(file_name);
        write_file(&path, |out| printer.print(revision, out)).map_err(|error| DiffError::Print {
            path: path.clone(),
            error,
        })?;
        Ok(path)
    }

    /// Remove the directory and everything in it.
    pub fn tear_down(self) -> Result<(), DiffError> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|source| DiffError::Cleanup { path, source })
    }
}

fn write_file(path: &Path, write: impl FnOnce(&mut dyn Write) -> anyhow::Result<()>) -> anyhow::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use pkg_constants::paths::MATERIALIZED_FILE_MODE;
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(MATERIALIZED_FILE_MODE);
    }

    let mut out = BufWriter::new(options.open(path)?);
    write(&mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::apps::v1::ReplicaSet;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use pkg_constants::labels::REVISION_ANNOTATION;
    use pkg_history::replicaset::ReplicaSetRevision;
    use pkg_printer::ObjectPrinter;
    use std::collections::BTreeMap;

    fn make_revision(number: i64) -> Revision {
        let rs = ReplicaSet {
            metadata: ObjectMeta {
                namespace: Some("test".to_string()),
                name: Some(format!("web-{}", number)),
                annotations: Some(BTreeMap::from([(
                    REVISION_ANNOTATION.to_string(),
                    number.to_string(),
                )])),
                ..Default::default()
            },
            ..Default::default()
        };
        Revision::ReplicaSet(ReplicaSetRevision::new(&rs).unwrap())
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_new_and_tear_down() {
        let root = tempfile::tempdir().unwrap();
        let files = Files::new_in(root.path(), "1-web-1", "2-web-2").unwrap();

        let from = files.from().path().to_path_buf();
        let to = files.to().path().to_path_buf();
        assert_ne!(from, to);
        assert!(from.is_dir() && to.is_dir());

        let from_name = from.file_name().unwrap().to_string_lossy().into_owned();
        assert!(from_name.starts_with("1-web-1-"), "{}", from_name);
        let to_name = to.file_name().unwrap().to_string_lossy().into_owned();
        assert!(to_name.starts_with("2-web-2-"), "{}", to_name);

        files.tear_down().unwrap();
        assert!(!from.exists());
        assert!(!to.exists());
        assert!(entries(root.path()).is_empty());
    }

    #[test]
    fn test_partial_setup_failure_cleans_up() {
        let root = tempfile::tempdir().unwrap();
        // the prefix points into a directory that does not exist
        let err = Files::new_in(root.path(), "1-web-1", "missing/2-web-2").unwrap_err();
        assert!(matches!(err, DiffError::Setup { .. }));
        assert!(entries(root.path()).is_empty());
    }

    #[test]
    fn test_print_same_file_name() {
        let root = tempfile::tempdir().unwrap();
        let files = Files::new_in(root.path(), "1-web-1", "2-web-2").unwrap();
        let printer = ObjectPrinter::default();

        let name = "replicaset.apps.test.web";
        let a = files.from().print(name, &make_revision(1), &printer).unwrap();
        let b = files.to().print(name, &make_revision(2), &printer).unwrap();
        assert_eq!(a.file_name(), b.file_name());

        let content = std::fs::read_to_string(&a).unwrap();
        assert!(content.contains("name: web-1"));
        assert!(content.contains("kind: ReplicaSet"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&b).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        files.tear_down().unwrap();
    }

    #[test]
    fn test_tear_down_reports_missing_directory() {
        let root = tempfile::tempdir().unwrap();
        let files = Files::new_in(root.path(), "1-web-1", "2-web-2").unwrap();
        std::fs::remove_dir_all(files.from().path()).unwrap();

        let err = files.tear_down().unwrap_err();
        assert!(matches!(err, DiffError::Cleanup { .. }));
        assert!(entries(root.path()).is_empty());
    }
}
