use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::Container;
use pkg_history::Revision;
use pkg_types::meta::label;
use std::io::Write;
use std::sync::Arc;

use crate::duration::{creation_time, human_age};

/// Spaces between two table columns.
const COLUMN_PADDING: usize = 3;

/// Extracts a revision's cell, given the time ages are relative to.
pub type Extract = Arc<dyn Fn(&Revision, DateTime<Utc>) -> String + Send + Sync>;

/// A table column: header and how to extract a revision's cell.
#[derive(Clone)]
pub struct TableColumn {
    pub header: String,
    pub extract: Extract,
}

impl TableColumn {
    pub fn new(header: &str, extract: impl Fn(&Revision, DateTime<Utc>) -> String + Send + Sync + 'static) -> Self {
        Self {
            header: header.to_string(),
            extract: Arc::new(extract),
        }
    }

    pub fn default_columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("NAME", |rev, _| rev.name().to_string()),
            TableColumn::new("REVISION", |rev, _| rev.number().to_string()),
            TableColumn::new("READY", |rev, _| {
                format!("{}/{}", rev.ready_replicas(), rev.current_replicas())
            }),
            TableColumn::new("AGE", |rev, now| human_age(creation_time(rev.metadata()), now)),
        ]
    }

    /// Default columns plus the containers and images of each revision.
    pub fn wide_columns() -> Vec<TableColumn> {
        let mut columns = Self::default_columns();
        columns.push(TableColumn::new("CONTAINERS", |rev, _| {
            containers(rev, |c| c.name.clone())
        }));
        columns.push(TableColumn::new("IMAGES", |rev, _| {
            containers(rev, |c| c.image.clone().unwrap_or_default())
        }));
        columns
    }

    /// The value of label `key` on the revision object. The header is the
    /// key's name segment in upper case, as kubectl prints it.
    pub fn label(key: &str) -> Self {
        let name = key.rsplit('/').next().unwrap_or(key);
        let key = key.to_string();
        TableColumn::new(&name.to_uppercase(), move |rev, _| {
            label(rev.metadata(), &key).unwrap_or_default().to_string()
        })
    }

    /// All labels of the revision object as `key=value` pairs.
    pub fn labels() -> Self {
        TableColumn::new("LABELS", |rev, _| match rev.metadata().labels.as_ref() {
            Some(labels) if !labels.is_empty() => labels
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(","),
            _ => "<none>".to_string(),
        })
    }
}

fn containers(rev: &Revision, field: impl Fn(&Container) -> String) -> String {
    rev.pod_template()
        .spec
        .map(|spec| spec.containers.iter().map(&field).collect::<Vec<_>>().join(","))
        .unwrap_or_default()
}

/// Prints revisions as an aligned table, one row per revision.
pub struct TablePrinter {
    columns: Vec<TableColumn>,
    no_headers: bool,
    show_kind: bool,
    now: DateTime<Utc>,
}

impl Default for TablePrinter {
    fn default() -> Self {
        Self::new(TableColumn::default_columns())
    }
}

impl TablePrinter {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            no_headers: false,
            show_kind: false,
            now: Utc::now(),
        }
    }

    pub fn no_headers(mut self, no_headers: bool) -> Self {
        self.no_headers = no_headers;
        self
    }

    /// Prefix names with the revision object's `kind.group`.
    pub fn show_kind(mut self, show_kind: bool) -> Self {
        self.show_kind = show_kind;
        self
    }

    /// Compute ages relative to `now` instead of the construction time.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    fn row(&self, rev: &Revision) -> Vec<String> {
        let mut row: Vec<String> = self.columns.iter().map(|c| (c.extract)(rev, self.now)).collect();
        if self.show_kind
            && let Some(first) = row.first_mut()
        {
            *first = format!("{}/{}", rev.object().resource_type().kind_group(), first);
        }
        row
    }

    pub fn print(&self, revisions: &[Revision], out: &mut dyn Write) -> anyhow::Result<()> {
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(revisions.len() + 1);
        if !self.no_headers {
            rows.push(self.columns.iter().map(|c| c.header.clone()).collect());
        }
        rows.extend(revisions.iter().map(|rev| self.row(rev)));

        let mut widths = vec![0; self.columns.len()];
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        for row in &rows {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                if i + 1 == row.len() {
                    line.push_str(cell);
                } else {
                    line.push_str(&format!("{:<width$}", cell, width = widths[i] + COLUMN_PADDING));
                }
            }
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}
