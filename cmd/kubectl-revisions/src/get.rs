use clap::{ArgAction, Args};
use pkg_cluster::ClusterReader;
use pkg_history::{History, Revisions};
use pkg_types::meta::ObjectKey;
use std::io::Write;
use std::sync::Arc;
use tracing::debug;

use crate::args::parse_resource_args;
use crate::print::{OUTPUT_TABLE, PrintFlags};

/// Get the history of a workload resource
#[derive(Args, Debug, Clone)]
pub struct GetArgs {
    /// TYPE NAME or TYPE/NAME of a Deployment, StatefulSet or DaemonSet
    #[arg(required = true, num_args = 1..=2, value_name = "RESOURCE")]
    pub resource: Vec<String>,

    /// Print the specified revision instead of the entire history. Specify -1
    /// for the latest revision, -2 for the one before the latest, etc.
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub revision: i64,

    /// Output format: table, wide, name, yaml or json
    #[arg(short, long, default_value = OUTPUT_TABLE)]
    pub output: String,

    /// Print only the revision's pod template instead of the full revision object
    #[arg(long, default_value_t = false, num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
    pub template_only: bool,

    /// Print also the revision object's managedFields
    #[arg(long)]
    pub show_managed_fields: bool,

    /// Don't print headers in table output
    #[arg(long)]
    pub no_headers: bool,

    /// Show all labels of the revision objects as the last column
    #[arg(long)]
    pub show_labels: bool,

    /// Labels to show as columns, e.g. -L app.kubernetes.io/version,tier
    #[arg(short = 'L', long, value_delimiter = ',', value_name = "LABEL")]
    pub label_columns: Vec<String>,

    /// Prefix revision names with their kind
    #[arg(long)]
    pub show_kind: bool,
}

impl GetArgs {
    fn print_flags(&self) -> PrintFlags {
        PrintFlags {
            output: self.output.clone(),
            template_only: self.template_only,
            show_managed_fields: self.show_managed_fields,
            no_headers: self.no_headers,
            show_labels: self.show_labels,
            label_columns: self.label_columns.clone(),
            show_kind: self.show_kind,
        }
    }
}

pub async fn run(client: Arc<dyn ClusterReader>, namespace: &str, args: &GetArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let flags = args.print_flags();
    flags.validate()?;
    let printer = flags.list_printer()?;

    let resource = parse_resource_args(&args.resource)?;
    let history = History::for_group_kind(client, &resource.group_kind)?;
    let kind = history.resource_type().kind_group();

    let mut revisions = history
        .list_revisions(&ObjectKey::new(namespace, &resource.name))
        .await?;
    if revisions.is_empty() {
        anyhow::bail!("no revisions found for {}/{}", kind, resource.name);
    }
    debug!("Found {} revisions of {}/{}", revisions.len(), kind, resource.name);

    if args.revision != 0 {
        let selected = revisions.by_number(args.revision)?.clone();
        revisions = Revisions::from(vec![selected]);
    }

    printer.print(&revisions, out)
}
