use clap::{ArgAction, Args};
use pkg_cluster::ClusterReader;
use pkg_diff::{DiffOrchestrator, DiffStatus, Program, file_name};
use pkg_history::History;
use pkg_types::meta::ObjectKey;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use crate::args::parse_resource_args;
use crate::print::PrintFlags;

/// Compare two revisions of a workload resource
///
/// By default, the latest two revisions are compared. The diff program can be
/// selected with KUBECTL_EXTERNAL_DIFF, e.g. KUBECTL_EXTERNAL_DIFF="colordiff -N -u".
#[derive(Args, Debug, Clone)]
pub struct DiffArgs {
    /// TYPE NAME or TYPE/NAME of a Deployment, StatefulSet or DaemonSet
    #[arg(required = true, num_args = 1..=2, value_name = "RESOURCE")]
    pub resource: Vec<String>,

    /// Compare the specified revision with its predecessor, or the two
    /// specified revisions. Specify -1 for the latest revision, -2 for the one
    /// before the latest, etc.
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    pub revision: Vec<i64>,

    /// Output format of the compared files: yaml or json
    #[arg(short, long, default_value = "yaml")]
    pub output: String,

    /// Compare only the revisions' pod templates instead of the full revision objects
    #[arg(long, default_value_t = true, num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
    pub template_only: bool,

    /// Compare also the revision objects' managedFields
    #[arg(long)]
    pub show_managed_fields: bool,
}

impl DiffArgs {
    fn print_flags(&self) -> PrintFlags {
        PrintFlags {
            output: self.output.clone(),
            template_only: self.template_only,
            show_managed_fields: self.show_managed_fields,
            ..Default::default()
        }
    }
}

/// Revisions to compare: none selects the latest one.
pub fn selected_revisions(revisions: &[i64]) -> anyhow::Result<Vec<i64>> {
    if revisions.len() > 2 {
        anyhow::bail!("expected at maximum 2 revisions, but got {}", revisions.len());
    }
    if revisions.contains(&0) {
        anyhow::bail!("invalid revision 0");
    }
    if revisions.is_empty() {
        return Ok(vec![-1]);
    }
    Ok(revisions.to_vec())
}

pub async fn run(
    client: Arc<dyn ClusterReader>,
    namespace: &str,
    args: &DiffArgs,
    program: Box<dyn Program>,
    temp_root: Option<PathBuf>,
    err_out: &mut dyn Write,
) -> anyhow::Result<DiffStatus> {
    let selected = selected_revisions(&args.revision)?;
    let flags = args.print_flags();
    flags.validate()?;
    let printer = flags.object_printer()?;

    let resource = parse_resource_args(&args.resource)?;
    let history = History::for_group_kind(client, &resource.group_kind)?;
    let kind = history.resource_type().kind_group();
    let key = ObjectKey::new(namespace, &resource.name);

    let revisions = history.list_revisions(&key).await?;
    match revisions.len() {
        0 => anyhow::bail!("no revisions found for {}/{}", kind, resource.name),
        1 => anyhow::bail!("only 1 revision found for {}/{}", kind, resource.name),
        _ => {}
    }

    let mut a = revisions.by_number(selected[0])?;
    let mut b = match selected.get(1) {
        Some(number) => revisions.by_number(*number)?,
        None => revisions.predecessor(selected[0])?,
    };
    if a.number() > b.number() {
        std::mem::swap(&mut a, &mut b);
    }

    writeln!(
        err_out,
        "comparing revisions {} and {} of {}/{}",
        a.number(),
        b.number(),
        kind,
        resource.name
    )?;

    let mut orchestrator = DiffOrchestrator::new(Box::new(printer), program);
    if let Some(root) = temp_root {
        orchestrator = orchestrator.with_temp_root(root);
    }
    let status = orchestrator
        .compare(&file_name(history.resource_type(), &key), a, b)
        .await?;
    Ok(status)
}
