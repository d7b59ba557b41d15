use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use pkg_constants::api::APPS_VERSION;
use pkg_types::meta::GroupKind;
use pkg_types::workload::Resource;

/// The workload named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceArg {
    pub group_kind: GroupKind,
    pub name: String,
}

/// Parse `TYPE NAME` or `TYPE/NAME`.
pub fn parse_resource_args(args: &[String]) -> anyhow::Result<ResourceArg> {
    let (resource, name) = match args {
        [] => anyhow::bail!("you must specify the type of resource and its name"),
        [arg] => match arg.split_once('/') {
            Some((resource, name)) => (resource, name),
            None => anyhow::bail!("you must specify the name of the {} resource", arg),
        },
        [resource, name] => {
            if resource.contains('/') {
                anyhow::bail!(
                    "there is no need to specify a resource type as a separate argument when passing arguments in resource/name form"
                );
            }
            (resource.as_str(), name.as_str())
        }
        _ => anyhow::bail!("exactly one resource is required, got {} arguments", args.len()),
    };

    if resource.is_empty() || name.is_empty() || name.contains('/') {
        anyhow::bail!("invalid resource argument {:?}", args.join(" "));
    }

    Ok(ResourceArg {
        group_kind: parse_group_kind(resource),
        name: name.to_string(),
    })
}

/// Resolve `TYPE[.VERSION][.GROUP]` into a group and kind.
///
/// Known aliases of the supported workloads resolve to their kind; anything
/// else is passed through verbatim so it can be reported as unsupported.
pub fn parse_group_kind(resource: &str) -> GroupKind {
    let resource = resource.to_lowercase();
    let (name, group) = match resource.split_once('.') {
        Some((name, rest)) => {
            let group = rest
                .strip_prefix(APPS_VERSION)
                .and_then(|g| g.strip_prefix('.'))
                .unwrap_or(rest);
            (name.to_string(), Some(group.to_string()))
        }
        None => (resource.clone(), None),
    };

    let kind = match name.as_str() {
        "deployment" | "deployments" | "deploy" => Some(Deployment::TYPE),
        "statefulset" | "statefulsets" | "sts" => Some(StatefulSet::TYPE),
        "daemonset" | "daemonsets" | "ds" => Some(DaemonSet::TYPE),
        _ => None,
    };

    match (kind, group) {
        (Some(kind), None) => kind.group_kind(),
        (Some(kind), Some(group)) => GroupKind::new(&group, kind.kind),
        (None, group) => GroupKind::new(group.as_deref().unwrap_or_default(), &name),
    }
}
