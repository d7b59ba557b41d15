use k8s_openapi::api::core::v1::PodTemplateSpec;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::runtime::RawExtension;
use pkg_constants::labels::REVISION_ANNOTATION;
use serde_json::Value;
use std::num::ParseIntError;
use thiserror::Error;

use crate::workload::WorkloadResource;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("error parsing revision {value:?}: {source}")]
    Revision {
        value: String,
        source: ParseIntError,
    },
    #[error("embedded {kind} is missing or not an object")]
    Malformed { kind: &'static str },
    #[error("error decoding {kind}: {source}")]
    Payload {
        kind: &'static str,
        source: serde_json::Error,
    },
    #[error("expected embedded {expected}, found {found}")]
    KindMismatch { expected: String, found: String },
}

/// Revision number recorded by the Deployment controller on a ReplicaSet.
/// A missing annotation yields 0.
pub fn revision_annotation(meta: &ObjectMeta) -> Result<i64, DecodeError> {
    match meta.annotations.as_ref().and_then(|a| a.get(REVISION_ANNOTATION)) {
        Some(value) => value.parse().map_err(|source| DecodeError::Revision {
            value: value.clone(),
            source,
        }),
        None => Ok(0),
    }
}

/// Decode the pod template of the `W` snapshot embedded in a
/// ControllerRevision's data.
///
/// Snapshots often store a partial spec (StatefulSets keep only the
/// template, wrapped in a replace patch) and may omit `apiVersion` and
/// `kind`, but when present they must name `W`.
pub fn decode_template<W: WorkloadResource>(data: Option<&RawExtension>) -> Result<PodTemplateSpec, DecodeError> {
    let kind = W::TYPE.kind;
    let Some(RawExtension(value)) = data else {
        return Err(DecodeError::Malformed { kind });
    };
    if !value.is_object() {
        return Err(DecodeError::Malformed { kind });
    }

    if let Some(found) = value.get("kind").and_then(Value::as_str)
        && found != kind
    {
        return Err(DecodeError::KindMismatch {
            expected: kind.to_string(),
            found: found.to_string(),
        });
    }
    if let Some(found) = value.get("apiVersion").and_then(Value::as_str)
        && found != W::TYPE.api_version()
    {
        return Err(DecodeError::KindMismatch {
            expected: W::TYPE.api_version(),
            found: found.to_string(),
        });
    }

    match value.pointer("/spec/template") {
        None | Some(Value::Null) => Ok(PodTemplateSpec::default()),
        Some(template) => {
            serde_json::from_value(template.clone()).map_err(|source| DecodeError::Payload { kind, source })
        }
    }
}
