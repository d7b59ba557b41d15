use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::core::Selector;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct SelectorError(String);

/// Convert a workload's label selector for list requests.
///
/// `None` selects nothing and yields `Ok(None)`; an empty selector selects
/// everything.
pub fn as_selector(selector: Option<&LabelSelector>) -> Result<Option<Selector>, SelectorError> {
    selector
        .map(|s| Selector::try_from(s.clone()).map_err(|e| SelectorError(e.to_string())))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelectorRequirement;
    use kube::core::SelectorExt;
    use std::collections::BTreeMap;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_selector_selects_nothing() {
        assert!(as_selector(None).unwrap().is_none());
    }

    #[test]
    fn test_empty_selector_selects_everything() {
        let selector = as_selector(Some(&LabelSelector::default())).unwrap().unwrap();
        assert!(selector.selects_all());
        assert!(selector.matches(&labels(&[("app", "web")])));
    }

    #[test]
    fn test_match_labels_and_expressions() {
        let selector = LabelSelector {
            match_labels: Some(labels(&[("app", "web")])),
            match_expressions: Some(vec![LabelSelectorRequirement {
                key: "tier".to_string(),
                operator: "In".to_string(),
                values: Some(vec!["frontend".to_string(), "edge".to_string()]),
            }]),
        };
        let selector = as_selector(Some(&selector)).unwrap().unwrap();

        assert!(selector.matches(&labels(&[("app", "web"), ("tier", "edge")])));
        assert!(!selector.matches(&labels(&[("app", "web"), ("tier", "backend")])));
        assert!(!selector.matches(&labels(&[("tier", "edge")])));
    }

    #[test]
    fn test_unknown_operator() {
        let selector = LabelSelector {
            match_expressions: Some(vec![LabelSelectorRequirement {
                key: "app".to_string(),
                operator: "Like".to_string(),
                values: Some(vec!["web".to_string()]),
            }]),
            ..Default::default()
        };
        assert!(as_selector(Some(&selector)).is_err());
    }
}
