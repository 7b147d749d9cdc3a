use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use volume_discount::config::MetafieldConfig;
use volume_discount::discount::VolumeDiscountRules;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) metafield: MetafieldConfig,
}

/// Body of a rules preview request: the raw metafield value, if any.
#[derive(Debug, Deserialize)]
pub(crate) struct RulesPreviewRequest {
    #[serde(default)]
    pub(crate) value: Option<String>,
}

/// How the function reads a given metafield value.
#[derive(Debug, Serialize)]
pub(crate) struct RulesPreview {
    pub(crate) usable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) rejection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) rules: Option<VolumeDiscountRules>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
}

impl RulesPreview {
    pub(crate) fn from_value(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self {
                usable: false,
                rejection: Some("no rules value is set".to_string()),
                rules: None,
                message: None,
            };
        };

        match VolumeDiscountRules::from_json(raw) {
            Ok(rules) => Self {
                usable: true,
                rejection: None,
                message: Some(rules.message()),
                rules: Some(rules),
            },
            Err(rejection) => Self {
                usable: false,
                rejection: Some(rejection.to_string()),
                rules: None,
                message: None,
            },
        }
    }
}
