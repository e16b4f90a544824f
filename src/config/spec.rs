use serde::{Deserialize, Serialize};

use super::{AggregatorConfig, ConfigErr};

/// The specification for the target refresh cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSyncSpec {
    Every { steps: u64 },
    Disabled,
}

/// The raw, unvalidated specification of an aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorSpec {
    pub max_steps: u64,
    pub target_sync: TargetSyncSpec,
}

impl TryFrom<AggregatorSpec> for AggregatorConfig {
    type Error = ConfigErr;

    fn try_from(spec: AggregatorSpec) -> Result<Self, Self::Error> {
        let interval = match spec.target_sync {
            TargetSyncSpec::Every { steps } => Some(steps),
            TargetSyncSpec::Disabled => None,
        };

        AggregatorConfig::new(spec.max_steps, interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncInterval;

    #[test]
    fn test_deserialize_every() {
        let json = r#"{ "max_steps": 10, "target_sync": { "every": { "steps": 5 } } }"#;
        let spec: AggregatorSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.target_sync, TargetSyncSpec::Every { steps: 5 });

        let config = AggregatorConfig::try_from(spec).unwrap();
        assert_eq!(config.max_steps().get(), 10);
        assert!(matches!(config.target_sync(), SyncInterval::Every(s) if s.get() == 5));
    }

    #[test]
    fn test_deserialize_disabled() {
        let json = r#"{ "max_steps": 3, "target_sync": "disabled" }"#;
        let spec: AggregatorSpec = serde_json::from_str(json).unwrap();
        let config = AggregatorConfig::try_from(spec).unwrap();
        assert_eq!(config.target_sync(), SyncInterval::Disabled);
    }

    #[test]
    fn test_invalid_spec_fails_fast() {
        let spec = AggregatorSpec {
            max_steps: 10,
            target_sync: TargetSyncSpec::Every { steps: 0 },
        };
        assert_eq!(
            AggregatorConfig::try_from(spec),
            Err(ConfigErr::ZeroSyncInterval)
        );
    }
}
