//! Cloud function deploy configuration
//!
//! Each function entry in the config document (`cloudbaserc.json`) is merged
//! from three tiers, later tiers winning key by key:
//!
//! 1. library defaults (`timeout: 6`, `runtime: Nodejs12.16`, `installDependency: true`)
//! 2. caller-wide defaults
//! 3. per-function overrides
//!
//! Nested objects are merged recursively; arrays and scalars are replaced.

use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Deploy timeout applied when neither tier sets one (seconds)
pub const DEFAULT_TIMEOUT_SECS: u32 = 6;

/// Runtime applied when neither tier sets one
pub const DEFAULT_RUNTIME: &str = "Nodejs12.16";

/// Trigger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudFunctionTrigger {
    /// Trigger name
    pub name: String,

    /// Trigger type, e.g. `timer`
    #[serde(rename = "type")]
    pub kind: String,

    /// Trigger config; a cron expression for timer triggers
    pub config: String,
}

/// VPC configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vpc {
    pub vpc_id: String,
    pub subnet_id: String,
}

/// Ignore patterns, a single glob or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IgnorePatterns {
    One(String),
    Many(Vec<String>),
}

/// Partial deploy settings of a cloud function
///
/// Unset fields are left out of the config document so lower tiers show
/// through. Keys this type does not know are kept verbatim, and so is an
/// explicit `null`: it lands in `extra` and clears the key in the merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct FunctionDeploy {
    /// Parameters passed when the function is invoked from the CLI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<CloudFunctionTrigger>>,

    /// Handler in `file.function` form, `index.main` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<IgnorePatterns>,

    /// Timeout in seconds, 1 to 60
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_variables: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc: Option<Vpc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_dependency: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FunctionDeploy {
    /// Settings every function starts from
    pub fn library_defaults() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT_SECS),
            runtime: Some(DEFAULT_RUNTIME.to_string()),
            install_dependency: Some(true),
            ..Self::default()
        }
    }
}

impl Serialize for FunctionDeploy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FunctionDeploy::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for FunctionDeploy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        let cleared: Vec<String> = fields
            .iter()
            .filter(|(_, value)| value.is_null())
            .map(|(key, _)| key.clone())
            .collect();

        let mut deploy =
            FunctionDeploy::deserialize(Value::Object(fields)).map_err(de::Error::custom)?;
        for key in cleared {
            deploy.extra.insert(key, Value::Null);
        }
        Ok(deploy)
    }
}

/// Per-function overrides, keyed by canonical function name
pub type FunctionDeployMap = BTreeMap<String, FunctionDeploy>;

/// Build the config document entry of one function
pub fn function_entry(
    name: &str,
    defaults: &FunctionDeploy,
    overrides: Option<&FunctionDeploy>,
) -> serde_json::Result<Value> {
    let mut entry = serde_json::json!({ "name": name });

    let library = FunctionDeploy::library_defaults();
    for tier in [Some(&library), Some(defaults), overrides].into_iter().flatten() {
        deep_merge(&mut entry, serde_json::to_value(tier)?);
    }

    Ok(entry)
}

/// Merge `source` into `target`: objects recursively, everything else replaced
pub fn deep_merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        deep_merge(existing, value);
                    }
                    _ => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, source) => *target = source,
    }
}
