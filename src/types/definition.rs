//! Static asset definitions as supplied by the data-fetching layer.

use serde::{Deserialize, Serialize};

use super::asset_key::{AssetKey, GraphId};

/// Freshness expectation attached to an asset.
///
/// With no `cron_schedule` the asset must always incorporate upstream data
/// from at most `maximum_lag_minutes` ago; with one, the constraint applies
/// at each schedule tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreshnessPolicy {
    /// Upper bound on data age, in minutes.
    pub maximum_lag_minutes: f64,
    /// Optional cron string the lag is evaluated against.
    #[serde(default)]
    pub cron_schedule: Option<String>,
}

impl FreshnessPolicy {
    /// Policy evaluated continuously.
    pub fn new(maximum_lag_minutes: f64) -> Self {
        Self {
            maximum_lag_minutes,
            cron_schedule: None,
        }
    }

    /// Attach a cron schedule.
    pub fn with_cron_schedule(mut self, cron_schedule: impl Into<String>) -> Self {
        self.cron_schedule = Some(cron_schedule.into());
        self
    }
}

/// Immutable definition of one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDefinition {
    /// Identity of the asset.
    pub asset_key: AssetKey,
    /// Keys this asset reads from.
    #[serde(default)]
    pub depends_on: Vec<AssetKey>,
    /// Keys that read from this asset.
    #[serde(default)]
    pub depended_by: Vec<AssetKey>,
    /// Ops that compute this asset, in declaration order.
    #[serde(default)]
    pub op_names: Vec<String>,
    /// Whether the asset is observable.
    #[serde(default)]
    pub is_observable: bool,
    /// Whether the asset is a source (not materialized by this deployment).
    #[serde(default)]
    pub is_source: bool,
    /// Group the asset belongs to, if any.
    #[serde(default)]
    pub group_name: Option<String>,
    /// Freshness policy, if declared.
    #[serde(default)]
    pub freshness_policy: Option<FreshnessPolicy>,
}

impl AssetDefinition {
    /// Create a definition with no dependencies.
    pub fn new(asset_key: AssetKey) -> Self {
        Self {
            asset_key,
            depends_on: Vec::new(),
            depended_by: Vec::new(),
            op_names: Vec::new(),
            is_observable: false,
            is_source: false,
            group_name: None,
            freshness_policy: None,
        }
    }

    /// Add upstream keys.
    pub fn depends_on<I: IntoIterator<Item = AssetKey>>(mut self, keys: I) -> Self {
        self.depends_on.extend(keys);
        self
    }

    /// Add downstream keys.
    pub fn depended_by<I: IntoIterator<Item = AssetKey>>(mut self, keys: I) -> Self {
        self.depended_by.extend(keys);
        self
    }

    /// Add op names.
    pub fn with_ops<I, S>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.op_names.extend(ops.into_iter().map(Into::into));
        self
    }

    /// Mark as observable.
    pub fn observable(mut self) -> Self {
        self.is_observable = true;
        self
    }

    /// Mark as a source asset.
    pub fn source(mut self) -> Self {
        self.is_source = true;
        self
    }

    /// Canonical graph id.
    pub fn graph_id(&self) -> GraphId {
        self.asset_key.graph_id()
    }

    /// Whether the raw definition lists itself as a dependency.
    ///
    /// Partitioned assets may depend on earlier partitions of themselves.
    /// Such edges never enter the graph indexes.
    pub fn is_self_dependent(&self) -> bool {
        self.depends_on.contains(&self.asset_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> AssetKey {
        AssetKey::new([name])
    }

    #[test]
    fn test_new_definition_is_bare() {
        let def = AssetDefinition::new(key("orders"));
        assert!(def.depends_on.is_empty());
        assert!(def.depended_by.is_empty());
        assert!(def.op_names.is_empty());
        assert!(!def.is_observable);
        assert!(!def.is_source);
        assert_eq!(def.graph_id(), key("orders").graph_id());
    }

    #[test]
    fn test_builder_methods_accumulate() {
        let def = AssetDefinition::new(key("orders"))
            .depends_on([key("raw_orders")])
            .depends_on([key("customers")])
            .depended_by([key("revenue")])
            .with_ops(["load_orders"])
            .with_ops([String::from("clean_orders")])
            .observable()
            .source();

        assert_eq!(def.depends_on, vec![key("raw_orders"), key("customers")]);
        assert_eq!(def.depended_by, vec![key("revenue")]);
        assert_eq!(def.op_names, ["load_orders", "clean_orders"]);
        assert!(def.is_observable);
        assert!(def.is_source);
    }

    #[test]
    fn test_is_self_dependent() {
        let plain = AssetDefinition::new(key("a")).depends_on([key("b")]);
        assert!(!plain.is_self_dependent());

        let partitioned = AssetDefinition::new(key("a")).depends_on([key("b"), key("a")]);
        assert!(partitioned.is_self_dependent());

        // Only upstream declarations count
        let downstream_only = AssetDefinition::new(key("a")).depended_by([key("a")]);
        assert!(!downstream_only.is_self_dependent());
    }

    #[test]
    fn test_freshness_policy_builder() {
        let policy = FreshnessPolicy::new(60.0).with_cron_schedule("0 * * * *");
        assert_eq!(policy.maximum_lag_minutes, 60.0);
        assert_eq!(policy.cron_schedule.as_deref(), Some("0 * * * *"));
        assert_eq!(FreshnessPolicy::new(5.0).cron_schedule, None);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{"asset_key":{"path":["warehouse","orders"]}}"#;
        let def: AssetDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def, AssetDefinition::new(AssetKey::new(["warehouse", "orders"])));
    }
}
