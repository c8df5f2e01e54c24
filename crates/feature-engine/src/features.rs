//! Named feature set assembly

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single feature value
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Integer count (points, clusters)
    Count(u64),
    /// Real-valued descriptor
    Real(f64),
}

impl FeatureValue {
    /// Numeric value regardless of variant
    pub fn as_f64(&self) -> f64 {
        match *self {
            FeatureValue::Count(c) => c as f64,
            FeatureValue::Real(r) => r,
        }
    }
}

impl From<usize> for FeatureValue {
    fn from(value: usize) -> Self {
        FeatureValue::Count(value as u64)
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Real(value)
    }
}

/// Ordered feature-name → value mapping.
///
/// Order is the insertion order and is preserved when serialized. Non-finite
/// reals serialize as `null` in JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    entries: Vec<(&'static str, FeatureValue)>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: &'static str, value: impl Into<FeatureValue>) {
        self.entries.push((name, value.into()));
    }

    /// Look up a feature by name
    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    /// Look up a feature as a float
    pub fn value(&self, name: &str) -> Option<f64> {
        self.get(name).map(|v| v.as_f64())
    }

    /// Iterate features in order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FeatureValue)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FeatureSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_order() {
        let mut set = FeatureSet::new();
        set.push("point_count", 3usize);
        set.push("mean_db", 12.5);

        assert_eq!(set.get("point_count"), Some(FeatureValue::Count(3)));
        assert_eq!(set.value("mean_db"), Some(12.5));
        assert_eq!(set.get("missing"), None);

        let names: Vec<_> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["point_count", "mean_db"]);
    }

    #[test]
    fn test_serializes_in_order() {
        let mut set = FeatureSet::new();
        set.push("zeta", 1usize);
        set.push("alpha", 0.5);
        set.push("ratio", f64::INFINITY);

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":0.5,"ratio":null}"#);
    }
}
