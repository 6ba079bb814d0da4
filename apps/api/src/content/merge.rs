use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::warn;

/// Shallow-merges a persisted object over `defaults`.
///
/// Top-level keys present in `persisted` replace the default value wholesale;
/// keys the persisted shape lacks keep their defaults. Anything that is not an
/// object, or does not deserialize after merging, leaves `defaults` untouched.
pub fn overlay<T>(defaults: &T, persisted: &Value) -> T
where
    T: Serialize + DeserializeOwned + Clone,
{
    match try_overlay(defaults, persisted) {
        Ok(merged) => merged,
        Err(e) => {
            warn!("Ignoring persisted content that does not fit the current shape: {e}");
            defaults.clone()
        }
    }
}

fn try_overlay<T>(defaults: &T, persisted: &Value) -> Result<T, serde_json::Error>
where
    T: Serialize + DeserializeOwned,
{
    let mut base = serde_json::to_value(defaults)?;
    let (Value::Object(base_map), Value::Object(over)) = (&mut base, persisted) else {
        return Err(serde::de::Error::custom("persisted value is not an object"));
    };
    for (key, value) in over {
        base_map.insert(key.clone(), value.clone());
    }
    serde_json::from_value(base)
}
