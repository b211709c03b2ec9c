//! Deserialization helpers for TOSCA YAML short forms.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use super::definitions::ImportDefinition;
use super::scalar_string;

/// Implements `Deserialize` for a type derived with `#[serde(remote = "Self")]`,
/// accepting either the full mapping or a single string short form.
///
/// A `null` value yields `Default::default()`.
macro_rules! short_form {
    ($ty:ty, |$short:ident| $build:expr) => {
        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                use serde::Deserialize as _;
                use serde::de::Error as _;
                match serde_yaml::Value::deserialize(deserializer)? {
                    serde_yaml::Value::Null => Ok(<$ty>::default()),
                    serde_yaml::Value::String($short) => Ok($build),
                    value => <$ty>::deserialize(value).map_err(D::Error::custom),
                }
            }
        }
    };
}

pub(crate) use short_form;

/// Metadata maps: every scalar value is kept as its string rendering.
pub fn string_map<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<IndexMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    raw.into_iter()
        .map(|(key, value)| {
            scalar_string(&value)
                .map(|value| (key.clone(), value))
                .ok_or_else(|| D::Error::custom(format!("metadata `{key}` is not a scalar")))
        })
        .collect()
}

/// A list of scalars, or a single scalar treated as a one-element list.
pub fn scalar_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => Ok(items.iter().filter_map(scalar_string).collect()),
        other => Ok(scalar_string(&other).into_iter().collect()),
    }
}

/// Import lists mix bare file names and single-key maps.
///
/// A bare `- types.yaml` entry is keyed by the file stem.
pub fn import_list<'de, D>(
    deserializer: D,
) -> Result<Vec<IndexMap<String, ImportDefinition>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    raw.into_iter()
        .map(|entry| match entry {
            Value::String(file) => {
                let mut map = IndexMap::new();
                map.insert(file_stem(&file).to_string(), ImportDefinition::from_file(file));
                Ok(map)
            }
            other => serde_yaml::from_value(other).map_err(D::Error::custom),
        })
        .collect()
}

/// `dir/name.yaml` -> `name`
pub fn file_stem(file: &str) -> &str {
    let name = file.rsplit(['/', '\\']).next().unwrap_or(file);
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("types/compute.yaml"), "compute");
        assert_eq!(file_stem("compute"), "compute");
        assert_eq!(file_stem(".hidden"), ".hidden");
    }
}
