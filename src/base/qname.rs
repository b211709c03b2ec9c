//! Qualified names.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

/// A namespace-qualified name.
///
/// Equality and hashing consider only the namespace URI and the local part;
/// the prefix is presentation data carried over from the YAML form
/// (`tosca:Root`) and printed back by the writer.
#[derive(Clone, Debug)]
pub struct QName {
    namespace: Arc<str>,
    local_part: Arc<str>,
    prefix: Arc<str>,
}

impl QName {
    /// Create a name in the given namespace.
    pub fn new(namespace: impl Into<Arc<str>>, local_part: impl Into<Arc<str>>) -> Self {
        Self {
            namespace: namespace.into(),
            local_part: local_part.into(),
            prefix: Arc::from(""),
        }
    }

    /// Create a name without namespace.
    pub fn local(local_part: impl Into<Arc<str>>) -> Self {
        Self::new("", local_part)
    }

    /// Attach a presentation prefix.
    pub fn with_prefix(mut self, prefix: impl Into<Arc<str>>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn namespace_uri(&self) -> &str {
        &self.namespace
    }

    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Render as `prefix:local`, or just `local` when there is no prefix.
    pub fn to_prefixed_string(&self) -> String {
        if self.prefix.is_empty() {
            self.local_part.to_string()
        } else {
            format!("{}:{}", self.prefix, self.local_part)
        }
    }
}

impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.local_part == other.local_part
    }
}

impl Eq for QName {}

impl Hash for QName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.local_part.hash(state);
    }
}

/// The empty name, used as the placeholder type of templates built in code.
impl Default for QName {
    fn default() -> Self {
        Self::local("")
    }
}

/// `{namespace}local`, or `local` when the namespace is empty.
impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.local_part)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local_part)
        }
    }
}

/// Accepts `{namespace}local`, `prefix:local` and `local`.
impl FromStr for QName {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix('{') {
            if let Some((namespace, local)) = rest.split_once('}') {
                return Ok(Self::new(namespace, local));
            }
        }
        match s.split_once(':') {
            // URIs such as `http://...` are not prefixed names
            Some((prefix, local)) if !local.starts_with("//") && !prefix.is_empty() => {
                Ok(Self::local(local).with_prefix(prefix))
            }
            _ => Ok(Self::local(s)),
        }
    }
}

impl From<&str> for QName {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(name) => name,
            Err(never) => match never {},
        }
    }
}

impl<'de> Deserialize<'de> for QName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(QName::from(raw.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefixed() {
        let name = QName::from("tosca:Compute");
        assert_eq!(name.prefix(), "tosca");
        assert_eq!(name.local_part(), "Compute");
        assert_eq!(name.namespace_uri(), "");
        assert_eq!(name.to_prefixed_string(), "tosca:Compute");
    }

    #[test]
    fn test_parse_expanded() {
        let name = QName::from("{http://example.org/types}WebServer");
        assert_eq!(name.namespace_uri(), "http://example.org/types");
        assert_eq!(name.local_part(), "WebServer");
        assert_eq!(name.to_string(), "{http://example.org/types}WebServer");
    }

    #[test]
    fn test_uri_is_not_prefixed() {
        let name = QName::from("http://example.org");
        assert_eq!(name.local_part(), "http://example.org");
        assert_eq!(name.prefix(), "");
    }

    #[test]
    fn test_equality_ignores_prefix() {
        let a = QName::local("Compute").with_prefix("tosca");
        let b = QName::local("Compute");
        assert_eq!(a, b);
        assert_ne!(QName::new("ns1", "Compute"), b);
    }
}
