use serde::{Deserialize, Serialize};

/// The GFF attribute column as an ordered list of `key=value` pairs.
///
/// Order and bare keys (items without `=`) are preserved so that a column can be
/// written back out exactly as it was read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    entries: Vec<(String, Option<String>)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `;`-delimited attribute column. Empty items are dropped.
    pub fn parse(column: &str) -> Self {
        let entries = column
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| match item.split_once('=') {
                Some((key, value)) => (key.to_string(), Some(value.to_string())),
                None => (item.to_string(), None),
            })
            .collect();
        Self { entries }
    }

    /// Append a `key=value` pair
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), Some(value.into())));
        self
    }

    /// Value of the first entry with this key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }
}

impl std::fmt::Display for Attributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            match value {
                Some(value) => write!(f, "{key}={value}")?,
                None => write!(f, "{key}")?,
            }
        }
        Ok(())
    }
}
