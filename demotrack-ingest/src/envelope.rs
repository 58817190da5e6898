//! Upstream list endpoints answer either with a bare array or with a
//! paginated envelope carrying the array under `data`. Both shapes are
//! accepted here so nothing past this crate has to care.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Collection<T> {
    Items(Vec<T>),
    Page(Page<T>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

// Hand-dispatched on the JSON shape so a bad record reports its own error
// instead of "did not match any variant".
impl<'de, T: DeserializeOwned> Deserialize<'de> for Collection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.is_array() {
            serde_json::from_value(value)
                .map(Collection::Items)
                .map_err(D::Error::custom)
        } else if value.get("data").is_some() {
            serde_json::from_value(value)
                .map(Collection::Page)
                .map_err(D::Error::custom)
        } else {
            Err(D::Error::custom(
                "expected an array or an object with a `data` array",
            ))
        }
    }
}

impl<T> Collection<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Collection::Items(items) => items,
            Collection::Page(page) => page.data,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Collection::Items(items) => items.len(),
            Collection::Page(page) => page.data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection::Items(Vec::new())
    }
}
