use serde::{Deserialize, Serialize};

use crate::sort::SortSpec;
use crate::value::Value;

/// Page size used when a query asks for neither `take` nor `pagination.size`.
pub const DEFAULT_PAGE_SIZE: usize = 24;

/// How `find_many` deduplicates matched records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Distinct {
    /// `true`: whole records compared structurally. `false` disables.
    All(bool),
    Field(String),
    Fields(Vec<String>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based; 0 is read as 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

/// A selection over an in-memory collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindQuery {
    #[serde(rename = "where", default = "Value::record")]
    pub filter: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<SortSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct: Option<Distinct>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageRequest>,
}

impl Default for FindQuery {
    fn default() -> Self {
        Self::new(Value::record())
    }
}

impl FindQuery {
    #[must_use]
    pub fn new(filter: Value) -> Self {
        Self { filter, order_by: None, distinct: None, skip: None, take: None, pagination: None }
    }

    #[must_use]
    pub fn order_by(mut self, spec: SortSpec) -> Self {
        self.order_by = Some(spec);
        self
    }

    #[must_use]
    pub fn distinct(mut self, distinct: Distinct) -> Self {
        self.distinct = Some(distinct);
        self
    }

    #[must_use]
    pub fn skip(mut self, n: usize) -> Self {
        self.skip = Some(n);
        self
    }

    #[must_use]
    pub fn take(mut self, n: usize) -> Self {
        self.take = Some(n);
        self
    }

    #[must_use]
    pub fn page(mut self, page: usize, size: usize) -> Self {
        self.pagination = Some(PageRequest { page: Some(page), size: Some(size) });
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: usize,
    pub size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindManyResult {
    pub data: Vec<Value>,
    pub pagination: PageInfo,
}
