//! Catalog query criteria and their outgoing-request translation

use serde::Serialize;

/// Default sort key: newest products first.
pub const DEFAULT_SORT_KEY: &str = "createdAt";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter criteria for the product list.
///
/// An empty string means "no constraint" for every textual field, matching
/// the gateway's convention; such fields are omitted entirely from the
/// outgoing request (see [`ProductQuery::to_params`]).
#[derive(Clone, Debug, PartialEq)]
pub struct ProductQuery {
    pub search: String,
    pub category: String,
    pub color: String,
    pub size: String,
    pub min_price: String,
    pub max_price: String,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: String::new(),
            color: String::new(),
            size: String::new(),
            min_price: String::new(),
            max_price: String::new(),
            sort_by: DEFAULT_SORT_KEY.to_string(),
            sort_order: SortOrder::Desc,
        }
    }
}

/// Partial criteria change. `None` fields keep their current value, so the
/// view can batch several edits into one update before applying.
#[derive(Clone, Debug, Default)]
pub struct FilterUpdate {
    pub search: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl ProductQuery {
    /// Merges a partial change into the current criteria.
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(v) = update.search {
            self.search = v;
        }
        if let Some(v) = update.category {
            self.category = v;
        }
        if let Some(v) = update.color {
            self.color = v;
        }
        if let Some(v) = update.size {
            self.size = v;
        }
        if let Some(v) = update.min_price {
            self.min_price = v;
        }
        if let Some(v) = update.max_price {
            self.max_price = v;
        }
        if let Some(v) = update.sort_by {
            self.sort_by = v;
        }
        if let Some(v) = update.sort_order {
            self.sort_order = v;
        }
    }

    /// Translates criteria into request parameters for the given page.
    /// Empty-string fields are dropped rather than sent as `""`.
    pub fn to_params(&self, page: u32) -> ProductQueryParams {
        ProductQueryParams {
            search: non_empty(&self.search),
            category: non_empty(&self.category),
            color: non_empty(&self.color),
            size: non_empty(&self.size),
            min_price: non_empty(&self.min_price),
            max_price: non_empty(&self.max_price),
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order,
            page,
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Query-string parameters for `GET /products`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<String>,
    pub sort_by: String,
    pub sort_order: SortOrder,
    pub page: u32,
}
