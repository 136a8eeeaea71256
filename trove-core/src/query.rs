//! Product listing filters: normalization, matching, and sorting.
//!
//! Query parameters arrive as raw strings. Values that fail to parse
//! (a non-numeric `minPrice`, an unknown `sortBy`) are dropped rather than
//! rejected; the remaining filters still apply conjunctively.

use serde::{Deserialize, Serialize};

use crate::model::Product;

/// Field a product listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Name,
    Id,
}

impl SortKey {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "price" => Some(Self::Price),
            "name" => Some(Self::Name),
            "id" => Some(Self::Id),
            _ => None,
        }
    }
}

/// Sort direction; anything other than `desc` means ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Query parameters exactly as extracted from the request, before
/// normalization. All values are optional strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProductQuery {
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub name: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl RawProductQuery {
    /// Normalize the raw parameters, dropping anything unparsable.
    #[must_use]
    pub fn normalize(&self) -> ProductQuery {
        ProductQuery {
            min_price: self.min_price.as_deref().and_then(parse_price_bound),
            max_price: self.max_price.as_deref().and_then(parse_price_bound),
            name: self
                .name
                .as_deref()
                .map(|n| n.trim().to_lowercase())
                .filter(|n| !n.is_empty()),
            sort: self.sort_by.as_deref().and_then(SortKey::parse),
            order: match self.order.as_deref() {
                Some("desc") => SortOrder::Desc,
                _ => SortOrder::Asc,
            },
        }
    }
}

fn parse_price_bound(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Normalized product listing query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    /// Lower price bound, inclusive.
    pub min_price: Option<f64>,
    /// Upper price bound, inclusive.
    pub max_price: Option<f64>,
    /// Lowercased substring to match against product names.
    pub name: Option<String>,
    /// Sort field; `None` leaves insertion order.
    pub sort: Option<SortKey>,
    /// Direction applied when `sort` is set.
    pub order: SortOrder,
}

impl ProductQuery {
    /// Returns `true` if the product passes every active filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        if let Some(needle) = &self.name {
            if !product.name.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        true
    }

    /// Sort the filtered results in place, if a sort field is active.
    pub fn sort(&self, products: &mut [Product]) {
        let Some(key) = self.sort else { return };
        products.sort_by(|a, b| {
            let ordering = match key {
                SortKey::Price => a.price.total_cmp(&b.price),
                SortKey::Name => a.name.cmp(&b.name),
                SortKey::Id => a.id.cmp(&b.id),
            };
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    /// The normalized filter values, in the shape echoed back to clients.
    #[must_use]
    pub fn echo(&self) -> FilterEcho {
        FilterEcho {
            min_price: self.min_price,
            max_price: self.max_price,
            name: self.name.clone(),
            sort_by: self.sort,
            order: self.order,
        }
    }
}

/// Normalized filter values included in listing metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterEcho {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub name: Option<String>,
    pub sort_by: Option<SortKey>,
    pub order: SortOrder,
}
