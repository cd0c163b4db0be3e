//! Pure visibility filtering over product lists.
//!
//! The filter engine is deliberately free of state and I/O: given the same
//! product list and filter, [`visible`] always returns the same subset in
//! the same order. Callers own fetching and caching; this module only
//! decides what shows.

use crate::types::Product;

/// Category predicate for the catalog views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Match every product regardless of category.
    All,
    /// Exact string equality against `product.category`.
    Category(String),
}

impl CategoryFilter {
    /// Parse the category query parameter as submitted by the filter bar.
    ///
    /// An absent, empty, or literal `"All"` parameter selects everything.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None => Self::All,
            Some(s) if s.is_empty() || s == "All" => Self::All,
            Some(s) => Self::Category(s.to_owned()),
        }
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => product.category == *category,
        }
    }
}

/// Combined filter state for a catalog view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category: CategoryFilter,
    /// Case-insensitive substring matched against name or display id.
    pub search: String,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            search: String::new(),
        }
    }
}

impl CatalogFilter {
    /// Whether a single product passes both the category and search
    /// predicates.
    ///
    /// Products with an empty name or no display id never match a non-empty
    /// search, but they do not error: dirty records filter out instead of
    /// crashing the whole page.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if !self.category.matches(product) {
            return false;
        }

        let needle = self.search.to_lowercase();
        if needle.is_empty() {
            return true;
        }

        product.name.to_lowercase().contains(&needle)
            || product
                .display_id
                .as_ref()
                .is_some_and(|id| id.as_str().to_lowercase().contains(&needle))
    }
}

/// Compute the visible subset of `products` under `filter`.
///
/// Order-preserving: the result keeps the order of the input list.
#[must_use]
pub fn visible<'a>(products: &'a [Product], filter: &CatalogFilter) -> Vec<&'a Product> {
    products.iter().filter(|p| filter.matches(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DisplayId, ProductFields, RecordId};

    fn product(record_id: &str, display_id: Option<&str>, name: &str, category: &str) -> Product {
        Product::from_parts(
            RecordId::new(record_id),
            ProductFields {
                display_id: display_id.map(DisplayId::new),
                name: name.to_owned(),
                category: category.to_owned(),
                image: String::new(),
                link: None,
                description: String::new(),
            },
        )
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("r1", Some("ab12cd"), "Oxford Shirt", "Shirts"),
            product("r2", Some("ef34gh"), "Suede Loafer", "Shoes"),
            product("r3", Some("ij56kl"), "Linen Shirt", "Shirts"),
            product("r4", None, "Wool Trouser", "Trousers"),
        ]
    }

    #[test]
    fn test_no_filter_returns_everything_in_order() {
        let products = catalog();
        let result = visible(&products, &CatalogFilter::default());

        let ids: Vec<&str> = result.iter().map(|p| p.record_id.as_str()).collect();
        assert_eq!(ids, ["r1", "r2", "r3", "r4"]);
    }

    #[test]
    fn test_category_filter_is_exact() {
        let products = catalog();
        let filter = CatalogFilter {
            category: CategoryFilter::Category("Shirts".to_owned()),
            search: String::new(),
        };

        let result = visible(&products, &filter);
        assert!(result.iter().all(|p| p.category == "Shirts"));
        assert_eq!(result.len(), 2);

        // Everything omitted really is a different category.
        let omitted: Vec<&Product> = products
            .iter()
            .filter(|p| !result.iter().any(|v| v.record_id == p.record_id))
            .collect();
        assert!(omitted.iter().all(|p| p.category != "Shirts"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let products = catalog();
        let lower = CatalogFilter {
            category: CategoryFilter::All,
            search: "shirt".to_owned(),
        };
        let upper = CatalogFilter {
            category: CategoryFilter::All,
            search: "SHIRT".to_owned(),
        };

        assert_eq!(visible(&products, &lower), visible(&products, &upper));
        assert_eq!(visible(&products, &lower).len(), 2);
    }

    #[test]
    fn test_search_matches_display_id_substring() {
        let products = vec![product("r1", Some("ab12cd"), "Oxford Shirt", "Shirts")];

        let filter = CatalogFilter {
            category: CategoryFilter::All,
            search: "ab12".to_owned(),
        };
        assert_eq!(visible(&products, &filter).len(), 1);

        let wrong_category = CatalogFilter {
            category: CategoryFilter::Category("Shoes".to_owned()),
            search: String::new(),
        };
        assert!(visible(&products, &wrong_category).is_empty());
    }

    #[test]
    fn test_missing_display_id_and_empty_name_do_not_match_or_panic() {
        let mut nameless = product("r9", None, "", "Shoes");
        nameless.name = String::new();
        let products = vec![nameless];

        let filter = CatalogFilter {
            category: CategoryFilter::All,
            search: "anything".to_owned(),
        };
        assert!(visible(&products, &filter).is_empty());

        // Empty search still matches a nameless product.
        assert_eq!(visible(&products, &CatalogFilter::default()).len(), 1);
    }

    #[test]
    fn test_empty_list_yields_empty_subset() {
        let filter = CatalogFilter {
            category: CategoryFilter::Category("Shoes".to_owned()),
            search: "loafer".to_owned(),
        };
        assert!(visible(&[], &filter).is_empty());
    }

    #[test]
    fn test_from_param() {
        assert_eq!(CategoryFilter::from_param(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_param(Some("")), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_param(Some("All")), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_param(Some("Shoes")),
            CategoryFilter::Category("Shoes".to_owned())
        );
    }
}
