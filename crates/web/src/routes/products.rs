//! Public product routes: the filterable list and the detail page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use haberdash_core::filter::{self, CatalogFilter, CategoryFilter};
use haberdash_core::{Product, RecordId};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub record_id: String,
    pub display_id: Option<String>,
    pub name: String,
    pub category: String,
    pub image: Option<String>,
    pub link: Option<String>,
    pub description: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            record_id: product.record_id.to_string(),
            display_id: product.display_id.as_ref().map(ToString::to_string),
            name: product.name.clone(),
            category: product.category.clone(),
            image: (!product.image.is_empty()).then(|| product.image.clone()),
            link: product.link.clone(),
            description: product.description.clone(),
        }
    }
}

/// One entry of a category `<select>`.
#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub label: String,
    pub selected: bool,
}

/// Options for the filter bar dropdown: "All" plus every registry label.
#[must_use]
pub fn filter_options(categories: &[String], current: &CategoryFilter) -> Vec<CategoryOption> {
    let mut options = vec![CategoryOption {
        label: "All".to_owned(),
        selected: *current == CategoryFilter::All,
    }];
    options.extend(categories.iter().map(|label| CategoryOption {
        label: label.clone(),
        selected: *current == CategoryFilter::Category(label.clone()),
    }));
    options
}

/// Options for the product form dropdown: registry labels only.
#[must_use]
pub fn choice_options(categories: &[String], current: &str) -> Vec<CategoryOption> {
    categories
        .iter()
        .map(|label| CategoryOption {
            label: label.clone(),
            selected: label == current,
        })
        .collect()
}

/// Filter bar query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

impl CatalogQuery {
    pub(crate) fn to_filter(&self) -> CatalogFilter {
        CatalogFilter {
            category: CategoryFilter::from_param(self.category.as_deref()),
            search: self.q.clone().unwrap_or_default(),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductView>,
    pub categories: Vec<CategoryOption>,
    pub search: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
}

/// Display the filterable product list.
///
/// The list re-fetches from the catalog store on every view; when the fetch
/// fails it is logged and the last successfully fetched list is shown
/// instead of an error page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<ProductsIndexTemplate> {
    if let Err(e) = state.cache().refresh().await {
        tracing::warn!(error = %e, "catalog refresh failed, serving last known list");
    }

    let categories = state.registry().load().await?;
    let products = state.cache().current_list();
    let catalog_filter = query.to_filter();

    let visible: Vec<ProductView> = filter::visible(&products, &catalog_filter)
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(ProductsIndexTemplate {
        products: visible,
        categories: filter_options(&categories, &catalog_filter.category),
        search: catalog_filter.search,
    })
}

/// Display a single product.
#[instrument(skip(state), fields(record_id = %record_id))]
pub async fn show(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
) -> Result<ProductShowTemplate> {
    let record_id = RecordId::from(record_id);

    let product = match state.cache().find(&record_id) {
        Some(product) => product,
        None => {
            // Cache miss: the record may be newer than the last fetch.
            state.cache().refresh().await?;
            state
                .cache()
                .find(&record_id)
                .ok_or_else(|| AppError::NotFound(format!("product {record_id}")))?
        }
    };

    Ok(ProductShowTemplate {
        product: ProductView::from(&product),
    })
}
