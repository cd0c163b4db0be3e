//! Admin console: product CRUD and category management.
//!
//! Every mutation writes to the catalog store and then refreshes the cache
//! before redirecting, so the re-rendered console always shows a fresh
//! store snapshot rather than a locally patched list. A refresh failure
//! after a successful write is logged and the previous snapshot shown; the
//! write itself already succeeded.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use haberdash_core::filter;
use haberdash_core::{DisplayId, Product, ProductFields, RecordId};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::{MutateError, NewProduct};
use crate::error::Result;
use crate::filters;
use crate::middleware::auth::RequireAdmin;
use crate::state::AppState;

use super::products::{CategoryOption, ProductView, choice_options, filter_options};

/// Console query parameters: the filter bar plus the edit selector.
///
/// The edit workflow is the query string: `?edit={record_id}` puts the form
/// into editing state, navigating away (or submitting) returns it to idle.
/// Opening a different edit link simply replaces the parameter - the
/// in-progress edit is discarded, last writer wins.
#[derive(Debug, Default, Deserialize)]
pub struct PanelQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub edit: Option<String>,
}

/// Product form contents, either for the edit prefill or an error re-render.
#[derive(Debug, Clone, Default)]
pub struct ProductFormView {
    /// `Some` when editing an existing record, `None` when creating.
    pub record_id: Option<String>,
    pub display_id: Option<String>,
    pub name: String,
    pub category: String,
    pub image: String,
    pub link: String,
    pub description: String,
}

impl From<&Product> for ProductFormView {
    fn from(product: &Product) -> Self {
        Self {
            record_id: Some(product.record_id.to_string()),
            display_id: product.display_id.as_ref().map(ToString::to_string),
            name: product.name.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            link: product.link.clone().unwrap_or_default(),
            description: product.description.clone(),
        }
    }
}

/// Submitted product form data.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub display_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
}

impl ProductForm {
    fn to_fields(&self) -> ProductFields {
        ProductFields {
            display_id: none_if_empty(&self.display_id).map(DisplayId::new),
            name: self.name.clone(),
            category: self.category.clone(),
            image: self.image.clone(),
            link: none_if_empty(&self.link),
            description: self.description.clone(),
        }
    }

    fn to_view(&self, record_id: Option<String>) -> ProductFormView {
        ProductFormView {
            record_id,
            display_id: none_if_empty(&self.display_id),
            name: self.name.clone(),
            category: self.category.clone(),
            image: self.image.clone(),
            link: self.link.clone(),
            description: self.description.clone(),
        }
    }
}

/// Category add/remove form data.
#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub label: String,
}

/// Admin console template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/panel.html")]
pub struct AdminPanelTemplate {
    pub products: Vec<ProductView>,
    pub filter_options: Vec<CategoryOption>,
    pub choice_options: Vec<CategoryOption>,
    pub categories: Vec<String>,
    pub search: String,
    pub form: ProductFormView,
    pub error: Option<String>,
}

/// Display the admin console.
#[instrument(skip(state))]
pub async fn panel(
    _: RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<PanelQuery>,
) -> Result<AdminPanelTemplate> {
    if let Err(e) = state.cache().refresh().await {
        tracing::warn!(error = %e, "catalog refresh failed, rendering last known list");
    }
    build_panel(&state, &query, None, None).await
}

/// Assemble the console template from current cache, registry, and filter
/// state. `form_override` carries submitted values back after a rejected
/// mutation so the operator does not lose their input.
async fn build_panel(
    state: &AppState,
    query: &PanelQuery,
    form_override: Option<ProductFormView>,
    error: Option<String>,
) -> Result<AdminPanelTemplate> {
    let categories = state.registry().load().await?;
    let products = state.cache().current_list();

    let catalog_filter = super::products::CatalogQuery {
        category: query.category.clone(),
        q: query.q.clone(),
    }
    .to_filter();

    let visible: Vec<ProductView> = filter::visible(&products, &catalog_filter)
        .into_iter()
        .map(ProductView::from)
        .collect();

    let form = form_override.unwrap_or_else(|| {
        query
            .edit
            .as_deref()
            .and_then(|id| products.iter().find(|p| p.record_id.as_str() == id))
            .map(ProductFormView::from)
            .unwrap_or_default()
    });

    Ok(AdminPanelTemplate {
        products: visible,
        filter_options: filter_options(&categories, &catalog_filter.category),
        choice_options: choice_options(&categories, &form.category),
        categories,
        search: catalog_filter.search,
        form,
        error,
    })
}

/// Create a product, then re-fetch the catalog.
#[instrument(skip(state, form))]
pub async fn create_product(
    _: RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let draft = NewProduct {
        name: form.name.clone(),
        category: form.category.clone(),
        image: form.image.clone(),
        link: none_if_empty(&form.link),
        description: form.description.clone(),
    };

    match state.mutator().create(draft).await {
        Ok(_) => {
            refresh_after_mutation(&state).await;
            Ok(Redirect::to("/admin").into_response())
        }
        Err(MutateError::Validation(e)) => {
            // Blocking condition: re-render with the submitted values intact.
            let panel = build_panel(
                &state,
                &PanelQuery::default(),
                Some(form.to_view(None)),
                Some(e.to_string()),
            )
            .await?;
            Ok(panel.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Overwrite a product's fields, then re-fetch the catalog.
#[instrument(skip(state, form), fields(record_id = %record_id))]
pub async fn update_product(
    _: RequireAdmin,
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let record_id = RecordId::from(record_id);

    match state.mutator().update(&record_id, form.to_fields()).await {
        Ok(()) => {
            refresh_after_mutation(&state).await;
            Ok(Redirect::to("/admin").into_response())
        }
        Err(MutateError::Validation(e)) => {
            let record = record_id.into_inner();
            let panel = build_panel(
                &state,
                &PanelQuery::default(),
                Some(form.to_view(Some(record))),
                Some(e.to_string()),
            )
            .await?;
            Ok(panel.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Delete a product, then re-fetch the catalog.
///
/// A record that is already gone counts as deleted: the second click of a
/// double-submitted delete lands on `NotFound` and is treated as satisfied.
#[instrument(skip(state), fields(record_id = %record_id))]
pub async fn delete_product(
    _: RequireAdmin,
    State(state): State<AppState>,
    Path(record_id): Path<String>,
) -> Result<Redirect> {
    let record_id = RecordId::from(record_id);

    match state.mutator().delete(&record_id).await {
        Ok(()) => {}
        Err(MutateError::NotFound(_)) => {
            tracing::debug!(record_id = %record_id, "product already deleted");
        }
        Err(e) => return Err(e.into()),
    }

    refresh_after_mutation(&state).await;
    Ok(Redirect::to("/admin"))
}

/// Add a category label.
#[instrument(skip(state))]
pub async fn add_category(
    _: RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<CategoryForm>,
) -> Result<Redirect> {
    state.registry().add(&form.label).await?;
    Ok(Redirect::to("/admin"))
}

/// Remove a category label (products keep theirs).
#[instrument(skip(state))]
pub async fn remove_category(
    _: RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<CategoryForm>,
) -> Result<Redirect> {
    state.registry().remove(&form.label).await?;
    Ok(Redirect::to("/admin"))
}

/// Re-fetch the catalog after a successful write.
///
/// The write already landed; a failed re-fetch only delays visibility, so
/// it is logged and the previous snapshot kept.
async fn refresh_after_mutation(state: &AppState) {
    if let Err(e) = state.cache().refresh().await {
        tracing::warn!(error = %e, "catalog refresh after mutation failed");
    }
}

fn none_if_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
