// src/listing/mod.rs

//! Demo feature: build a product-listing view model through the pipeline.
//!
//! This is the thin, domain-specific glue around the engine: parameter and
//! DTO types, three concrete steps (criteria -> products -> filters) and a
//! converter that projects the final store into a serializable view model.
//! Steps only coordinate; in a real deployment the data would come from
//! injected services, here a small in-process catalog stands in for them.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::engine::Pipeline;
use crate::errors::{StepFailure, StoreError};
use crate::step::{Step, TypedStep, into_step};
use crate::store::Store;
use crate::tag::TypeTag;

/// Caller-supplied build parameters, seeded into the store under their own
/// type before the first batch runs.
#[derive(Debug, Clone)]
pub struct ListingParams {
    pub origin: String,
    pub path: String,
    pub site_code: String,
}

/// Search criteria derived from the request parameters.
#[derive(Debug, Clone, Serialize)]
pub struct Criteria {
    pub origin: String,
    pub site_code: String,
    /// Non-empty segments of the request path, lowercased.
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub name: String,
    pub category: String,
    pub price_cents: u32,
}

/// Products matching the criteria.
#[derive(Debug, Clone, Serialize)]
pub struct Products {
    pub items: Vec<Product>,
}

/// Filter facets computed from the criteria and the matched products.
#[derive(Debug, Clone, Serialize)]
pub struct Filters {
    pub categories: Vec<String>,
}

/// The presentation-shaped result handed back to the caller.
#[derive(Debug, Serialize)]
pub struct ListingView {
    pub criteria: Criteria,
    pub products: Products,
    pub filters: Filters,
}

struct CriteriaStep;

#[async_trait]
impl TypedStep for CriteriaStep {
    type Output = Criteria;

    async fn run(&self, store: &Store) -> Result<Option<Criteria>, StepFailure> {
        let params = store.require::<ListingParams>()?;
        let terms = params
            .path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.to_lowercase())
            .collect();

        Ok(Some(Criteria {
            origin: params.origin.clone(),
            site_code: params.site_code.clone(),
            terms,
        }))
    }
}

struct ProductsStep;

#[async_trait]
impl TypedStep for ProductsStep {
    type Output = Products;

    fn dependencies(&self) -> Vec<TypeTag> {
        vec![TypeTag::of::<Criteria>()]
    }

    async fn run(&self, store: &Store) -> Result<Option<Products>, StepFailure> {
        let criteria = store.require::<Criteria>()?;
        Ok(Some(Products {
            items: catalog_lookup(&criteria.terms),
        }))
    }
}

struct FiltersStep;

#[async_trait]
impl TypedStep for FiltersStep {
    type Output = Filters;

    fn dependencies(&self) -> Vec<TypeTag> {
        vec![TypeTag::of::<Criteria>(), TypeTag::of::<Products>()]
    }

    async fn run(&self, store: &Store) -> Result<Option<Filters>, StepFailure> {
        let _criteria = store.require::<Criteria>()?;
        let products = store.require::<Products>()?;

        let mut categories: Vec<String> = products
            .items
            .iter()
            .map(|p| p.category.clone())
            .collect();
        categories.sort();
        categories.dedup();

        Ok(Some(Filters { categories }))
    }
}

/// The full step set of the listing feature.
pub fn steps() -> Vec<Arc<dyn Step>> {
    vec![
        into_step(CriteriaStep),
        into_step(ProductsStep),
        into_step(FiltersStep),
    ]
}

/// Project the final store into the view model (the converter role).
pub fn to_view(store: &Store) -> Result<ListingView, StoreError> {
    Ok(ListingView {
        criteria: store.require::<Criteria>()?.clone(),
        products: store.require::<Products>()?.clone(),
        filters: store.require::<Filters>()?.clone(),
    })
}

/// Convenience entry point: one full build plus projection.
pub async fn build_view(params: ListingParams) -> anyhow::Result<ListingView> {
    let pipeline = Pipeline::new(steps())?;
    let store = pipeline.build_with(params).await?;
    Ok(to_view(&store)?)
}

/// Stand-in for a product service.
fn catalog_lookup(terms: &[String]) -> Vec<Product> {
    let catalog = [
        ("Beach towel", "summer", 1499_u32),
        ("Sunscreen SPF50", "summer", 899),
        ("Ski gloves", "winter", 2499),
        ("Thermal socks", "winter", 999),
        ("Water bottle", "outdoor", 1299),
    ];

    catalog
        .iter()
        .filter(|(_, category, _)| {
            terms.is_empty() || terms.iter().any(|t| t == category)
        })
        .map(|(name, category, price_cents)| Product {
            name: (*name).to_string(),
            category: (*category).to_string(),
            price_cents: *price_cents,
        })
        .collect()
}
