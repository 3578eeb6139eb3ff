use crate::error::{RecommendError, Result};
use crate::model::{Model, Neighbor};
use crate::{CatalogSource, ItemId};
use parking_lot::RwLock;
use std::sync::Arc;

/// Default number of recommendations when the caller does not say otherwise.
pub const DEFAULT_TOP_N: usize = 3;

/// The published recommendation engine.
///
/// Holds at most one `Model` generation behind an `RwLock<Option<Arc<_>>>`.
/// `refresh` builds a complete replacement before the single write-lock
/// assignment that publishes it, so readers always observe one internally
/// consistent generation: either the previous build or the new one, never a
/// mix. A failed refresh leaves the previous generation in place.
pub struct Recommender {
    model: RwLock<Option<Arc<Model>>>,
}

impl Recommender {
    pub fn new() -> Self {
        Self { model: RwLock::new(None) }
    }

    /// Fetch the catalog snapshot, rebuild the model from scratch, and swap
    /// it in. Propagates `CatalogUnavailable` without touching the current
    /// model. Returns the number of items in the new build.
    pub fn refresh<S: CatalogSource>(&self, source: &S) -> Result<usize> {
        let snapshot = source.load_snapshot()?;
        let model = Arc::new(Model::build(&snapshot));
        let items = model.len();
        *self.model.write() = Some(model);
        tracing::info!(items, "recommendation model refreshed");
        Ok(items)
    }

    /// Ids of the `top_n` items most similar to `product_id`, best first.
    pub fn similar_products(&self, product_id: ItemId, top_n: usize) -> Result<Vec<ItemId>> {
        Ok(self
            .similar_products_scored(product_id, top_n)?
            .into_iter()
            .map(|n| n.id)
            .collect())
    }

    /// Same as `similar_products` but keeps the cosine score on each hit.
    pub fn similar_products_scored(
        &self,
        product_id: ItemId,
        top_n: usize,
    ) -> Result<Vec<Neighbor>> {
        let model = self.model_snapshot().ok_or(RecommendError::ModelNotBuilt)?;
        model.neighbors(product_id, top_n)
    }

    /// The currently published build, if any. Callers holding the returned
    /// `Arc` keep a consistent generation across concurrent refreshes.
    pub fn model_snapshot(&self) -> Option<Arc<Model>> {
        self.model.read().clone()
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}
