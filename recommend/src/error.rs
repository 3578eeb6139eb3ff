use crate::ItemId;
use thiserror::Error;

/// Failures surfaced by the recommendation engine.
///
/// Build-time and query-time conditions are distinct variants so callers can
/// translate them to different user-visible responses (e.g. 404 vs 503) and
/// never have to guess whether an empty result meant "nothing similar" or
/// "something broke".
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The catalog snapshot could not be fetched. A previously published
    /// model, if any, remains authoritative.
    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// A query arrived before any successful build.
    #[error("recommendation model not built yet")]
    ModelNotBuilt,

    /// The queried id is absent from the current catalog snapshot.
    #[error("unknown catalog item id {0}")]
    UnknownItem(ItemId),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
