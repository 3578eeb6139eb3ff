pub mod catalog;
pub mod engine;
pub mod error;
pub mod model;
pub mod similarity;
pub mod tokenizer;
pub mod vectorizer;

pub use catalog::{CatalogItem, CatalogSource, JsonCatalog};
pub use engine::Recommender;
pub use error::RecommendError;
pub use model::{Model, Neighbor};

pub type ItemId = u32;
