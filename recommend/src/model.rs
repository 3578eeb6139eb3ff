use crate::error::{RecommendError, Result};
use crate::similarity::{cosine_matrix, rank_neighbors};
use crate::tokenizer::clean;
use crate::vectorizer::vectorize;
use crate::{CatalogItem, ItemId};
use std::collections::HashMap;

/// A ranked similar item.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub id: ItemId,
    pub score: f32,
}

/// One complete build generation: cleaned documents, vocabulary, tf-idf and
/// similarity matrices, and the id-to-row position index, all derived from a
/// single catalog snapshot. Immutable once built; a rebuild produces a whole
/// new `Model` rather than touching this one.
pub struct Model {
    ids: Vec<ItemId>,
    positions: HashMap<ItemId, usize>,
    vocabulary: Vec<String>,
    similarity: Vec<Vec<f32>>,
}

impl Model {
    /// Build the full model from a catalog snapshot in one pass.
    /// Row `i` of every matrix corresponds to `snapshot[i]` throughout.
    pub fn build(snapshot: &[CatalogItem]) -> Self {
        let ids: Vec<ItemId> = snapshot.iter().map(|item| item.id).collect();
        let positions: HashMap<ItemId, usize> =
            ids.iter().enumerate().map(|(row, &id)| (id, row)).collect();
        let documents: Vec<String> = snapshot.iter().map(|item| clean(&item.text)).collect();

        let term_matrix = vectorize(&documents);
        let similarity = cosine_matrix(&term_matrix.rows);
        tracing::debug!(
            items = ids.len(),
            vocabulary = term_matrix.vocabulary.len(),
            "model built"
        );

        Self {
            ids,
            positions,
            vocabulary: term_matrix.vocabulary,
            similarity,
        }
    }

    /// Top-`top_n` most similar items to `id`, best first. The queried item
    /// itself is never included. `top_n` of 0 yields an empty list; a `top_n`
    /// beyond the number of other items yields all of them.
    pub fn neighbors(&self, id: ItemId, top_n: usize) -> Result<Vec<Neighbor>> {
        let row = *self
            .positions
            .get(&id)
            .ok_or(RecommendError::UnknownItem(id))?;
        let ranked = rank_neighbors(&self.similarity[row], row, top_n);
        Ok(ranked
            .into_iter()
            .map(|(pos, score)| Neighbor { id: self.ids[pos], score })
            .collect())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Distinct terms of this build, in first-seen order. Diagnostic.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Cosine similarity between two catalog items of this build. Diagnostic.
    pub fn similarity_between(&self, a: ItemId, b: ItemId) -> Result<f32> {
        let i = *self.positions.get(&a).ok_or(RecommendError::UnknownItem(a))?;
        let j = *self.positions.get(&b).ok_or(RecommendError::UnknownItem(b))?;
        Ok(self.similarity[i][j])
    }
}
