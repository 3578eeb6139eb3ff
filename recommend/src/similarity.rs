use std::cmp::Ordering;

/// Dense pairwise cosine-similarity matrix for the given tf-idf rows.
///
/// Only the upper triangle is computed; values are mirrored since cosine is
/// symmetric. Whenever either row has zero norm the cell is 0 rather than NaN,
/// so degenerate (token-less) documents compare as dissimilar to everything,
/// including themselves.
pub fn cosine_matrix(rows: &[Vec<f32>]) -> Vec<Vec<f32>> {
    let n = rows.len();
    let norms: Vec<f32> = rows.iter().map(|r| norm(r)).collect();
    let mut matrix = vec![vec![0.0f32; n]; n];
    for i in 0..n {
        for j in i..n {
            let value = if norms[i] == 0.0 || norms[j] == 0.0 {
                0.0
            } else {
                dot(&rows[i], &rows[j]) / (norms[i] * norms[j])
            };
            matrix[i][j] = value;
            matrix[j][i] = value;
        }
    }
    matrix
}

/// Rank the row's entries by similarity descending, excluding `exclude`
/// (the query item's own position) and truncating to `top_n`.
///
/// Equal scores are broken by ascending row index so repeated queries against
/// the same build return identical orderings.
pub fn rank_neighbors(row: &[f32], exclude: usize, top_n: usize) -> Vec<(usize, f32)> {
    if top_n == 0 {
        return Vec::new();
    }
    let mut scored: Vec<(usize, f32)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|&(i, _)| i != exclude)
        .collect();
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scored.truncate(top_n);
    scored
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}
