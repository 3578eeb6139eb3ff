use crate::tokenizer::tokenize;
use std::collections::HashMap;

/// TF-IDF term-document matrix over one snapshot of cleaned descriptions.
///
/// Row `i` always corresponds to document `i` in the input order; that
/// alignment is what lets the similarity index translate row positions back
/// to catalog ids.
pub struct TermMatrix {
    /// Dense `N x V` matrix of tf-idf weights.
    pub rows: Vec<Vec<f32>>,
    /// Distinct tokens in first-seen order.
    pub vocabulary: Vec<String>,
}

/// Build the TF-IDF matrix for a slice of cleaned documents.
///
/// `tf` is the term count divided by the document's total token count (zero
/// for token-less documents). `idf` is `ln(N / (1 + df))` where `df` counts
/// documents containing the term as a *substring* of their cleaned text, not
/// as an exact token. Substring counting slightly over-counts when one term
/// is a prefix of another ("gauze" inside "gauzes"); it is kept as-is because
/// changing it would shift every weight and downstream ranking.
pub fn vectorize(documents: &[String]) -> TermMatrix {
    let mut vocabulary: Vec<String> = Vec::new();
    let mut term_index: HashMap<&str, usize> = HashMap::new();
    let tokenized: Vec<Vec<&str>> = documents.iter().map(|d| tokenize(d)).collect();

    for tokens in &tokenized {
        for &token in tokens {
            if !term_index.contains_key(token) {
                term_index.insert(token, vocabulary.len());
                vocabulary.push(token.to_string());
            }
        }
    }

    let num_docs = documents.len();
    let idf: Vec<f32> = vocabulary
        .iter()
        .map(|term| {
            let df = documents.iter().filter(|d| d.contains(term.as_str())).count();
            (num_docs as f32 / (1 + df) as f32).ln()
        })
        .collect();

    let mut rows = Vec::with_capacity(num_docs);
    for tokens in &tokenized {
        let mut row = vec![0.0f32; vocabulary.len()];
        let total = tokens.len();
        if total > 0 {
            let mut counts: HashMap<&str, u32> = HashMap::new();
            for &token in tokens {
                *counts.entry(token).or_insert(0) += 1;
            }
            for (token, count) in counts {
                let j = term_index[token];
                let tf = count as f32 / total as f32;
                row[j] = tf * idf[j];
            }
        }
        rows.push(row);
    }

    TermMatrix { rows, vocabulary }
}
