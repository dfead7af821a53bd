use std::collections::HashMap;

use cellar_store::{DocumentStore, QueryRow, StoreError};

use crate::model::Beer;

/// Convert view rows into [`Beer`]s and resolve each one's brewery
/// affiliation with a single batched fetch (never N+1).
///
/// Best-effort: a row whose id misses in the batched fetch, or whose
/// fetched document carries no `brewery_id`, is dropped from the output.
/// Survivors keep the original row order. The only hard failure is the
/// batched call itself erroring.
pub fn enrich<S: DocumentStore>(store: &S, rows: Vec<QueryRow>) -> Result<Vec<Beer>, StoreError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let mut beers: Vec<Beer> = rows
        .into_iter()
        .map(|row| {
            let mut beer = Beer::new(row.id, row.key);
            beer.doc = row.doc;
            beer
        })
        .collect();

    let ids: Vec<String> = beers.iter().map(|beer| beer.id.clone()).collect();
    let docs = store.get_multi(&ids)?;

    let mut resolved: HashMap<String, String> = HashMap::new();
    for (id, doc) in docs {
        if let Some(brewery_id) = doc.as_ref().and_then(|doc| doc.get_str("brewery_id").ok()) {
            resolved.insert(id, brewery_id.to_string());
        }
    }

    // Removal is keyed by the fetched id, so duplicate ids and interleaved
    // misses cannot drop the wrong entry.
    beers.retain_mut(|beer| match resolved.get(&beer.id) {
        Some(brewery_id) => {
            beer.brewery_id = Some(brewery_id.clone());
            true
        }
        None => false,
    });

    Ok(beers)
}
