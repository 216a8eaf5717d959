use crate::controller::QueryState;
use crate::normalize::{contains_folded, fold_case};
use crate::Searchable;

/// Narrow `records` to those admitted by the query's category and search term.
///
/// Stable: survivors keep their input order. An empty result is not an error.
pub fn filter<'a, R, I>(records: I, query: &QueryState<R::Category>) -> Vec<&'a R>
where
    R: Searchable + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let term = fold_case(&query.search_term);
    records
        .into_iter()
        .filter(|r| matches_category(*r, query) && matches_term(*r, &term))
        .collect()
}

fn matches_category<R: Searchable>(record: &R, query: &QueryState<R::Category>) -> bool {
    if !R::SUPPORTS_CATEGORIES {
        return true;
    }
    query.category.admits(record.category().as_ref())
}

fn matches_term<R: Searchable>(record: &R, folded_term: &str) -> bool {
    if folded_term.is_empty() {
        return true;
    }
    record.searchable_fields().into_iter().any(|field| contains_folded(field, folded_term))
}
