use crate::models::product::Product;

/// Derives the presentation view of a product set: products whose name
/// case-insensitively contains `search` (empty matches everything), with
/// all favorites ahead of all non-favorites and the input order preserved
/// within each group. Pure; the input is never mutated.
#[must_use]
pub fn project(products: &[Product], search: &str) -> Vec<Product> {
    let needle = search.to_lowercase();

    let mut view: Vec<Product> = products
        .iter()
        .filter(|p| needle.is_empty() || p.product_name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    // sort_by_key is stable, so ties keep their incoming order
    view.sort_by_key(|p| !p.is_favorite);

    view
}
