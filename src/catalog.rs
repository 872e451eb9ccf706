//! Storefront selections over the product list.

use crate::models::Product;

/// Pseudo-category that disables the filter.
pub const ALL_CATEGORIES: &str = "All";

/// Most products highlighted on the home page.
pub const FEATURED_LIMIT: usize = 3;

/// Products shown on the public site, in list order.
pub fn visible_products(products: &[Product]) -> impl Iterator<Item = &Product> {
    products.iter().filter(|p| p.is_visible)
}

/// `All`, then each category of a visible product in first-seen order.
pub fn category_options(products: &[Product]) -> Vec<String> {
    let mut options = vec![ALL_CATEGORIES.to_string()];
    for product in visible_products(products) {
        if !options.iter().any(|c| c == &product.category) {
            options.push(product.category.clone());
        }
    }
    options
}

/// Visible products in `selected` (exact match), or all of them for `All`.
pub fn filter_by_category<'a>(products: &'a [Product], selected: &str) -> Vec<&'a Product> {
    visible_products(products)
        .filter(|p| selected == ALL_CATEGORIES || p.category == selected)
        .collect()
}

/// Featured and visible products, in list order, capped at [`FEATURED_LIMIT`].
pub fn featured(products: &[Product]) -> Vec<&Product> {
    visible_products(products)
        .filter(|p| p.is_featured)
        .take(FEATURED_LIMIT)
        .collect()
}
