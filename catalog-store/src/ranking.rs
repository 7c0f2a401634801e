//! The display order of the catalog.

use catalog_core::models::Product;
use std::cmp::Ordering;

/// Compare two products by display rank.
///
/// Keys, highest priority first: pinned, featured, available (each `true`
/// before `false`), then rating descending, then creation time descending.
/// Products that are equal on every key compare as `Equal`, so a stable sort
/// keeps their existing relative order.
pub fn compare(a: &Product, b: &Product) -> Ordering {
    b.is_pinned
        .cmp(&a.is_pinned)
        .then_with(|| b.is_featured.cmp(&a.is_featured))
        .then_with(|| b.is_available.cmp(&a.is_available))
        .then_with(|| b.rating.total_cmp(&a.rating))
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Sort a slice of products into display order.
///
/// This is a stable sort.
pub fn rank(products: &mut [Product]) {
    products.sort_by(compare);
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::models::NewProduct;
    use time::{OffsetDateTime, macros::datetime};

    fn product(
        id: &str,
        pinned: bool,
        featured: bool,
        available: bool,
        rating: f64,
        created_at: OffsetDateTime,
    ) -> Product {
        let mut product = NewProduct {
            name: id.to_uppercase(),
            rating,
            stock: 1,
            is_featured: featured,
            is_pinned: pinned,
            ..Default::default()
        }
        .into_product(id.into(), created_at);
        product.is_available = available;
        product
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_pinned_beats_everything_else() {
        let t0 = datetime!(2025-01-01 00:00 UTC);
        let t1 = datetime!(2025-02-01 00:00 UTC);
        let p1 = product("p1", false, true, true, 5.0, t1);
        let p2 = product("p2", true, false, false, 1.0, t0);

        let mut products = vec![p1, p2];
        rank(&mut products);
        assert_eq!(ids(&products), ["p2", "p1"]);
    }

    #[test]
    fn test_key_priority() {
        let old = datetime!(2025-01-01 00:00 UTC);
        let new = datetime!(2025-06-01 00:00 UTC);

        let mut products = vec![
            product("newest", false, false, true, 3.0, new),
            product("oldest", false, false, true, 3.0, old),
            product("best", false, false, true, 4.5, old),
            product("sold-out", false, false, false, 5.0, new),
            product("featured", false, true, false, 0.0, old),
            product("pinned", true, false, false, 0.0, old),
        ];
        rank(&mut products);
        assert_eq!(
            ids(&products),
            ["pinned", "featured", "best", "newest", "oldest", "sold-out"]
        );
    }

    #[test]
    fn test_full_ties_keep_their_order() {
        let at = datetime!(2025-03-01 12:00 UTC);
        let mut products: Vec<Product> = (0..16)
            .map(|i| product(&format!("tie-{i:02}"), false, true, true, 4.0, at))
            .collect();
        let expected: Vec<String> = products.iter().map(|p| p.id.to_string()).collect();

        for _ in 0..3 {
            rank(&mut products);
            let actual: Vec<String> = products.iter().map(|p| p.id.to_string()).collect();
            assert_eq!(actual, expected);
        }
    }
}
