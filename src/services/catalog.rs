//! Client-side product catalog helpers.

use crate::domain::models::Product;

/// Multi-word search over name and description: every whitespace-separated
/// word of the query must appear somewhere in the product's text. A blank
/// query matches everything.
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return products.iter().collect();
    }
    let words: Vec<&str> = query.split_whitespace().collect();

    products
        .iter()
        .filter(|p| {
            let text = format!(
                "{} {}",
                p.name.to_lowercase(),
                p.description.as_deref().unwrap_or("").to_lowercase()
            );
            words.iter().all(|w| text.contains(w))
        })
        .collect()
}

/// Find a product by id.
pub fn find_by_id(products: &[Product], id: i64) -> Option<&Product> {
    products.iter().find(|p| p.id == Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, description: Option<&str>) -> Product {
        Product {
            id: Some(id),
            name: name.to_string(),
            description: description.map(str::to_string),
            ..Product::default()
        }
    }

    #[test]
    fn test_blank_query_matches_everything() {
        let products = vec![product(1, "Widget", None), product(2, "Gadget", None)];
        assert_eq!(search(&products, "  ").len(), 2);
    }

    #[test]
    fn test_all_words_must_match_across_fields() {
        let products = vec![
            product(1, "Steel bolt", Some("M6 hex head")),
            product(2, "Brass bolt", Some("M8 hex head")),
        ];
        let hits = search(&products, "bolt m6");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, Some(1));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let products = vec![product(1, "Widget", Some("Premium line"))];
        assert_eq!(search(&products, "wIdGeT premium").len(), 1);
    }

    #[test]
    fn test_find_by_id() {
        let products = vec![product(1, "Widget", None)];
        assert!(find_by_id(&products, 1).is_some());
        assert!(find_by_id(&products, 9).is_none());
    }
}
