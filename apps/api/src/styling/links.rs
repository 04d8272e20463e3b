//! Shopping links built from an ornament's search query. Plain string
//! interpolation; nothing here touches the network.

use serde::Serialize;

const MARKETPLACE_SEARCH_URL: &str = "https://www.amazon.in/s?k=";
const SHOPPING_SEARCH_URL: &str = "https://www.google.com/search?tbm=shop&q=";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingLinks {
    pub marketplace: String,
    pub shopping_search: String,
}

impl ShoppingLinks {
    pub fn for_query(query: &str) -> Self {
        let encoded = urlencoding::encode(query);
        Self {
            marketplace: format!("{MARKETPLACE_SEARCH_URL}{encoded}"),
            shopping_search: format!("{SHOPPING_SEARCH_URL}{encoded}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_encode_query() {
        let links = ShoppingLinks::for_query("gold jhumka & pearl drops");
        assert_eq!(
            links.marketplace,
            "https://www.amazon.in/s?k=gold%20jhumka%20%26%20pearl%20drops"
        );
        assert_eq!(
            links.shopping_search,
            "https://www.google.com/search?tbm=shop&q=gold%20jhumka%20%26%20pearl%20drops"
        );
    }

    #[test]
    fn test_links_are_deterministic() {
        assert_eq!(
            ShoppingLinks::for_query("leather loafers"),
            ShoppingLinks::for_query("leather loafers")
        );
    }
}
