use serde::{Deserialize, Serialize};

/// A product listing returned by a catalog lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    /// Price as displayed by the catalog, e.g. "₹499"
    pub price: String,
    pub link: String,
    /// Image URL, empty when the listing has none
    pub image: String,
    /// Catalog the listing came from
    pub source: String,
    /// Query that produced this listing, lowercased
    pub query: String,
}

impl Candidate {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        link: impl Into<String>,
        image: impl Into<String>,
        source: impl Into<String>,
        query: &str,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            link: link.into(),
            image: image.into(),
            source: source.into(),
            query: query.to_lowercase(),
        }
    }
}

/// A candidate with its per-request relevance weight (always >= 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedCandidate {
    pub candidate: Candidate,
    pub weight: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_query_is_lowercased() {
        let candidate = Candidate::new(
            "Calming Cleanser",
            "₹499",
            "https://shop.test/p/1",
            "",
            "TestShop",
            "Fragrance-Free Cleanser",
        );
        assert_eq!(candidate.query, "fragrance-free cleanser");
        assert_eq!(candidate.name, "Calming Cleanser");
    }

    #[test]
    fn test_candidate_serialization_fields() {
        let candidate = Candidate::new("Gel", "₹1", "l", "i", "S", "Q");
        let value = serde_json::to_value(&candidate).unwrap();
        for field in ["name", "price", "link", "image", "source", "query"] {
            assert!(value.get(field).is_some(), "missing {}", field);
        }
    }
}
