use crate::model::{Catalog, PriceRecord};

/// Result of a product search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    /// Nothing in the catalog contains the fragment.
    NoMatches,
    /// Matches sorted ascending by price per unit, catalog order on ties.
    Matches(Vec<&'a PriceRecord>),
}

impl<'a> SearchOutcome<'a> {
    pub fn records(&self) -> &[&'a PriceRecord] {
        match self {
            Self::NoMatches => &[],
            Self::Matches(records) => records,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoMatches)
    }
}

/// Case-insensitive substring search over product names.
///
/// An empty fragment matches every record. The catalog itself is untouched.
pub fn search<'a>(catalog: &'a Catalog, fragment: &str) -> SearchOutcome<'a> {
    let needle = fragment.to_lowercase();

    let mut found: Vec<&PriceRecord> = catalog
        .iter()
        .filter(|r| r.product.to_lowercase().contains(&needle))
        .collect();

    if found.is_empty() {
        return SearchOutcome::NoMatches;
    }

    // sort_by is stable: equal metrics keep catalog order
    found.sort_by(|a, b| a.price_per_unit.total_cmp(&b.price_per_unit));
    SearchOutcome::Matches(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        vec![
            PriceRecord::new("Яблоко красное", 150.0, 1.0, "price_1.csv"),
            PriceRecord::new("Груша", 90.0, 1.0, "price_1.csv"),
            PriceRecord::new("ЯБЛОКО зелёное", 100.0, 2.0, "price_2.csv"),
            PriceRecord::new("Яблоко сезонное", 50.0, 1.0, "price_2.csv"),
        ]
        .into_iter()
        .collect()
    }

    fn products<'a>(outcome: &SearchOutcome<'a>) -> Vec<&'a str> {
        outcome.records().iter().map(|r| r.product.as_str()).collect()
    }

    #[test]
    fn case_insensitive_and_sorted() {
        let catalog = catalog();
        let outcome = search(&catalog, "яблоко");
        assert_eq!(
            products(&outcome),
            vec!["ЯБЛОКО зелёное", "Яблоко сезонное", "Яблоко красное"]
        );
    }

    #[test]
    fn ties_keep_catalog_order() {
        let catalog = catalog();
        // "ЯБЛОКО зелёное" and "Яблоко сезонное" both cost 50.0 per unit
        let outcome = search(&catalog, "ЯБЛ");
        let first_two: Vec<&str> = products(&outcome).into_iter().take(2).collect();
        assert_eq!(first_two, vec!["ЯБЛОКО зелёное", "Яблоко сезонное"]);
    }

    #[test]
    fn substring_anywhere() {
        let catalog = catalog();
        assert_eq!(products(&search(&catalog, "руш")), vec!["Груша"]);
        assert_eq!(products(&search(&catalog, "ОЕ")).len(), 3);
    }

    #[test]
    fn empty_fragment_returns_everything_sorted() {
        let catalog = catalog();
        let outcome = search(&catalog, "");
        let metrics: Vec<f64> = outcome.records().iter().map(|r| r.price_per_unit).collect();
        assert_eq!(metrics, vec![50.0, 50.0, 90.0, 150.0]);
    }

    #[test]
    fn no_matches_is_distinct() {
        let catalog = catalog();
        let outcome = search(&catalog, "банан");
        assert_eq!(outcome, SearchOutcome::NoMatches);
        assert!(outcome.is_empty());
        assert!(outcome.records().is_empty());

        let empty = Catalog::new();
        assert!(search(&empty, "").is_empty());
    }

    #[test]
    fn catalog_is_not_reordered() {
        let catalog = catalog();
        let before = catalog.clone();
        let _ = search(&catalog, "");
        assert_eq!(catalog, before);
    }
}
