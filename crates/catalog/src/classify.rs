use crate::model::{ColumnRef, ColumnRoles, Role};

/// Ordered keyword table used to recognise column roles.
///
/// Entries are kept in [`Role::ALL`] priority order and keywords are stored
/// lower-cased, so matching is case-insensitive on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    entries: Vec<(Role, Vec<String>)>,
}

const PRODUCT_KEYWORDS: &[&str] = &["название", "продукт", "товар", "наименование"];
const PRICE_KEYWORDS: &[&str] = &["цена", "розница"];
const WEIGHT_KEYWORDS: &[&str] = &["вес", "масса", "фасовка"];

impl Default for Vocabulary {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self::new(
            owned(PRODUCT_KEYWORDS),
            owned(PRICE_KEYWORDS),
            owned(WEIGHT_KEYWORDS),
        )
    }
}

impl Vocabulary {
    pub fn new(product: Vec<String>, price: Vec<String>, weight: Vec<String>) -> Self {
        let lower = |words: Vec<String>| words.into_iter().map(|w| w.to_lowercase()).collect();
        Self {
            entries: vec![
                (Role::Product, lower(product)),
                (Role::Price, lower(price)),
                (Role::Weight, lower(weight)),
            ],
        }
    }

    pub fn keywords(&self, role: Role) -> &[String] {
        self.entries
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, words)| words.as_slice())
            .unwrap_or(&[])
    }

    /// First role (in priority order) with a keyword contained in `header`.
    pub fn role_of(&self, header: &str) -> Option<Role> {
        let lower = header.to_lowercase();
        self.entries
            .iter()
            .find(|(_, words)| words.iter().any(|w| lower.contains(w.as_str())))
            .map(|(role, _)| *role)
    }
}

/// Assign header columns to roles.
///
/// A header takes the highest-priority role it matches. When several headers
/// match the same role, the last one wins.
pub fn classify<S: AsRef<str>>(headers: &[S], vocabulary: &Vocabulary) -> ColumnRoles {
    let mut roles = ColumnRoles::default();
    for (index, header) in headers.iter().enumerate() {
        let header = header.as_ref();
        if let Some(role) = vocabulary.role_of(header) {
            roles.assign(
                role,
                ColumnRef {
                    index,
                    name: header.to_string(),
                },
            );
        }
    }
    roles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(roles: &ColumnRoles) -> [Option<&str>; 3] {
        [
            roles.product.as_ref().map(|c| c.name.as_str()),
            roles.price.as_ref().map(|c| c.name.as_str()),
            roles.weight.as_ref().map(|c| c.name.as_str()),
        ]
    }

    #[test]
    fn classify_reference_header() {
        let roles = classify(&["Наименование", "Цена", "Вес", "кг"], &Vocabulary::default());
        assert_eq!(names(&roles), [Some("Наименование"), Some("Цена"), Some("Вес")]);
        assert_eq!(roles.weight.unwrap().index, 2);
    }

    #[test]
    fn classify_is_case_insensitive_substring() {
        let roles = classify(
            &["ТОВАР (шт)", "Розница, руб", "Фасовка кг"],
            &Vocabulary::default(),
        );
        assert_eq!(names(&roles), [Some("ТОВАР (шт)"), Some("Розница, руб"), Some("Фасовка кг")]);
    }

    #[test]
    fn classify_any_column_order() {
        let roles = classify(&["масса", "продукт", "цена"], &Vocabulary::default());
        assert_eq!(roles.product.unwrap().index, 1);
        assert_eq!(roles.price.unwrap().index, 2);
        assert_eq!(roles.weight.unwrap().index, 0);
    }

    #[test]
    fn last_matching_header_wins() {
        let roles = classify(&["товар", "цена", "розница", "вес"], &Vocabulary::default());
        let price = roles.price.unwrap();
        assert_eq!(price.name, "розница");
        assert_eq!(price.index, 2);
    }

    #[test]
    fn product_beats_price_for_one_header() {
        // Matches both product ("название") and price ("цена"); product has priority.
        let roles = classify(&["название и цена"], &Vocabulary::default());
        assert_eq!(names(&roles), [Some("название и цена"), None, None]);
    }

    #[test]
    fn unrecognized_headers_leave_roles_unresolved() {
        let roles = classify(&["артикул", "цена", "кг"], &Vocabulary::default());
        assert_eq!(roles.missing(), vec![Role::Product, Role::Weight]);
    }

    #[test]
    fn empty_header_list() {
        let empty: [&str; 0] = [];
        let roles = classify(&empty, &Vocabulary::default());
        assert_eq!(roles.missing(), Role::ALL.to_vec());
    }

    #[test]
    fn custom_vocabulary_is_lowercased() {
        let vocab = Vocabulary::new(
            vec!["Item".into()],
            vec!["PRICE".into()],
            vec!["Weight".into()],
        );
        let roles = classify(&["item name", "Retail price", "weight, kg"], &vocab);
        assert!(roles.missing().is_empty());
        assert_eq!(vocab.role_of("Наименование"), None);
    }
}
