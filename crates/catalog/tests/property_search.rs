// Property tests for classification, normalization and search.
// Run with: cargo test -p pricelens-catalog --test property_search

use proptest::prelude::*;

use csv::StringRecord;
use pricelens_catalog::classify::{classify, Vocabulary};
use pricelens_catalog::config::NumberPolicy;
use pricelens_catalog::model::{round_to_tenth, Catalog, ColumnRef, PriceRecord, ResolvedRoles};
use pricelens_catalog::normalize::normalize;
use pricelens_catalog::query::search;

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

fn arb_product() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Яблоко", "яблоко красное", "ГРУША", "Сыр", "сыр твёрдый", "Молоко", "Apple", "apple pie",
    ])
    .prop_map(str::to_string)
}

fn arb_record() -> impl Strategy<Value = PriceRecord> {
    (arb_product(), 1u32..2000, 1u32..20, prop::sample::select(vec!["price_a.csv", "price_b.csv"]))
        .prop_map(|(product, price, weight, file)| PriceRecord::new(product, price as f64, weight as f64, file))
}

fn arb_catalog() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(arb_record(), 0..40).prop_map(|records| records.into_iter().collect())
}

fn arb_fragment() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["", "я", "ЯБЛ", "сыр", "Сыр Т", "apple", "APPLE", "о", "нет такого"])
        .prop_map(str::to_string)
}

fn resolved() -> ResolvedRoles {
    let col = |index: usize, name: &str| ColumnRef { index, name: name.into() };
    ResolvedRoles {
        product: col(0, "товар"),
        price: col(1, "цена"),
        weight: col(2, "вес"),
    }
}

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn search_results_are_sorted_and_stable(catalog in arb_catalog(), fragment in arb_fragment()) {
        let outcome = search(&catalog, &fragment);
        let found = outcome.records();

        for pair in found.windows(2) {
            prop_assert!(pair[0].price_per_unit <= pair[1].price_per_unit);
            if pair[0].price_per_unit == pair[1].price_per_unit {
                let pos = |r: &PriceRecord| catalog.iter().position(|c| std::ptr::eq(c, r)).unwrap();
                prop_assert!(pos(pair[0]) < pos(pair[1]), "tie reordered");
            }
        }
    }

    #[test]
    fn search_is_case_insensitive_substring(catalog in arb_catalog(), fragment in arb_fragment()) {
        let needle = fragment.to_lowercase();
        let expected = catalog.iter().filter(|r| r.product.to_lowercase().contains(&needle)).count();

        let lower = search(&catalog, &fragment.to_lowercase()).records().len();
        let upper = search(&catalog, &fragment.to_uppercase()).records().len();
        prop_assert_eq!(lower, expected);
        prop_assert_eq!(upper, expected);
    }

    #[test]
    fn empty_fragment_returns_whole_catalog(catalog in arb_catalog()) {
        prop_assert_eq!(search(&catalog, "").records().len(), catalog.len());
    }

    #[test]
    fn accepted_rows_carry_derived_metric(
        price in -50i32..5000,
        weight in -5i32..50,
        product in arb_product(),
    ) {
        let record = StringRecord::from(vec![product.clone(), price.to_string(), weight.to_string()]);
        let result = normalize(&record, &resolved(), "price.csv", 2, NumberPolicy::Fractional);

        if price > 0 && weight > 0 {
            let r = result.unwrap();
            prop_assert_eq!(r.price_per_unit, round_to_tenth(price as f64 / weight as f64));
        } else {
            prop_assert!(result.is_err());
        }
    }

    #[test]
    fn blank_products_never_accepted(spaces in "[ \t]{0,5}", price in 1u32..100, weight in 1u32..10) {
        let record = StringRecord::from(vec![spaces, price.to_string(), weight.to_string()]);
        prop_assert!(normalize(&record, &resolved(), "price.csv", 2, NumberPolicy::Fractional).is_err());
    }

    #[test]
    fn synonym_anywhere_resolves_role(
        prefix in "[a-z ]{0,4}",
        suffix in "[a-z ]{0,4}",
        keyword in prop::sample::select(vec!["вес", "масса", "фасовка"]),
    ) {
        let header = format!("{prefix}{}{suffix}", keyword.to_uppercase());
        let roles = classify(&["артикул".to_string(), header.clone()], &Vocabulary::default());
        prop_assert_eq!(roles.weight.map(|c| c.name), Some(header));
        prop_assert!(roles.product.is_none());
        prop_assert!(roles.price.is_none());
    }
}
