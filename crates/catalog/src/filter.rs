//! Filter pipeline: optional predicates composed with logical AND.
//!
//! Every field of [`CarFilter`] is optional. A present field contributes one
//! predicate, an absent (or blank) field contributes nothing. The result is
//! always returned in canonical listing order.
//!
//! Matching rules:
//! - `make`, `model`: case-insensitive substring.
//! - `min_price`/`max_price`, `min_year`/`max_year`: inclusive bounds.
//! - `fuel_type`, `transmission`: exact, case-sensitive.
//! - `search`: case-insensitive substring of make, model, description,
//!   exterior color or fuel type, or of any feature (OR across fields).
//!
//! Numeric bounds accept either numbers or strings, so a query string such as
//! `?minPrice=&maxPrice=25000` leaves `min_price` unset.

use serde::{Deserialize, Serialize};

use crate::car::Car;
use crate::listing::sort_newest_first;

/// A single boxed predicate over a car.
pub type Predicate<'a> = Box<dyn Fn(&Car) -> bool + Send + Sync + 'a>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarFilter {
    pub make: Option<String>,
    pub model: Option<String>,
    #[serde(deserialize_with = "blank_as_none::deserialize")]
    pub min_price: Option<u64>,
    #[serde(deserialize_with = "blank_as_none::deserialize")]
    pub max_price: Option<u64>,
    #[serde(deserialize_with = "blank_as_none::deserialize")]
    pub min_year: Option<i32>,
    #[serde(deserialize_with = "blank_as_none::deserialize")]
    pub max_year: Option<i32>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub search: Option<String>,
}

impl CarFilter {
    /// True when no field would add a predicate.
    pub fn is_empty(&self) -> bool {
        self.predicates().is_empty()
    }

    /// Build the predicate list for the fields that are present.
    ///
    /// Each entry carries the filter field name for diagnostics.
    pub fn predicates(&self) -> Vec<(&'static str, Predicate<'_>)> {
        let mut out: Vec<(&'static str, Predicate<'_>)> = Vec::new();

        if let Some(needle) = present(&self.make).map(str::to_lowercase) {
            out.push(("make", Box::new(move |car: &Car| contains_ci(&car.make, &needle))));
        }
        if let Some(needle) = present(&self.model).map(str::to_lowercase) {
            out.push(("model", Box::new(move |car: &Car| contains_ci(&car.model, &needle))));
        }
        if let Some(min) = self.min_price {
            out.push(("minPrice", Box::new(move |car: &Car| car.price >= min)));
        }
        if let Some(max) = self.max_price {
            out.push(("maxPrice", Box::new(move |car: &Car| car.price <= max)));
        }
        if let Some(min) = self.min_year {
            out.push(("minYear", Box::new(move |car: &Car| car.year >= min)));
        }
        if let Some(max) = self.max_year {
            out.push(("maxYear", Box::new(move |car: &Car| car.year <= max)));
        }
        // Exact, case-sensitive: "gasoline" does not match "Gasoline".
        if let Some(fuel_type) = present(&self.fuel_type) {
            out.push(("fuelType", Box::new(move |car: &Car| car.fuel_type == fuel_type)));
        }
        if let Some(transmission) = present(&self.transmission) {
            out.push((
                "transmission",
                Box::new(move |car: &Car| car.transmission == transmission),
            ));
        }
        if let Some(term) = present(&self.search).map(str::to_lowercase) {
            out.push(("search", Box::new(move |car: &Car| matches_search(car, &term))));
        }

        out
    }

    /// Run the pipeline over `cars` and return the survivors newest first.
    pub fn apply(&self, cars: Vec<Car>) -> Vec<Car> {
        self.apply_with(cars, |_, _| {})
    }

    /// Like [`apply`](Self::apply), calling `on_step(field, remaining)` after
    /// each predicate runs.
    pub fn apply_with<F>(&self, cars: Vec<Car>, mut on_step: F) -> Vec<Car>
    where
        F: FnMut(&'static str, usize),
    {
        let mut out = self.predicates().iter().fold(cars, |acc, (field, p)| {
            let kept: Vec<Car> = acc.into_iter().filter(|c| p(c)).collect();
            on_step(field, kept.len());
            kept
        });
        sort_newest_first(&mut out);
        out
    }
}

/// `Option<T>` from a number, a numeric string, or a blank string (`None`).
mod blank_as_none {
    use std::fmt;
    use std::marker::PhantomData;
    use std::str::FromStr;

    use serde::de::{self, Deserializer, Unexpected, Visitor};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr + TryFrom<u64> + TryFrom<i64>,
        <T as FromStr>::Err: fmt::Display,
    {
        deserializer.deserialize_option(BlankAsNone(PhantomData))
    }

    struct BlankAsNone<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for BlankAsNone<T>
    where
        T: FromStr + TryFrom<u64> + TryFrom<i64>,
        <T as FromStr>::Err: fmt::Display,
    {
        type Value = Option<T>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer, a numeric string, or an empty string")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            T::try_from(v)
                .map(Some)
                .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            T::try_from(v)
                .map(Some)
                .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let v = v.trim();
            if v.is_empty() {
                return Ok(None);
            }
            v.parse::<T>().map(Some).map_err(E::custom)
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// `needle` must already be lowercased.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// `term` must already be lowercased.
fn matches_search(car: &Car, term: &str) -> bool {
    let fields = [
        Some(car.make.as_str()),
        Some(car.model.as_str()),
        car.description.as_deref(),
        Some(car.exterior_color.as_str()),
        Some(car.fuel_type.as_str()),
    ];

    fields.into_iter().flatten().any(|f| contains_ci(f, term))
        || car.features.iter().any(|f| contains_ci(f, term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::car;

    fn catalog() -> Vec<Car> {
        let mut bmw = car(1, "BMW", "3 Series", 2021, 40_000, "Gasoline", "Automatic", "RWD");
        bmw.features = vec!["Heated Seats".to_string(), "Sunroof".to_string()];
        let mut camry = car(2, "Toyota", "Camry", 2019, 24_000, "Hybrid", "Automatic", "FWD");
        camry.description = Some("Very clean, single owner".to_string());
        camry.exterior_color = "Silver".to_string();
        let civic = car(3, "Honda", "Civic", 2015, 12_500, "Gasoline", "Manual", "FWD");
        let model3 = car(4, "Tesla", "Model 3", 2023, 38_000, "Electric", "Automatic", "AWD");
        vec![bmw, camry, civic, model3]
    }

    fn ids(cars: &[Car]) -> Vec<u64> {
        cars.iter().map(|c| c.id.get()).collect()
    }

    #[test]
    fn empty_filter_returns_everything_newest_first() {
        let filter = CarFilter::default();
        assert!(filter.is_empty());
        assert_eq!(ids(&filter.apply(catalog())), vec![4, 3, 2, 1]);
    }

    #[test]
    fn blank_strings_are_treated_as_absent() {
        let filter = CarFilter {
            make: Some("  ".to_string()),
            fuel_type: Some(String::new()),
            ..Default::default()
        };
        assert!(filter.is_empty());
        assert_eq!(filter.apply(catalog()).len(), 4);
    }

    #[test]
    fn make_is_case_insensitive_substring() {
        let filter = CarFilter {
            make: Some("bmw".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(catalog())), vec![1]);

        let partial = CarFilter {
            make: Some("OYO".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&partial.apply(catalog())), vec![2]);
    }

    #[test]
    fn model_is_case_insensitive_substring() {
        let filter = CarFilter {
            model: Some("model".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(catalog())), vec![4]);
    }

    #[test]
    fn fuel_type_is_case_sensitive_exact() {
        let lower = CarFilter {
            fuel_type: Some("gasoline".to_string()),
            ..Default::default()
        };
        assert!(lower.apply(catalog()).is_empty());

        let exact = CarFilter {
            fuel_type: Some("Gasoline".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&exact.apply(catalog())), vec![3, 1]);

        let prefix = CarFilter {
            fuel_type: Some("Gas".to_string()),
            ..Default::default()
        };
        assert!(prefix.apply(catalog()).is_empty());
    }

    #[test]
    fn transmission_is_case_sensitive_exact() {
        let lower = CarFilter {
            transmission: Some("manual".to_string()),
            ..Default::default()
        };
        assert!(lower.apply(catalog()).is_empty());

        let exact = CarFilter {
            transmission: Some("Manual".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&exact.apply(catalog())), vec![3]);
    }

    #[test]
    fn numeric_bounds_are_inclusive() {
        let filter = CarFilter {
            min_price: Some(24_000),
            max_price: Some(40_000),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(catalog())), vec![4, 2, 1]);

        let years = CarFilter {
            min_year: Some(2019),
            max_year: Some(2021),
            ..Default::default()
        };
        assert_eq!(ids(&years.apply(catalog())), vec![2, 1]);
    }

    #[test]
    fn zero_bounds_are_present_not_ignored() {
        let filter = CarFilter {
            max_price: Some(0),
            ..Default::default()
        };
        assert!(!filter.is_empty());
        assert!(filter.apply(catalog()).is_empty());
    }

    #[test]
    fn search_covers_description_color_fuel_and_features() {
        let by = |term: &str| {
            let filter = CarFilter {
                search: Some(term.to_string()),
                ..Default::default()
            };
            ids(&filter.apply(catalog()))
        };

        assert_eq!(by("single OWNER"), vec![2]);
        assert_eq!(by("silver"), vec![2]);
        assert_eq!(by("electric"), vec![4]);
        assert_eq!(by("sunroof"), vec![1]);
        assert_eq!(by("civ"), vec![3]);
        assert!(by("convertible").is_empty());
    }

    #[test]
    fn search_does_not_look_at_interior_color_or_transmission() {
        let filter = CarFilter {
            search: Some("tan".to_string()),
            ..Default::default()
        };
        // Every fixture has interior "Tan"; none should match through it.
        assert!(filter.apply(catalog()).is_empty());

        let filter = CarFilter {
            search: Some("manual".to_string()),
            ..Default::default()
        };
        assert!(filter.apply(catalog()).is_empty());
    }

    #[test]
    fn different_fields_compose_with_and() {
        let filter = CarFilter {
            fuel_type: Some("Gasoline".to_string()),
            transmission: Some("Automatic".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(catalog())), vec![1]);
    }

    #[test]
    fn predicates_are_named_after_their_fields() {
        let filter = CarFilter {
            make: Some("bmw".to_string()),
            max_year: Some(2020),
            search: Some("x".to_string()),
            ..Default::default()
        };
        let names: Vec<_> = filter.predicates().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["make", "maxYear", "search"]);
    }

    #[test]
    fn apply_with_reports_each_step() {
        let filter = CarFilter {
            fuel_type: Some("Gasoline".to_string()),
            min_year: Some(2020),
            ..Default::default()
        };
        let mut steps = Vec::new();
        let out = filter.apply_with(catalog(), |field, remaining| steps.push((field, remaining)));

        assert_eq!(ids(&out), vec![1]);
        assert_eq!(steps, vec![("minYear", 2), ("fuelType", 1)]);
    }

    #[test]
    fn deserializes_from_camel_case_query_shape() {
        let filter: CarFilter =
            serde_json::from_str(r#"{"minPrice": 1000, "fuelType": "Diesel"}"#).unwrap();
        assert_eq!(filter.min_price, Some(1000));
        assert_eq!(filter.fuel_type.as_deref(), Some("Diesel"));
        assert_eq!(filter.make, None);
    }

    #[test]
    fn blank_numeric_bounds_deserialize_as_absent() {
        let filter: CarFilter = serde_json::from_str(
            r#"{"make": "", "minPrice": "", "maxPrice": " ", "minYear": null}"#,
        )
        .unwrap();
        assert!(filter.is_empty());
        assert_eq!(filter.min_price, None);
        assert_eq!(filter.max_price, None);

        let filter: CarFilter =
            serde_json::from_str(r#"{"minPrice": "1000", "maxYear": "2020"}"#).unwrap();
        assert_eq!(filter.min_price, Some(1000));
        assert_eq!(filter.max_year, Some(2020));
    }

    #[test]
    fn malformed_numeric_bounds_are_rejected() {
        assert!(serde_json::from_str::<CarFilter>(r#"{"minPrice": "abc"}"#).is_err());
        assert!(serde_json::from_str::<CarFilter>(r#"{"minPrice": -5}"#).is_err());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        const MAKES: [&str; 4] = ["BMW", "Toyota", "Honda", "Tesla"];
        const FUELS: [&str; 3] = ["Gasoline", "Diesel", "Electric"];

        fn arb_catalog() -> impl Strategy<Value = Vec<Car>> {
            prop::collection::vec(
                (0usize..4, 1990i32..2026, 0u64..100_000, 0usize..3),
                0..30,
            )
            .prop_map(|rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (m, year, price, f))| {
                        car(
                            i as u64 + 1,
                            MAKES[m],
                            "Model",
                            year,
                            price,
                            FUELS[f],
                            "Automatic",
                            "FWD",
                        )
                    })
                    .collect()
            })
        }

        fn arb_filter() -> impl Strategy<Value = CarFilter> {
            (
                prop::option::of(prop::sample::select(vec!["bmw", "o", "TESLA"])),
                prop::option::of(0u64..100_000),
                prop::option::of(0u64..100_000),
                prop::option::of(1990i32..2026),
                prop::option::of(prop::sample::select(FUELS.to_vec())),
            )
                .prop_map(|(make, min_price, max_price, min_year, fuel)| CarFilter {
                    make: make.map(str::to_string),
                    min_price,
                    max_price,
                    min_year,
                    fuel_type: fuel.map(str::to_string),
                    ..Default::default()
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: an unset filter is the identity (same set, same order).
            #[test]
            fn empty_filter_is_identity(cars in arb_catalog()) {
                let mut expected = cars.clone();
                sort_newest_first(&mut expected);
                prop_assert_eq!(CarFilter::default().apply(cars), expected);
            }

            /// Property: adding a constraint never grows the result.
            #[test]
            fn adding_a_constraint_narrows(
                cars in arb_catalog(),
                filter in arb_filter(),
                max_year in 1990i32..2026,
            ) {
                let base = filter.apply(cars.clone()).len();
                let narrowed = CarFilter { max_year: Some(max_year), ..filter };
                prop_assert!(narrowed.apply(cars).len() <= base);
            }

            /// Property: every survivor lies within both price bounds.
            #[test]
            fn price_bounds_hold(
                cars in arb_catalog(),
                a in 0u64..100_000,
                b in 0u64..100_000,
            ) {
                let (min, max) = if a <= b { (a, b) } else { (b, a) };
                let filter = CarFilter {
                    min_price: Some(min),
                    max_price: Some(max),
                    ..Default::default()
                };
                for c in filter.apply(cars) {
                    prop_assert!(min <= c.price && c.price <= max);
                }
            }
        }
    }
}
