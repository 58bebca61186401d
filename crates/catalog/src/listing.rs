//! Canonical listing order and the bounded listings built on it.

use core::cmp::Ordering;

use crate::car::Car;

pub const DEFAULT_FEATURED_LIMIT: usize = 3;
pub const DEFAULT_RECENT_LIMIT: usize = 4;
pub const DEFAULT_SIMILAR_LIMIT: usize = 3;

/// Newest first: `created_at` descending, ties broken by id descending.
pub fn newest_first(a: &Car, b: &Car) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

/// Sort in place into canonical order.
pub fn sort_newest_first(cars: &mut [Car]) {
    cars.sort_by(newest_first);
}

/// Featured cars in canonical order, truncated to `limit`.
pub fn featured(mut cars: Vec<Car>, limit: usize) -> Vec<Car> {
    cars.retain(|c| c.is_featured);
    recent(cars, limit)
}

/// All cars in canonical order, truncated to `limit`.
pub fn recent(mut cars: Vec<Car>, limit: usize) -> Vec<Car> {
    sort_newest_first(&mut cars);
    cars.truncate(limit);
    cars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{car, ts};

    fn ids(cars: &[Car]) -> Vec<u64> {
        cars.iter().map(|c| c.id.get()).collect()
    }

    #[test]
    fn sorts_by_created_at_descending() {
        let mut cars = vec![
            car(1, "BMW", "X1", 2020, 1, "Gasoline", "Automatic", "AWD"),
            car(3, "BMW", "X3", 2020, 1, "Gasoline", "Automatic", "AWD"),
            car(2, "BMW", "X2", 2020, 1, "Gasoline", "Automatic", "AWD"),
        ];
        sort_newest_first(&mut cars);
        assert_eq!(ids(&cars), vec![3, 2, 1]);
    }

    #[test]
    fn equal_timestamps_fall_back_to_id_descending() {
        let mut a = car(1, "A", "a", 2020, 1, "Gasoline", "Manual", "FWD");
        let mut b = car(2, "B", "b", 2020, 1, "Gasoline", "Manual", "FWD");
        a.created_at = ts(50);
        b.created_at = ts(50);

        let mut cars = vec![a, b];
        sort_newest_first(&mut cars);
        assert_eq!(ids(&cars), vec![2, 1]);
    }

    #[test]
    fn created_at_wins_over_id() {
        let mut older_high_id = car(9, "A", "a", 2020, 1, "Gasoline", "Manual", "FWD");
        older_high_id.created_at = ts(0);
        let newer_low_id = car(1, "B", "b", 2020, 1, "Gasoline", "Manual", "FWD");

        let mut cars = vec![older_high_id, newer_low_id];
        sort_newest_first(&mut cars);
        assert_eq!(ids(&cars), vec![1, 9]);
    }

    #[test]
    fn featured_filters_then_truncates() {
        let mut cars: Vec<Car> = (1..=6)
            .map(|i| car(i, "BMW", "X", 2020, 1, "Gasoline", "Automatic", "AWD"))
            .collect();
        for c in cars.iter_mut().filter(|c| c.id.get() % 2 == 0) {
            c.is_featured = true;
        }

        assert_eq!(ids(&featured(cars.clone(), DEFAULT_FEATURED_LIMIT)), vec![6, 4, 2]);
        assert_eq!(ids(&featured(cars, 2)), vec![6, 4]);
    }

    #[test]
    fn recent_truncates_without_filtering() {
        let cars: Vec<Car> = (1..=6)
            .map(|i| car(i, "BMW", "X", 2020, 1, "Gasoline", "Automatic", "AWD"))
            .collect();
        assert_eq!(ids(&recent(cars, DEFAULT_RECENT_LIMIT)), vec![6, 5, 4, 3]);
    }

    #[test]
    fn limit_larger_than_catalog_returns_everything() {
        let cars = vec![car(1, "BMW", "X", 2020, 1, "Gasoline", "Automatic", "AWD")];
        assert_eq!(recent(cars, 10).len(), 1);
    }
}
