//! Shared builders for unit tests.

use chrono::{DateTime, TimeZone, Utc};

use carmarket_core::CarId;

use crate::car::{Car, CarInput};

/// Deterministic timestamp `secs` seconds after a fixed epoch.
pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub fn sample_input() -> CarInput {
    CarInput {
        make: "BMW".to_string(),
        model: "3 Series".to_string(),
        year: 2021,
        price: 40_000,
        mileage: 15_000,
        fuel_type: "Gasoline".to_string(),
        transmission: "Automatic".to_string(),
        drivetrain: "RWD".to_string(),
        exterior_color: "Black".to_string(),
        interior_color: "Tan".to_string(),
        vin: None,
        engine_details: None,
        mpg: None,
        description: None,
        seller_name: "Dana".to_string(),
        seller_phone: "+15550100".to_string(),
        seller_since: None,
        images: vec!["https://img.example/1.jpg".to_string()],
        features: vec![],
        is_featured: false,
    }
}

/// Car with the attributes the ranker and filters look at; `created_at`
/// follows the id so higher ids are newer.
#[allow(clippy::too_many_arguments)]
pub fn car(
    id: u64,
    make: &str,
    model: &str,
    year: i32,
    price: u64,
    fuel_type: &str,
    transmission: &str,
    drivetrain: &str,
) -> Car {
    let mut input = sample_input();
    input.make = make.to_string();
    input.model = model.to_string();
    input.year = year;
    input.price = price;
    input.fuel_type = fuel_type.to_string();
    input.transmission = transmission.to_string();
    input.drivetrain = drivetrain.to_string();
    input.into_car(CarId::new(id), ts(id as i64))
}
