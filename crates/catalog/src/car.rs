use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carmarket_core::{CarId, DomainError, DomainResult, Entity};

/// Earliest model year accepted by validation.
pub const MIN_YEAR: i32 = 1900;

/// A car listing.
///
/// `id` and `created_at` are assigned by the repository and never change
/// afterwards; everything else can be patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: CarId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: u64,
    pub mileage: u64,
    pub fuel_type: String,
    pub transmission: String,
    pub drivetrain: String,
    pub exterior_color: String,
    pub interior_color: String,
    pub vin: Option<String>,
    pub engine_details: Option<String>,
    pub mpg: Option<String>,
    pub description: Option<String>,
    pub seller_name: String,
    pub seller_phone: String,
    pub seller_since: Option<String>,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

impl Entity for Car {
    type Id = CarId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Car {
    /// Shallow-merge the present patch fields over this record.
    ///
    /// `id` and `created_at` are not part of [`CarPatch`] and are never touched.
    pub fn apply_patch(&mut self, patch: CarPatch) {
        let CarPatch {
            make,
            model,
            year,
            price,
            mileage,
            fuel_type,
            transmission,
            drivetrain,
            exterior_color,
            interior_color,
            vin,
            engine_details,
            mpg,
            description,
            seller_name,
            seller_phone,
            seller_since,
            images,
            features,
            is_featured,
        } = patch;

        if let Some(v) = make {
            self.make = v;
        }
        if let Some(v) = model {
            self.model = v;
        }
        if let Some(v) = year {
            self.year = v;
        }
        if let Some(v) = price {
            self.price = v;
        }
        if let Some(v) = mileage {
            self.mileage = v;
        }
        if let Some(v) = fuel_type {
            self.fuel_type = v;
        }
        if let Some(v) = transmission {
            self.transmission = v;
        }
        if let Some(v) = drivetrain {
            self.drivetrain = v;
        }
        if let Some(v) = exterior_color {
            self.exterior_color = v;
        }
        if let Some(v) = interior_color {
            self.interior_color = v;
        }
        if vin.is_some() {
            self.vin = vin;
        }
        if engine_details.is_some() {
            self.engine_details = engine_details;
        }
        if mpg.is_some() {
            self.mpg = mpg;
        }
        if description.is_some() {
            self.description = description;
        }
        if let Some(v) = seller_name {
            self.seller_name = v;
        }
        if let Some(v) = seller_phone {
            self.seller_phone = v;
        }
        if seller_since.is_some() {
            self.seller_since = seller_since;
        }
        if let Some(v) = images {
            self.images = v;
        }
        if let Some(v) = features {
            self.features = v;
        }
        if let Some(v) = is_featured {
            self.is_featured = v;
        }
    }
}

/// Payload for creating a car listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarInput {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: u64,
    pub mileage: u64,
    pub fuel_type: String,
    pub transmission: String,
    pub drivetrain: String,
    pub exterior_color: String,
    pub interior_color: String,
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(default)]
    pub engine_details: Option<String>,
    #[serde(default)]
    pub mpg: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub seller_name: String,
    pub seller_phone: String,
    #[serde(default)]
    pub seller_since: Option<String>,
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
}

impl CarInput {
    /// Validation boundary for creation.
    ///
    /// The repository itself accepts any input; callers run this first.
    pub fn validate(&self, current_year: i32) -> DomainResult<()> {
        require_text("make", &self.make)?;
        require_text("model", &self.model)?;
        require_year(self.year, current_year)?;
        require_text("fuelType", &self.fuel_type)?;
        require_text("transmission", &self.transmission)?;
        require_text("drivetrain", &self.drivetrain)?;
        require_text("exteriorColor", &self.exterior_color)?;
        require_text("interiorColor", &self.interior_color)?;
        require_text("sellerName", &self.seller_name)?;
        require_text("sellerPhone", &self.seller_phone)?;
        require_images(&self.images)
    }

    /// Materialise a stored record from this input.
    pub fn into_car(self, id: CarId, created_at: DateTime<Utc>) -> Car {
        Car {
            id,
            make: self.make,
            model: self.model,
            year: self.year,
            price: self.price,
            mileage: self.mileage,
            fuel_type: self.fuel_type,
            transmission: self.transmission,
            drivetrain: self.drivetrain,
            exterior_color: self.exterior_color,
            interior_color: self.interior_color,
            vin: self.vin,
            engine_details: self.engine_details,
            mpg: self.mpg,
            description: self.description,
            seller_name: self.seller_name,
            seller_phone: self.seller_phone,
            seller_since: self.seller_since,
            images: self.images,
            features: self.features,
            is_featured: self.is_featured,
            created_at,
        }
    }
}

/// Partial update: every field optional, absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarPatch {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price: Option<u64>,
    pub mileage: Option<u64>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub drivetrain: Option<String>,
    pub exterior_color: Option<String>,
    pub interior_color: Option<String>,
    pub vin: Option<String>,
    pub engine_details: Option<String>,
    pub mpg: Option<String>,
    pub description: Option<String>,
    pub seller_name: Option<String>,
    pub seller_phone: Option<String>,
    pub seller_since: Option<String>,
    pub images: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub is_featured: Option<bool>,
}

impl CarPatch {
    /// Same rules as [`CarInput::validate`], applied only to present fields.
    pub fn validate(&self, current_year: i32) -> DomainResult<()> {
        let required = [
            ("make", &self.make),
            ("model", &self.model),
            ("fuelType", &self.fuel_type),
            ("transmission", &self.transmission),
            ("drivetrain", &self.drivetrain),
            ("exteriorColor", &self.exterior_color),
            ("interiorColor", &self.interior_color),
            ("sellerName", &self.seller_name),
            ("sellerPhone", &self.seller_phone),
        ];
        for (field, value) in required {
            if let Some(value) = value {
                require_text(field, value)?;
            }
        }
        if let Some(year) = self.year {
            require_year(year, current_year)?;
        }
        if let Some(images) = &self.images {
            require_images(images)?;
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_year(year: i32, current_year: i32) -> DomainResult<()> {
    let max = current_year + 1;
    if !(MIN_YEAR..=max).contains(&year) {
        return Err(DomainError::validation(format!(
            "year must be between {MIN_YEAR} and {max} (got {year})"
        )));
    }
    Ok(())
}

fn require_images(images: &[String]) -> DomainResult<()> {
    if images.is_empty() {
        return Err(DomainError::validation("at least one image is required"));
    }
    if images.iter().any(|url| url.trim().is_empty()) {
        return Err(DomainError::validation("image URLs cannot be empty"));
    }
    Ok(())
}
