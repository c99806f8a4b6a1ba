// Search-section logic: sample truncation, brand facets and the pure
// filter over the fetched listings.

use crate::models::{CarListing, SearchFilter};

/// Number of listings kept as the landing-page sample. Fixed product
/// decision, not pagination.
pub const SAMPLE_SIZE: usize = 8;

/// Brand facets shown in the "Our brands associated" section.
pub const BRANDS: [&str; 8] = [
    "Audi",
    "BMW",
    "Ferrari",
    "Ford",
    "Mercedes",
    "Porsche",
    "Tesla",
    "Toyota",
];

/// Keep the first `SAMPLE_SIZE` listings of the full inventory.
pub fn sample(mut cars: Vec<CarListing>) -> Vec<CarListing> {
    cars.truncate(SAMPLE_SIZE);
    cars
}

/// Does the listing match the free-text query? Case-insensitive substring
/// over brand, model and year.
fn matches_query(car: &CarListing, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    car.brand.to_lowercase().contains(&needle)
        || car.model.to_lowercase().contains(&needle)
        || car.year.to_string().contains(&needle)
}

/// Does the listing match the selected brand facet? Case-insensitive
/// equality; no facet selected matches everything.
fn matches_brand(car: &CarListing, brand: Option<&str>) -> bool {
    match brand {
        Some(b) if !b.is_empty() => car.brand.eq_ignore_ascii_case(b),
        _ => true,
    }
}

/// Derive the visible subset of the sample for the active filter.
///
/// Pure and synchronous; recomputed on every request, never cached. The
/// result is always a subset of `sample` in the original order.
pub fn filter_listings<'a>(sample: &'a [CarListing], filter: &SearchFilter) -> Vec<&'a CarListing> {
    sample
        .iter()
        .filter(|car| matches_brand(car, filter.brand.as_deref()))
        .filter(|car| matches_query(car, filter.q.as_deref().unwrap_or("")))
        .collect()
}
