use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use serde::Deserialize;
use tracing::info;

use crate::models::restaurant::Restaurant;
use crate::repositories::restaurant_repo::RestaurantRepo;

/// Tried in order until one decodes without error. Windows-1252 covers the
/// latin1/iso-8859-1/cp1252 variants the dataset ships in.
const ENCODINGS: [&Encoding; 2] = [UTF_8, WINDOWS_1252];

/// Load the Zomato CSV dataset into the store, upserting by restaurant ID.
/// Any error aborts the run; rows already upserted stay committed.
pub async fn load_csv(repo: &RestaurantRepo, csv_path: &Path) -> anyhow::Result<usize> {
    let bytes = std::fs::read(csv_path)
        .with_context(|| format!("Failed to read CSV file at: {}", csv_path.display()))?;
    let contents = decode_csv_bytes(&bytes)?;
    let restaurants = parse_records(&contents)?;

    for restaurant in &restaurants {
        repo.upsert_restaurant(restaurant).await?;
    }

    info!(
        "Upserted {} restaurants from {}",
        restaurants.len(),
        csv_path.display()
    );
    Ok(restaurants.len())
}

fn decode_csv_bytes(bytes: &[u8]) -> anyhow::Result<String> {
    for encoding in ENCODINGS {
        let (decoded, _, had_errors) = encoding.decode(bytes);
        if !had_errors {
            return Ok(decoded.into_owned());
        }
    }
    bail!("Could not read the CSV file with any of the attempted encodings");
}

fn parse_records(contents: &str) -> anyhow::Result<Vec<Restaurant>> {
    let mut reader = csv::Reader::from_reader(contents.as_bytes());
    let mut restaurants = Vec::new();

    for record in reader.deserialize::<CsvRecord>() {
        let record = record.context("Failed to parse CSV record")?;
        restaurants.push(record.into_restaurant()?);
    }

    Ok(restaurants)
}

/// Raw CSV row: everything but the key is kept as text so absent values can
/// fall back to an empty string before coercion.
#[derive(Deserialize, Debug)]
struct CsvRecord {
    #[serde(rename = "Restaurant ID")]
    restaurant_id: i64,
    #[serde(rename = "Restaurant Name", default)]
    restaurant_name: String,
    #[serde(rename = "Country Code", default)]
    country_code: String,
    #[serde(rename = "City", default)]
    city: String,
    #[serde(rename = "Address", default)]
    address: String,
    #[serde(rename = "Locality", default)]
    locality: String,
    #[serde(rename = "Locality Verbose", default)]
    locality_verbose: String,
    #[serde(rename = "Longitude", default)]
    longitude: String,
    #[serde(rename = "Latitude", default)]
    latitude: String,
    #[serde(rename = "Cuisines", default)]
    cuisines: String,
    #[serde(rename = "Average Cost for two", default)]
    average_cost_for_two: String,
    #[serde(rename = "Currency", default)]
    currency: String,
    #[serde(rename = "Has Table booking", default)]
    has_table_booking: String,
    #[serde(rename = "Has Online delivery", default)]
    has_online_delivery: String,
    #[serde(rename = "Is delivering now", default)]
    is_delivering_now: String,
    #[serde(rename = "Switch to order menu", default)]
    switch_to_order_menu: String,
    #[serde(rename = "Price range", default)]
    price_range: String,
    #[serde(rename = "Aggregate rating", default)]
    aggregate_rating: String,
    #[serde(rename = "Rating color", default)]
    rating_color: String,
    #[serde(rename = "Rating text", default)]
    rating_text: String,
    #[serde(rename = "Votes", default)]
    votes: String,
}

impl CsvRecord {
    fn into_restaurant(self) -> anyhow::Result<Restaurant> {
        Ok(Restaurant {
            id: self.restaurant_id,
            name: self.restaurant_name,
            country_code: parse_numeric("Country Code", &self.country_code)?,
            city: self.city,
            address: self.address,
            locality: self.locality,
            locality_verbose: self.locality_verbose,
            longitude: parse_numeric("Longitude", &self.longitude)?,
            latitude: parse_numeric("Latitude", &self.latitude)?,
            cuisines: self.cuisines,
            average_cost_for_two: parse_numeric("Average Cost for two", &self.average_cost_for_two)?,
            currency: self.currency,
            has_table_booking: parse_flag(&self.has_table_booking),
            has_online_delivery: parse_flag(&self.has_online_delivery),
            is_delivering_now: parse_flag(&self.is_delivering_now),
            switch_to_order_menu: parse_flag(&self.switch_to_order_menu),
            price_range: parse_numeric("Price range", &self.price_range)?,
            aggregate_rating: parse_numeric("Aggregate rating", &self.aggregate_rating)?,
            rating_color: self.rating_color,
            rating_text: self.rating_text,
            votes: parse_numeric("Votes", &self.votes)?,
        })
    }
}

/// "Yes" is true, anything else (including empty) is false.
fn parse_flag(value: &str) -> bool {
    value == "Yes"
}

/// Empty cells become the type's zero value; non-empty garbage aborts the run.
fn parse_numeric<T>(column: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr + Default,
    T::Err: std::fmt::Display,
{
    let value = value.trim();
    if value.is_empty() {
        return Ok(T::default());
    }
    value
        .parse()
        .map_err(|e| anyhow!("Invalid value '{}' in column {}: {}", value, column, e))
}
