use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the Zomato dataset. Written only by the CSV loader,
/// never mutated by API requests.
#[derive(Clone, Serialize, Deserialize, Debug, FromRow, PartialEq)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub country_code: i64,
    pub city: String,
    pub address: String,
    pub locality: String,
    pub locality_verbose: String,
    pub longitude: f64,
    pub latitude: f64,
    pub cuisines: String,
    pub average_cost_for_two: i64,
    pub currency: String,
    pub has_table_booking: bool,
    pub has_online_delivery: bool,
    pub is_delivering_now: bool,
    pub switch_to_order_menu: bool,
    pub price_range: i64,
    pub aggregate_rating: f64,
    pub rating_color: String,
    pub rating_text: String,
    pub votes: i64,
}
