use anyhow::Context;
use sqlx::SqlitePool;

use crate::models::restaurant::Restaurant;

pub struct RestaurantRepo {
    pool: SqlitePool,
}

impl RestaurantRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert-or-update keyed by the restaurant ID. Reloading the dataset
    /// replaces fields for existing IDs and never duplicates rows.
    pub async fn upsert_restaurant(&self, restaurant: &Restaurant) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO restaurants (\
                 id, name, country_code, city, address, locality, locality_verbose, \
                 longitude, latitude, cuisines, average_cost_for_two, currency, \
                 has_table_booking, has_online_delivery, is_delivering_now, \
                 switch_to_order_menu, price_range, aggregate_rating, rating_color, \
                 rating_text, votes) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET \
                 name = excluded.name, \
                 country_code = excluded.country_code, \
                 city = excluded.city, \
                 address = excluded.address, \
                 locality = excluded.locality, \
                 locality_verbose = excluded.locality_verbose, \
                 longitude = excluded.longitude, \
                 latitude = excluded.latitude, \
                 cuisines = excluded.cuisines, \
                 average_cost_for_two = excluded.average_cost_for_two, \
                 currency = excluded.currency, \
                 has_table_booking = excluded.has_table_booking, \
                 has_online_delivery = excluded.has_online_delivery, \
                 is_delivering_now = excluded.is_delivering_now, \
                 switch_to_order_menu = excluded.switch_to_order_menu, \
                 price_range = excluded.price_range, \
                 aggregate_rating = excluded.aggregate_rating, \
                 rating_color = excluded.rating_color, \
                 rating_text = excluded.rating_text, \
                 votes = excluded.votes;",
        )
        .bind(restaurant.id)
        .bind(&restaurant.name)
        .bind(restaurant.country_code)
        .bind(&restaurant.city)
        .bind(&restaurant.address)
        .bind(&restaurant.locality)
        .bind(&restaurant.locality_verbose)
        .bind(restaurant.longitude)
        .bind(restaurant.latitude)
        .bind(&restaurant.cuisines)
        .bind(restaurant.average_cost_for_two)
        .bind(&restaurant.currency)
        .bind(restaurant.has_table_booking)
        .bind(restaurant.has_online_delivery)
        .bind(restaurant.is_delivering_now)
        .bind(restaurant.switch_to_order_menu)
        .bind(restaurant.price_range)
        .bind(restaurant.aggregate_rating)
        .bind(&restaurant.rating_color)
        .bind(&restaurant.rating_text)
        .bind(restaurant.votes)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to upsert restaurant with id: {}", restaurant.id))?;

        Ok(())
    }

    pub async fn list_restaurants(&self) -> anyhow::Result<Vec<Restaurant>> {
        let restaurants = sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants;")
            .fetch_all(&self.pool)
            .await
            .context("Failed to retrieve restaurants")?;

        Ok(restaurants)
    }

    pub async fn find_restaurant(&self, id: i64) -> anyhow::Result<Option<Restaurant>> {
        let restaurant =
            sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE id = ? LIMIT 1;")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Failed to retrieve restaurant with id: {}", id))?;

        Ok(restaurant)
    }

    /// Case-insensitive containment match on the free-text cuisines column.
    pub async fn search_by_cuisine(&self, cuisine: &str) -> anyhow::Result<Vec<Restaurant>> {
        let pattern = format!("%{}%", cuisine);
        let restaurants =
            sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE cuisines LIKE ?;")
                .bind(pattern)
                .fetch_all(&self.pool)
                .await
                .with_context(|| format!("Failed to search restaurants by cuisine: {}", cuisine))?;

        Ok(restaurants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_repo() -> RestaurantRepo {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        RestaurantRepo::new(pool)
    }

    fn sample_restaurant(id: i64) -> Restaurant {
        Restaurant {
            id,
            name: format!("Restaurant {}", id),
            country_code: 1,
            city: "New Delhi".to_string(),
            address: "1 Main Street".to_string(),
            locality: "Connaught Place".to_string(),
            locality_verbose: "Connaught Place, New Delhi".to_string(),
            longitude: 77.2090,
            latitude: 28.6139,
            cuisines: "North Indian, Pizza".to_string(),
            average_cost_for_two: 800,
            currency: "Indian Rupees(Rs.)".to_string(),
            has_table_booking: true,
            has_online_delivery: false,
            is_delivering_now: false,
            switch_to_order_menu: false,
            price_range: 3,
            aggregate_rating: 4.2,
            rating_color: "Green".to_string(),
            rating_text: "Very Good".to_string(),
            votes: 1203,
        }
    }

    #[tokio::test]
    async fn upsert_is_idempotent_on_id() {
        let repo = test_repo().await;
        let mut restaurant = sample_restaurant(1);

        repo.upsert_restaurant(&restaurant).await.unwrap();
        restaurant.name = "Renamed".to_string();
        repo.upsert_restaurant(&restaurant).await.unwrap();

        let all = repo.list_restaurants().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Renamed");
    }

    #[tokio::test]
    async fn find_restaurant_misses_unknown_id() {
        let repo = test_repo().await;
        repo.upsert_restaurant(&sample_restaurant(1)).await.unwrap();

        assert!(repo.find_restaurant(1).await.unwrap().is_some());
        assert!(repo.find_restaurant(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn cuisine_search_is_case_insensitive() {
        let repo = test_repo().await;
        repo.upsert_restaurant(&sample_restaurant(1)).await.unwrap();

        let mut other = sample_restaurant(2);
        other.cuisines = "Cafe, Desserts".to_string();
        repo.upsert_restaurant(&other).await.unwrap();

        let found = repo.search_by_cuisine("pizza").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }
}
