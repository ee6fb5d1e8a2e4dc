//! Hotel catalog and content-based recommendation
//!
//! Booking records load wholesale from a flat CSV once per session and stay
//! read-only afterwards. Recommendation filters by city, aggregates records
//! to hotel level and ranks by absolute distance from the requested per-day
//! budget.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::DashboardError;

/// One booking record from the catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct HotelRecord {
    pub name: String,
    pub place: String,
    pub days: f64,
    pub price: f64,
    pub total: f64,
}

/// Per-hotel aggregate used for ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelProfile {
    pub name: String,
    pub place: String,
    pub days: f64,
    pub price: f64,
    pub total: f64,
    pub price_diff: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct PriceStats {
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

pub struct HotelCatalog {
    records: Vec<HotelRecord>,
}

impl HotelCatalog {
    pub fn from_csv_file(path: impl AsRef<Path>) -> Result<Self, DashboardError> {
        let mut reader = csv::Reader::from_path(path)?;

        let mut records = Vec::new();
        for result in reader.deserialize() {
            records.push(result?);
        }

        Ok(Self { records })
    }

    pub fn from_records(records: Vec<HotelRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted unique cities.
    pub fn cities(&self) -> Vec<String> {
        let mut cities: Vec<String> = self.records.iter().map(|r| r.place.clone()).collect();
        cities.sort();
        cities.dedup();
        cities
    }

    /// Min / max / median of the per-day price across all records.
    pub fn price_stats(&self) -> PriceStats {
        let mut prices: Vec<f64> = self.records.iter().map(|r| r.price).collect();
        if prices.is_empty() {
            return PriceStats {
                min: 0.0,
                max: 0.0,
                median: 0.0,
            };
        }

        prices.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let min = prices[0];
        let max = prices[prices.len() - 1];
        let median = if prices.len() % 2 == 1 {
            prices[prices.len() / 2]
        } else {
            (prices[prices.len() / 2 - 1] + prices[prices.len() / 2]) / 2.0
        };

        PriceStats { min, max, median }
    }

    /// Top `limit` hotels in `city`, ranked by how close their mean per-day
    /// price sits to `budget`.
    pub fn recommend(&self, city: &str, budget: f64, limit: usize) -> Vec<HotelProfile> {
        // Aggregate bookings to hotel level; the name-keyed map keeps group
        // order deterministic.
        let mut groups: BTreeMap<&str, Vec<&HotelRecord>> = BTreeMap::new();
        for record in self.records.iter().filter(|r| r.place == city) {
            groups.entry(&record.name).or_default().push(record);
        }

        let mut profiles: Vec<HotelProfile> = groups
            .into_iter()
            .map(|(name, records)| {
                let n = records.len() as f64;
                let price = records.iter().map(|r| r.price).sum::<f64>() / n;
                let days = records.iter().map(|r| r.days).sum::<f64>() / n;
                let total = records.iter().map(|r| r.total).sum::<f64>() / n;

                HotelProfile {
                    name: name.to_string(),
                    place: city.to_string(),
                    days,
                    price,
                    total,
                    price_diff: (price - budget).abs(),
                }
            })
            .collect();

        // Stable sort keeps the alphabetical group order on ties.
        profiles.sort_by(|a, b| {
            a.price_diff
                .partial_cmp(&b.price_diff)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        profiles.truncate(limit);

        profiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(name: &str, place: &str, days: f64, price: f64) -> HotelRecord {
        HotelRecord {
            name: name.to_string(),
            place: place.to_string(),
            days,
            price,
            total: days * price,
        }
    }

    fn catalog() -> HotelCatalog {
        HotelCatalog::from_records(vec![
            record("Hotel K", "Salvador (BH)", 2.0, 150.0),
            record("Hotel K", "Salvador (BH)", 4.0, 250.0),
            record("Hotel A", "Salvador (BH)", 1.0, 90.0),
            record("Hotel Z", "Salvador (BH)", 3.0, 310.0),
            record("Hotel A", "Natal (RN)", 2.0, 120.0),
        ])
    }

    #[test]
    fn recommend_aggregates_bookings_to_hotel_level() {
        let profiles = catalog().recommend("Salvador (BH)", 200.0, 5);

        let k = profiles.iter().find(|p| p.name == "Hotel K").unwrap();
        assert!((k.price - 200.0).abs() < 1e-9);
        assert!((k.days - 3.0).abs() < 1e-9);
        assert!((k.total - 650.0).abs() < 1e-9);
    }

    #[test]
    fn recommend_ranks_by_price_distance() {
        let profiles = catalog().recommend("Salvador (BH)", 200.0, 5);

        let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Hotel K", "Hotel A", "Hotel Z"]);
        assert!((profiles[0].price_diff - 0.0).abs() < 1e-9);
        assert!((profiles[1].price_diff - 110.0).abs() < 1e-9);
    }

    #[test]
    fn recommend_only_considers_the_requested_city() {
        let profiles = catalog().recommend("Natal (RN)", 100.0, 5);

        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "Hotel A");
        assert!((profiles[0].price - 120.0).abs() < 1e-9);
    }

    #[test]
    fn recommend_caps_at_limit() {
        let profiles = catalog().recommend("Salvador (BH)", 200.0, 2);
        assert_eq!(profiles.len(), 2);
    }

    #[test]
    fn unknown_city_yields_nothing() {
        assert!(catalog().recommend("Recife (PE)", 200.0, 5).is_empty());
    }

    #[test]
    fn equal_distances_keep_alphabetical_order() {
        let catalog = HotelCatalog::from_records(vec![
            record("Hotel B", "X", 1.0, 220.0),
            record("Hotel A", "X", 1.0, 180.0),
        ]);

        let profiles = catalog.recommend("X", 200.0, 5);
        let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Hotel A", "Hotel B"]);
    }

    #[test]
    fn cities_are_sorted_and_unique() {
        assert_eq!(
            catalog().cities(),
            vec!["Natal (RN)".to_string(), "Salvador (BH)".to_string()]
        );
    }

    #[test]
    fn price_stats_cover_the_whole_catalog() {
        let stats = catalog().price_stats();
        assert!((stats.min - 90.0).abs() < 1e-9);
        assert!((stats.max - 310.0).abs() < 1e-9);
        assert!((stats.median - 150.0).abs() < 1e-9);
    }

    #[test]
    fn price_stats_on_empty_catalog_are_zero() {
        let stats = HotelCatalog::from_records(vec![]).price_stats();
        assert_eq!(stats.median, 0.0);
    }

    #[test]
    fn from_csv_file_loads_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,place,days,price,total").unwrap();
        writeln!(file, "Hotel A,Natal (RN),2,120.0,240.0").unwrap();
        writeln!(file, "Hotel K,Salvador (BH),1,150.5,150.5").unwrap();

        let catalog = HotelCatalog::from_csv_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.cities().len(), 2);
    }

    #[test]
    fn malformed_csv_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,place,days,price,total").unwrap();
        writeln!(file, "Hotel A,Natal (RN),two,120.0,240.0").unwrap();

        assert!(HotelCatalog::from_csv_file(file.path()).is_err());
    }
}
