use async_trait::async_trait;
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub zip_code: String,
    pub available: bool,
    pub units: u32,
    pub earliest_delivery: String,
}

#[async_trait]
pub trait AvailabilityChecker: Send + Sync {
    async fn check(&self, zip_code: &str) -> Availability;
}

/// Stand-in for an inventory lookup. Answers at random and never
/// consults real stock.
#[derive(Debug, Default, Clone)]
pub struct SimulatedAvailability;

#[async_trait]
impl AvailabilityChecker for SimulatedAvailability {
    async fn check(&self, zip_code: &str) -> Availability {
        let mut rng = rand::thread_rng();
        let available = rng.gen::<f64>() > 0.1;
        let units = rng.gen_range(3..=10);
        Availability {
            zip_code: zip_code.to_string(),
            available,
            units,
            earliest_delivery: if available { "Today" } else { "Tomorrow" }.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_bounds() {
        let checker = SimulatedAvailability;
        for _ in 0..50 {
            let a = checker.check("90001").await;
            assert!((3..=10).contains(&a.units));
            assert_eq!(a.earliest_delivery == "Today", a.available);
        }
    }
}
