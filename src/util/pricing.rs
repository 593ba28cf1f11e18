/// Regional adjustment applied to catalog base prices.
pub fn state_multiplier(state_slug: &str) -> f64 {
    match state_slug {
        "california" => 1.15,
        "new-york" => 1.20,
        "texas" => 0.95,
        _ => 1.0,
    }
}

/// Base price scaled for the state, rounded to whole dollars.
pub fn local_price(base_price: f64, state_slug: &str) -> i64 {
    (base_price * state_multiplier(state_slug)).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_price() {
        assert_eq!(local_price(399.0, "california"), 459);
        assert_eq!(local_price(299.0, "new-york"), 359);
        assert_eq!(local_price(499.0, "texas"), 474);
        assert_eq!(local_price(599.0, "ohio"), 599);
    }
}
