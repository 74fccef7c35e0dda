//! Low-stock alert policy.
//!
//! The policy only decides *whether* an alert is warranted and *what* it says.
//! Dispatching it is left to the caller.

use serde::{Deserialize, Serialize};

use stockledger_core::ProductId;

use crate::balance::Balances;

/// Threshold used when none is configured.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 2;

pub const ALERT_SUBJECT: &str = "Low Stock Alert";

/// Notification payload for products at or below the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub subject: String,
    pub body: String,
    pub threshold: i64,
    /// Qualifying products, ordered by product name.
    pub low_stock: Vec<(ProductId, i64)>,
}

/// Classifies a balance snapshot against a low-stock threshold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockPolicy {
    threshold: i64,
}

impl Default for LowStockPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_LOW_STOCK_THRESHOLD)
    }
}

impl LowStockPolicy {
    pub fn new(threshold: i64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    pub fn is_low(&self, balance: i64) -> bool {
        balance <= self.threshold
    }

    /// Evaluate a snapshot; `None` when every product is above the threshold.
    pub fn evaluate(&self, balances: &Balances) -> Option<AlertEvent> {
        let low_stock: Vec<(ProductId, i64)> = balances
            .iter()
            .filter(|(_, b)| self.is_low(*b))
            .map(|(p, b)| (p.clone(), b))
            .collect();

        if low_stock.is_empty() {
            return None;
        }

        tracing::debug!(
            threshold = self.threshold,
            products = low_stock.len(),
            "low stock detected"
        );

        Some(AlertEvent {
            subject: ALERT_SUBJECT.to_string(),
            body: render_body(self.threshold, &low_stock),
            threshold: self.threshold,
            low_stock,
        })
    }
}

fn render_body(threshold: i64, low_stock: &[(ProductId, i64)]) -> String {
    let mut body = format!(
        "The following products have a stock balance at or below {threshold} units:\n\n"
    );
    for (product, balance) in low_stock {
        body.push_str(&format!("{product}: {balance}\n"));
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn balances(entries: &[(&str, i64)]) -> Balances {
        entries
            .iter()
            .map(|(p, b)| (ProductId::new(p).unwrap(), *b))
            .collect()
    }

    #[test]
    fn only_products_at_or_below_threshold_are_listed() {
        let alert = LowStockPolicy::new(2)
            .evaluate(&balances(&[("P1", 2), ("P2", 10)]))
            .unwrap();
        assert_eq!(alert.subject, "Low Stock Alert");
        assert_eq!(alert.low_stock, vec![(ProductId::new("P1").unwrap(), 2)]);
        assert_eq!(
            alert.body,
            "The following products have a stock balance at or below 2 units:\n\nP1: 2\n"
        );
    }

    #[test]
    fn empty_snapshot_raises_nothing() {
        assert_eq!(LowStockPolicy::default().evaluate(&Balances::new()), None);
    }

    #[test]
    fn negative_balances_are_reported() {
        let alert = LowStockPolicy::new(0)
            .evaluate(&balances(&[("P1", -5)]))
            .unwrap();
        assert!(alert.body.contains("P1: -5"));
    }

    #[test]
    fn lines_are_sorted_by_product() {
        let alert = LowStockPolicy::new(5)
            .evaluate(&balances(&[("Sponge", 1), ("Duster", 0), ("Glaze", 3)]))
            .unwrap();
        let lines: Vec<_> = alert.body.lines().skip(2).collect();
        assert_eq!(lines, vec!["Duster: 0", "Glaze: 3", "Sponge: 1"]);
    }

    #[test]
    fn default_threshold_is_two() {
        assert_eq!(LowStockPolicy::default().threshold(), DEFAULT_LOW_STOCK_THRESHOLD);
        assert_eq!(DEFAULT_LOW_STOCK_THRESHOLD, 2);
    }

    proptest! {
        /// Property: a balance equal to the threshold is included, one above is not.
        #[test]
        fn threshold_boundary(threshold in -1_000i64..1_000i64) {
            let snapshot = balances(&[("AT", threshold), ("ABOVE", threshold + 1)]);
            let alert = LowStockPolicy::new(threshold).evaluate(&snapshot).unwrap();
            prop_assert_eq!(alert.low_stock, vec![(ProductId::new("AT").unwrap(), threshold)]);
        }

        /// Property: evaluating the same snapshot twice yields the same event.
        #[test]
        fn evaluation_is_idempotent(
            entries in prop::collection::btree_map("[A-Z][a-z]{1,8}", -10i64..10i64, 0..16),
            threshold in -5i64..5i64,
        ) {
            let snapshot: Balances = entries
                .into_iter()
                .map(|(p, b)| (ProductId::new(p).unwrap(), b))
                .collect();
            let policy = LowStockPolicy::new(threshold);
            prop_assert_eq!(policy.evaluate(&snapshot), policy.evaluate(&snapshot));
        }
    }
}
