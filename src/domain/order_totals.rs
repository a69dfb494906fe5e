use crate::utils::round_to;

/// One priced line of an order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedLine {
    pub unit_price: f64,
    pub quantity: i32
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub total: f64
}

impl OrderTotals {
    // total = subtotal + tax + service_charge - discount, in cents and never negative
    pub fn compute(lines: &[PricedLine], tax: f64, service_charge: f64, discount: f64) -> Self {
        let subtotal: f64 = lines
            .iter()
            .map(|line| line.unit_price * line.quantity as f64)
            .sum();
        let subtotal = round_to(subtotal, 2);
        let total = round_to(subtotal + tax + service_charge - discount, 2).max(0.0);

        OrderTotals { subtotal, total }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::{OrderTotals, PricedLine};

    #[test]
    fn two_single_items_sum_to_fifteen() {
        let lines = [
            PricedLine { unit_price: 10.0, quantity: 1 },
            PricedLine { unit_price: 5.0, quantity: 1 },
        ];
        let totals = OrderTotals::compute(&lines, 0.0, 0.0, 0.0);

        assert_eq!(totals.subtotal, 15.0);
        assert_eq!(totals.total, 15.0);
    }

    #[test]
    fn charges_and_discount_are_applied() {
        let lines = [PricedLine { unit_price: 12.5, quantity: 2 }];
        let totals = OrderTotals::compute(&lines, 2.25, 1.0, 3.0);

        assert_eq!(totals.subtotal, 25.0);
        assert_eq!(totals.total, 25.25);
    }

    #[test]
    fn discount_larger_than_order_gives_zero_total() {
        let lines = [PricedLine { unit_price: 4.0, quantity: 1 }];
        assert_eq!(OrderTotals::compute(&lines, 0.0, 0.0, 10.0).total, 0.0);
    }

    #[test]
    fn empty_order_has_zero_subtotal() {
        assert_eq!(OrderTotals::compute(&[], 1.5, 0.0, 0.0), OrderTotals { subtotal: 0.0, total: 1.5 });
    }

    #[quickcheck]
    fn recomputation_is_idempotent(prices: Vec<(u16, u8)>, tax: u8, discount: u8) -> bool {
        let lines: Vec<PricedLine> = prices
            .iter()
            .map(|(cents, qty)| PricedLine { unit_price: *cents as f64 / 100.0, quantity: *qty as i32 })
            .collect();

        let first = OrderTotals::compute(&lines, tax as f64, 0.0, discount as f64);
        let second = OrderTotals::compute(&lines, tax as f64, 0.0, discount as f64);
        first == second && first.total >= 0.0
    }
}
