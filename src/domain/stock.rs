use chrono::NaiveDate;

text_enum!(
    /// Derived from stock levels and expiry, never written directly by clients
    StockStatus, "stock status" {
        InStock => "in-stock",
        LowStock => "low-stock",
        OutOfStock => "out-of-stock",
        Expired => "expired",
    }
);

impl StockStatus {
    pub fn derive(
        current_stock: f64,
        min_stock: f64,
        expiry_date: Option<NaiveDate>,
        today: NaiveDate
    ) -> Self {
        if current_stock <= 0.0 {
            StockStatus::OutOfStock
        } else if expiry_date.is_some_and(|expiry| expiry <= today) {
            StockStatus::Expired
        } else if current_stock <= min_stock {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

text_enum!(StockAction, "stock action" {
    Add => "add",
    Subtract => "subtract",
});

impl StockAction {
    // Subtracting never takes stock below zero
    pub fn apply(&self, current_stock: f64, quantity: f64) -> f64 {
        match self {
            StockAction::Add => current_stock + quantity,
            StockAction::Subtract => (current_stock - quantity).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use quickcheck_macros::quickcheck;

    use super::{StockAction, StockStatus};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    }

    #[test]
    fn empty_stock_is_out_of_stock_even_when_expired() {
        let yesterday = today().pred_opt();
        assert_eq!(StockStatus::derive(0.0, 5.0, yesterday, today()), StockStatus::OutOfStock);
        assert_eq!(StockStatus::derive(-1.0, 5.0, None, today()), StockStatus::OutOfStock);
    }

    #[test]
    fn stock_at_minimum_is_low() {
        assert_eq!(StockStatus::derive(5.0, 5.0, None, today()), StockStatus::LowStock);
        assert_eq!(StockStatus::derive(4.5, 5.0, None, today()), StockStatus::LowStock);
    }

    #[test]
    fn stock_above_minimum_is_in_stock() {
        assert_eq!(StockStatus::derive(5.5, 5.0, None, today()), StockStatus::InStock);
    }

    #[test]
    fn expiry_today_marks_item_expired() {
        assert_eq!(StockStatus::derive(50.0, 5.0, Some(today()), today()), StockStatus::Expired);
        assert_eq!(StockStatus::derive(50.0, 5.0, today().succ_opt(), today()), StockStatus::InStock);
    }

    #[test]
    fn subtract_floors_at_zero() {
        assert_eq!(StockAction::Subtract.apply(3.0, 10.0), 0.0);
        assert_eq!(StockAction::Subtract.apply(10.0, 3.0), 7.0);
        assert_eq!(StockAction::Add.apply(10.0, 3.0), 13.0);
    }

    #[quickcheck]
    fn subtract_never_goes_negative(current: u16, quantity: u16) -> bool {
        StockAction::Subtract.apply(current as f64, quantity as f64) >= 0.0
    }
}
