use crate::utils::round_to;

/// Percentage change as a signed one-decimal string, "0%" when there is no baseline
pub fn change(current: f64, previous: f64) -> String {
    if previous <= 0.0 {
        return "0%".to_string();
    }

    let pct = (current - previous) / previous * 100.0;
    if pct == 0.0 {
        "0%".to_string()
    } else {
        format!("{:+.1}%", pct)
    }
}

pub fn change_value(current: f64, previous: f64) -> f64 {
    if previous <= 0.0 {
        return 0.0;
    }

    round_to((current - previous) / previous * 100.0, 1)
}

#[cfg(test)]
mod tests {
    use super::{change, change_value};

    #[test]
    fn no_baseline_is_zero_percent() {
        assert_eq!(change(0.0, 0.0), "0%");
        assert_eq!(change(25.0, 0.0), "0%");
        assert_eq!(change_value(25.0, 0.0), 0.0);
    }

    #[test]
    fn increase_is_signed() {
        assert_eq!(change(110.0, 100.0), "+10.0%");
        assert_eq!(change_value(110.0, 100.0), 10.0);
    }

    #[test]
    fn decrease_is_signed() {
        assert_eq!(change(90.0, 100.0), "-10.0%");
        assert_eq!(change_value(90.0, 100.0), -10.0);
    }

    #[test]
    fn unchanged_value_has_no_sign() {
        assert_eq!(change(42.0, 42.0), "0%");
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(change(1.0, 3.0), "-66.7%");
    }
}
