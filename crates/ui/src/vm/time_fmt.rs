use chrono::{DateTime, Utc};

#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    #[test]
    fn formats_short_date() {
        assert_eq!(format_date(fixed_now()), "Nov 14, 2023");
    }
}
