use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Build a `wa.me` deep link carrying a booking summary, so the admin can
/// pick up the lead in WhatsApp. The text is percent-encoded.
pub fn booking_link(
    number: &str,
    car_name: &str,
    customer_name: &str,
    pickup_date: NaiveDate,
    return_date: NaiveDate,
    total_price: Decimal,
) -> String {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    let text = format!(
        "New booking request\nCar: {}\nCustomer: {}\nPickup: {}\nReturn: {}\nTotal: {}",
        car_name, customer_name, pickup_date, return_date, total_price
    );
    format!("https://wa.me/{}?text={}", digits, percent_encode(&text))
}

fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn strips_non_digits_from_number() {
        let link = booking_link(
            "+971 50 123 4567",
            "BMW X5",
            "Alex",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            Decimal::new(3000, 0),
        );
        assert!(link.starts_with("https://wa.me/971501234567?text="));
    }

    #[test]
    fn encodes_spaces_and_newlines() {
        let link = booking_link(
            "123",
            "BMW X5",
            "Alex",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            Decimal::new(3000, 0),
        );
        assert!(link.contains("BMW%20X5"));
        assert!(link.contains("%0A"));
        assert!(!link.contains(' '));
    }
}
