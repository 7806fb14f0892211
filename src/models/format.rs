//! Display formatting for listing cards

/// Group digits in threes: 4500000 -> "4,500,000"
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Cards show whole dirhams
pub fn format_price(price: f64) -> String {
    format!("AED {}", group_thousands(price.round() as u64))
}

pub fn format_area(size: f64) -> String {
    format!("{} sq ft", group_thousands(size.round() as u64))
}
