//! Rupiah display strings.

#[cfg(test)]
#[path = "money_test.rs"]
mod money_test;

/// Format whole rupiah the way `id-ID` currency formatting does:
/// `Rp 65.000`, with a non-breaking space and `.` grouping.
#[must_use]
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}Rp\u{a0}{grouped}")
}
