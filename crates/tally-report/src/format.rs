//! Number formatting for report pages and console summaries.

/// Group the digits of a non-negative integer string in threes.
fn group_digits(digits: &str) -> String {
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(ch);
  }
  out
}

/// `1234567` → `1,234,567`.
pub fn count(n: i64) -> String {
  let grouped = group_digits(&n.unsigned_abs().to_string());
  if n < 0 { format!("-{grouped}") } else { grouped }
}

/// `1234.5` → `$1,234.50`; negatives as `-$12.00`.
pub fn money(value: f64) -> String {
  let cents = format!("{:.2}", value.abs());
  let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
  let sign = if value < 0.0 && cents != "0.00" { "-" } else { "" };
  format!("{sign}${}.{frac}", group_digits(whole))
}

/// Money, or `n/a` when undefined.
pub fn money_or_na(value: Option<f64>) -> String {
  value.map(money).unwrap_or_else(|| "n/a".to_owned())
}

/// `12.345` → `12.3%`, or `n/a` when undefined.
pub fn percent(value: Option<f64>) -> String {
  value.map(|v| format!("{v:.1}%")).unwrap_or_else(|| "n/a".to_owned())
}
