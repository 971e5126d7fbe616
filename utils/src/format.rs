//! Display formatting for amounts.

use nelo_types::{Amount, CurrencyCode};

/// Format minor units as a major-unit string, e.g. `12345` EUR → `"123.45 EUR"`.
///
/// Assumes two decimal places, which holds for every currency the wallet
/// currently provisions.
pub fn format_minor(amount: Amount, currency: CurrencyCode) -> String {
    let minor = amount.minor();
    format!("{}.{:02} {}", minor / 100, minor % 100, currency)
}
