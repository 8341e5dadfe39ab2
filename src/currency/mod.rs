//! Display-only currency labels.
//!
//! A label such as `"USD - $"` is stored on every transaction as written at
//! creation time. Nothing here converts between currencies.

/// Labels offered for selection, in display order.
pub const SUPPORTED_CURRENCIES: [&str; 20] = [
    "USD - $",
    "EUR - €",
    "GBP - £",
    "JPY - ¥",
    "CNY - ¥",
    "RUB - ₽",
    "AUD - $",
    "CAD - $",
    "CHF - Fr",
    "HKD - $",
    "SGD - $",
    "SEK - kr",
    "KRW - ₩",
    "TRY - ₺",
    "INR - ₹",
    "BRL - R$",
    "ZAR - R",
    "AED - د.إ",
    "THB - ฿",
    "MXN - $",
];

pub const DEFAULT_CURRENCY: &str = SUPPORTED_CURRENCIES[0];

const SEPARATOR: &str = " - ";

/// Symbol part of a label (`"EUR - €"` → `"€"`). Labels without a
/// separator are returned whole.
pub fn symbol(label: &str) -> &str {
    label
        .split_once(SEPARATOR)
        .map(|(_, symbol)| symbol.trim())
        .filter(|symbol| !symbol.is_empty())
        .unwrap_or(label)
}

/// Code part of a label (`"EUR - €"` → `"EUR"`).
pub fn code(label: &str) -> &str {
    label
        .split_once(SEPARATOR)
        .map(|(code, _)| code.trim())
        .unwrap_or(label)
}

pub fn is_supported(label: &str) -> bool {
    SUPPORTED_CURRENCIES.contains(&label)
}

/// Looks up a supported label by full label or by code, ignoring case.
pub fn find(query: &str) -> Option<&'static str> {
    let query = query.trim();
    SUPPORTED_CURRENCIES.iter().copied().find(|label| {
        label.eq_ignore_ascii_case(query) || code(label).eq_ignore_ascii_case(query)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_and_code_split_the_label() {
        assert_eq!(symbol("EUR - €"), "€");
        assert_eq!(code("EUR - €"), "EUR");
        assert_eq!(symbol("BRL - R$"), "R$");
    }

    #[test]
    fn labels_without_separator_fall_back_to_whole_label() {
        assert_eq!(symbol("Points"), "Points");
        assert_eq!(code("Points"), "Points");
    }

    #[test]
    fn find_matches_codes_case_insensitively() {
        assert_eq!(find("sek"), Some("SEK - kr"));
        assert_eq!(find("USD - $"), Some("USD - $"));
        assert_eq!(find("XYZ"), None);
    }

    #[test]
    fn default_is_supported() {
        assert!(is_supported(DEFAULT_CURRENCY));
        assert_eq!(SUPPORTED_CURRENCIES.len(), 20);
    }
}
