//! Destination-based currency defaults for rate quotes.

/// Fallback currency when neither the caller nor the country table decides.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Destination country -> default settlement currency.
const COUNTRY_CURRENCIES: &[(&str, &str)] = &[
    // Americas
    ("US", "USD"),
    ("CA", "CAD"),
    ("MX", "MXN"),
    ("BR", "BRL"),
    ("AR", "ARS"),
    ("CL", "CLP"),
    // Europe
    ("GB", "GBP"),
    ("IE", "EUR"),
    ("FR", "EUR"),
    ("DE", "EUR"),
    ("IT", "EUR"),
    ("ES", "EUR"),
    ("PT", "EUR"),
    ("NL", "EUR"),
    ("BE", "EUR"),
    ("AT", "EUR"),
    ("FI", "EUR"),
    ("GR", "EUR"),
    ("CH", "CHF"),
    ("SE", "SEK"),
    ("NO", "NOK"),
    ("DK", "DKK"),
    ("PL", "PLN"),
    ("CZ", "CZK"),
    ("HU", "HUF"),
    // Asia-Pacific
    ("JP", "JPY"),
    ("CN", "CNY"),
    ("HK", "HKD"),
    ("TW", "TWD"),
    ("KR", "KRW"),
    ("SG", "SGD"),
    ("MY", "MYR"),
    ("TH", "THB"),
    ("VN", "VND"),
    ("ID", "IDR"),
    ("PH", "PHP"),
    ("IN", "INR"),
    ("AU", "AUD"),
    ("NZ", "NZD"),
    // Middle East & Africa
    ("AE", "AED"),
    ("SA", "SAR"),
    ("IL", "ILS"),
    ("ZA", "ZAR"),
];

/// Picks the currency a quote should be expressed in.
///
/// A caller-supplied preference wins untouched apart from trimming and
/// uppercasing; whether the carrier actually supports that currency on the
/// route is the carrier's decision and surfaces later as a rejected quote.
/// Without a preference, the destination country picks from the table,
/// falling back to [`DEFAULT_CURRENCY`] for unlisted countries.
#[must_use]
pub fn resolve(preferred: Option<&str>, destination_country: &str) -> String {
    if let Some(preferred) = preferred {
        let preferred = preferred.trim();
        if !preferred.is_empty() {
            return preferred.to_ascii_uppercase();
        }
    }

    let destination = destination_country.trim().to_ascii_uppercase();
    COUNTRY_CURRENCIES
        .iter()
        .find(|(country, _)| *country == destination)
        .map_or(DEFAULT_CURRENCY, |&(_, currency)| currency)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_country_picks_from_the_table() {
        assert_eq!(resolve(None, "DE"), "EUR");
        assert_eq!(resolve(None, "JP"), "JPY");
        assert_eq!(resolve(None, "TH"), "THB");
        assert_eq!(resolve(None, "GB"), "GBP");
    }

    #[test]
    fn explicit_preference_wins_over_the_destination() {
        assert_eq!(resolve(Some("gbp"), "US"), "GBP");
        assert_eq!(resolve(Some(" eur "), "JP"), "EUR");
    }

    #[test]
    fn unknown_countries_fall_back_to_usd() {
        assert_eq!(resolve(None, "ZZ"), "USD");
        assert_eq!(resolve(None, ""), "USD");
    }

    #[test]
    fn blank_preference_falls_through_to_the_table() {
        assert_eq!(resolve(Some(""), "DE"), "EUR");
        assert_eq!(resolve(Some("   "), "DE"), "EUR");
    }

    #[test]
    fn lowercase_country_codes_still_match() {
        assert_eq!(resolve(None, "th"), "THB");
        assert_eq!(resolve(None, " de "), "EUR");
    }
}
