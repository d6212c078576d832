use std::fmt;

use serde::Serialize;

use crate::errors::ParseError;

/* A currency is only an identifier taken from the known vocabulary ("EUR", "ETH", ...) */
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: impl Into<String>) -> Self {
        Currency(code.into())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/* Ordered pair: base is the traded asset, counter is the currency the price is expressed in.
base and counter are never equal. */
#[derive(Hash, Eq, PartialEq, Debug, Clone)]
pub struct CurrencyPair {
    pub base: Currency,
    pub counter: Currency,
}

impl CurrencyPair {
    /* Split a concatenated token like "ETHEUR" using the vocabulary.

    The first code found is masked out of the token so the second lookup can't match it again.
    Whichever code sits first in the token is the base, the other one the counter.
    Codes are tried longest first so "ETC" wins over a shorter code it contains. */
    pub fn parse(token: &str, vocabulary: &[Currency]) -> Result<Self, ParseError> {
        let mut codes: Vec<&Currency> = vocabulary.iter().collect();
        codes.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        let unknown = || ParseError::UnknownPair {
            token: token.to_string(),
        };

        let (first_pos, first) = find_first(token, &codes).ok_or_else(unknown)?;
        let masked = mask(token, first_pos, first);

        let (second_pos, second) = find_first(&masked, &codes).ok_or_else(unknown)?;
        if first == second {
            return Err(unknown());
        }

        // a third code means we can't tell which two form the pair
        if let Some((_, extra)) = find_first(&mask(&masked, second_pos, second), &codes) {
            return Err(ParseError::AmbiguousPair {
                token: token.to_string(),
                extra: extra.0.clone(),
            });
        }

        if first_pos < second_pos {
            Ok(CurrencyPair {
                base: first.clone(),
                counter: second.clone(),
            })
        } else {
            Ok(CurrencyPair {
                base: second.clone(),
                counter: first.clone(),
            })
        }
    }
}

// '\0' never appears in a code, masking keeps the byte positions intact
fn mask(token: &str, pos: usize, code: &Currency) -> String {
    let mut masked = token.to_string();
    masked.replace_range(pos..pos + code.0.len(), &"\0".repeat(code.0.len()));
    masked
}

fn find_first<'a>(token: &str, codes: &[&'a Currency]) -> Option<(usize, &'a Currency)> {
    codes
        .iter()
        .find_map(|code| token.find(code.code()).map(|pos| (pos, *code)))
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> Vec<Currency> {
        ["EUR", "BT", "LTC", "RP", "GNO", "XMR", "ETC", "ETH", "XLM", "DASH"]
            .iter()
            .map(|c| Currency::new(*c))
            .collect()
    }

    #[test]
    fn test_base_comes_first_in_token() {
        let pair = CurrencyPair::parse("ETHEUR", &vocabulary()).unwrap();
        assert_eq!(pair.base, Currency::new("ETH"));
        assert_eq!(pair.counter, Currency::new("EUR"));

        let pair = CurrencyPair::parse("EURETH", &vocabulary()).unwrap();
        assert_eq!(pair.base, Currency::new("EUR"));
        assert_eq!(pair.counter, Currency::new("ETH"));
    }

    #[test]
    fn test_kraken_prefixed_tokens() {
        let pair = CurrencyPair::parse("XXBTZEUR", &vocabulary()).unwrap();
        assert_eq!(pair.base, Currency::new("BT"));
        assert_eq!(pair.counter, Currency::new("EUR"));

        let pair = CurrencyPair::parse("XETCXETH", &vocabulary()).unwrap();
        assert_eq!(pair.base, Currency::new("ETC"));
        assert_eq!(pair.counter, Currency::new("ETH"));
        assert_eq!(pair.to_string(), "ETC/ETH");
    }

    #[test]
    fn test_unknown_pair() {
        let err = CurrencyPair::parse("DOGEUSD", &vocabulary()).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownPair {
                token: "DOGEUSD".to_string()
            }
        );

        // only one known code
        assert!(CurrencyPair::parse("XETHZUSD", &vocabulary()).is_err());
    }

    #[test]
    fn test_same_code_twice_is_rejected() {
        assert!(CurrencyPair::parse("EUREUR", &vocabulary()).is_err());
    }

    #[test]
    fn test_three_codes_are_ambiguous() {
        let err = CurrencyPair::parse("ETHBTEUR", &vocabulary()).unwrap_err();
        assert!(matches!(err, ParseError::AmbiguousPair { .. }));
    }

    #[test]
    fn test_overlapping_codes_are_not_matched_twice() {
        // "TH" sits inside the masked "ETH", it must not count as a third code
        let vocabulary = vec![Currency::new("ETH"), Currency::new("TH"), Currency::new("EUR")];
        let pair = CurrencyPair::parse("ETHEUR", &vocabulary).unwrap();
        assert_eq!(pair.base, Currency::new("ETH"));
        assert_eq!(pair.counter, Currency::new("EUR"));
    }
}
