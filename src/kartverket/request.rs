//! Query parameters for the registry searches.

use crate::crs::working_or_default;
use crate::KvseekError;

/// Ordered query string parameters
pub type QueryParams = Vec<(&'static str, String)>;

/// Minimum number of characters in a place-name search
pub const MIN_PLACE_QUERY_CHARS: usize = 2;

/// Street address search input
#[derive(Debug, Clone, Default)]
pub struct AddressQuery {
    pub street: String,
    pub number: String,
    pub letter: String,
}

impl AddressQuery {
    pub fn params(&self, working_epsg: u32, page_size: u32) -> Result<QueryParams, KvseekError> {
        let street = self.street.trim();
        let number = self.number.trim();
        let letter = self.letter.trim();

        if street.is_empty() && number.is_empty() && letter.is_empty() {
            return Err(KvseekError::InvalidQuery(
                "fill in at least one of street name, number or letter".to_string(),
            ));
        }

        let mut params: QueryParams = vec![("objtype", "Vegadresse".to_string())];
        if !street.is_empty() {
            params.push(("adressenavn", street.to_string()));
        }
        if let Ok(n) = number.parse::<u32>() {
            params.push(("nummer", n.to_string()));
        }
        if !letter.is_empty() {
            params.push(("bokstav", letter.to_string()));
        }
        params.extend([
            ("treffPerSide", page_size.to_string()),
            ("side", "0".to_string()),
            ("utkoordsys", working_or_default(working_epsg).to_string()),
            ("asciiKompatibel", "true".to_string()),
        ]);

        Ok(params)
    }
}

/// Cadastral property search input
#[derive(Debug, Clone, Default)]
pub struct PropertyQuery {
    pub municipality_number: String,
    pub gnr: u32,
    pub bnr: u32,
    /// Leasehold number, sent only when > 0
    pub fnr: u32,
    /// Section number, sent only when > 0
    pub snr: u32,
}

impl PropertyQuery {
    pub fn params(&self, working_epsg: u32) -> Result<QueryParams, KvseekError> {
        let municipality = self.municipality_number.trim();
        if municipality.is_empty() {
            return Err(KvseekError::InvalidQuery(
                "a municipality number is required for property search".to_string(),
            ));
        }
        if self.gnr == 0 || self.bnr == 0 {
            return Err(KvseekError::InvalidQuery(
                "both gnr and bnr must be given".to_string(),
            ));
        }

        let mut params: QueryParams = vec![
            ("omrade", "true".to_string()),
            ("kommunenummer", municipality.to_string()),
            ("gardsnummer", self.gnr.to_string()),
            ("bruksnummer", self.bnr.to_string()),
            ("utkoordsys", working_or_default(working_epsg).to_string()),
        ];
        if self.fnr > 0 {
            params.push(("festenummer", self.fnr.to_string()));
        }
        if self.snr > 0 {
            params.push(("seksjonsnummer", self.snr.to_string()));
        }

        Ok(params)
    }
}

/// Place-name search input
#[derive(Debug, Clone, Default)]
pub struct PlaceQuery {
    pub text: String,
}

impl PlaceQuery {
    pub fn params(&self, working_epsg: u32, page_size: u32) -> Result<QueryParams, KvseekError> {
        let text = self.text.trim();
        if text.chars().count() < MIN_PLACE_QUERY_CHARS {
            return Err(KvseekError::InvalidQuery(format!(
                "place-name search needs at least {} characters",
                MIN_PLACE_QUERY_CHARS
            )));
        }

        Ok(vec![
            ("sok", text.to_string()),
            ("treffPerSide", page_size.to_string()),
            // The place-name API pages from 1 and rejects side=0
            ("side", "1".to_string()),
            ("utkoordsys", working_or_default(working_epsg).to_string()),
        ])
    }
}

/// Parameters for county and municipality boundary requests.
pub fn area_params(working_epsg: u32) -> QueryParams {
    vec![("utkoordsys", working_or_default(working_epsg).to_string())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_address_params() {
        let query = AddressQuery {
            street: " Munkegata ".to_string(),
            number: "1".to_string(),
            letter: String::new(),
        };

        let params = query.params(25833, 100).unwrap();
        assert_eq!(get(&params, "adressenavn"), Some("Munkegata"));
        assert_eq!(get(&params, "nummer"), Some("1"));
        assert_eq!(get(&params, "bokstav"), None);
        assert_eq!(get(&params, "utkoordsys"), Some("25833"));
        assert_eq!(get(&params, "side"), Some("0"));
    }

    #[test]
    fn test_address_non_numeric_number_is_dropped() {
        let query = AddressQuery {
            number: "12B".to_string(),
            ..Default::default()
        };
        let params = query.params(0, 100).unwrap();
        assert_eq!(get(&params, "nummer"), None);
        assert_eq!(get(&params, "utkoordsys"), Some("25833"));
    }

    #[test]
    fn test_empty_address_is_rejected() {
        assert!(matches!(
            AddressQuery::default().params(25833, 100),
            Err(KvseekError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_property_params_only_send_set_numbers() {
        let query = PropertyQuery {
            municipality_number: "5001".to_string(),
            gnr: 100,
            bnr: 1,
            fnr: 0,
            snr: 3,
        };

        let params = query.params(25832).unwrap();
        assert_eq!(get(&params, "omrade"), Some("true"));
        assert_eq!(get(&params, "festenummer"), None);
        assert_eq!(get(&params, "seksjonsnummer"), Some("3"));
    }

    #[test]
    fn test_property_validation() {
        let missing_municipality = PropertyQuery {
            gnr: 1,
            bnr: 1,
            ..Default::default()
        };
        assert!(missing_municipality.params(25833).is_err());

        let missing_bnr = PropertyQuery {
            municipality_number: "0301".to_string(),
            gnr: 1,
            ..Default::default()
        };
        assert!(missing_bnr.params(25833).is_err());
    }

    #[test]
    fn test_place_params() {
        let query = PlaceQuery {
            text: "Bø".to_string(),
        };
        let params = query.params(25833, 200).unwrap();
        assert_eq!(get(&params, "sok"), Some("Bø"));
        assert_eq!(get(&params, "side"), Some("1"));

        let short = PlaceQuery {
            text: " ø ".to_string(),
        };
        assert!(short.params(25833, 200).is_err());
    }
}
