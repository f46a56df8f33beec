//! Fixed classification tables.
//!
//! Every histogram in [`Results`](crate::aggregator::Results) is indexed by the
//! position of a value in one of these lists, so the lists are never reordered
//! at runtime and lookups are plain linear scans (first match wins).

/// Status codes are counted in `0..STATUS_CODE_MAX`, anything else is discarded.
pub const STATUS_CODE_MAX: usize = 512;

/// Number of hourly buckets.
pub const HOURS: usize = 24;

/// Known HTTP methods.
pub const METHODS: [&str; 9] = [
    "GET", "POST", "HEAD", "PUT", "DELETE", "CONNECT", "OPTIONS", "TRACE", "PATCH",
];

/// Known HTTP protocol versions.
pub const PROTOCOLS: [&str; 5] = ["HTTP/1.0", "HTTP/1.1", "HTTP/2", "HTTP/2.0", "HTTP/3"];

/// Continent code and display name, in bucket order.
pub const CONTINENTS: [(&str, &str); 7] = [
    ("AF", "Africa"),
    ("AN", "Antarctica"),
    ("AS", "Asia"),
    ("EU", "Europe"),
    ("NA", "North America"),
    ("OC", "Oceania"),
    ("SA", "South America"),
];

/// Index into [`COUNTRIES`].
pub type CountryId = usize;

/// ISO 3166-1 country entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub continent: &'static str,
}

impl Country {
    const fn new(code: &'static str, name: &'static str, continent: &'static str) -> Self {
        Self {
            code,
            name,
            continent,
        }
    }
}

/// Linear match of `method` against [`METHODS`].
pub fn method_index(method: &[u8]) -> Option<usize> {
    METHODS.iter().position(|m| m.as_bytes() == method)
}

/// Linear match of `protocol` against [`PROTOCOLS`].
pub fn protocol_index(protocol: &[u8]) -> Option<usize> {
    PROTOCOLS.iter().position(|p| p.as_bytes() == protocol)
}

/// Linear match of a continent code against [`CONTINENTS`].
pub fn continent_index(code: &str) -> Option<usize> {
    CONTINENTS.iter().position(|(c, _)| *c == code)
}

/// Continent code of a country, `None` for an id outside the table.
pub fn continent_of(id: CountryId) -> Option<&'static str> {
    COUNTRIES.get(id).map(|c| c.continent)
}

/// Resolve an ISO 3166-1 alpha-2 code (case-insensitive) to its [`CountryId`].
pub fn country_id(code: &str) -> Option<CountryId> {
    let upper = code.bytes().map(|b| b.to_ascii_uppercase());
    COUNTRIES
        .binary_search_by(|c| c.code.bytes().cmp(upper.clone()))
        .ok()
}

/// Countries sorted by ISO code.
pub const COUNTRIES: &[Country] = &[
    Country::new("AD", "Andorra", "EU"),
    Country::new("AE", "United Arab Emirates", "AS"),
    Country::new("AF", "Afghanistan", "AS"),
    Country::new("AG", "Antigua and Barbuda", "NA"),
    Country::new("AI", "Anguilla", "NA"),
    Country::new("AL", "Albania", "EU"),
    Country::new("AM", "Armenia", "AS"),
    Country::new("AO", "Angola", "AF"),
    Country::new("AQ", "Antarctica", "AN"),
    Country::new("AR", "Argentina", "SA"),
    Country::new("AS", "American Samoa", "OC"),
    Country::new("AT", "Austria", "EU"),
    Country::new("AU", "Australia", "OC"),
    Country::new("AW", "Aruba", "NA"),
    Country::new("AX", "Aland Islands", "EU"),
    Country::new("AZ", "Azerbaijan", "AS"),
    Country::new("BA", "Bosnia and Herzegovina", "EU"),
    Country::new("BB", "Barbados", "NA"),
    Country::new("BD", "Bangladesh", "AS"),
    Country::new("BE", "Belgium", "EU"),
    Country::new("BF", "Burkina Faso", "AF"),
    Country::new("BG", "Bulgaria", "EU"),
    Country::new("BH", "Bahrain", "AS"),
    Country::new("BI", "Burundi", "AF"),
    Country::new("BJ", "Benin", "AF"),
    Country::new("BL", "Saint Barthelemy", "NA"),
    Country::new("BM", "Bermuda", "NA"),
    Country::new("BN", "Brunei Darussalam", "AS"),
    Country::new("BO", "Bolivia", "SA"),
    Country::new("BQ", "Bonaire, Sint Eustatius and Saba", "NA"),
    Country::new("BR", "Brazil", "SA"),
    Country::new("BS", "Bahamas", "NA"),
    Country::new("BT", "Bhutan", "AS"),
    Country::new("BV", "Bouvet Island", "AN"),
    Country::new("BW", "Botswana", "AF"),
    Country::new("BY", "Belarus", "EU"),
    Country::new("BZ", "Belize", "NA"),
    Country::new("CA", "Canada", "NA"),
    Country::new("CC", "Cocos (Keeling) Islands", "AS"),
    Country::new("CD", "Congo, The Democratic Republic of the", "AF"),
    Country::new("CF", "Central African Republic", "AF"),
    Country::new("CG", "Congo", "AF"),
    Country::new("CH", "Switzerland", "EU"),
    Country::new("CI", "Cote d'Ivoire", "AF"),
    Country::new("CK", "Cook Islands", "OC"),
    Country::new("CL", "Chile", "SA"),
    Country::new("CM", "Cameroon", "AF"),
    Country::new("CN", "China", "AS"),
    Country::new("CO", "Colombia", "SA"),
    Country::new("CR", "Costa Rica", "NA"),
    Country::new("CU", "Cuba", "NA"),
    Country::new("CV", "Cape Verde", "AF"),
    Country::new("CW", "Curacao", "NA"),
    Country::new("CX", "Christmas Island", "AS"),
    Country::new("CY", "Cyprus", "EU"),
    Country::new("CZ", "Czech Republic", "EU"),
    Country::new("DE", "Germany", "EU"),
    Country::new("DJ", "Djibouti", "AF"),
    Country::new("DK", "Denmark", "EU"),
    Country::new("DM", "Dominica", "NA"),
    Country::new("DO", "Dominican Republic", "NA"),
    Country::new("DZ", "Algeria", "AF"),
    Country::new("EC", "Ecuador", "SA"),
    Country::new("EE", "Estonia", "EU"),
    Country::new("EG", "Egypt", "AF"),
    Country::new("EH", "Western Sahara", "AF"),
    Country::new("ER", "Eritrea", "AF"),
    Country::new("ES", "Spain", "EU"),
    Country::new("ET", "Ethiopia", "AF"),
    Country::new("FI", "Finland", "EU"),
    Country::new("FJ", "Fiji", "OC"),
    Country::new("FK", "Falkland Islands (Malvinas)", "SA"),
    Country::new("FM", "Micronesia, Federated States of", "OC"),
    Country::new("FO", "Faroe Islands", "EU"),
    Country::new("FR", "France", "EU"),
    Country::new("GA", "Gabon", "AF"),
    Country::new("GB", "United Kingdom", "EU"),
    Country::new("GD", "Grenada", "NA"),
    Country::new("GE", "Georgia", "AS"),
    Country::new("GF", "French Guiana", "SA"),
    Country::new("GG", "Guernsey", "EU"),
    Country::new("GH", "Ghana", "AF"),
    Country::new("GI", "Gibraltar", "EU"),
    Country::new("GL", "Greenland", "NA"),
    Country::new("GM", "Gambia", "AF"),
    Country::new("GN", "Guinea", "AF"),
    Country::new("GP", "Guadeloupe", "NA"),
    Country::new("GQ", "Equatorial Guinea", "AF"),
    Country::new("GR", "Greece", "EU"),
    Country::new("GS", "South Georgia and the South Sandwich Islands", "AN"),
    Country::new("GT", "Guatemala", "NA"),
    Country::new("GU", "Guam", "OC"),
    Country::new("GW", "Guinea-Bissau", "AF"),
    Country::new("GY", "Guyana", "SA"),
    Country::new("HK", "Hong Kong", "AS"),
    Country::new("HM", "Heard Island and McDonald Islands", "AN"),
    Country::new("HN", "Honduras", "NA"),
    Country::new("HR", "Croatia", "EU"),
    Country::new("HT", "Haiti", "NA"),
    Country::new("HU", "Hungary", "EU"),
    Country::new("ID", "Indonesia", "AS"),
    Country::new("IE", "Ireland", "EU"),
    Country::new("IL", "Israel", "AS"),
    Country::new("IM", "Isle of Man", "EU"),
    Country::new("IN", "India", "AS"),
    Country::new("IO", "British Indian Ocean Territory", "AS"),
    Country::new("IQ", "Iraq", "AS"),
    Country::new("IR", "Iran, Islamic Republic of", "AS"),
    Country::new("IS", "Iceland", "EU"),
    Country::new("IT", "Italy", "EU"),
    Country::new("JE", "Jersey", "EU"),
    Country::new("JM", "Jamaica", "NA"),
    Country::new("JO", "Jordan", "AS"),
    Country::new("JP", "Japan", "AS"),
    Country::new("KE", "Kenya", "AF"),
    Country::new("KG", "Kyrgyzstan", "AS"),
    Country::new("KH", "Cambodia", "AS"),
    Country::new("KI", "Kiribati", "OC"),
    Country::new("KM", "Comoros", "AF"),
    Country::new("KN", "Saint Kitts and Nevis", "NA"),
    Country::new("KP", "Korea, Democratic People's Republic of", "AS"),
    Country::new("KR", "Korea, Republic of", "AS"),
    Country::new("KW", "Kuwait", "AS"),
    Country::new("KY", "Cayman Islands", "NA"),
    Country::new("KZ", "Kazakhstan", "AS"),
    Country::new("LA", "Lao People's Democratic Republic", "AS"),
    Country::new("LB", "Lebanon", "AS"),
    Country::new("LC", "Saint Lucia", "NA"),
    Country::new("LI", "Liechtenstein", "EU"),
    Country::new("LK", "Sri Lanka", "AS"),
    Country::new("LR", "Liberia", "AF"),
    Country::new("LS", "Lesotho", "AF"),
    Country::new("LT", "Lithuania", "EU"),
    Country::new("LU", "Luxembourg", "EU"),
    Country::new("LV", "Latvia", "EU"),
    Country::new("LY", "Libya", "AF"),
    Country::new("MA", "Morocco", "AF"),
    Country::new("MC", "Monaco", "EU"),
    Country::new("MD", "Moldova, Republic of", "EU"),
    Country::new("ME", "Montenegro", "EU"),
    Country::new("MF", "Saint Martin", "NA"),
    Country::new("MG", "Madagascar", "AF"),
    Country::new("MH", "Marshall Islands", "OC"),
    Country::new("MK", "North Macedonia", "EU"),
    Country::new("ML", "Mali", "AF"),
    Country::new("MM", "Myanmar", "AS"),
    Country::new("MN", "Mongolia", "AS"),
    Country::new("MO", "Macao", "AS"),
    Country::new("MP", "Northern Mariana Islands", "OC"),
    Country::new("MQ", "Martinique", "NA"),
    Country::new("MR", "Mauritania", "AF"),
    Country::new("MS", "Montserrat", "NA"),
    Country::new("MT", "Malta", "EU"),
    Country::new("MU", "Mauritius", "AF"),
    Country::new("MV", "Maldives", "AS"),
    Country::new("MW", "Malawi", "AF"),
    Country::new("MX", "Mexico", "NA"),
    Country::new("MY", "Malaysia", "AS"),
    Country::new("MZ", "Mozambique", "AF"),
    Country::new("NA", "Namibia", "AF"),
    Country::new("NC", "New Caledonia", "OC"),
    Country::new("NE", "Niger", "AF"),
    Country::new("NF", "Norfolk Island", "OC"),
    Country::new("NG", "Nigeria", "AF"),
    Country::new("NI", "Nicaragua", "NA"),
    Country::new("NL", "Netherlands", "EU"),
    Country::new("NO", "Norway", "EU"),
    Country::new("NP", "Nepal", "AS"),
    Country::new("NR", "Nauru", "OC"),
    Country::new("NU", "Niue", "OC"),
    Country::new("NZ", "New Zealand", "OC"),
    Country::new("OM", "Oman", "AS"),
    Country::new("PA", "Panama", "NA"),
    Country::new("PE", "Peru", "SA"),
    Country::new("PF", "French Polynesia", "OC"),
    Country::new("PG", "Papua New Guinea", "OC"),
    Country::new("PH", "Philippines", "AS"),
    Country::new("PK", "Pakistan", "AS"),
    Country::new("PL", "Poland", "EU"),
    Country::new("PM", "Saint Pierre and Miquelon", "NA"),
    Country::new("PN", "Pitcairn", "OC"),
    Country::new("PR", "Puerto Rico", "NA"),
    Country::new("PS", "Palestine, State of", "AS"),
    Country::new("PT", "Portugal", "EU"),
    Country::new("PW", "Palau", "OC"),
    Country::new("PY", "Paraguay", "SA"),
    Country::new("QA", "Qatar", "AS"),
    Country::new("RE", "Reunion", "AF"),
    Country::new("RO", "Romania", "EU"),
    Country::new("RS", "Serbia", "EU"),
    Country::new("RU", "Russian Federation", "EU"),
    Country::new("RW", "Rwanda", "AF"),
    Country::new("SA", "Saudi Arabia", "AS"),
    Country::new("SB", "Solomon Islands", "OC"),
    Country::new("SC", "Seychelles", "AF"),
    Country::new("SD", "Sudan", "AF"),
    Country::new("SE", "Sweden", "EU"),
    Country::new("SG", "Singapore", "AS"),
    Country::new("SH", "Saint Helena", "AF"),
    Country::new("SI", "Slovenia", "EU"),
    Country::new("SJ", "Svalbard and Jan Mayen", "EU"),
    Country::new("SK", "Slovakia", "EU"),
    Country::new("SL", "Sierra Leone", "AF"),
    Country::new("SM", "San Marino", "EU"),
    Country::new("SN", "Senegal", "AF"),
    Country::new("SO", "Somalia", "AF"),
    Country::new("SR", "Suriname", "SA"),
    Country::new("SS", "South Sudan", "AF"),
    Country::new("ST", "Sao Tome and Principe", "AF"),
    Country::new("SV", "El Salvador", "NA"),
    Country::new("SX", "Sint Maarten (Dutch part)", "NA"),
    Country::new("SY", "Syrian Arab Republic", "AS"),
    Country::new("SZ", "Eswatini", "AF"),
    Country::new("TC", "Turks and Caicos Islands", "NA"),
    Country::new("TD", "Chad", "AF"),
    Country::new("TF", "French Southern Territories", "AN"),
    Country::new("TG", "Togo", "AF"),
    Country::new("TH", "Thailand", "AS"),
    Country::new("TJ", "Tajikistan", "AS"),
    Country::new("TK", "Tokelau", "OC"),
    Country::new("TL", "Timor-Leste", "AS"),
    Country::new("TM", "Turkmenistan", "AS"),
    Country::new("TN", "Tunisia", "AF"),
    Country::new("TO", "Tonga", "OC"),
    Country::new("TR", "Turkey", "AS"),
    Country::new("TT", "Trinidad and Tobago", "NA"),
    Country::new("TV", "Tuvalu", "OC"),
    Country::new("TW", "Taiwan", "AS"),
    Country::new("TZ", "Tanzania, United Republic of", "AF"),
    Country::new("UA", "Ukraine", "EU"),
    Country::new("UG", "Uganda", "AF"),
    Country::new("UM", "United States Minor Outlying Islands", "OC"),
    Country::new("US", "United States", "NA"),
    Country::new("UY", "Uruguay", "SA"),
    Country::new("UZ", "Uzbekistan", "AS"),
    Country::new("VA", "Holy See (Vatican City State)", "EU"),
    Country::new("VC", "Saint Vincent and the Grenadines", "NA"),
    Country::new("VE", "Venezuela", "SA"),
    Country::new("VG", "Virgin Islands, British", "NA"),
    Country::new("VI", "Virgin Islands, U.S.", "NA"),
    Country::new("VN", "Vietnam", "AS"),
    Country::new("VU", "Vanuatu", "OC"),
    Country::new("WF", "Wallis and Futuna", "OC"),
    Country::new("WS", "Samoa", "OC"),
    Country::new("XK", "Kosovo", "EU"),
    Country::new("YE", "Yemen", "AS"),
    Country::new("YT", "Mayotte", "AF"),
    Country::new("ZA", "South Africa", "AF"),
    Country::new("ZM", "Zambia", "AF"),
    Country::new("ZW", "Zimbabwe", "AF"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(b"GET" => Some(0))]
    #[test_case(b"PATCH" => Some(8))]
    #[test_case(b"get" => None; "case sensitive")]
    #[test_case(b"BREW" => None)]
    #[test_case(b"" => None; "empty")]
    fn test_method_index(method: &[u8]) -> Option<usize> {
        method_index(method)
    }

    #[test_case(b"HTTP/1.1" => Some(1))]
    #[test_case(b"HTTP/2.0" => Some(3))]
    #[test_case(b"HTTP/1.1 " => None; "trailing space")]
    #[test_case(b"SPDY/3" => None)]
    fn test_protocol_index(protocol: &[u8]) -> Option<usize> {
        protocol_index(protocol)
    }

    #[test]
    fn test_countries_sorted_and_unique() {
        assert!(COUNTRIES.windows(2).all(|w| w[0].code < w[1].code));
    }

    #[test]
    fn test_every_country_has_a_continent_bucket() {
        for country in COUNTRIES {
            assert!(
                continent_index(country.continent).is_some(),
                "{} has unknown continent {}",
                country.code,
                country.continent
            );
        }
    }

    #[test_case("FR" => Some("EU"))]
    #[test_case("us" => Some("NA"); "lowercase")]
    #[test_case("JP" => Some("AS"))]
    #[test_case("AQ" => Some("AN"))]
    #[test_case("ZZ" => None; "unknown code")]
    fn test_country_continent(code: &str) -> Option<&'static str> {
        country_id(code).and_then(continent_of)
    }

    #[test]
    fn test_continent_of_out_of_range() {
        assert_eq!(continent_of(COUNTRIES.len()), None);
    }
}
