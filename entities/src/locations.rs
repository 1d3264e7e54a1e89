use serde::Serialize;
use std::fmt;

/// A city-level measurement point. Names key every per-city mapping and are
/// lower-cased on construction so that keying is case-insensitive.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct LocationName(String);

impl LocationName {
    pub fn new(name: impl AsRef<str>) -> Self {
        LocationName(name.as_ref().trim().to_lowercase())
    }

    pub fn inner(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for LocationName {
    fn from(name: String) -> Self {
        LocationName::new(name)
    }
}

impl From<&str> for LocationName {
    fn from(name: &str) -> Self {
        LocationName::new(name)
    }
}

impl AsRef<str> for LocationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The thirteen Canadian province and territory codes. Every aggregate
/// carries all of them, whether or not any city reports into them.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum ProvinceCode {
    AB,
    BC,
    MB,
    NB,
    NL,
    NS,
    NT,
    NU,
    ON,
    PE,
    QC,
    SK,
    YT,
}

impl ProvinceCode {
    pub const ALL: [ProvinceCode; 13] = [
        ProvinceCode::AB,
        ProvinceCode::BC,
        ProvinceCode::MB,
        ProvinceCode::NB,
        ProvinceCode::NL,
        ProvinceCode::NS,
        ProvinceCode::NT,
        ProvinceCode::NU,
        ProvinceCode::ON,
        ProvinceCode::PE,
        ProvinceCode::QC,
        ProvinceCode::SK,
        ProvinceCode::YT,
    ];

    /// Cities the surveillance network knows how to place. Anything else
    /// stays out of provincial aggregation and is only reported city-level.
    pub fn for_city(city: &LocationName) -> Option<ProvinceCode> {
        let code = match city.inner() {
            "toronto" | "ottawa" | "hamilton" | "london" => ProvinceCode::ON,
            "montreal" | "quebec city" => ProvinceCode::QC,
            "vancouver" | "kelowna" => ProvinceCode::BC,
            "calgary" | "edmonton" => ProvinceCode::AB,
            "winnipeg" => ProvinceCode::MB,
            "halifax" => ProvinceCode::NS,
            "saskatoon" | "regina" => ProvinceCode::SK,
            "st. john's" => ProvinceCode::NL,
            _ => return None,
        };
        Some(code)
    }
}

impl fmt::Display for ProvinceCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
