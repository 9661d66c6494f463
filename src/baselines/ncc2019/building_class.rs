use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use strum_macros::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

/// NCC building classifications offered for the facade calculation.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    StrumDisplay,
)]
pub enum BuildingClass {
    #[serde(rename = "Class 2 - apartment building (Common Area)")]
    #[strum(serialize = "Class 2 - apartment building (Common Area)")]
    ApartmentCommonArea,
    #[serde(rename = "Class 3 - student accommodation")]
    #[strum(serialize = "Class 3 - student accommodation")]
    StudentAccommodation,
    #[serde(rename = "Class 3 - hotel")]
    #[strum(serialize = "Class 3 - hotel")]
    Hotel,
    #[serde(rename = "Class 3 - other")]
    #[strum(serialize = "Class 3 - other")]
    OtherResidential,
    #[default]
    #[serde(rename = "Class 5 - office building")]
    #[strum(serialize = "Class 5 - office building")]
    Office,
    #[serde(rename = "Class 6 - department stores, shopping centres")]
    #[strum(serialize = "Class 6 - department stores, shopping centres")]
    DepartmentStore,
    #[serde(rename = "Class 6 - display glazing")]
    #[strum(serialize = "Class 6 - display glazing")]
    DisplayGlazing,
    #[serde(rename = "Class 6 - restaurants, cafes, bars")]
    #[strum(serialize = "Class 6 - restaurants, cafes, bars")]
    Restaurant,
    #[serde(rename = "Class 8 - factory")]
    #[strum(serialize = "Class 8 - factory")]
    Factory,
    #[serde(rename = "Class 9a - health-care buildings")]
    #[strum(serialize = "Class 9a - health-care buildings")]
    HealthCare,
    #[serde(rename = "Class 9a - ward")]
    #[strum(serialize = "Class 9a - ward")]
    Ward,
    #[serde(rename = "Class 9b - churches, chapels or the like")]
    #[strum(serialize = "Class 9b - churches, chapels or the like")]
    Church,
    #[serde(rename = "Class 9b - early childhood centres")]
    #[strum(serialize = "Class 9b - early childhood centres")]
    EarlyChildhoodCentre,
    #[serde(rename = "Class 9b - public halls, function rooms or the like")]
    #[strum(serialize = "Class 9b - public halls, function rooms or the like")]
    PublicHall,
    #[serde(rename = "Class 9b - schools")]
    #[strum(serialize = "Class 9b - schools")]
    School,
    #[serde(rename = "Class 9b - single auditorium theatres and cinemas")]
    #[strum(serialize = "Class 9b - single auditorium theatres and cinemas")]
    SingleAuditorium,
    #[serde(rename = "Class 9b - sports venues or the like")]
    #[strum(serialize = "Class 9b - sports venues or the like")]
    SportsVenue,
    #[serde(
        rename = "Class 9b - theatres and cinemas with multiple auditoria, art galleries or the like"
    )]
    #[strum(
        serialize = "Class 9b - theatres and cinemas with multiple auditoria, art galleries or the like"
    )]
    MultipleAuditoria,
    #[serde(rename = "Class 9c - aged care building")]
    #[strum(serialize = "Class 9c - aged care building")]
    AgedCare,
}

/// Classification code a building class belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, StrumDisplay)]
pub enum ClassCode {
    #[strum(to_string = "2")]
    Class2,
    #[strum(to_string = "3")]
    Class3,
    #[strum(to_string = "5")]
    Class5,
    #[strum(to_string = "6")]
    Class6,
    #[strum(to_string = "7")]
    Class7,
    #[strum(to_string = "8")]
    Class8,
    #[strum(to_string = "9a")]
    Class9a,
    #[strum(to_string = "9a ward")]
    Class9aWard,
    #[strum(to_string = "9b")]
    Class9b,
    #[strum(to_string = "9c")]
    Class9c,
}

impl BuildingClass {
    pub fn code(&self) -> ClassCode {
        match self {
            BuildingClass::ApartmentCommonArea => ClassCode::Class2,
            BuildingClass::StudentAccommodation
            | BuildingClass::Hotel
            | BuildingClass::OtherResidential => ClassCode::Class3,
            BuildingClass::Office => ClassCode::Class5,
            BuildingClass::DepartmentStore
            | BuildingClass::DisplayGlazing
            | BuildingClass::Restaurant => ClassCode::Class6,
            BuildingClass::Factory => ClassCode::Class8,
            BuildingClass::HealthCare => ClassCode::Class9a,
            BuildingClass::Ward => ClassCode::Class9aWard,
            BuildingClass::Church
            | BuildingClass::EarlyChildhoodCentre
            | BuildingClass::PublicHall
            | BuildingClass::School
            | BuildingClass::SingleAuditorium
            | BuildingClass::SportsVenue
            | BuildingClass::MultipleAuditoria => ClassCode::Class9b,
            BuildingClass::AgedCare => ClassCode::Class9c,
        }
    }

    pub fn cohort(&self) -> Cohort {
        self.code().cohort()
    }
}

impl ClassCode {
    pub fn cohort(&self) -> Cohort {
        match self {
            ClassCode::Class3 | ClassCode::Class9aWard | ClassCode::Class9c => Cohort::Residential,
            ClassCode::Class2
            | ClassCode::Class5
            | ClassCode::Class6
            | ClassCode::Class7
            | ClassCode::Class8
            | ClassCode::Class9a
            | ClassCode::Class9b => Cohort::Commercial,
        }
    }
}

/// Group of classifications sharing one set of regulatory targets.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    StrumDisplay,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Cohort {
    /// Classes 2, 5, 6, 7, 8, 9a (other than wards) and 9b
    Commercial,
    /// Classes 3, 9a wards and 9c
    Residential,
}

/// Climate zone number. Zones 1 to 8 are the Australian NCC zones; other numbers are accepted
/// and left to the regulatory tables to resolve.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ClimateZone(u8);

impl ClimateZone {
    pub const fn new(zone: u8) -> Self {
        Self(zone)
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn description(&self) -> Option<&'static str> {
        Some(match self.0 {
            1 => "High humidity summer, warm winter",
            2 => "Warm humid summer, mild winter",
            3 => "Hot dry summer, warm winter",
            4 => "Hot dry summer, cool winter",
            5 => "Warm temperate",
            6 => "Mild temperate",
            7 => "Cool temperate",
            8 => "Alpine",
            _ => return None,
        })
    }
}

impl Default for ClimateZone {
    fn default() -> Self {
        Self(2)
    }
}

impl Display for ClimateZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.description() {
            Some(description) => write!(f, "Climate Zone {} - {description}", self.0),
            None => write!(f, "Climate Zone {}", self.0),
        }
    }
}

impl FromStr for ClimateZone {
    type Err = ClimateZoneParseError;

    /// Accepts a bare zone number or a "Climate Zone N" label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s
            .trim()
            .strip_prefix("Climate Zone")
            .unwrap_or(s)
            .split(" - ")
            .next()
            .unwrap_or_default()
            .trim();
        number
            .parse::<u8>()
            .map(Self)
            .map_err(|_| ClimateZoneParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("'{0}' is not a climate zone number")]
pub struct ClimateZoneParseError(String);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_all_labelled_classes_are_offered() {
        assert_eq!(BuildingClass::iter().count(), 19);
    }

    #[rstest]
    #[case(BuildingClass::Office, ClassCode::Class5, Cohort::Commercial)]
    #[case(BuildingClass::ApartmentCommonArea, ClassCode::Class2, Cohort::Commercial)]
    #[case(BuildingClass::HealthCare, ClassCode::Class9a, Cohort::Commercial)]
    #[case(BuildingClass::Ward, ClassCode::Class9aWard, Cohort::Residential)]
    #[case(BuildingClass::Hotel, ClassCode::Class3, Cohort::Residential)]
    #[case(BuildingClass::AgedCare, ClassCode::Class9c, Cohort::Residential)]
    #[case(BuildingClass::School, ClassCode::Class9b, Cohort::Commercial)]
    fn test_class_codes_and_cohorts(
        #[case] class: BuildingClass,
        #[case] code: ClassCode,
        #[case] cohort: Cohort,
    ) {
        assert_eq!(class.code(), code);
        assert_eq!(class.cohort(), cohort);
    }

    #[test]
    fn test_building_class_labels() {
        assert_eq!(
            "Class 5 - office building".parse::<BuildingClass>().unwrap(),
            BuildingClass::Office
        );
        assert_eq!(BuildingClass::Ward.to_string(), "Class 9a - ward");
        assert_eq!(
            serde_json::to_value(BuildingClass::Church).unwrap(),
            serde_json::json!("Class 9b - churches, chapels or the like")
        );
        assert_eq!(BuildingClass::default(), BuildingClass::Office);
    }

    #[rstest]
    #[case("2", 2)]
    #[case("Climate Zone 8", 8)]
    #[case("Climate Zone 1 - High humidity summer, warm winter", 1)]
    #[case(" 11 ", 11)]
    fn test_climate_zone_from_str(#[case] input: &str, #[case] expected: u8) {
        assert_eq!(input.parse::<ClimateZone>().unwrap().number(), expected);
    }

    #[test]
    fn test_climate_zone_display() {
        assert_eq!(
            ClimateZone::new(5).to_string(),
            "Climate Zone 5 - Warm temperate"
        );
        assert_eq!(ClimateZone::new(12).to_string(), "Climate Zone 12");
        assert!("alpine".parse::<ClimateZone>().is_err());
    }
}
