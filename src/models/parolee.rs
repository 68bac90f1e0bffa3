//! Parolee model and its wire form

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub street_number: String,
    pub street_name: String,
    pub suburb: String,
    pub city: String,
    pub zip_code: String,
}

impl Address {
    pub fn new(street_number: &str, street_name: &str, suburb: &str, city: &str, zip_code: &str) -> Self {
        Self {
            street_number: street_number.to_string(),
            street_name: street_name.to_string(),
            suburb: suburb.to_string(),
            city: city.to_string(),
            zip_code: zip_code.to_string(),
        }
    }
}

/// Hours during which a parolee must stay at the confinement address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Curfew {
    pub confinement_address: Address,
    /// HH:MM:SS
    pub start_time: NaiveTime,
    /// HH:MM:SS
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

/// A timestamped sighting of a parolee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Movement {
    /// YYYY-MM-DDTHH:MM:SS
    pub timestamp: NaiveDateTime,
    pub position: GeoPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Offence {
    Murder,
    Manslaughter,
    Assault,
    Robbery,
    Burglary,
    Theft,
    PossessionOfOffensiveWeapon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Conviction {
    pub date: NaiveDate,
    pub description: String,
    pub offences: Vec<Offence>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CriminalProfile {
    #[serde(default)]
    pub convictions: Vec<Conviction>,
}

/// Parolee as held in the store. Movements, criminal profile and
/// disassociates are only reachable through their sub-resources.
#[derive(Debug, Clone, PartialEq)]
pub struct Parolee {
    pub id: i64,
    pub lastname: String,
    pub firstname: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub home_address: Address,
    pub curfew: Option<Curfew>,
    pub criminal_profile: Option<CriminalProfile>,
    /// Newest first
    movements: Vec<Movement>,
    disassociates: BTreeSet<i64>,
}

impl Parolee {
    pub fn from_dto(id: i64, dto: ParoleeDto) -> Self {
        Self {
            id,
            lastname: dto.lastname,
            firstname: dto.firstname,
            gender: dto.gender,
            date_of_birth: dto.date_of_birth,
            home_address: dto.home_address,
            curfew: dto.curfew,
            criminal_profile: None,
            movements: Vec::new(),
            disassociates: BTreeSet::new(),
        }
    }

    pub fn to_dto(&self) -> ParoleeDto {
        ParoleeDto {
            id: Some(self.id),
            lastname: self.lastname.clone(),
            firstname: self.firstname.clone(),
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            home_address: self.home_address.clone(),
            curfew: self.curfew.clone(),
            last_known_position: self.last_known_position(),
        }
    }

    /// Overwrite the fields carried by the wire form. The id in `dto` is
    /// ignored.
    pub fn apply(&mut self, dto: ParoleeDto) {
        self.lastname = dto.lastname;
        self.firstname = dto.firstname;
        self.gender = dto.gender;
        self.date_of_birth = dto.date_of_birth;
        self.home_address = dto.home_address;
        self.curfew = dto.curfew;
    }

    pub fn add_movement(&mut self, movement: Movement) {
        let at = self
            .movements
            .partition_point(|m| m.timestamp > movement.timestamp);
        self.movements.insert(at, movement);
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn last_known_position(&self) -> Option<GeoPosition> {
        self.movements.first().map(|m| m.position)
    }

    pub fn disassociates(&self) -> &BTreeSet<i64> {
        &self.disassociates
    }

    pub fn update_disassociates(&mut self, ids: BTreeSet<i64>) {
        self.disassociates = ids;
    }
}

/// Parolee wire representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ParoleeDto {
    /// Absent on create, ignored on update
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub lastname: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub firstname: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub home_address: Address,
    #[serde(default)]
    pub curfew: Option<Curfew>,
    /// Derived from the latest movement, ignored on input
    #[serde(default, skip_deserializing)]
    pub last_known_position: Option<GeoPosition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> ParoleeDto {
        ParoleeDto {
            id: None,
            lastname: "Watson".to_string(),
            firstname: "Catherine".to_string(),
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(1970, 2, 9).unwrap(),
            home_address: Address::new("22", "Tarawera Terrace", "St Heliers", "Auckland", "1071"),
            curfew: None,
            last_known_position: None,
        }
    }

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_dto_round_trip_keeps_fields() {
        let parolee = Parolee::from_dto(7, dto());
        let back = parolee.to_dto();
        assert_eq!(back.id, Some(7));
        assert_eq!(back.lastname, "Watson");
        assert_eq!(back.home_address, dto().home_address);
        assert_eq!(back.last_known_position, None);
    }

    #[test]
    fn test_movements_newest_first() {
        let mut parolee = Parolee::from_dto(1, dto());
        let here = GeoPosition { latitude: -36.85, longitude: 174.76 };
        let there = GeoPosition { latitude: -37.0, longitude: 175.0 };
        parolee.add_movement(Movement { timestamp: at(9), position: here });
        parolee.add_movement(Movement { timestamp: at(12), position: there });
        parolee.add_movement(Movement { timestamp: at(6), position: here });

        let hours: Vec<_> = parolee.movements().iter().map(|m| m.timestamp).collect();
        assert_eq!(hours, vec![at(12), at(9), at(6)]);
        assert_eq!(parolee.last_known_position(), Some(there));
        assert_eq!(parolee.to_dto().last_known_position, Some(there));
    }

    #[test]
    fn test_apply_ignores_dto_id() {
        let mut parolee = Parolee::from_dto(3, dto());
        let mut update = dto();
        update.id = Some(99);
        update.firstname = "Kate".to_string();
        parolee.apply(update);
        assert_eq!(parolee.id, 3);
        assert_eq!(parolee.firstname, "Kate");
    }

    #[test]
    fn test_offence_wire_names() {
        let json = serde_json::to_string(&Offence::PossessionOfOffensiveWeapon).unwrap();
        assert_eq!(json, "\"POSSESSION_OF_OFFENSIVE_WEAPON\"");
    }
}
