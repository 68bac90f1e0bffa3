//! Parolee service

use std::collections::BTreeSet;

use chrono::{Duration, Local, NaiveDate, NaiveTime};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::parolee::{
        Address, Conviction, CriminalProfile, Curfew, Gender, GeoPosition, Movement, Offence,
        Parolee, ParoleeDto,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ParoleesService {
    repository: Repository,
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Parolee {} not found", id))
}

impl ParoleesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    fn find(&self, id: i64) -> AppResult<Parolee> {
        self.repository.parolees.get(id).ok_or_else(|| not_found(id))
    }

    fn modify<R>(&self, id: i64, f: impl FnOnce(&mut Parolee) -> R) -> AppResult<R> {
        self.repository.parolees.update(id, f).ok_or_else(|| not_found(id))
    }

    /// Replace the store contents with the three seed parolees
    pub fn reload(&self) {
        let store = &self.repository.parolees;
        store.clear();

        let now = Local::now().naive_local();
        let position = GeoPosition {
            latitude: -36.852617,
            longitude: 174.769525,
        };

        let address = Address::new("15", "Bermuda road", "St Johns", "Auckland", "1071");
        store.insert_new(|id| {
            let mut parolee = Parolee::from_dto(
                id,
                seed(
                    "Sinnen",
                    "Oliver",
                    Gender::Male,
                    ymd(1970, 5, 26),
                    address.clone(),
                    Some(Curfew {
                        confinement_address: address,
                        start_time: hm(20, 0),
                        end_time: hm(6, 30),
                    }),
                ),
            );
            parolee.criminal_profile = Some(CriminalProfile {
                convictions: vec![Conviction {
                    date: ymd(1994, 1, 19),
                    description: "Crime of passion".to_string(),
                    offences: vec![Offence::Murder, Offence::PossessionOfOffensiveWeapon],
                }],
            });
            for timestamp in [now - Duration::days(1), now - Duration::hours(1), now] {
                parolee.add_movement(Movement { timestamp, position });
            }
            parolee
        });

        store.insert_new(|id| {
            Parolee::from_dto(
                id,
                seed(
                    "Watson",
                    "Catherine",
                    Gender::Female,
                    ymd(1970, 2, 9),
                    Address::new("22", "Tarawera Terrace", "St Heliers", "Auckland", "1071"),
                    None,
                ),
            )
        });

        store.insert_new(|id| {
            Parolee::from_dto(
                id,
                seed(
                    "Giacaman",
                    "Nasser",
                    Gender::Male,
                    ymd(1980, 10, 19),
                    Address::new("67", "Drayton Gardens", "Oraeki", "Auckland", "1071"),
                    None,
                ),
            )
        });

        tracing::info!("Reloaded parolee store with {} parolees", store.len());
    }

    pub fn create(&self, dto: ParoleeDto) -> AppResult<ParoleeDto> {
        dto.validate()?;
        let parolee = self
            .repository
            .parolees
            .insert_new(|id| Parolee::from_dto(id, dto));
        tracing::info!("Created new parolee with id: {}", parolee.id);
        Ok(parolee.to_dto())
    }

    pub fn get_by_id(&self, id: i64) -> AppResult<ParoleeDto> {
        Ok(self.find(id)?.to_dto())
    }

    /// Parolees with ids in `[start, start + size)` plus the store size
    pub fn list(&self, start: i64, size: i64) -> (Vec<ParoleeDto>, usize) {
        let store = &self.repository.parolees;
        let parolees = store
            .get_range(start, size)
            .iter()
            .map(Parolee::to_dto)
            .collect();
        (parolees, store.len())
    }

    pub fn count(&self) -> usize {
        self.repository.parolees.len()
    }

    pub fn update(&self, id: i64, dto: ParoleeDto) -> AppResult<()> {
        dto.validate()?;
        self.modify(id, |parolee| parolee.apply(dto))?;
        tracing::info!("Updated parolee with id: {}", id);
        Ok(())
    }

    pub fn add_movement(&self, id: i64, movement: Movement) -> AppResult<()> {
        self.modify(id, |parolee| parolee.add_movement(movement))
    }

    pub fn movements(&self, id: i64) -> AppResult<Vec<Movement>> {
        Ok(self.find(id)?.movements().to_vec())
    }

    /// Every id must name an existing parolee
    pub fn update_disassociates(&self, id: i64, ids: Vec<i64>) -> AppResult<()> {
        if !self.repository.parolees.contains(id) {
            return Err(not_found(id));
        }
        let ids: BTreeSet<i64> = ids.into_iter().collect();
        if let Some(missing) = ids.iter().find(|other| !self.repository.parolees.contains(**other)) {
            return Err(not_found(*missing));
        }
        self.modify(id, |parolee| parolee.update_disassociates(ids))
    }

    /// Disassociates still present in the store
    pub fn disassociates(&self, id: i64) -> AppResult<Vec<ParoleeDto>> {
        let parolee = self.find(id)?;
        Ok(parolee
            .disassociates()
            .iter()
            .filter_map(|other| self.repository.parolees.get(*other))
            .map(|other| other.to_dto())
            .collect())
    }

    pub fn update_criminal_profile(&self, id: i64, profile: CriminalProfile) -> AppResult<()> {
        self.modify(id, |parolee| parolee.criminal_profile = Some(profile))
    }

    pub fn criminal_profile(&self, id: i64) -> AppResult<CriminalProfile> {
        self.find(id)?
            .criminal_profile
            .ok_or_else(|| AppError::NotFound(format!("Parolee {} has no criminal profile", id)))
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn hm(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap_or_default()
}

fn seed(
    lastname: &str,
    firstname: &str,
    gender: Gender,
    date_of_birth: NaiveDate,
    home_address: Address,
    curfew: Option<Curfew>,
) -> ParoleeDto {
    ParoleeDto {
        id: None,
        lastname: lastname.to_string(),
        firstname: firstname.to_string(),
        gender,
        date_of_birth,
        home_address,
        curfew,
        last_known_position: None,
    }
}
