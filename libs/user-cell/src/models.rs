use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Contact details shared by every account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientPersonalInfo {
    #[serde(flatten)]
    pub personal: PersonalInfo,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_phone: Option<String>,
    #[serde(default)]
    pub insurance_provider: Option<String>,
    #[serde(default)]
    pub insurance_number: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalInfo {
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub years_of_experience: Option<u32>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub consultation_fee: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkDay {
    /// 1 = Monday .. 7 = Sunday
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkSchedule {
    #[serde(default)]
    pub days: Vec<WorkDay>,
    #[serde(default)]
    pub slot_duration_minutes: Option<u32>,
}

impl WorkSchedule {
    /// Checks the schedule before it is sent upstream.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = [false; 7];
        for day in &self.days {
            if !(1..=7).contains(&day.day_of_week) {
                return Err(format!("day_of_week must be 1-7, got {}", day.day_of_week));
            }
            let slot = &mut seen[(day.day_of_week - 1) as usize];
            if *slot {
                return Err(format!("day {} appears more than once", day.day_of_week));
            }
            *slot = true;
            if day.is_available && day.start_time >= day.end_time {
                return Err(format!("day {} starts at or after its end", day.day_of_week));
            }
        }
        if let Some(minutes) = self.slot_duration_minutes {
            if minutes == 0 || minutes > 240 {
                return Err(format!("slot duration of {} minutes is out of range", minutes));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(dow: u8, start: &str, end: &str) -> WorkDay {
        WorkDay {
            day_of_week: dow,
            start_time: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
            end_time: NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
            is_available: true,
        }
    }

    #[test]
    fn test_schedule_validation() {
        let ok = WorkSchedule { days: vec![day(1, "09:00", "17:00")], slot_duration_minutes: Some(30) };
        assert!(ok.validate().is_ok());

        let inverted = WorkSchedule { days: vec![day(2, "17:00", "09:00")], slot_duration_minutes: None };
        assert!(inverted.validate().is_err());

        let duplicate = WorkSchedule { days: vec![day(3, "09:00", "10:00"), day(3, "11:00", "12:00")], slot_duration_minutes: None };
        assert!(duplicate.validate().is_err());

        let bad_day = WorkSchedule { days: vec![day(0, "09:00", "10:00")], slot_duration_minutes: None };
        assert!(bad_day.validate().is_err());
    }

    #[test]
    fn test_patient_info_flattens_personal_fields() {
        let info: PatientPersonalInfo = serde_json::from_value(json!({
            "firstName": "Sam",
            "dateOfBirth": "1990-04-02",
            "emergencyContactName": "Alex"
        }))
        .unwrap();
        assert_eq!(info.personal.first_name.as_deref(), Some("Sam"));
        assert_eq!(info.emergency_contact_name.as_deref(), Some("Alex"));
    }
}
