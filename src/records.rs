//! Backend record types
//!
//! One struct per collection the admin screens browse. Nested references come
//! back from the backend as `{id, name}` objects and may be missing when the
//! relation was not eager-loaded.

use serde::{Deserialize, Serialize};

use crate::viewer::Record;

/// `{id, name}` reference to a parent record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NameRef {
    pub id: u64,
    pub name: String,
}

/// Name of an optional reference, or empty
pub fn ref_name(reference: &Option<NameRef>) -> String {
    reference.as_ref().map(|r| r.name.clone()).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Region {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Circle {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub region: Option<NameRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Division {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub circle: Option<NameRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SubDivision {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub division: Option<NameRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GridStation {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub voltage_kv: Option<u32>,
    #[serde(default)]
    pub sub_division: Option<NameRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Feeder {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub voltage_kv: Option<u32>,
    #[serde(default)]
    pub sub_division: Option<NameRef>,
    #[serde(default)]
    pub grid_station: Option<NameRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Permit {
    pub id: u64,
    pub ptw_number: String,
    pub status: String,
    #[serde(default)]
    pub feeder: Option<NameRef>,
    #[serde(default)]
    pub work_description: Option<String>,
    #[serde(default)]
    pub scheduled_start: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Incident {
    pub id: u64,
    pub title: String,
    pub status: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub feeder: Option<NameRef>,
    #[serde(default)]
    pub occurred_at: Option<String>,
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> u64 {
                    self.id
                }
            }
        )*
    };
}

impl_record!(Region, Circle, Division, SubDivision, GridStation, Feeder, Permit, Incident);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permit_with_nested_feeder() {
        let json = r#"{
            "id": 12,
            "ptw_number": "PTW-2024-0012",
            "status": "SDO_FORWARDED_TO_XEN",
            "feeder": {"id": 3, "name": "Ravi-11kV"},
            "scheduled_start": "2024-03-05T09:30:00Z",
            "extra": "ignored"
        }"#;
        let permit: Permit = serde_json::from_str(json).unwrap();
        assert_eq!(permit.id(), 12);
        assert_eq!(ref_name(&permit.feeder), "Ravi-11kV");
        assert_eq!(permit.work_description, None);
    }

    #[test]
    fn test_missing_relation_is_none() {
        let circle: Circle = serde_json::from_str(r#"{"id": 4, "name": "Lahore"}"#).unwrap();
        assert_eq!(circle.region, None);
        assert_eq!(ref_name(&circle.region), "");
    }

    #[test]
    fn test_raw_fields_survive_serialization() {
        let feeder = Feeder {
            id: 9,
            name: "Shalimar".to_string(),
            code: Some("F-09".to_string()),
            voltage_kv: Some(11),
            sub_division: None,
            grid_station: None,
        };
        let value = serde_json::to_value(&feeder).unwrap();
        assert_eq!(value["code"], "F-09");
        assert_eq!(value["voltage_kv"], 11);
    }
}
