//! Structural validator for disaster event lists
//!
//! Field presence is checked on the first record only. Enumerated values
//! are checked on every record, and all distinct offenders are collected
//! before failing.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::console::Console;
use super::disaster::{DisasterType, Severity, REQUIRED_FIELDS};
use super::payload::Payload;

/// Placeholder reported for an enumeration field that is absent
const MISSING: &str = "<missing>";

/// Ways a disaster list can be structurally wrong
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("Disasters data is not a list")]
    NotAList,

    #[error("Missing required fields in disaster data: {0:?}")]
    MissingFields(Vec<&'static str>),

    #[error("{}", describe_invalid(.disaster_types, .severities))]
    InvalidValues {
        disaster_types: BTreeSet<String>,
        severities: BTreeSet<String>,
    },
}

fn describe_invalid(types: &BTreeSet<String>, severities: &BTreeSet<String>) -> String {
    let mut parts = Vec::new();
    if !types.is_empty() {
        parts.push(format!("Invalid disaster types found: {:?}", types));
    }
    if !severities.is_empty() {
        parts.push(format!("Invalid severity levels found: {:?}", severities));
    }
    parts.join("; ")
}

/// Counts of a structurally valid list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub records: usize,
    pub by_type: BTreeMap<DisasterType, usize>,
    pub by_severity: BTreeMap<Severity, usize>,
}

/// Apply the structural rules to a payload
pub fn check_disasters(payload: &Payload) -> Result<Breakdown, StructuralError> {
    let records = payload.as_list().ok_or(StructuralError::NotAList)?;
    check_records(records)
}

/// Apply the structural rules to a list of records
///
/// An empty list is valid.
pub fn check_records(records: &[Value]) -> Result<Breakdown, StructuralError> {
    let Some(sample) = records.first() else {
        return Ok(Breakdown::default());
    };

    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| sample.get(field).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(StructuralError::MissingFields(missing));
    }

    let mut breakdown = Breakdown {
        records: records.len(),
        ..Breakdown::default()
    };
    let mut bad_types = BTreeSet::new();
    let mut bad_severities = BTreeSet::new();

    for record in records {
        match enum_field(record, "disaster_type", DisasterType::parse) {
            Ok(t) => *breakdown.by_type.entry(t).or_insert(0) += 1,
            Err(raw) => {
                bad_types.insert(raw);
            }
        }
        match enum_field(record, "severity", Severity::parse) {
            Ok(s) => *breakdown.by_severity.entry(s).or_insert(0) += 1,
            Err(raw) => {
                bad_severities.insert(raw);
            }
        }
    }

    if !bad_types.is_empty() || !bad_severities.is_empty() {
        return Err(StructuralError::InvalidValues {
            disaster_types: bad_types,
            severities: bad_severities,
        });
    }

    Ok(breakdown)
}

/// Read a closed-set field, returning the offending raw value on failure
fn enum_field<E>(record: &Value, field: &str, parse: fn(&str) -> Option<E>) -> Result<E, String> {
    match record.get(field) {
        Some(Value::String(s)) => parse(s).ok_or_else(|| s.clone()),
        Some(other) => Err(other.to_string()),
        None => Err(MISSING.to_string()),
    }
}

/// Check a payload and print the verdict with its breakdown
pub fn report_structure(payload: &Payload, console: &Console) -> Result<Breakdown, StructuralError> {
    match check_disasters(payload) {
        Ok(breakdown) if breakdown.records == 0 => {
            console.warn("No disasters found in response");
            Ok(breakdown)
        }
        Ok(breakdown) => {
            console.pass(&format!(
                "Disaster data structure is valid ({} disasters)",
                breakdown.records
            ));
            console.note(&format!("Types: {}", format_counts(&breakdown.by_type)));
            console.note(&format!("Severities: {}", format_counts(&breakdown.by_severity)));
            Ok(breakdown)
        }
        Err(e) => {
            tracing::debug!(error = %e, "structural validation failed");
            console.fail(&e.to_string());
            Err(e)
        }
    }
}

/// Boolean verdict for a payload
pub fn validate(payload: &Payload, console: &Console) -> bool {
    report_structure(payload, console).is_ok()
}

fn format_counts<K: std::fmt::Display>(counts: &BTreeMap<K, usize>) -> String {
    let entries: Vec<String> = counts.iter().map(|(k, n)| format!("{}: {}", k, n)).collect();
    format!("{{{}}}", entries.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, disaster_type: &str, severity: &str) -> Value {
        json!({
            "id": id,
            "disaster_type": disaster_type,
            "title": "T",
            "description": "D",
            "severity": severity,
            "latitude": 34.0,
            "longitude": -118.0,
            "location_name": "L",
            "timestamp": "2024-01-01T00:00:00Z",
            "source": "USGS",
        })
    }

    #[test]
    fn test_empty_list_is_valid() {
        let breakdown = check_disasters(&Payload::List(vec![])).unwrap();
        assert_eq!(breakdown, Breakdown::default());
        assert!(validate(&Payload::List(vec![]), &Console::quiet()));
    }

    #[test]
    fn test_non_list_payloads_are_invalid() {
        for payload in [
            Payload::Empty,
            Payload::RawText("[]".to_string()),
            Payload::Map(serde_json::Map::new()),
        ] {
            assert_eq!(check_disasters(&payload), Err(StructuralError::NotAList));
            assert!(!validate(&payload, &Console::quiet()));
        }
    }

    #[test]
    fn test_each_missing_field_is_invalid() {
        for field in REQUIRED_FIELDS {
            let mut sample = record("e1", "flood", "low");
            sample.as_object_mut().unwrap().remove(field);
            let result = check_records(&[sample]);
            assert_eq!(result, Err(StructuralError::MissingFields(vec![field])), "{field}");
        }
    }

    #[test]
    fn test_missing_fields_are_listed_in_canonical_order() {
        let result = check_records(&[json!({"id": "x", "title": "T"})]);
        assert_eq!(
            result,
            Err(StructuralError::MissingFields(vec![
                "disaster_type",
                "description",
                "severity",
                "latitude",
                "longitude",
                "location_name",
                "timestamp",
                "source",
            ]))
        );
    }

    #[test]
    fn test_null_field_counts_as_present() {
        let mut sample = record("e1", "flood", "low");
        sample["description"] = Value::Null;
        assert!(check_records(&[sample]).is_ok());
    }

    #[test]
    fn test_field_presence_only_sampled_on_first_record() {
        let records = vec![
            record("e1", "flood", "low"),
            json!({"id": "e2", "disaster_type": "tornado", "severity": "high"}),
        ];
        let breakdown = check_records(&records).unwrap();
        assert_eq!(breakdown.records, 2);
    }

    #[test]
    fn test_every_distinct_invalid_type_is_reported() {
        let records = vec![
            record("e1", "earthquake", "low"),
            record("e2", "volcano", "low"),
            record("e3", "tsunami", "low"),
            record("e4", "volcano", "high"),
        ];
        match check_records(&records) {
            Err(StructuralError::InvalidValues {
                disaster_types,
                severities,
            }) => {
                let expected: BTreeSet<String> =
                    ["tsunami", "volcano"].iter().map(|s| s.to_string()).collect();
                assert_eq!(disaster_types, expected);
                assert!(severities.is_empty());
            }
            other => panic!("expected invalid values, got {:?}", other),
        }
    }

    #[test]
    fn test_every_distinct_invalid_severity_is_reported() {
        let records = vec![
            record("e1", "flood", "extreme"),
            record("e2", "flood", "moderate"),
            record("e3", "flood", "catastrophic"),
        ];
        let err = check_records(&records).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid severity levels found: {\"catastrophic\", \"extreme\"}"
        );
    }

    #[test]
    fn test_both_domains_reported_together() {
        let mut odd = record("e2", "flood", "low");
        odd["severity"] = json!(3);
        odd.as_object_mut().unwrap().remove("disaster_type");
        let records = vec![record("e1", "hurricane", "low"), odd];
        match check_records(&records) {
            Err(StructuralError::InvalidValues {
                disaster_types,
                severities,
            }) => {
                assert!(disaster_types.contains("hurricane"));
                assert!(disaster_types.contains(MISSING));
                assert!(severities.contains("3"));
            }
            other => panic!("expected invalid values, got {:?}", other),
        }
    }

    #[test]
    fn test_breakdown_counts() {
        let records = vec![
            record("e1", "earthquake", "moderate"),
            record("e2", "earthquake", "high"),
            record("e3", "air_quality", "moderate"),
        ];
        let breakdown = check_records(&records).unwrap();
        assert_eq!(breakdown.records, 3);
        assert_eq!(breakdown.by_type.get(&DisasterType::Earthquake), Some(&2));
        assert_eq!(breakdown.by_type.get(&DisasterType::AirQuality), Some(&1));
        assert_eq!(breakdown.by_severity.get(&Severity::Moderate), Some(&2));
        assert_eq!(breakdown.by_severity.get(&Severity::High), Some(&1));
        assert_eq!(format_counts(&breakdown.by_type), "{earthquake: 2, air_quality: 1}");
    }
}
