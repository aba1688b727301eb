//! Grouping and wording of predictions for display.
//!
//! Input contract:
//! - records without a `Group` are dropped
//! - the destination is `DestinationName`, falling back to `Destination`
//! - any other missing field is shown as `-`
//!
//! Groups come out in natural key order; records keep their upstream order
//! within a group.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::predictions::PredictionRecord;

/// Shown in place of a missing field.
const MISSING: &str = "-";

/// A platform/track group key with natural ordering.
///
/// All-digit keys sort numerically and before any other key. Numeric ties
/// (`"01"` vs `"1"`) fall back to the raw text so distinct keys stay
/// distinct. Everything else sorts as text.
///
/// ```
/// use next_train::format::GroupKey;
///
/// let mut keys: Vec<_> = ["10", "B", "2", "A"].into_iter().map(GroupKey::parse).collect();
/// keys.sort();
/// let raw: Vec<_> = keys.iter().map(|k| k.as_str()).collect();
/// assert_eq!(raw, ["2", "10", "A", "B"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    Numeric { value: u64, raw: String },
    Text(String),
}

impl GroupKey {
    pub fn parse(raw: &str) -> Self {
        if !raw.is_empty()
            && raw.bytes().all(|b| b.is_ascii_digit())
            && let Ok(value) = raw.parse::<u64>()
        {
            return GroupKey::Numeric {
                value,
                raw: raw.to_string(),
            };
        }
        GroupKey::Text(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            GroupKey::Numeric { raw, .. } => raw,
            GroupKey::Text(raw) => raw,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One group of lines sharing a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionGroup {
    pub key: GroupKey,
    pub lines: Vec<String>,
}

/// Predictions ready to hand to the display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupedPresentation {
    pub groups: Vec<PredictionGroup>,
}

impl GroupedPresentation {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of lines across all groups.
    pub fn line_count(&self) -> usize {
        self.groups.iter().map(|g| g.lines.len()).sum()
    }
}

/// Describe one prediction as a sentence.
pub fn describe(record: &PredictionRecord) -> String {
    let field = |value: Option<&str>| value.unwrap_or(MISSING).to_string();

    format!(
        "{} car train on the {} line, heading to {}, departing in {} minutes.",
        field(record.car.as_deref()),
        field(record.line.as_deref()),
        field(record.normalized_destination()),
        field(record.minutes.as_deref()),
    )
}

/// Group and order predictions. Never fails.
pub fn format_predictions(records: &[PredictionRecord]) -> GroupedPresentation {
    let mut groups: BTreeMap<GroupKey, Vec<String>> = BTreeMap::new();

    for record in records {
        let Some(group) = record.group.as_deref() else {
            continue;
        };
        groups
            .entry(GroupKey::parse(group))
            .or_default()
            .push(describe(record));
    }

    GroupedPresentation {
        groups: groups
            .into_iter()
            .map(|(key, lines)| PredictionGroup { key, lines })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        car: &str,
        line: &str,
        dest: &str,
        min: &str,
        group: Option<&str>,
    ) -> PredictionRecord {
        PredictionRecord {
            car: Some(car.into()),
            line: Some(line.into()),
            destination_name: Some(dest.into()),
            destination: None,
            minutes: Some(min.into()),
            group: group.map(Into::into),
        }
    }

    #[test]
    fn end_to_end_sample() {
        let records = vec![
            record("6", "RD", "Shady Grove", "3", Some("1")),
            record("8", "RD", "Glenmont", "BRD", Some("2")),
        ];

        let presentation = format_predictions(&records);

        assert_eq!(presentation.groups.len(), 2);
        assert_eq!(presentation.groups[0].key.as_str(), "1");
        assert_eq!(presentation.groups[1].key.as_str(), "2");
        assert_eq!(
            presentation.groups[0].lines,
            vec!["6 car train on the RD line, heading to Shady Grove, departing in 3 minutes."]
        );
        assert_eq!(
            presentation.groups[1].lines,
            vec!["8 car train on the RD line, heading to Glenmont, departing in BRD minutes."]
        );
    }

    #[test]
    fn groups_sorted_and_records_keep_order() {
        let records = vec![
            record("8", "OR", "Vienna", "4", Some("2")),
            record("6", "BL", "Franconia", "1", Some("1")),
            record("8", "SV", "Ashburn", "9", Some("2")),
            record("6", "OR", "New Carrollton", "12", Some("1")),
        ];

        let presentation = format_predictions(&records);
        let keys: Vec<_> = presentation.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "2"]);

        assert!(presentation.groups[0].lines[0].contains("Franconia"));
        assert!(presentation.groups[0].lines[1].contains("New Carrollton"));
        assert!(presentation.groups[1].lines[0].contains("Vienna"));
        assert!(presentation.groups[1].lines[1].contains("Ashburn"));
    }

    #[test]
    fn ungrouped_records_are_dropped() {
        let records = vec![
            record("-", "--", "No Passenger", "", None),
            record("6", "RD", "Glenmont", "ARR", Some("1")),
        ];

        let presentation = format_predictions(&records);
        assert_eq!(presentation.line_count(), 1);
        assert!(!presentation.groups[0].lines[0].contains("No Passenger"));
    }

    #[test]
    fn empty_input() {
        let presentation = format_predictions(&[]);
        assert!(presentation.is_empty());
        assert_eq!(presentation.line_count(), 0);
    }

    #[test]
    fn destination_fallback() {
        let mut rec = record("8", "GR", "", "5", Some("1"));
        rec.destination_name = None;
        rec.destination = Some("Branch Av".into());

        assert_eq!(
            describe(&rec),
            "8 car train on the GR line, heading to Branch Av, departing in 5 minutes."
        );
    }

    #[test]
    fn missing_fields_render_as_dash() {
        let rec = PredictionRecord {
            group: Some("1".into()),
            ..Default::default()
        };

        assert_eq!(
            describe(&rec),
            "- car train on the - line, heading to -, departing in - minutes."
        );
    }

    #[test]
    fn natural_key_order() {
        let records: Vec<_> = ["10", "2", "B", "1", "A", "01"]
            .iter()
            .map(|g| record("6", "RD", "Glenmont", "1", Some(*g)))
            .collect();

        let presentation = format_predictions(&records);
        let keys: Vec<_> = presentation.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["01", "1", "2", "10", "A", "B"]);
    }

    #[test]
    fn empty_group_is_a_text_key() {
        assert_eq!(GroupKey::parse(""), GroupKey::Text(String::new()));
        assert!(GroupKey::parse("") > GroupKey::parse("99"));
    }

    #[test]
    fn huge_numbers_are_text() {
        let key = GroupKey::parse("99999999999999999999999");
        assert!(matches!(key, GroupKey::Text(_)));
    }

    #[test]
    fn serializes_keys_as_strings() {
        let presentation = format_predictions(&[record("6", "RD", "Glenmont", "3", Some("1"))]);
        let json = serde_json::to_value(&presentation).unwrap();

        assert_eq!(json["groups"][0]["key"], "1");
        assert_eq!(
            json["groups"][0]["lines"][0],
            "6 car train on the RD line, heading to Glenmont, departing in 3 minutes."
        );
    }
}
