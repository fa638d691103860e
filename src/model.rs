// Domain records: typed snapshots of what the Trello API returns. Field
// names follow the wire format (camelCase) through serde, so a record
// decoded from a response serializes back to the same JSON shape.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Format of every timestamp the API hands out, e.g. `2024-01-01T00:00:00.000Z`.
/// The millisecond fraction is mandatory.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%3fZ";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub name: String,
    pub url: String,
    pub short_url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: String,
    pub name: String,
    pub closed: bool,
    pub id_board: String,
    /// Ordering key of the list within its board.
    pub pos: f64,
    pub subscribed: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: String,
    pub id_board: String,
    pub name: String,
    pub color: String,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.id_board.cmp(&other.id_board))
            .then_with(|| self.color.cmp(&other.color))
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Badges {
    pub due: Option<String>,
    pub start: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    pub url: String,
    pub labels: Vec<Label>,
    pub badges: Badges,
    pub start: Option<String>,
    pub date_last_activity: String,
}

/// How long a card has been in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Age {
    Days(i64),
    NotStarted,
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Age::Days(days) => write!(f, "{days} days"),
            Age::NotStarted => f.write_str("not started yet"),
        }
    }
}

impl Card {
    pub fn label_names(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.name.as_str()).collect()
    }

    /// Label names joined in the order the API returned them. Unlabeled
    /// cards get an empty key.
    pub fn group_key(&self) -> String {
        self.labels.iter().map(|l| l.name.as_str()).collect()
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }

    pub fn age(&self, now: DateTime<Utc>) -> Result<Age> {
        match &self.start {
            Some(start) => Ok(Age::Days(days_between(parse_timestamp(start)?, now))),
            None => Ok(Age::NotStarted),
        }
    }

    pub fn days_since_last_activity(&self, now: DateTime<Utc>) -> Result<i64> {
        let last = parse_timestamp(&self.date_last_activity)?;
        Ok(days_between(last, now))
    }
}

/// Keep only the cards carrying a label named exactly `label`. An empty
/// label means no filter.
pub fn filter_by_label(cards: Vec<Card>, label: &str) -> Vec<Card> {
    if label.is_empty() {
        return cards;
    }
    cards.into_iter().filter(|c| c.has_label(label)).collect()
}

pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| Error::Timestamp {
            value: value.to_string(),
            source,
        })
}

/// Whole days from `from` to `to`, rounded down (a start later today is -1).
fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds().div_euclid(86_400)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD_JSON: &str = r#"{
        "id": "c1",
        "name": "Fix login",
        "url": "https://trello.com/c/c1",
        "labels": [
            {"id": "l1", "idBoard": "b1", "name": "bug", "color": "red"},
            {"id": "l2", "idBoard": "b1", "name": "urgent", "color": "orange"}
        ],
        "badges": {"due": null, "start": "2024-01-01T00:00:00.000Z"},
        "start": "2024-01-01T00:00:00.000Z",
        "dateLastActivity": "2024-01-09T12:30:00.000Z"
    }"#;

    fn card() -> Card {
        serde_json::from_str(CARD_JSON).unwrap()
    }

    fn at(raw: &str) -> DateTime<Utc> {
        parse_timestamp(raw).unwrap()
    }

    #[test]
    fn card_keeps_every_field_through_serialization() {
        let original: serde_json::Value = serde_json::from_str(CARD_JSON).unwrap();
        let encoded = serde_json::to_value(card()).unwrap();
        assert_eq!(encoded, original);
    }

    #[test]
    fn board_keeps_every_field_through_serialization() {
        let raw = r#"{"id":"b1","name":"Work","url":"https://trello.com/b/b1/work","shortUrl":"https://trello.com/b/b1"}"#;
        let original: serde_json::Value = serde_json::from_str(raw).unwrap();

        let board: Board = serde_json::from_str(raw).unwrap();
        assert_eq!(board.short_url, "https://trello.com/b/b1");
        assert_eq!(serde_json::to_value(&board).unwrap(), original);
    }

    #[test]
    fn list_keeps_every_field_through_serialization() {
        let raw = r#"{"id":"l1","name":"Doing","closed":false,"idBoard":"b1","pos":16384.5,"subscribed":true}"#;
        let original: serde_json::Value = serde_json::from_str(raw).unwrap();

        let list: List = serde_json::from_str(raw).unwrap();
        assert_eq!(list.id_board, "b1");
        assert_eq!(list.pos, 16384.5);
        assert_eq!(serde_json::to_value(&list).unwrap(), original);
    }

    #[test]
    fn missing_required_field_fails() {
        let err = serde_json::from_str::<Board>(r#"{"id":"b1","name":"Work","url":"u"}"#);
        assert!(err.is_err());

        let err = serde_json::from_str::<List>(
            r#"{"id":"l1","name":"Doing","closed":"no","idBoard":"b1","pos":1,"subscribed":true}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn age_counts_whole_days_since_start() {
        let age = card().age(at("2024-01-11T00:00:00.000Z")).unwrap();
        assert_eq!(age, Age::Days(10));
        assert_eq!(age.to_string(), "10 days");

        let age = card().age(at("2024-01-11T23:59:59.999Z")).unwrap();
        assert_eq!(age, Age::Days(10));
    }

    #[test]
    fn age_without_start_is_not_started() {
        let mut c = card();
        c.start = None;
        let age = c.age(at("2024-01-11T00:00:00.000Z")).unwrap();
        assert_eq!(age, Age::NotStarted);
        assert_eq!(age.to_string(), "not started yet");
    }

    #[test]
    fn malformed_start_is_an_error() {
        let mut c = card();
        c.start = Some("yesterday".to_string());
        let err = c.age(at("2024-01-11T00:00:00.000Z")).unwrap_err();
        assert!(matches!(err, Error::Timestamp { ref value, .. } if value == "yesterday"));
    }

    #[test]
    fn malformed_timestamp_without_fraction_is_an_error() {
        let err = parse_timestamp("2024-01-01T00:00:00Z").unwrap_err();
        assert!(matches!(err, Error::Timestamp { .. }));

        let mut c = card();
        c.date_last_activity = "2024-01-09T12:30:00Z".to_string();
        assert!(c.days_since_last_activity(at("2024-01-11T00:00:00.000Z")).is_err());
    }

    #[test]
    fn age_rounds_down_for_future_start() {
        let mut c = card();
        c.start = Some("2024-01-11T12:00:00.000Z".to_string());
        let age = c.age(at("2024-01-11T00:00:00.000Z")).unwrap();
        assert_eq!(age, Age::Days(-1));
    }

    #[test]
    fn last_activity_in_days() {
        let days = card()
            .days_since_last_activity(at("2024-01-11T00:00:00.000Z"))
            .unwrap();
        assert_eq!(days, 1);
    }

    #[test]
    fn group_key_concatenates_names_in_order() {
        assert_eq!(card().group_key(), "bugurgent");
        assert_eq!(card().label_names(), vec!["bug", "urgent"]);

        let mut c = card();
        c.labels.clear();
        assert_eq!(c.group_key(), "");
    }

    #[test]
    fn labels_order_by_name() {
        let c = card();
        let mut labels = vec![c.labels[1].clone(), c.labels[0].clone()];
        labels.sort();
        assert_eq!(labels[0].to_string(), "bug");
        assert_eq!(labels[1].to_string(), "urgent");
    }

    #[test]
    fn filter_matches_exact_label_name_only() {
        let tagged = card();
        let mut other = card();
        other.id = "c2".to_string();
        other.labels.truncate(1);
        other.labels[0].name = "Bug".to_string();

        let filtered = filter_by_label(vec![tagged.clone(), other], "bug");
        assert_eq!(filtered, vec![tagged]);

        let again = filter_by_label(filtered.clone(), "bug");
        assert_eq!(again, filtered);
    }

    #[test]
    fn empty_label_filter_keeps_every_card() {
        let cards = vec![card()];
        assert_eq!(filter_by_label(cards.clone(), ""), cards);
    }
}
