use serde::{Deserialize, Serialize};

/// Display-ready event produced by the normalizer. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub time: String,
    pub location: String,
    pub description: String,
}

/// What a row activation hands to the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailPayload {
    pub id: String,
    pub title: String,
    pub location: String,
    pub description: String,
}

impl EventRecord {
    pub fn is_all_day(&self) -> bool {
        self.time == crate::calendar::normalizer::ALL_DAY
    }

    pub fn detail_payload(&self) -> DetailPayload {
        DetailPayload {
            id: self.id.clone(),
            title: self.title.clone(),
            location: self.location.clone(),
            description: self.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(time: &str) -> EventRecord {
        EventRecord {
            id: "ev1".to_string(),
            title: "Opening Ceremony".to_string(),
            time: time.to_string(),
            location: "Main Hall".to_string(),
            description: "Welcome".to_string(),
        }
    }

    #[test]
    fn detail_payload_carries_everything_but_time() {
        let payload = record("09:00 AM").detail_payload();

        assert_eq!(payload.id, "ev1");
        assert_eq!(payload.title, "Opening Ceremony");
        assert_eq!(payload.location, "Main Hall");
        assert_eq!(payload.description, "Welcome");
    }

    #[test]
    fn all_day_record_is_detected_from_time_label() {
        assert!(record("All Day").is_all_day());
        assert!(!record("02:00 PM").is_all_day());
    }

    #[test]
    fn record_serializes_with_five_string_fields() {
        let value = serde_json::to_value(record("All Day")).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 5);
        assert!(object.values().all(|v| v.is_string()));
    }
}
