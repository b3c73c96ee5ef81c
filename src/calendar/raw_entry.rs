use serde::Deserialize;

/// One event item as the provider returns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCalendarEntry {
    pub id: String,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub start: StartDescriptor,
}

/// Start of an event: a precise RFC 3339 timestamp or a date-only value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "StartFields")]
pub enum StartDescriptor {
    Timestamp(String),
    AllDay(String),
}

#[derive(Deserialize)]
struct StartFields {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
    date: Option<String>,
}

impl TryFrom<StartFields> for StartDescriptor {
    type Error = String;

    fn try_from(fields: StartFields) -> Result<Self, Self::Error> {
        let date_time = fields.date_time.filter(|s| !s.is_empty());
        let date = fields.date.filter(|s| !s.is_empty());

        // dateTime wins when the provider sends both
        match (date_time, date) {
            (Some(date_time), _) => Ok(StartDescriptor::Timestamp(date_time)),
            (None, Some(date)) => Ok(StartDescriptor::AllDay(date)),
            (None, None) => Err("event start has neither dateTime nor date".to_string()),
        }
    }
}
