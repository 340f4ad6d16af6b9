use serde::{Serialize, Serializer};

use crate::search::SearchRequest;

/// Rendered form of [`FieldValue::Unavailable`].
pub const UNAVAILABLE: &str = "N/A";

/// A scraped field: either the located text or an explicit marker that the
/// source element was absent. An empty string is a present value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Present(String),
    Unavailable,
}

impl FieldValue {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Present(v) => v,
            Self::Unavailable => UNAVAILABLE,
        }
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Unavailable, Self::Present)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One normalized result row: named fields in insertion order.
///
/// Every record for a resource carries the same extraction fields; after
/// [`Record::annotate`] it also carries the fields of the request that
/// produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Record::set`].
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set `name`, replacing an existing value in place.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value;
        } else {
            self.fields.push((name.to_string(), value));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Merge the form fields of `request` into this record.
    pub fn annotate(&mut self, request: &SearchRequest) {
        for (name, value) in request.form_fields() {
            self.set(name, FieldValue::Present(value));
        }
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Present(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Present(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::{MonthYear, Party};
    use crate::search::ResourceKind;

    #[test]
    fn unavailable_renders_as_sentinel() {
        assert_eq!(FieldValue::Unavailable.to_string(), "N/A");
        assert_eq!(FieldValue::from(None::<String>), FieldValue::Unavailable);
    }

    #[test]
    fn empty_string_is_present_not_unavailable() {
        let value = FieldValue::from(String::new());
        assert!(!value.is_unavailable());
        assert_eq!(value.as_str(), "");
    }

    #[test]
    fn set_replaces_in_place_and_keeps_order() {
        let mut record = Record::new().with("Hotel", "Pop Century").with("Deal", "10% off");
        record.set("Hotel", "All-Star Movies");
        let headers: Vec<&str> = record.headers().collect();
        assert_eq!(headers, vec!["Hotel", "Deal"]);
        assert_eq!(record.get("Hotel").unwrap().as_str(), "All-Star Movies");
    }

    #[test]
    fn annotate_appends_request_fields() {
        let request = SearchRequest {
            resource: ResourceKind::Tickets,
            origin: None,
            day: 3,
            month: MonthYear::new(2, 2025),
            nights: 10,
            party: Party::default(),
        };
        let mut record = Record::new()
            .with("Ticket", "7 Day Ticket")
            .with("Deal", FieldValue::Unavailable);
        record.annotate(&request);

        assert_eq!(record.get("Deal"), Some(&FieldValue::Unavailable));
        assert_eq!(record.get("day").unwrap().as_str(), "3");
        assert_eq!(record.get("month").unwrap().as_str(), "2^2025");
        assert_eq!(record.get("holiday").unwrap().as_str(), "Tickets");
        assert_eq!(record.len(), 2 + request.form_fields().len());
    }

    #[test]
    fn serializes_as_flat_field_list() {
        let record = Record::new().with("Price (GBP)", FieldValue::Unavailable);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fields"][0][1], "N/A");
    }
}
