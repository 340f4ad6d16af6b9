use serde::{Deserialize, Serialize};

use crate::axes::{MonthYear, Party};

const FLIGHTS_DESTINATION: &str = "MCO";
const FLIGHTS_CABIN: &str = "Economy";
const HOTEL_CATEGORY: &str = "ALL";

/// The kind of product a search targets on the booking site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Flights,
    Hotels,
    Tickets,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [Self::Flights, Self::Hotels, Self::Tickets];

    /// Value of the `holiday` form field.
    #[must_use]
    pub fn holiday_field(self) -> &'static str {
        match self {
            Self::Flights => "Flights",
            Self::Hotels => "Hotel",
            Self::Tickets => "Tickets",
        }
    }

    /// Whether searches for this resource vary over origin airports.
    #[must_use]
    pub fn uses_origin(self) -> bool {
        matches!(self, Self::Flights)
    }

    /// Whether result pages for this resource link to further pages.
    #[must_use]
    pub fn paginates(self) -> bool {
        !matches!(self, Self::Tickets)
    }

    fn static_fields(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Flights => &[
                ("flights-to", FLIGHTS_DESTINATION),
                ("flights-cabin", FLIGHTS_CABIN),
            ],
            Self::Hotels => &[("hotel-category", HOTEL_CATEGORY)],
            Self::Tickets => &[],
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flights => write!(f, "flights"),
            Self::Hotels => write!(f, "hotels"),
            Self::Tickets => write!(f, "tickets"),
        }
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flights" => Ok(Self::Flights),
            "hotels" => Ok(Self::Hotels),
            "tickets" => Ok(Self::Tickets),
            other => Err(format!(
                "unknown resource '{other}'; expected flights, hotels, or tickets"
            )),
        }
    }
}

/// One concrete combination of axis values: a single form submission.
///
/// Never mutated after the grid produces it. Records are annotated with a
/// copy of the request that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchRequest {
    pub resource: ResourceKind,
    /// Origin airport; `Some` only for flights.
    pub origin: Option<String>,
    pub day: u8,
    pub month: MonthYear,
    pub nights: u16,
    pub party: Party,
}

impl SearchRequest {
    /// The form body for this search, in submission order.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("holiday", self.resource.holiday_field().to_string()),
            ("adults", self.party.adults.to_string()),
            ("children", self.party.children.to_string()),
        ];
        fields.extend(
            self.resource
                .static_fields()
                .iter()
                .map(|(k, v)| (*k, (*v).to_string())),
        );
        fields.push(("day", self.day.to_string()));
        fields.push(("month", self.month.to_string()));
        fields.push(("nights", self.nights.to_string()));
        if let Some(origin) = &self.origin {
            fields.push(("flights-from", origin.clone()));
        }
        fields
    }
}

impl std::fmt::Display for SearchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.resource, self.day, self.month)?;
        write!(f, " x{}n", self.nights)?;
        if let Some(origin) = &self.origin {
            write!(f, " from {origin}")?;
        }
        Ok(())
    }
}
