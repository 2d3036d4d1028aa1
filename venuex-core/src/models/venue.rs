use serde::{Deserialize, Deserializer, Serialize};

use crate::error::VenuexResult;
use crate::links::SafeLink;

/// Distance used for venues that do not report one, so they sort last.
pub const MISSING_DISTANCE_KM: f64 = 999.0;

/// A bookable sports facility as returned by the backend or the mock catalog.
///
/// Only `venue_name`, `platform`, `is_bookable` and `booking_url` are always
/// present on the wire; everything else renders conditionally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub venue_name: String,
    pub platform: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub is_bookable: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub booking_url: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub available_slots: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub distance: Option<f64>,

    // Listing fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sports_offered: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slots: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_at: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Venue {
    pub fn new(venue_name: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            venue_name: venue_name.into(),
            platform: platform.into(),
            ..Default::default()
        }
    }

    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    pub fn distance_or_sentinel(&self) -> f64 {
        self.distance.unwrap_or(MISSING_DISTANCE_KM)
    }

    /// Free-form location, falling back to "area, city" from listing data.
    pub fn location_label(&self) -> Option<String> {
        if let Some(ref location) = self.location {
            return Some(location.clone());
        }
        match (self.area.as_deref(), self.city.as_deref()) {
            (Some(area), Some(city)) => Some(format!("{}, {}", area, city)),
            (Some(area), None) => Some(area.to_string()),
            (None, Some(city)) => Some(city.to_string()),
            (None, None) => None,
        }
    }

    pub fn availability_label(&self) -> &'static str {
        if self.is_bookable {
            "Available"
        } else {
            "Check"
        }
    }

    pub fn action_label(&self) -> &'static str {
        if self.is_bookable {
            "Book Now"
        } else {
            "View Details"
        }
    }

    /// Validated booking link.
    pub fn primary_link(&self) -> VenuexResult<SafeLink> {
        SafeLink::parse(&self.booking_url)
    }

    /// Validated venue detail link, when the listing has one.
    pub fn detail_link(&self) -> Option<VenuexResult<SafeLink>> {
        self.venue_url.as_deref().map(SafeLink::parse)
    }

    /// First `max` slots plus the count of the ones left out.
    pub fn slots_preview(&self, max: usize) -> (&[String], usize) {
        preview(&self.available_slots, max)
    }

    pub fn amenities_preview(&self, max: usize) -> (&[String], usize) {
        preview(&self.amenities, max)
    }
}

fn preview(items: &[String], max: usize) -> (&[String], usize) {
    let shown = items.len().min(max);
    (&items[..shown], items.len() - shown)
}
