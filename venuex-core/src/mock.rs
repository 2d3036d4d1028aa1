//! Static catalog data used by the agent pages, the example query buttons
//! and the standalone venue listing.

use std::path::Path;

use tracing::info;

use crate::error::{VenuexError, VenuexResult};
use crate::models::{Agent, AgentStatus, Task, TaskStatus, Venue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleQuery {
    pub text: &'static str,
    pub description: &'static str,
}

pub const EXAMPLE_QUERIES: [ExampleQuery; 4] = [
    ExampleQuery {
        text: "Find cricket venues in Mumbai",
        description: "Cricket in Mumbai",
    },
    ExampleQuery {
        text: "I need badminton courts in Kakkanad",
        description: "Badminton in Kakkanad",
    },
    ExampleQuery {
        text: "Show me football grounds in Bangalore",
        description: "Football in Bangalore",
    },
    ExampleQuery {
        text: "Find cricket venues in Delhi for weekend",
        description: "Cricket in Delhi",
    },
];

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn agents() -> Vec<Agent> {
    vec![
        Agent {
            id: "1".to_string(),
            name: "Sports Venue Finder".to_string(),
            description: "Finds and compares bookable sports venues across Playo, Hudle and district listings".to_string(),
            status: AgentStatus::Running,
            integrations: tags(&["calendar", "gmail"]),
            created: "2024-01-15".to_string(),
            modified: "2024-03-02".to_string(),
            last_active: "2 minutes ago".to_string(),
            runs: 142,
        },
        Agent {
            id: "2".to_string(),
            name: "Weekly Booking Digest".to_string(),
            description: "Summarizes upcoming bookings and emails a weekly report".to_string(),
            status: AgentStatus::Idle,
            integrations: tags(&["gmail", "notion"]),
            created: "2024-02-01".to_string(),
            modified: "2024-02-20".to_string(),
            last_active: "3 days ago".to_string(),
            runs: 18,
        },
        Agent {
            id: "3".to_string(),
            name: "Slot Availability Monitor".to_string(),
            description: "Watches favourite venues and reports newly opened slots".to_string(),
            status: AgentStatus::Error,
            integrations: tags(&["calendar"]),
            created: "2024-02-11".to_string(),
            modified: "2024-02-28".to_string(),
            last_active: "1 day ago".to_string(),
            runs: 57,
        },
    ]
}

pub fn find_agent_by_id(id: &str) -> Option<Agent> {
    agents().into_iter().find(|agent| agent.id == id)
}

pub fn tasks() -> Vec<Task> {
    vec![
        Task {
            id: "1".to_string(),
            title: "Check calendar for upcoming meetings".to_string(),
            description: None,
            status: TaskStatus::Completed,
            time: "2 hours ago".to_string(),
            integration: "calendar".to_string(),
        },
        Task {
            id: "2".to_string(),
            title: "Send weekly report summary to email".to_string(),
            description: None,
            status: TaskStatus::Completed,
            time: "5 hours ago".to_string(),
            integration: "gmail".to_string(),
        },
        Task {
            id: "3".to_string(),
            title: "Schedule reminder for project deadline".to_string(),
            description: None,
            status: TaskStatus::Scheduled,
            time: "Tomorrow at 9:00 AM".to_string(),
            integration: "calendar".to_string(),
        },
        Task {
            id: "4".to_string(),
            title: "Summarize Notion meeting notes".to_string(),
            description: Some("Notion API token expired".to_string()),
            status: TaskStatus::Failed,
            time: "1 day ago".to_string(),
            integration: "notion".to_string(),
        },
    ]
}

fn listing(
    id: &str,
    name: &str,
    platform: &str,
    city: &str,
    area: &str,
    sport: &str,
    rating: Option<f64>,
    distance: Option<f64>,
    bookable: bool,
) -> Venue {
    let slug = name.to_lowercase().replace(' ', "-");
    Venue {
        venue_id: Some(id.to_string()),
        city: Some(city.to_string()),
        area: Some(area.to_string()),
        sport: Some(sport.to_string()),
        sports_offered: vec![sport.to_string()],
        rating,
        distance,
        is_bookable: bookable,
        booking_url: if bookable {
            format!("https://{}.example.com/book/{}", platform.to_lowercase(), slug)
        } else {
            String::new()
        },
        venue_url: Some(format!(
            "https://{}.example.com/venues/{}",
            platform.to_lowercase(),
            slug
        )),
        ..Venue::new(name, platform)
    }
}

/// Listing used when no venue file is supplied.
pub fn sample_venues() -> Vec<Venue> {
    let mut venues = vec![
        listing("mum-001", "Shivaji Park Nets", "Playo", "Mumbai", "Dadar", "cricket", Some(4.6), Some(2.4), true),
        listing("mum-002", "Andheri Sports Complex", "Hudle", "Mumbai", "Andheri", "cricket", Some(4.2), Some(8.1), true),
        listing("mum-003", "Bandra Box Cricket", "Playo", "Mumbai", "Bandra", "cricket", None, None, false),
        listing("del-001", "Siri Fort Sports Complex", "Playo", "Delhi", "Siri Fort", "cricket", Some(4.4), Some(5.0), true),
        listing("del-002", "Saket Turf Arena", "Hudle", "Delhi", "Saket", "football", Some(3.9), Some(3.2), false),
        listing("blr-001", "Koramangala Football Turf", "Playo", "Bangalore", "Koramangala", "football", Some(4.7), Some(1.8), true),
        listing("blr-002", "Whitefield Kickoff Arena", "Hudle", "Bangalore", "Whitefield", "football", Some(4.1), None, true),
        listing("kkd-001", "Smash Badminton Academy", "Playo", "Kochi", "Kakkanad", "badminton", Some(4.5), Some(1.1), true),
        listing("kkd-002", "Infopark Shuttle Courts", "Hudle", "Kochi", "Kakkanad", "badminton", Some(3.8), Some(2.7), false),
    ];

    for venue in venues.iter_mut() {
        venue.price_range = Some("₹600 - ₹1200/hr".to_string());
        venue.available_slots = tags(&["6:00 AM", "7:00 AM", "6:00 PM", "8:00 PM"]);
        venue.amenities = tags(&["Parking", "Floodlights", "Changing Room", "Drinking Water"]);
    }
    venues
}

/// Reads a JSON array of venues, as produced by the listing scrapers.
pub fn load_venues_from_file(path: &Path) -> VenuexResult<Vec<Venue>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        VenuexError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let venues: Vec<Venue> = serde_json::from_str(&content)?;
    info!(count = venues.len(), path = %path.display(), "Loaded venue listing");
    Ok(venues)
}
