//! Client-side search, filtering and sorting over a venue listing.
//!
//! Everything here is a pure function of its inputs and is recomputed on
//! every render; the underlying venue slice is never modified.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VenuexError;
use crate::models::Venue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Rating,
    Distance,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        &[SortKey::Name, SortKey::Rating, SortKey::Distance]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Sort by Name",
            SortKey::Rating => "Sort by Rating",
            SortKey::Distance => "Sort by Distance",
        }
    }

    pub fn next(&self) -> SortKey {
        match self {
            SortKey::Name => SortKey::Rating,
            SortKey::Rating => SortKey::Distance,
            SortKey::Distance => SortKey::Name,
        }
    }

    fn compare(&self, a: &Venue, b: &Venue) -> Ordering {
        match self {
            SortKey::Name => a
                .venue_name
                .to_lowercase()
                .cmp(&b.venue_name.to_lowercase()),
            SortKey::Rating => b.rating_or_zero().total_cmp(&a.rating_or_zero()),
            SortKey::Distance => a
                .distance_or_sentinel()
                .total_cmp(&b.distance_or_sentinel()),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::Rating => write!(f, "rating"),
            SortKey::Distance => write!(f, "distance"),
        }
    }
}

impl FromStr for SortKey {
    type Err = VenuexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "rating" => Ok(SortKey::Rating),
            "distance" => Ok(SortKey::Distance),
            other => Err(VenuexError::ValidationError(format!(
                "Unknown sort key '{}'. Expected name, rating or distance",
                other
            ))),
        }
    }
}

/// User-controlled listing options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueFilter {
    pub search_term: String,
    pub bookable_only: bool,
    pub sort_key: SortKey,
}

impl VenueFilter {
    pub fn new(search_term: impl Into<String>, bookable_only: bool, sort_key: SortKey) -> Self {
        Self {
            search_term: search_term.into(),
            bookable_only,
            sort_key,
        }
    }

    /// True when either the search or the bookable toggle narrows the list.
    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty() || self.bookable_only
    }

    pub fn matches(&self, venue: &Venue) -> bool {
        let term = self.search_term.to_lowercase();
        let contains = |field: Option<&str>| field.is_some_and(|f| f.to_lowercase().contains(&term));

        let matches_search = contains(Some(&venue.venue_name))
            || contains(venue.area.as_deref())
            || contains(venue.city.as_deref());

        matches_search && (!self.bookable_only || venue.is_bookable)
    }

    pub fn apply<'a>(&self, venues: &'a [Venue]) -> Vec<&'a Venue> {
        let mut view: Vec<&Venue> = venues.iter().filter(|v| self.matches(v)).collect();
        // sort_by is stable, so ties keep their listing order
        view.sort_by(|a, b| self.sort_key.compare(a, b));
        view
    }
}

/// Filters and sorts `venues` into a new ordered view.
pub fn filter_and_sort<'a>(
    venues: &'a [Venue],
    search_term: &str,
    bookable_only: bool,
    sort_key: SortKey,
) -> Vec<&'a Venue> {
    VenueFilter::new(search_term, bookable_only, sort_key).apply(venues)
}

/// Headline numbers over the whole, unfiltered listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VenueStats {
    pub total: usize,
    pub bookable: usize,
    /// `None` for an empty listing.
    pub mean_rating: Option<f64>,
}

impl VenueStats {
    pub fn from_venues(venues: &[Venue]) -> Self {
        let bookable = venues.iter().filter(|v| v.is_bookable).count();
        let mean_rating = if venues.is_empty() {
            None
        } else {
            let sum: f64 = venues.iter().map(Venue::rating_or_zero).sum();
            Some(sum / venues.len() as f64)
        };

        Self {
            total: venues.len(),
            bookable,
            mean_rating,
        }
    }

    /// "4.2 avg rating", shown only when there is a positive mean.
    pub fn mean_rating_label(&self) -> Option<String> {
        self.mean_rating
            .filter(|mean| *mean > 0.0)
            .map(|mean| format!("{:.1} avg rating", mean))
    }
}

/// A filtered listing plus the text that accompanies it.
#[derive(Debug, Clone)]
pub struct VenueView<'a> {
    pub venues: Vec<&'a Venue>,
    pub stats: VenueStats,
    filter: VenueFilter,
}

impl<'a> VenueView<'a> {
    pub fn build(venues: &'a [Venue], filter: &VenueFilter) -> Self {
        Self {
            venues: filter.apply(venues),
            stats: VenueStats::from_venues(venues),
            filter: filter.clone(),
        }
    }

    pub fn shown(&self) -> usize {
        self.venues.len()
    }

    pub fn total(&self) -> usize {
        self.stats.total
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    /// Footer line, e.g. `Showing 2 of 5 venues • Search: "delhi"`.
    pub fn summary_line(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut line = format!("Showing {} of {} venues", self.shown(), self.total());
        if !self.filter.search_term.is_empty() {
            line.push_str(&format!(" • Search: \"{}\"", self.filter.search_term));
        }
        if self.filter.bookable_only {
            line.push_str(" • Available only");
        }
        Some(line)
    }

    pub fn empty_message(&self) -> &'static str {
        if self.filter.is_active() {
            "Try adjusting your search or filters"
        } else {
            "No venues available for this location and sport"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue(name: &str, city: &str, bookable: bool, rating: Option<f64>) -> Venue {
        Venue {
            city: Some(city.to_string()),
            is_bookable: bookable,
            rating,
            ..Venue::new(name, "Playo")
        }
    }

    #[test]
    fn test_sort_key_parse_and_cycle() {
        assert_eq!("Rating".parse::<SortKey>().unwrap(), SortKey::Rating);
        assert_eq!(" distance ".parse::<SortKey>().unwrap(), SortKey::Distance);
        assert!("price".parse::<SortKey>().is_err());

        assert_eq!(SortKey::Name.next(), SortKey::Rating);
        assert_eq!(SortKey::Distance.next(), SortKey::Name);
        assert_eq!(SortKey::default(), SortKey::Name);
    }

    #[test]
    fn test_matches_area_case_insensitively() {
        let mut v = venue("Smash Arena", "Kochi", true, None);
        v.area = Some("Kakkanad".to_string());

        assert!(VenueFilter::new("KAKKA", false, SortKey::Name).matches(&v));
        assert!(VenueFilter::new("kochi", false, SortKey::Name).matches(&v));
        assert!(VenueFilter::new("smash", false, SortKey::Name).matches(&v));
        assert!(!VenueFilter::new("delhi", false, SortKey::Name).matches(&v));
    }

    #[test]
    fn test_missing_area_and_city_never_match_term() {
        let v = Venue::new("Court", "Playo");
        assert!(!VenueFilter::new("mumbai", false, SortKey::Name).matches(&v));
        assert!(VenueFilter::new("", false, SortKey::Name).matches(&v));
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let venues = vec![
            venue("delta turf", "Delhi", true, None),
            venue("Alpha Courts", "Mumbai", true, None),
            venue("bravo Ground", "Mumbai", true, None),
        ];
        let names: Vec<_> = filter_and_sort(&venues, "", false, SortKey::Name)
            .iter()
            .map(|v| v.venue_name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha Courts", "bravo Ground", "delta turf"]);
    }

    #[test]
    fn test_stats_empty_listing_has_no_mean() {
        let stats = VenueStats::from_venues(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.bookable, 0);
        assert_eq!(stats.mean_rating, None);
        assert_eq!(stats.mean_rating_label(), None);
    }

    #[test]
    fn test_stats_counts_missing_rating_as_zero() {
        let venues = vec![
            venue("A", "Mumbai", true, Some(4.0)),
            venue("B", "Delhi", false, None),
        ];
        let stats = VenueStats::from_venues(&venues);
        assert_eq!(stats.bookable, 1);
        assert_eq!(stats.mean_rating, Some(2.0));
        assert_eq!(stats.mean_rating_label().as_deref(), Some("2.0 avg rating"));
    }

    #[test]
    fn test_view_summary_and_empty_message() {
        let venues = vec![
            venue("Court A", "Mumbai", true, Some(4.5)),
            venue("Court B", "Delhi", false, Some(3.0)),
        ];

        let filter = VenueFilter::new("delhi", false, SortKey::Name);
        let view = VenueView::build(&venues, &filter);
        assert_eq!(
            view.summary_line().as_deref(),
            Some("Showing 1 of 2 venues • Search: \"delhi\"")
        );

        let filter = VenueFilter::new("pune", true, SortKey::Name);
        let view = VenueView::build(&venues, &filter);
        assert!(view.is_empty());
        assert_eq!(view.summary_line(), None);
        assert_eq!(view.empty_message(), "Try adjusting your search or filters");

        let view = VenueView::build(&[], &VenueFilter::default());
        assert_eq!(
            view.empty_message(),
            "No venues available for this location and sport"
        );
    }
}
