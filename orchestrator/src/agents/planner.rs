// Planner Agent: turns a free-text prompt into a structured trip request

use std::num::NonZeroU32;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info};

use crate::interest::Interest;
use crate::models::{DateRange, TripRequest, UserPreferences};

const DEFAULT_DESTINATION: &str = "Munich, Germany";
const DEFAULT_TRIP_DAYS: u32 = 3;
const DEFAULT_BUDGET: u32 = 800;
const DEFAULT_INTERESTS: &[&str] = &["history", "beer", "Oktoberfest"];

const KNOWN_CITIES: &[(&str, &str)] = &[
    ("Munich", "Germany"),
    ("Berlin", "Germany"),
    ("Hamburg", "Germany"),
    ("Vienna", "Austria"),
    ("Salzburg", "Austria"),
    ("Amsterdam", "Netherlands"),
    ("Paris", "France"),
    ("Prague", "Czech Republic"),
    ("Rome", "Italy"),
];

lazy_static! {
    static ref KNOWN_CITY: Regex = {
        let names: Vec<&str> = KNOWN_CITIES.iter().map(|(name, _)| *name).collect();
        Regex::new(&format!(r"\b({})\b", names.join("|"))).unwrap()
    };
    static ref DESTINATION: Regex =
        Regex::new(r"\b[Tt]o\s+(\p{Lu}\p{L}+(?:[ -]\p{Lu}\p{L}+)*)").unwrap();
    static ref ISO_DATE: Regex = Regex::new(r"\b(\d{4}-\d{2}-\d{2})\b").unwrap();
    static ref DAY_COUNT: Regex = Regex::new(r"(?i)\b(\d{1,2})[- ]days?\b").unwrap();
    static ref WEEK: Regex = Regex::new(r"(?i)\bweek\b").unwrap();
    static ref BUDGET: Regex = Regex::new(r"\$\s?(\d[\d,]*)").unwrap();
    static ref TRAVELERS: Regex =
        Regex::new(r"(?i)\b(\d{1,2})\s+(?:people|persons|travell?ers|adults|guests)\b").unwrap();
}

pub struct PlannerAgent {
    default_start: NaiveDate,
}

impl PlannerAgent {
    pub fn new() -> Self {
        Self {
            default_start: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap_or_default(),
        }
    }

    /// Request used when a prompt names nothing the planner recognizes.
    pub fn default_request() -> TripRequest {
        Self::new().base_request()
    }

    fn base_request(&self) -> TripRequest {
        TripRequest {
            destination: DEFAULT_DESTINATION.to_string(),
            dates: DateRange::starting(self.default_start, DEFAULT_TRIP_DAYS),
            budget: NonZeroU32::new(DEFAULT_BUDGET).unwrap_or(NonZeroU32::MIN),
            interests: DEFAULT_INTERESTS.iter().map(|s| s.to_string()).collect(),
            travelers: NonZeroU32::MIN,
        }
    }

    /// Fill a request from the prompt, falling back to remembered interests and then defaults.
    pub fn parse(&self, prompt: &str, remembered: Option<&UserPreferences>) -> TripRequest {
        info!("Planner: Parsing prompt: {}", prompt);
        let mut request = self.base_request();

        if let Some(destination) = Self::parse_destination(prompt) {
            request.destination = destination;
        }

        request.dates = self.parse_dates(prompt);

        if let Some(budget) = BUDGET
            .captures(prompt)
            .and_then(|c| c[1].replace(',', "").parse::<u32>().ok())
            .and_then(NonZeroU32::new)
        {
            request.budget = budget;
        }

        if let Some(travelers) = TRAVELERS
            .captures(prompt)
            .and_then(|c| c[1].parse::<u32>().ok())
            .and_then(NonZeroU32::new)
        {
            request.travelers = travelers;
        }

        if let Some(prefs) = remembered.filter(|p| !p.interests.is_empty()) {
            debug!("Planner: Reusing remembered interests {:?}", prefs.interests);
            request.interests = prefs.interests.clone();
        }

        let mentioned = Interest::mentioned_in(prompt);
        if request.destination == DEFAULT_DESTINATION {
            // the default trip keeps its themes; mentions only add to them
            extend_interests(&mut request.interests, mentioned);
        } else if !mentioned.is_empty() {
            request.interests = mentioned;
        }

        request
    }

    /// Prefer a known city after "to", then a known city anywhere, then the raw words after "to".
    fn parse_destination(prompt: &str) -> Option<String> {
        let after_to = DESTINATION.captures(prompt).map(|c| c[1].to_string());
        let known = after_to.as_deref().and_then(known_city);
        known.or_else(|| known_city(prompt)).or(after_to)
    }

    fn parse_dates(&self, prompt: &str) -> DateRange {
        let explicit: Vec<NaiveDate> = ISO_DATE
            .captures_iter(prompt)
            .filter_map(|c| c[1].parse().ok())
            .collect();

        let days = DAY_COUNT
            .captures(prompt)
            .and_then(|c| c[1].parse::<u32>().ok())
            .filter(|days| *days > 0)
            .or_else(|| WEEK.is_match(prompt).then_some(7))
            .unwrap_or(DEFAULT_TRIP_DAYS);

        match explicit.as_slice() {
            [start, end, ..] => {
                DateRange::new(*start, *end).unwrap_or_else(|_| DateRange::starting(*start, days))
            }
            [start] => DateRange::starting(*start, days),
            [] => DateRange::starting(self.default_start, days),
        }
    }
}

fn known_city(text: &str) -> Option<String> {
    let found = KNOWN_CITY.find(text)?;
    KNOWN_CITIES
        .iter()
        .find(|(name, _)| *name == found.as_str())
        .map(|(name, country)| format!("{}, {}", name, country))
}

fn extend_interests(interests: &mut Vec<String>, extra: Vec<String>) {
    for tag in extra {
        if !interests.iter().any(|known| known.eq_ignore_ascii_case(&tag)) {
            interests.push(tag);
        }
    }
}

impl Default for PlannerAgent {
    fn default() -> Self {
        Self::new()
    }
}
