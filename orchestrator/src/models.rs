use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PlanError;
use crate::interest::Interest;

/// Longest trip a single request may span, in calendar days.
pub const MAX_TRIP_DAYS: u32 = 366;

/// Inclusive calendar date range. `start <= end` and a span of at most
/// [`MAX_TRIP_DAYS`] hold for every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = PlanError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start_date, raw.end_date)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PlanError> {
        if end < start {
            return Err(PlanError::InvalidRange { start, end });
        }
        let days = (end - start).num_days() + 1;
        if days > i64::from(MAX_TRIP_DAYS) {
            return Err(PlanError::RangeTooLong {
                days,
                max: MAX_TRIP_DAYS,
            });
        }
        Ok(Self {
            start_date: start,
            end_date: end,
        })
    }

    /// Range of `days` days beginning at `start`; zero is treated as one day
    /// and anything past [`MAX_TRIP_DAYS`] is clamped.
    pub fn starting(start: NaiveDate, days: u32) -> Self {
        let days = days.clamp(1, MAX_TRIP_DAYS);
        let end = start
            .checked_add_days(Days::new(u64::from(days - 1)))
            .unwrap_or(start);
        Self {
            start_date: start,
            end_date: end,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end(&self) -> NaiveDate {
        self.end_date
    }

    /// Number of calendar days, counting both endpoints.
    pub fn day_count(&self) -> usize {
        (self.end_date - self.start_date).num_days() as usize + 1
    }

    /// Every date in the range in chronological order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start_date.iter_days().take(self.day_count())
    }
}

/// A structured trip request, either posted directly or parsed from a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub destination: String,
    #[serde(flatten)]
    pub dates: DateRange,
    pub budget: NonZeroU32,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default = "default_travelers")]
    pub travelers: NonZeroU32,
}

fn default_travelers() -> NonZeroU32 {
    NonZeroU32::MIN
}

impl TripRequest {
    /// Interest tags mapped onto the fixed vocabulary. Unknown tags are dropped.
    pub fn interest_categories(&self) -> Vec<Interest> {
        Interest::parse_all(&self.interests)
    }

    /// City part of the destination ("Munich, Germany" -> "Munich").
    pub fn city(&self) -> &str {
        self.destination
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or_default()
    }
}

/// Time of day with minute precision, written as `HH:MM` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(u16);

impl TimeSlot {
    pub const fn at(hour: u16, minute: u16) -> Self {
        Self(hour * 60 + minute)
    }

    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    pub fn minute(&self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("expected HH:MM, got {:?}", s))?;
        let hour: u16 = hour.parse().map_err(|_| format!("invalid hour in {:?}", s))?;
        let minute: u16 = minute
            .parse()
            .map_err(|_| format!("invalid minute in {:?}", s))?;
        if hour > 23 || minute > 59 {
            return Err(format!("time out of range: {:?}", s));
        }
        Ok(Self::at(hour, minute))
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A priced option supplied by a catalog agent.
pub trait Candidate {
    fn id(&self) -> &str;
    fn price(&self) -> u64;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: String,
    pub price: u64,
    pub duration: String,
    pub departure: TimeSlot,
    pub arrival: TimeSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    /// Nightly price.
    pub price: u64,
    pub rating: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: String,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
    pub price: u64,
    pub rating: f32,
    #[serde(default)]
    pub categories: Vec<Interest>,
}

impl Candidate for Flight {
    fn id(&self) -> &str {
        &self.id
    }

    fn price(&self) -> u64 {
        self.price
    }
}

impl Candidate for Hotel {
    fn id(&self) -> &str {
        &self.id
    }

    fn price(&self) -> u64 {
        self.price
    }
}

impl Candidate for Activity {
    fn id(&self) -> &str {
        &self.id
    }

    fn price(&self) -> u64 {
        self.price
    }
}

/// One activity placed on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityBooking {
    pub time: TimeSlot,
    pub activity_id: String,
    pub activity: String,
    pub location: String,
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub day_name: String,
    pub activities: Vec<ActivityBooking>,
    pub accommodation: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub transportation: u64,
    pub lodging: u64,
    pub activities: u64,
    pub total: u64,
}

/// The assembled plan returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    pub request: TripRequest,
    pub transportation: Vec<Flight>,
    pub accommodation: Vec<Hotel>,
    pub activities: Vec<Activity>,
    pub daily_plan: Vec<DayPlan>,
    pub cost: CostBreakdown,
}

impl TripPlan {
    pub fn total_cost(&self) -> u64 {
        self.cost.total
    }

    pub fn duration(&self) -> String {
        format!("{} days", self.daily_plan.len())
    }

    pub fn within_budget(&self) -> bool {
        self.total_cost() <= u64::from(self.request.budget.get())
    }

    /// Budget left after the estimated cost, zero when over budget.
    pub fn remaining_budget(&self) -> u64 {
        u64::from(self.request.budget.get()).saturating_sub(self.total_cost())
    }
}

/// Last-seen preferences kept per user between requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub budget: u32,
    pub interests: Vec<String>,
    pub last_destination: String,
}

impl From<&TripRequest> for UserPreferences {
    fn from(request: &TripRequest) -> Self {
        Self {
            budget: request.budget.get(),
            interests: request.interests.clone(),
            last_destination: request.destination.clone(),
        }
    }
}

// API Request/Response models
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    pub request: TripRequest,
}

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlanQuery {
    #[serde(default)]
    pub format: Option<String>,
}

/// Pipeline output: plan, status line, narrative summary and stored preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutcome {
    pub trip_plan: TripPlan,
    pub message: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_memory: Option<UserPreferences>,
}
