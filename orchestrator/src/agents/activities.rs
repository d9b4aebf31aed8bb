// Activities Agent: filters the activity catalog by the request's interests

use tracing::{info, warn};

use crate::interest::Interest;
use crate::models::{Activity, TimeSlot, TripRequest};

pub struct ActivitiesAgent {
    catalog: Vec<Activity>,
}

impl ActivitiesAgent {
    pub fn new() -> Self {
        Self::with_catalog(default_catalog())
    }

    pub fn with_catalog(catalog: Vec<Activity>) -> Self {
        Self { catalog }
    }

    /// Catalog entries sharing at least one category with the request, in catalog order.
    pub fn search(&self, request: &TripRequest) -> Vec<Activity> {
        let wanted = request.interest_categories();
        if wanted.is_empty() {
            warn!("Activities: No recognized interests in {:?}", request.interests);
            return Vec::new();
        }

        let matches: Vec<Activity> = self
            .catalog
            .iter()
            .filter(|activity| Interest::matches_any(&activity.categories, &wanted))
            .cloned()
            .collect();

        info!("Activities: {} matches for {:?}", matches.len(), wanted);
        matches
    }
}

impl Default for ActivitiesAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    name: &str,
    description: &str,
    location: &str,
    slots: &[TimeSlot],
    price: u64,
    rating: f32,
    categories: &[Interest],
) -> Activity {
    Activity {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        location: location.to_string(),
        time_slots: slots.to_vec(),
        price,
        rating,
        categories: categories.to_vec(),
    }
}

fn default_catalog() -> Vec<Activity> {
    vec![
        entry(
            "act_001",
            "Marienplatz Historical Tour",
            "Guided tour of Munich's historic city center",
            "Marienplatz",
            &[TimeSlot::at(10, 0), TimeSlot::at(14, 0), TimeSlot::at(16, 0)],
            25,
            4.6,
            &[Interest::History],
        ),
        entry(
            "act_002",
            "Hofbräu Beer Garden",
            "Traditional Bavarian beer garden experience",
            "Hofbräu München",
            &[TimeSlot::at(12, 0), TimeSlot::at(17, 0), TimeSlot::at(19, 0)],
            15,
            4.4,
            &[Interest::Beer, Interest::Festivals, Interest::Nightlife],
        ),
        entry(
            "act_003",
            "Viktualienmarkt Food Walk",
            "Tasting stroll through the central food market",
            "Viktualienmarkt",
            &[TimeSlot::at(11, 0), TimeSlot::at(15, 0)],
            35,
            4.5,
            &[Interest::Food, Interest::Shopping],
        ),
        entry(
            "act_004",
            "Deutsches Museum",
            "Science and technology collections on the Museumsinsel",
            "Museumsinsel 1",
            &[TimeSlot::at(9, 0), TimeSlot::at(13, 0)],
            20,
            4.7,
            &[Interest::Museums, Interest::History],
        ),
        entry(
            "act_005",
            "Alte Pinakothek",
            "Old masters gallery",
            "Barer Straße 27",
            &[TimeSlot::at(10, 0), TimeSlot::at(15, 0)],
            9,
            4.6,
            &[Interest::Art, Interest::Museums],
        ),
        entry(
            "act_006",
            "Bavarian State Opera Evening",
            "Evening performance at the National Theatre",
            "Max-Joseph-Platz 2",
            &[TimeSlot::at(19, 0)],
            60,
            4.8,
            &[Interest::Music],
        ),
        entry(
            "act_007",
            "Englischer Garten Walk",
            "Self-guided walk to the Eisbach surfers and Chinese Tower",
            "Englischer Garten",
            &[],
            0,
            4.7,
            &[Interest::Nature],
        ),
    ]
}
