// Flights & Hotels Agent: returns transport and lodging candidates for a request

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{Flight, Hotel, TimeSlot, TripRequest};

const BOOKING_BASE_URL: &str = "https://example.com/book";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightsHotels {
    pub flights: Vec<Flight>,
    pub hotels: Vec<Hotel>,
}

pub struct FlightsHotelsAgent {
    booking_base_url: String,
}

impl FlightsHotelsAgent {
    pub fn new() -> Self {
        Self {
            booking_base_url: BOOKING_BASE_URL.to_string(),
        }
    }

    pub fn search(&self, request: &TripRequest) -> FlightsHotels {
        info!("FlightsHotels: Searching options for {}", request.destination);

        let flight = Flight {
            id: "flight_001".to_string(),
            price: 450,
            duration: "2h 30m".to_string(),
            departure: TimeSlot::at(10, 30),
            arrival: TimeSlot::at(13, 0),
            booking_link: Some(self.booking_link("flight_001")),
        };

        let hotel = Hotel {
            id: "hotel_001".to_string(),
            name: format!("{} City Hotel", request.city()),
            price: 120,
            rating: 4.2,
            check_in: Some(request.dates.start()),
            check_out: Some(request.dates.end()),
            booking_link: Some(self.booking_link("hotel_001")),
        };

        FlightsHotels {
            flights: vec![flight],
            hotels: vec![hotel],
        }
    }

    fn booking_link(&self, option_id: &str) -> String {
        format!("{}/{}", self.booking_base_url, option_id)
    }
}

impl Default for FlightsHotelsAgent {
    fn default() -> Self {
        Self::new()
    }
}
