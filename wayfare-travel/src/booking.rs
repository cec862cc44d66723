//! Mock flight and hotel bookings.
//!
//! Nothing is reserved anywhere. The [`BookingDesk`] fills in plausible
//! details (flight numbers, seats, prices) from a random generator, which can
//! be seeded for reproducible runs.

use crate::dates::{parse_travel_date, resolve_travel_date};
use crate::text::title_case;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

const DISPLAY_TIME_FORMAT: &str = "%B %d, %Y at %I:%M %p";
const QUARTER_HOURS: [u32; 4] = [0, 15, 30, 45];
const SEAT_LETTERS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];
const ROOM_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Longest stay priced from the requested dates; anything longer is treated as unparsed.
const MAX_STAY_NIGHTS: u32 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
}

/// Arguments of the `book_flight` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRequest {
    /// Departure city or airport.
    pub source: String,
    /// Arrival city or airport.
    pub destination: String,
    /// Free-form travel date.
    pub date: String,
}

impl FlightRequest {
    pub fn new(source: impl Into<String>, destination: impl Into<String>, date: impl Into<String>) -> Self {
        Self { source: source.into(), destination: destination.into(), date: date.into() }
    }
}

fn default_room_type() -> String {
    "standard".to_string()
}

/// Arguments of the `book_hotel` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelRequest {
    pub city: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub guests: u32,
    #[serde(default = "default_room_type")]
    pub room_type: String,
}

/// Result of `book_flight`, as returned to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightBooking {
    /// Always confirmed for mock bookings.
    pub status: BookingStatus,
    /// `FL` followed by four digits.
    pub flight_number: String,
    /// `SOURCE → DESTINATION`, upper-cased.
    pub route: String,
    /// The date exactly as requested.
    pub date: String,
    /// Departure time, e.g. "December 18, 2025 at 07:45 AM".
    pub departure: String,
    /// Arrival time, 2 to 8 hours after departure.
    pub arrival: String,
    /// Ticket price in dollars, e.g. "$412".
    pub price: String,
    /// Seat row and letter, e.g. "C17".
    pub seat: String,
    /// Confirmation sentence for the model to read back.
    pub message: String,
    /// Departure as a timestamp; not sent to the model.
    #[serde(skip)]
    pub departure_at: NaiveDateTime,
    /// Arrival as a timestamp; not sent to the model.
    #[serde(skip)]
    pub arrival_at: NaiveDateTime,
}

/// Result of `book_hotel`, as returned to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelBooking {
    /// Always confirmed for mock bookings.
    pub status: BookingStatus,
    /// "Grand <City> Hotel".
    pub hotel_name: String,
    /// City, upper-cased.
    pub location: String,
    /// Check-in date exactly as requested.
    pub check_in_date: String,
    /// Check-out date exactly as requested.
    pub check_out_date: String,
    pub guests: u32,
    /// Room type, title-cased.
    pub room_type: String,
    /// Floor and letter, e.g. "12B".
    pub room_number: String,
    /// From the requested dates when they parse, otherwise 1 to 7.
    pub nights: u32,
    /// Nightly rate in dollars.
    pub price_per_night: String,
    /// `price_per_night * nights` in dollars.
    pub total_price: String,
    /// `HT` followed by five digits.
    pub confirmation_number: String,
    /// Confirmation sentence for the model to read back.
    pub message: String,
}

/// Produces mock bookings.
pub struct BookingDesk {
    rng: Mutex<StdRng>,
    reference_date: Option<NaiveDate>,
}

impl std::fmt::Debug for BookingDesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingDesk").field("reference_date", &self.reference_date).finish()
    }
}

impl Default for BookingDesk {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingDesk {
    /// Desk with an entropy-seeded generator.
    pub fn new() -> Self {
        Self { rng: Mutex::new(StdRng::from_entropy()), reference_date: None }
    }

    /// Desk whose bookings are reproducible for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)), reference_date: None }
    }

    /// Pin "today" instead of reading the local clock.
    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.reference_date = Some(today);
        self
    }

    /// The date relative words are resolved against.
    pub fn today(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Book a mock flight.
    ///
    /// The departure date comes from the requested date, or a random day in
    /// the next 30 when it does not parse. Never fails.
    pub fn book_flight(&self, request: &FlightRequest) -> FlightBooking {
        let today = self.today();
        let mut rng = self.rng.lock();

        let flight_number = format!("FL{}", rng.gen_range(1000..=9999));
        let departure_date = resolve_travel_date(&request.date, today, &mut *rng);

        let hour = rng.gen_range(6..=22);
        let minute = QUARTER_HOURS[rng.gen_range(0..QUARTER_HOURS.len())];
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
        let departure_at = departure_date.and_time(time);
        let arrival_at = departure_at + TimeDelta::hours(rng.gen_range(2..=8));

        let price = rng.gen_range(200..=1000);
        let seat = format!("{}{}", SEAT_LETTERS[rng.gen_range(0..SEAT_LETTERS.len())], rng.gen_range(1..=30));
        drop(rng);

        let route = format!("{} → {}", request.source.to_uppercase(), request.destination.to_uppercase());
        let booking = FlightBooking {
            status: BookingStatus::Confirmed,
            message: format!(
                "Flight {} from {} to {} on {} has been successfully booked!",
                flight_number, request.source, request.destination, request.date
            ),
            flight_number,
            route,
            date: request.date.clone(),
            departure: departure_at.format(DISPLAY_TIME_FORMAT).to_string(),
            arrival: arrival_at.format(DISPLAY_TIME_FORMAT).to_string(),
            price: format!("${price}"),
            seat,
            departure_at,
            arrival_at,
        };

        info!(
            flight = %booking.flight_number,
            route = %booking.route,
            date = %booking.date,
            departure = %booking.departure_at.format("%Y-%m-%d %H:%M"),
            arrival = %booking.arrival_at.format("%Y-%m-%d %H:%M"),
            price = %booking.price,
            seat = %booking.seat,
            "Flight booking confirmed"
        );
        booking
    }

    /// Book a mock hotel room.
    ///
    /// Standard rooms start at $150 a night, anything else at $250, plus a
    /// random $50 to $200. Never fails.
    pub fn book_hotel(&self, request: &HotelRequest) -> HotelBooking {
        let today = self.today();
        let mut rng = self.rng.lock();

        let hotel_name = format!("Grand {} Hotel", title_case(&request.city));
        let confirmation_number = format!("HT{}", rng.gen_range(10000..=99999));

        let base_price = if request.room_type.eq_ignore_ascii_case("standard") { 150 } else { 250 };
        let price_per_night: u32 = base_price + rng.gen_range(50..=200);
        let nights = stay_length(&request.check_in_date, &request.check_out_date, today)
            .unwrap_or_else(|| rng.gen_range(1..=7));
        let total_price = u64::from(price_per_night) * u64::from(nights);

        let room_number =
            format!("{}{}", rng.gen_range(1..=20), ROOM_LETTERS[rng.gen_range(0..ROOM_LETTERS.len())]);
        drop(rng);

        let booking = HotelBooking {
            status: BookingStatus::Confirmed,
            message: format!(
                "Hotel {} in {} has been successfully booked for {} guests!",
                hotel_name, request.city, request.guests
            ),
            hotel_name,
            location: request.city.to_uppercase(),
            check_in_date: request.check_in_date.clone(),
            check_out_date: request.check_out_date.clone(),
            guests: request.guests,
            room_type: title_case(&request.room_type),
            room_number,
            nights,
            price_per_night: format!("${price_per_night}"),
            total_price: format!("${total_price}"),
            confirmation_number,
        };

        info!(
            hotel = %booking.hotel_name,
            location = %booking.location,
            check_in = %booking.check_in_date,
            check_out = %booking.check_out_date,
            guests = booking.guests,
            room_type = %booking.room_type,
            room = %booking.room_number,
            nights = booking.nights,
            total = %booking.total_price,
            confirmation = %booking.confirmation_number,
            "Hotel booking confirmed"
        );
        booking
    }
}

/// Nights between two dates when both parse, check-out is after check-in,
/// and the stay is at most [`MAX_STAY_NIGHTS`].
fn stay_length(check_in: &str, check_out: &str, today: NaiveDate) -> Option<u32> {
    let check_in = parse_travel_date(check_in, today)?;
    let check_out = parse_travel_date(check_out, today)?;
    let nights = u32::try_from((check_out - check_in).num_days()).ok()?;
    (1..=MAX_STAY_NIGHTS).contains(&nights).then_some(nights)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desk() -> BookingDesk {
        BookingDesk::seeded(11).with_reference_date(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap())
    }

    #[test]
    fn test_flight_shape() {
        let booking = desk().book_flight(&FlightRequest::new("New York", "Paris", "2025-12-18"));

        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.route, "NEW YORK → PARIS");
        assert_eq!(booking.date, "2025-12-18");
        assert!(booking.flight_number.starts_with("FL"));
        assert_eq!(booking.flight_number.len(), 6);
        assert_eq!(booking.departure_at.date(), NaiveDate::from_ymd_opt(2025, 12, 18).unwrap());
        assert!(booking.departure.starts_with("December 18, 2025 at "));

        let hours = (booking.arrival_at - booking.departure_at).num_hours();
        assert!((2..=8).contains(&hours));
        assert!(booking.message.contains("from New York to Paris on 2025-12-18"));
    }

    #[test]
    fn test_flight_json_keys() {
        let booking = desk().book_flight(&FlightRequest::new("NYC", "LAX", "tomorrow"));
        let value = serde_json::to_value(&booking).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            ["arrival", "date", "departure", "flight_number", "message", "price", "route", "seat", "status"]
        );
        assert_eq!(value["status"], "confirmed");
    }

    #[test]
    fn test_seeded_desks_agree() {
        let request = FlightRequest::new("NYC", "LAX", "banana");
        assert_eq!(desk().book_flight(&request), desk().book_flight(&request));
    }

    #[test]
    fn test_hotel_nights_from_dates() {
        let request = HotelRequest {
            city: "new york".into(),
            check_in_date: "2025-12-18".into(),
            check_out_date: "December 21, 2025".into(),
            guests: 2,
            room_type: "deluxe".into(),
        };
        let booking = desk().book_hotel(&request);

        assert_eq!(booking.hotel_name, "Grand New York Hotel");
        assert_eq!(booking.location, "NEW YORK");
        assert_eq!(booking.room_type, "Deluxe");
        assert_eq!(booking.nights, 3);
        assert!(booking.confirmation_number.starts_with("HT"));
        assert_eq!(booking.message, "Hotel Grand New York Hotel in new york has been successfully booked for 2 guests!");

        let per_night: u32 = booking.price_per_night.trim_start_matches('$').parse().unwrap();
        assert!((300..=450).contains(&per_night));
        assert_eq!(booking.total_price, format!("${}", per_night * 3));
    }

    #[test]
    fn test_hotel_nights_fallback() {
        let request: HotelRequest = serde_json::from_value(serde_json::json!({
            "city": "Paris",
            "check_in_date": "tomorrow",
            "check_out_date": "3 days later",
            "guests": 1
        }))
        .unwrap();
        assert_eq!(request.room_type, "standard");

        let booking = desk().book_hotel(&request);
        assert!((1..=7).contains(&booking.nights));
        let per_night: u32 = booking.price_per_night.trim_start_matches('$').parse().unwrap();
        assert!((200..=350).contains(&per_night));
    }

    #[test]
    fn test_stay_length() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(stay_length("today", "2025-12-04", today), Some(3));
        assert_eq!(stay_length("2025-12-04", "2025-12-01", today), None);
        assert_eq!(stay_length("2025-12-04", "2025-12-04", today), None);
        assert_eq!(stay_length("soon", "2025-12-04", today), None);
        assert_eq!(stay_length("2025-01-01", "2026-01-01", today), Some(365));
        assert_eq!(stay_length("2025-01-01", "2026-01-02", today), None);
        assert_eq!(stay_length("-200000-01-01", "2025-12-01", today), None);
    }

    #[test]
    fn test_hotel_far_past_check_in_uses_fallback() {
        let request = HotelRequest {
            city: "Oslo".into(),
            check_in_date: "-200000-01-01".into(),
            check_out_date: "2025-12-01".into(),
            guests: 1,
            room_type: "standard".into(),
        };
        let booking = desk().book_hotel(&request);

        assert!((1..=7).contains(&booking.nights));
        let per_night: u64 = booking.price_per_night.trim_start_matches('$').parse().unwrap();
        assert_eq!(booking.total_price, format!("${}", per_night * u64::from(booking.nights)));
    }
}
