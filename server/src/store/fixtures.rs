use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::models::{Attendees, Event, EventType, RsvpStatus};

const SEED_IMAGE_URL: &str = "https://placehold.co/1200x600.png";

struct Seed {
    name: &'static str,
    event_type: EventType,
    date: (i32, u32, u32, u32, u32),
    location: &'static str,
    description: &'static str,
    organizer: &'static str,
    going: u32,
    interested: u32,
    rsvp: Option<RsvpStatus>,
}

const SEEDS: [Seed; 4] = [
    Seed {
        name: "Global Tech Summit 2024",
        event_type: EventType::Conference,
        date: (2024, 8, 10, 10, 0),
        location: "Virtual Event",
        description: "Join thousands of tech enthusiasts and professionals at the Global Tech Summit. Explore the latest trends in AI, blockchain, and cloud computing with industry leaders.",
        organizer: "Tech Innovations Inc.",
        going: 1200,
        interested: 3400,
        rsvp: None,
    },
    Seed {
        name: "Creative Coding Workshop",
        event_type: EventType::Workshop,
        date: (2024, 8, 25, 14, 0),
        location: "123 Art Avenue, Metropia",
        description: "Unleash your creativity in our hands-on coding workshop. Learn to build interactive art and visualizations using modern web technologies. No prior experience needed!",
        organizer: "Art & Code Collective",
        going: 45,
        interested: 150,
        rsvp: Some(RsvpStatus::Interested),
    },
    Seed {
        name: "Startup Founders Meetup",
        event_type: EventType::Meetup,
        date: (2024, 9, 5, 18, 30),
        location: "The Hub Co-working, Capital City",
        description: "Connect with fellow startup founders, share your journey, and find potential collaborators. A great networking opportunity for entrepreneurs at any stage.",
        organizer: "Founder Circle",
        going: 88,
        interested: 210,
        rsvp: None,
    },
    Seed {
        name: "Summer Music Fest",
        event_type: EventType::Social,
        date: (2024, 9, 20, 12, 0),
        location: "Green Park, Downtown",
        description: "Enjoy a day of live music, food trucks, and fun under the sun. Featuring local bands and artists across various genres. A perfect summer day out!",
        organizer: "City Events Committee",
        going: 2500,
        interested: 7800,
        rsvp: Some(RsvpStatus::Going),
    },
];

/// The events a freshly started server lists.
pub fn seed_events() -> Vec<Event> {
    SEEDS
        .iter()
        .filter_map(|seed| {
            let (y, m, d, h, min) = seed.date;
            let date: DateTime<Utc> = Utc.with_ymd_and_hms(y, m, d, h, min, 0).single()?;
            Some(Event {
                id: Uuid::new_v4(),
                name: seed.name.to_string(),
                event_type: seed.event_type,
                date,
                location: seed.location.to_string(),
                description: seed.description.to_string(),
                image_url: SEED_IMAGE_URL.to_string(),
                organizer: seed.organizer.to_string(),
                attendees: Attendees {
                    going: seed.going,
                    interested: seed.interested,
                },
                rsvp: seed.rsvp,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_events_are_complete() {
        let events = seed_events();
        assert_eq!(events.len(), SEEDS.len());
        assert_eq!(events[0].name, "Global Tech Summit 2024");
        assert_eq!(events[1].rsvp, Some(RsvpStatus::Interested));
        assert_eq!(events[3].attendees.interested, 7800);
    }
}
