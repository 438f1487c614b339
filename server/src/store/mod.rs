//! In-memory event store.
//!
//! [`EventStore`] owns the event collection for the lifetime of the process
//! and is the only writer of `attendees` and `rsvp`. Every mutation runs
//! under one exclusive lock over the whole collection, so readers never see
//! a counter decremented without the matching increment and status change.

mod fixtures;

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{Attendees, Event, EventDraft, RsvpStatus};

pub use fixtures::seed_events;

/// Substituted when a draft has no image.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400.png";

#[derive(Debug, Default)]
pub struct EventStore {
    events: RwLock<Vec<Event>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `events` in the given order.
    ///
    /// An event whose id is already taken by an earlier one gets a fresh id,
    /// so ids stay unique across the store.
    pub fn with_events(mut events: Vec<Event>) -> Self {
        let mut taken: HashSet<Uuid> = events.iter().map(|e| e.id).collect();
        let mut seen = HashSet::with_capacity(events.len());
        for event in &mut events {
            if seen.insert(event.id) {
                continue;
            }
            let mut id = Uuid::new_v4();
            while !taken.insert(id) {
                id = Uuid::new_v4();
            }
            seen.insert(id);
            warn!(old_id = %event.id, new_id = %id, "Duplicate event id reassigned");
            event.id = id;
        }

        Self {
            events: RwLock::new(events),
        }
    }

    /// Store seeded with the built-in fixture events.
    pub fn seeded() -> Self {
        Self::with_events(seed_events())
    }

    /// Snapshot of the collection in insertion order.
    pub fn events(&self) -> Vec<Event> {
        self.read().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Event> {
        self.read().iter().find(|e| e.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Appends a new event built from `draft`.
    ///
    /// The event gets a fresh random id, zeroed attendee counters and no
    /// RSVP. A missing or blank image URL is replaced by
    /// [`PLACEHOLDER_IMAGE_URL`].
    pub fn create_event(&self, draft: EventDraft) -> Event {
        let image_url = draft
            .image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string());

        let mut events = self.write();

        let mut id = Uuid::new_v4();
        while events.iter().any(|e| e.id == id) {
            id = Uuid::new_v4();
        }

        let event = Event {
            id,
            name: draft.name,
            event_type: draft.event_type,
            date: draft.date,
            location: draft.location,
            description: draft.description,
            image_url,
            organizer: draft.organizer,
            attendees: Attendees::default(),
            rsvp: None,
        };
        events.push(event.clone());

        info!(event_id = %event.id, name = %event.name, "Event created");
        event
    }

    /// Sets the viewer's RSVP on an event and moves the attendee counters
    /// accordingly. An unknown id leaves the store untouched.
    ///
    /// Returns the updated event, or `None` when nothing matched.
    pub fn update_rsvp(&self, id: Uuid, status: Option<RsvpStatus>) -> Option<Event> {
        let mut events = self.write();
        let Some(event) = events.iter_mut().find(|e| e.id == id) else {
            debug!(event_id = %id, "RSVP update for unknown event ignored");
            return None;
        };

        apply_rsvp(event, status);
        Some(event.clone())
    }

    /// Selects `requested` on an event, or clears the RSVP when `requested`
    /// is already the active status. Read and write happen under one lock.
    pub fn toggle_rsvp(&self, id: Uuid, requested: RsvpStatus) -> Option<Event> {
        let mut events = self.write();
        let Some(event) = events.iter_mut().find(|e| e.id == id) else {
            debug!(event_id = %id, "RSVP toggle for unknown event ignored");
            return None;
        };

        let status = RsvpStatus::toggled(event.rsvp, requested);
        apply_rsvp(event, status);
        Some(event.clone())
    }

    // Mutations never leave the collection half-updated across a panic, so a
    // poisoned lock still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Event>> {
        self.events.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Event>> {
        self.events.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn apply_rsvp(event: &mut Event, status: Option<RsvpStatus>) {
    let previous = event.rsvp;

    if let Some(old) = previous {
        let counter = event.attendees.counter_mut(old);
        *counter = counter.saturating_sub(1);
    }
    if let Some(new) = status {
        let counter = event.attendees.counter_mut(new);
        *counter = counter.saturating_add(1);
    }
    event.rsvp = status;

    debug!(
        event_id = %event.id,
        from = ?previous,
        to = ?status,
        going = event.attendees.going,
        interested = event.attendees.interested,
        "RSVP updated"
    );
}
