//! Itinerary deduplication by canonical key.

use crate::model::Itinerary;
use indexmap::IndexMap;

/// Builds the canonical dedup key for an itinerary: the price rendered as
/// text, then `|{flight_number}-{departure}-{arrival}` for each slice in
/// sequence order.
///
/// Origin/destination names and duration are deliberately excluded, so two
/// itineraries differing only in those fields collide and count as
/// duplicates. Downstream consumers rely on this, so it stays as is.
pub fn canonical_key(itinerary: &Itinerary) -> String {
    let mut key = itinerary.price.to_string();
    for slice in &itinerary.slices {
        key.push('|');
        key.push_str(&slice.flight_number);
        key.push('-');
        key.push_str(&slice.departure_date_time_utc);
        key.push('-');
        key.push_str(&slice.arrival_date_time_utc);
    }
    key
}

/// Reduces a list of itineraries to one instance per canonical key.
///
/// The first occurrence of each key wins; output order is the order in which
/// distinct keys first appear in the input.
pub fn dedupe(itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    let mut unique: IndexMap<String, Itinerary> = IndexMap::with_capacity(itineraries.len());

    for itinerary in itineraries {
        unique.entry(canonical_key(&itinerary)).or_insert(itinerary);
    }

    unique.into_values().collect()
}
