// Reconciliation of per-supplier records into one canonical hotel per id

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::debug;

use crate::hotel::{Hotel, Images, Location};
use crate::supplier::SourceCollection;

// Merged hotels keyed by hotel_id
pub type MergedHotels = BTreeMap<String, Hotel>;

// Merge every batch in collection order. The first record seen for an id is
// the baseline; later records only fill gaps or extend lists, except for
// name and description where the longer text wins.
pub fn merge_hotels(sources: &SourceCollection) -> MergedHotels {
    let mut merged = MergedHotels::new();
    let mut duplicates = 0usize;

    for batch in sources.batches() {
        for (position, hotel) in batch.hotels.iter().enumerate() {
            if !hotel.has_identity() {
                let key = format!("{}#{}", batch.supplier, position);
                debug!(supplier = %batch.supplier, %key, "record without hotel_id kept standalone");
                merged.insert(key, hotel.clone());
                continue;
            }

            match merged.entry(hotel.hotel_id.trim().to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(hotel.clone());
                }
                Entry::Occupied(mut slot) => {
                    absorb(slot.get_mut(), hotel);
                    duplicates += 1;
                }
            }
        }
    }

    debug!(
        suppliers = sources.batches().len(),
        records = sources.hotel_count(),
        merged = merged.len(),
        duplicates,
        "merged supplier records"
    );

    merged
}

fn absorb(existing: &mut Hotel, incoming: &Hotel) {
    merge_location(&mut existing.location, incoming.location.as_ref());

    // Length as a proxy for completeness
    if incoming.name.chars().count() > existing.name.chars().count() {
        existing.name = incoming.name.clone();
    }
    if incoming.description.chars().count() > existing.description.chars().count() {
        existing.description = incoming.description.clone();
    }

    existing
        .booking_conditions
        .extend(incoming.booking_conditions.iter().cloned());
    existing.amenities.extend(incoming.amenities.iter().cloned());

    merge_images(&mut existing.images, incoming.images.as_ref());
}

fn merge_location(existing: &mut Option<Location>, incoming: Option<&Location>) {
    let Some(incoming) = incoming else {
        return;
    };
    match existing.as_mut() {
        Some(current) => {
            fill(&mut current.latitude, &incoming.latitude);
            fill(&mut current.longitude, &incoming.longitude);
            fill(&mut current.address, &incoming.address);
            fill(&mut current.city, &incoming.city);
            fill(&mut current.country, &incoming.country);
        }
        None => *existing = Some(incoming.clone()),
    }
}

// First present value wins
fn fill<T: Clone>(slot: &mut Option<T>, candidate: &Option<T>) {
    if slot.is_none() {
        slot.clone_from(candidate);
    }
}

fn merge_images(existing: &mut Option<Images>, incoming: Option<&Images>) {
    let Some(incoming) = incoming else {
        return;
    };
    match existing.as_mut() {
        Some(current) => {
            current.rooms.extend(incoming.rooms.iter().cloned());
            current.site.extend(incoming.site.iter().cloned());
            current.amenities.extend(incoming.amenities.iter().cloned());
        }
        None => *existing = Some(incoming.clone()),
    }
}
