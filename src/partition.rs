// Bucketed lookup over merged hotels. Ids are bucketed by their first
// character so a filter only has to look inside the buckets it needs.

use std::collections::{BTreeMap, HashMap};

use crate::hotel::Hotel;
use crate::merge::MergedHotels;

// Which identifiers a request selects on. Hotel ids are more specific and win
// over destination ids when both are supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdFilter {
    All,
    HotelIds(Vec<String>),
    DestinationIds(Vec<String>),
}

impl IdFilter {
    pub fn resolve<S: AsRef<str>>(hotel_ids: &[S], destination_ids: &[S]) -> Self {
        let hotel_ids = clean_ids(hotel_ids, |id| id.to_string());
        if !hotel_ids.is_empty() {
            return IdFilter::HotelIds(hotel_ids);
        }

        let destination_ids = clean_ids(destination_ids, destination_key);
        if !destination_ids.is_empty() {
            return IdFilter::DestinationIds(destination_ids);
        }

        IdFilter::All
    }
}

fn clean_ids<S: AsRef<str>>(ids: &[S], key: impl Fn(&str) -> String) -> Vec<String> {
    ids.iter()
        .map(|id| id.as_ref().trim())
        .filter(|id| !id.is_empty())
        .map(key)
        .collect()
}

// Numeric destination ids compare by value, so "007" finds destination 7
fn destination_key(id: &str) -> String {
    id.parse::<i64>()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| id.to_string())
}

type Bucket<'a> = HashMap<String, Vec<(&'a str, &'a Hotel)>>;

pub struct PartitionIndex<'a> {
    all: &'a MergedHotels,
    by_hotel: HashMap<char, Bucket<'a>>,
    by_destination: HashMap<char, Bucket<'a>>,
}

impl<'a> PartitionIndex<'a> {
    pub fn build(merged: &'a MergedHotels) -> Self {
        let mut by_hotel: HashMap<char, Bucket<'a>> = HashMap::new();
        let mut by_destination: HashMap<char, Bucket<'a>> = HashMap::new();

        for (key, hotel) in merged {
            if hotel.has_identity() {
                insert(&mut by_hotel, hotel.hotel_id.trim(), key, hotel);
            }
            let destination = hotel.destination_id.to_string();
            insert(&mut by_destination, &destination, key, hotel);
        }

        Self {
            all: merged,
            by_hotel,
            by_destination,
        }
    }

    // Hotels matching the filter, keyed by their merge key
    pub fn filter(&self, filter: &IdFilter) -> BTreeMap<&'a str, &'a Hotel> {
        match filter {
            IdFilter::All => self
                .all
                .iter()
                .map(|(key, hotel)| (key.as_str(), hotel))
                .collect(),
            IdFilter::HotelIds(ids) => lookup(&self.by_hotel, ids),
            IdFilter::DestinationIds(ids) => lookup(&self.by_destination, ids),
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.by_hotel.len() + self.by_destination.len()
    }
}

fn insert<'a>(
    partitions: &mut HashMap<char, Bucket<'a>>,
    id: &str,
    key: &'a str,
    hotel: &'a Hotel,
) {
    let Some(first) = id.chars().next() else {
        return;
    };
    partitions
        .entry(first)
        .or_default()
        .entry(id.to_string())
        .or_default()
        .push((key, hotel));
}

fn lookup<'a>(
    partitions: &HashMap<char, Bucket<'a>>,
    ids: &[String],
) -> BTreeMap<&'a str, &'a Hotel> {
    let mut found = BTreeMap::new();
    for id in ids {
        let Some(first) = id.chars().next() else {
            continue;
        };
        let matches = partitions
            .get(&first)
            .and_then(|bucket| bucket.get(id.as_str()));
        for &(key, hotel) in matches.into_iter().flatten() {
            found.insert(key, hotel);
        }
    }
    found
}
