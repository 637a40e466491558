// Amenity taxonomy: maps free-text supplier tokens onto a canonical
// vocabulary split into general and room amenities.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use parking_lot::Mutex;
use tracing::debug;

const GENERAL_SYNONYMS: &[(&str, &str)] = &[
    ("pool", "outdoor pool"),
    ("outdoor pool", "outdoor pool"),
    ("indoor pool", "indoor pool"),
    ("businesscenter", "business center"),
    ("business centre", "business center"),
    ("business center", "business center"),
    ("wifi", "wifi"),
    ("wi-fi", "wifi"),
    ("drycleaning", "dry cleaning"),
    ("dry cleaning", "dry cleaning"),
    ("breakfast", "breakfast"),
    ("childcare", "childcare"),
    ("parking", "parking"),
    ("concierge", "concierge"),
    ("bar", "bar"),
];

const ROOM_SYNONYMS: &[(&str, &str)] = &[
    ("aircon", "air conditioning"),
    ("tv", "tv"),
    ("coffee machine", "coffee machine"),
    ("kettle", "kettle"),
    ("hair dryer", "hair dryer"),
    ("hairdryer", "hair dryer"),
    ("iron", "iron"),
    ("tub", "bath tub"),
    ("bathtub", "bath tub"),
    ("minibar", "minibar"),
];

// Immutable synonym tables. Every canonical value also maps to itself, so
// normalizing already-canonical output is a no-op.
#[derive(Debug, Clone)]
pub struct AmenityTaxonomy {
    general: HashMap<String, String>,
    room: HashMap<String, String>,
}

impl AmenityTaxonomy {
    pub fn new<'a, G, R>(general: G, room: R) -> Self
    where
        G: IntoIterator<Item = (&'a str, &'a str)>,
        R: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            general: build_table(general),
            room: build_table(room),
        }
    }

    pub fn builtin() -> Self {
        Self::new(
            GENERAL_SYNONYMS.iter().copied(),
            ROOM_SYNONYMS.iter().copied(),
        )
    }

    fn lookup(&self, token: &str) -> Option<(Bucket, &str)> {
        if let Some(canonical) = self.general.get(token) {
            return Some((Bucket::General, canonical.as_str()));
        }
        self.room
            .get(token)
            .map(|canonical| (Bucket::Room, canonical.as_str()))
    }
}

impl Default for AmenityTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

fn canonical_key(token: &str) -> String {
    token.trim().to_lowercase()
}

fn build_table<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> HashMap<String, String> {
    let mut table = HashMap::new();
    for (synonym, canonical) in entries {
        let canonical = canonical_key(canonical);
        table.insert(canonical_key(synonym), canonical.clone());
        table.entry(canonical.clone()).or_insert(canonical);
    }
    table
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    General,
    Room,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedAmenities {
    pub general: BTreeSet<String>,
    pub room: BTreeSet<String>,
}

pub struct AmenityNormalizer {
    taxonomy: AmenityTaxonomy,
    // Tokens no table knows about, kept for vocabulary maintenance
    unknown: Mutex<BTreeMap<String, u64>>,
}

impl AmenityNormalizer {
    pub fn new(taxonomy: AmenityTaxonomy) -> Self {
        Self {
            taxonomy,
            unknown: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn normalize<S: AsRef<str>>(&self, raw: &[S]) -> NormalizedAmenities {
        let mut normalized = NormalizedAmenities::default();

        for token in raw {
            let key = canonical_key(token.as_ref());
            if key.is_empty() {
                continue;
            }

            match self.taxonomy.lookup(&key) {
                Some((Bucket::General, canonical)) => {
                    normalized.general.insert(canonical.to_string());
                }
                Some((Bucket::Room, canonical)) => {
                    normalized.room.insert(canonical.to_string());
                }
                None => {
                    debug!(amenity = %key, "amenity not in taxonomy, dropping");
                    *self.unknown.lock().entry(key).or_insert(0) += 1;
                }
            }
        }

        normalized
    }

    // Snapshot of unknown tokens and how often each was seen
    pub fn unknown_tokens(&self) -> Vec<(String, u64)> {
        self.unknown
            .lock()
            .iter()
            .map(|(token, count)| (token.clone(), *count))
            .collect()
    }
}

impl Default for AmenityNormalizer {
    fn default() -> Self {
        Self::new(AmenityTaxonomy::builtin())
    }
}
