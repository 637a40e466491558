// Final cleaning of merged hotels into the response shape: whitespace
// trimming, amenity buckets, image dedup and country names.

use std::collections::HashMap;

use crate::amenity::AmenityNormalizer;
use crate::hotel::{Hotel, Image, Location};
use crate::images::dedup_images;
use crate::response::{AmenitiesRecord, HotelRecord, ImageRecord, ImagesRecord, LocationRecord};

const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("sg", "Singapore"),
    ("singapore", "Singapore"),
    ("jp", "Japan"),
    ("japan", "Japan"),
];

pub struct Cleaner {
    amenities: AmenityNormalizer,
    countries: HashMap<String, String>,
}

impl Cleaner {
    pub fn new(amenities: AmenityNormalizer) -> Self {
        Self {
            amenities,
            countries: COUNTRY_NAMES
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
        }
    }

    pub fn amenities(&self) -> &AmenityNormalizer {
        &self.amenities
    }

    pub fn clean(&self, hotel: &Hotel) -> HotelRecord {
        let amenities = self.amenities.normalize(hotel.amenities.as_slice());

        HotelRecord {
            hotel_id: hotel.hotel_id.trim().to_string(),
            destination_id: hotel.destination_id,
            name: hotel.name.trim().to_string(),
            location: hotel
                .location
                .as_ref()
                .map(|location| self.clean_location(location)),
            description: hotel.description.trim().to_string(),
            amenities: AmenitiesRecord {
                general: amenities.general.into_iter().collect(),
                room: amenities.room.into_iter().collect(),
            },
            images: hotel.images.as_ref().map(|images| {
                let deduped = dedup_images(images);
                ImagesRecord {
                    rooms: image_records(deduped.rooms),
                    site: image_records(deduped.site),
                    amenities: image_records(deduped.amenities),
                }
            }),
            booking_conditions: hotel
                .booking_conditions
                .iter()
                .map(|condition| condition.trim().to_string())
                .collect(),
        }
    }

    fn clean_location(&self, location: &Location) -> LocationRecord {
        LocationRecord {
            latitude: location.latitude,
            longitude: location.longitude,
            address: trimmed(location.address.as_deref()),
            city: trimmed(location.city.as_deref()),
            country: location
                .country
                .as_deref()
                .map(|country| self.country_name(country)),
        }
    }

    // Known codes and spellings map to one name; anything else is kept as sent
    fn country_name(&self, country: &str) -> String {
        let country = country.trim();
        self.countries
            .get(&country.to_lowercase())
            .cloned()
            .unwrap_or_else(|| country.to_string())
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new(AmenityNormalizer::default())
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

fn image_records(images: Vec<Image>) -> Vec<ImageRecord> {
    images
        .into_iter()
        .map(|image| ImageRecord {
            link: image.link,
            description: image.description,
        })
        .collect()
}
