// Per-supplier normalization into the canonical Hotel.
// Pure conversions: malformed optional values become None, never errors.

use crate::hotel::{Hotel, Image, Images, Location};
use crate::supplier::{AcmeHotel, PaperfliesHotel, PatagoniaHotel, RawCoordinate};

impl RawCoordinate {
    pub fn resolve(&self) -> Option<f64> {
        let value = match self {
            RawCoordinate::Number(n) => *n,
            RawCoordinate::Text(s) => s.trim().parse::<f64>().ok()?,
            RawCoordinate::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

fn coordinate(raw: Option<&RawCoordinate>) -> Option<f64> {
    raw.and_then(RawCoordinate::resolve)
}

// Append the postal code unless the address already carries it
pub fn address_with_postcode(address: Option<String>, postcode: Option<&str>) -> Option<String> {
    let address = address?;
    let postcode = match postcode.map(str::trim) {
        Some(p) if !p.is_empty() => p,
        _ => return Some(address),
    };

    let trimmed = address.trim();
    if trimmed.contains(postcode) {
        Some(address)
    } else {
        Some(format!("{}, {}", trimmed, postcode))
    }
}

impl From<PatagoniaHotel> for Hotel {
    fn from(item: PatagoniaHotel) -> Self {
        let images = item.images.map(|images| Images {
            rooms: images
                .rooms
                .into_iter()
                .map(|image| Image::new(image.url, image.description))
                .collect(),
            site: Vec::new(),
            amenities: images
                .amenities
                .into_iter()
                .map(|image| Image::new(image.url, image.description))
                .collect(),
        });

        Hotel {
            hotel_id: item.id,
            destination_id: item.destination,
            name: item.name,
            description: item.info,
            location: Some(Location {
                latitude: coordinate(item.lat.as_ref()),
                longitude: coordinate(item.lng.as_ref()),
                address: item.address,
                city: None,
                country: None,
            }),
            amenities: item.amenities,
            images,
            booking_conditions: Vec::new(),
        }
    }
}

impl From<PaperfliesHotel> for Hotel {
    fn from(item: PaperfliesHotel) -> Self {
        let location = item.location.map(|location| Location {
            address: location.address,
            country: location.country,
            ..Location::default()
        });

        let amenities = item
            .amenities
            .map(|amenities| {
                let mut all = amenities.general;
                all.extend(amenities.room);
                all
            })
            .unwrap_or_default();

        let images = item.images.map(|images| Images {
            rooms: images
                .rooms
                .into_iter()
                .map(|image| Image::new(image.link, image.caption))
                .collect(),
            site: images
                .site
                .into_iter()
                .map(|image| Image::new(image.link, image.caption))
                .collect(),
            amenities: Vec::new(),
        });

        Hotel {
            hotel_id: item.hotel_id,
            destination_id: item.destination_id,
            name: item.hotel_name,
            description: item.details,
            location,
            amenities,
            images,
            booking_conditions: item.booking_conditions,
        }
    }
}

impl From<AcmeHotel> for Hotel {
    fn from(item: AcmeHotel) -> Self {
        let address = address_with_postcode(item.address, item.postal_code.as_deref());

        Hotel {
            hotel_id: item.id,
            destination_id: item.destination_id,
            name: item.name,
            description: item.description,
            location: Some(Location {
                latitude: coordinate(item.latitude.as_ref()),
                longitude: coordinate(item.longitude.as_ref()),
                address,
                city: item.city,
                country: item.country,
            }),
            amenities: item.facilities,
            images: None,
            booking_conditions: Vec::new(),
        }
    }
}
