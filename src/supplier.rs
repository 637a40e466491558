use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::ConfigError;
use crate::hotel::Hotel;

// Suppliers we know how to decode, in the default priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Supplier {
    Patagonia,
    Paperflies,
    Acme,
}

impl Supplier {
    pub const ALL: [Supplier; 3] = [Supplier::Patagonia, Supplier::Paperflies, Supplier::Acme];

    pub fn name(&self) -> &'static str {
        match self {
            Supplier::Patagonia => "patagonia",
            Supplier::Paperflies => "paperflies",
            Supplier::Acme => "acme",
        }
    }

    // Path of the supplier endpoint relative to the configured base URL
    pub fn path(&self) -> &'static str {
        self.name()
    }

    // Decode a raw response body and run every document through this supplier's normalizer
    pub fn decode(&self, body: &[u8]) -> Result<Vec<Hotel>, serde_json::Error> {
        match self {
            Supplier::Patagonia => decode_with::<PatagoniaHotel>(body),
            Supplier::Paperflies => decode_with::<PaperfliesHotel>(body),
            Supplier::Acme => decode_with::<AcmeHotel>(body),
        }
    }
}

fn decode_with<T>(body: &[u8]) -> Result<Vec<Hotel>, serde_json::Error>
where
    T: DeserializeOwned + Into<Hotel>,
{
    let documents: Vec<T> = serde_json::from_slice(body)?;
    Ok(documents.into_iter().map(Into::into).collect())
}

impl fmt::Display for Supplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Supplier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Supplier::ALL
            .into_iter()
            .find(|supplier| supplier.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownSupplier(s.to_string()))
    }
}

// Hotels produced by one supplier in one fetch pass
#[derive(Debug, Clone, PartialEq)]
pub struct SourceBatch {
    pub supplier: Supplier,
    pub hotels: Vec<Hotel>,
}

// Output of one fetch burst. Batches keep the configured supplier order so
// that merging the same data always yields the same result.
#[derive(Debug, Clone)]
pub struct SourceCollection {
    batches: Vec<SourceBatch>,
    fetched_at: DateTime<Utc>,
}

impl SourceCollection {
    pub fn new(batches: Vec<SourceBatch>) -> Self {
        Self {
            batches,
            fetched_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn batches(&self) -> &[SourceBatch] {
        &self.batches
    }

    pub fn batch(&self, supplier: Supplier) -> Option<&SourceBatch> {
        self.batches.iter().find(|batch| batch.supplier == supplier)
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn hotel_count(&self) -> usize {
        self.batches.iter().map(|batch| batch.hotels.len()).sum()
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}

// Optional fields with the wrong JSON type are treated as missing instead of
// failing the whole document.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::<D, String>(deserializer)?.unwrap_or_default())
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::<D, i64>(deserializer)?.unwrap_or_default())
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = lenient::<D, Vec<serde_json::Value>>(deserializer)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .filter_map(|v| match v {
            serde_json::Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

// Coordinates arrive as numbers from most suppliers and as strings (sometimes
// empty) from others. Resolved to a plain float in the normalizer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawCoordinate {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

// Data structures for the patagonia supplier
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PatagoniaHotel {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub destination: i64,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    pub lat: Option<RawCoordinate>,
    pub lng: Option<RawCoordinate>,
    #[serde(deserialize_with = "lenient")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub info: String,
    #[serde(deserialize_with = "lenient_list")]
    pub amenities: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub images: Option<PatagoniaImages>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PatagoniaImages {
    pub rooms: Vec<PatagoniaImage>,
    pub amenities: Vec<PatagoniaImage>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PatagoniaImage {
    pub url: String,
    pub description: String,
}

// Data structures for the paperflies supplier
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PaperfliesHotel {
    #[serde(deserialize_with = "lenient_string")]
    pub hotel_id: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub destination_id: i64,
    #[serde(deserialize_with = "lenient_string")]
    pub hotel_name: String,
    #[serde(deserialize_with = "lenient")]
    pub location: Option<PaperfliesLocation>,
    #[serde(deserialize_with = "lenient_string")]
    pub details: String,
    #[serde(deserialize_with = "lenient")]
    pub amenities: Option<PaperfliesAmenities>,
    #[serde(deserialize_with = "lenient")]
    pub images: Option<PaperfliesImages>,
    #[serde(deserialize_with = "lenient_list")]
    pub booking_conditions: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PaperfliesLocation {
    #[serde(deserialize_with = "lenient")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PaperfliesAmenities {
    #[serde(deserialize_with = "lenient_list")]
    pub general: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub room: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PaperfliesImages {
    pub rooms: Vec<PaperfliesImage>,
    pub site: Vec<PaperfliesImage>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PaperfliesImage {
    pub link: String,
    pub caption: String,
}

// Data structures for the acme supplier
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AcmeHotel {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub destination_id: i64,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    pub latitude: Option<RawCoordinate>,
    pub longitude: Option<RawCoordinate>,
    #[serde(deserialize_with = "lenient")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub postal_code: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_list")]
    pub facilities: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("patagonia", Supplier::Patagonia; "lower case")]
    #[test_case(" Paperflies ", Supplier::Paperflies; "padded mixed case")]
    #[test_case("ACME", Supplier::Acme; "upper case")]
    fn test_supplier_from_str(input: &str, expected: Supplier) {
        assert_eq!(input.parse::<Supplier>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_supplier_is_rejected() {
        let result = "expedia".parse::<Supplier>();
        assert!(matches!(result, Err(ConfigError::UnknownSupplier(name)) if name == "expedia"));
    }

    #[test]
    fn test_acme_polymorphic_coordinates_decode() {
        let body = br#"[
            {"Id": "iJhz", "DestinationId": 5432, "Name": "Beach Villas Singapore",
             "Latitude": 1.264751, "Longitude": "103.824006", "Facilities": ["Pool"]},
            {"Id": "f8c9", "DestinationId": 1122, "Name": "Hilton Shinjuku",
             "Latitude": "", "Longitude": null, "Facilities": null}
        ]"#;

        let documents: Vec<AcmeHotel> = serde_json::from_slice(body).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].latitude, Some(RawCoordinate::Number(1.264751)));
        assert_eq!(
            documents[0].longitude,
            Some(RawCoordinate::Text("103.824006".to_string()))
        );
        assert_eq!(documents[1].latitude, Some(RawCoordinate::Text(String::new())));
        assert!(documents[1].longitude.is_none());
        assert!(documents[1].facilities.is_empty());
    }

    #[test]
    fn test_malformed_optional_fields_degrade_to_absent() {
        // location is a string and booking_conditions holds a number
        let body = br#"[{
            "hotel_id": "iJhz", "destination_id": 5432, "hotel_name": "Beach Villas",
            "location": "somewhere", "details": 42,
            "amenities": {"general": ["pool", 7], "room": "tv"},
            "booking_conditions": ["No pets", 3]
        }]"#;

        let hotels = Supplier::Paperflies.decode(body).unwrap();
        assert_eq!(hotels.len(), 1);
        let hotel = &hotels[0];
        assert_eq!(hotel.hotel_id, "iJhz");
        assert!(hotel.location.is_none());
        assert_eq!(hotel.description, "");
        assert_eq!(hotel.amenities, vec!["pool".to_string()]);
        assert_eq!(hotel.booking_conditions, vec!["No pets".to_string()]);
    }

    #[test]
    fn test_decode_rejects_non_array_body() {
        assert!(Supplier::Patagonia.decode(br#"{"error": "down"}"#).is_err());
    }

    #[test]
    fn test_source_collection_lookup() {
        let collection = SourceCollection::new(vec![
            SourceBatch {
                supplier: Supplier::Acme,
                hotels: vec![Hotel::default(), Hotel::default()],
            },
            SourceBatch {
                supplier: Supplier::Patagonia,
                hotels: vec![Hotel::default()],
            },
        ]);

        assert_eq!(collection.hotel_count(), 3);
        assert!(collection.batch(Supplier::Paperflies).is_none());
        assert_eq!(collection.batches()[0].supplier, Supplier::Acme);
        assert!(SourceCollection::empty().is_empty());
    }
}
