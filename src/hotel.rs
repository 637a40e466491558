// Canonical hotel model shared by every supplier after normalization

// One hotel as produced by a single supplier, or after reconciliation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hotel {
    pub hotel_id: String,
    pub destination_id: i64,
    pub name: String,
    pub description: String,
    pub location: Option<Location>,
    // Raw tokens from every contributing supplier, split into buckets during cleaning
    pub amenities: Vec<String>,
    pub images: Option<Images>,
    pub booking_conditions: Vec<String>,
}

impl Hotel {
    // Records without an id can never be matched against another supplier's record
    pub fn has_identity(&self) -> bool {
        !self.hotel_id.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl Location {
    pub fn is_empty(&self) -> bool {
        self.latitude.is_none()
            && self.longitude.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.country.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Images {
    pub rooms: Vec<Image>,
    pub site: Vec<Image>,
    pub amenities: Vec<Image>,
}

impl Images {
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty() && self.site.is_empty() && self.amenities.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Image {
    pub link: String,
    pub description: String,
}

impl Image {
    pub fn new(link: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            description: description.into(),
        }
    }
}
