use std::collections::BTreeMap;

use crate::hotel::{Image, Images};

// Collapse images sharing a link within each category. The description seen
// last wins; output order follows the link, not the input.
pub fn dedup_images(images: &Images) -> Images {
    Images {
        rooms: dedup_category(&images.rooms),
        site: dedup_category(&images.site),
        amenities: dedup_category(&images.amenities),
    }
}

fn dedup_category(images: &[Image]) -> Vec<Image> {
    let mut by_link: BTreeMap<&str, &str> = BTreeMap::new();
    for image in images {
        by_link.insert(image.link.as_str(), image.description.as_str());
    }

    by_link
        .into_iter()
        .map(|(link, description)| Image::new(link, description))
        .collect()
}
