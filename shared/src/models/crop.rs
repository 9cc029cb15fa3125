//! Crop reference data

use serde::{Deserialize, Serialize};

use crate::types::Bounds;

/// Species growing parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    /// Days from planting to harvest
    pub growth_duration: u32,
    pub water_requirement: WaterRequirement,
    pub optimal_temperature: Bounds,
    pub optimal_humidity: Bounds,
    pub optimal_soil_moisture: Bounds,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WaterRequirement {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for WaterRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaterRequirement::Low => write!(f, "low"),
            WaterRequirement::Medium => write!(f, "medium"),
            WaterRequirement::High => write!(f, "high"),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn crop(
    index: usize,
    name: &str,
    scientific_name: &str,
    growth_duration: u32,
    water_requirement: WaterRequirement,
    temperature: (f64, f64),
    humidity: (f64, f64),
    soil_moisture: (f64, f64),
    description: &str,
) -> Crop {
    Crop {
        id: format!("crop-{}", index),
        name: name.to_string(),
        scientific_name: scientific_name.to_string(),
        growth_duration,
        water_requirement,
        optimal_temperature: Bounds::new(temperature.0, temperature.1),
        optimal_humidity: Bounds::new(humidity.0, humidity.1),
        optimal_soil_moisture: Bounds::new(soil_moisture.0, soil_moisture.1),
        description: description.to_string(),
        image_url: None,
    }
}

/// Crop names in catalog order; plots draw their crop type from this list
pub const CROP_NAMES: [&str; 6] = ["Wheat", "Rice", "Corn", "Soybeans", "Cotton", "Sugarcane"];

/// The static crop catalog
pub fn crop_catalog() -> Vec<Crop> {
    use WaterRequirement::*;

    vec![
        crop(
            1,
            "Wheat",
            "Triticum aestivum",
            120,
            Medium,
            (15.0, 24.0),
            (45.0, 70.0),
            (40.0, 60.0),
            "Wheat is a grass widely cultivated for its seed, a cereal grain which is a worldwide staple food.",
        ),
        crop(
            2,
            "Rice",
            "Oryza sativa",
            150,
            High,
            (20.0, 30.0),
            (60.0, 80.0),
            (70.0, 90.0),
            "Rice is the seed of the grass species Oryza sativa or less commonly Oryza glaberrima.",
        ),
        crop(
            3,
            "Corn",
            "Zea mays",
            90,
            Medium,
            (18.0, 32.0),
            (50.0, 75.0),
            (45.0, 65.0),
            "Maize, also known as corn, is a cereal grain first domesticated by indigenous peoples in southern Mexico.",
        ),
        crop(
            4,
            "Soybeans",
            "Glycine max",
            100,
            Medium,
            (20.0, 30.0),
            (55.0, 70.0),
            (50.0, 70.0),
            "The soybean or soya bean is a species of legume native to East Asia, widely grown for its edible bean.",
        ),
        crop(
            5,
            "Cotton",
            "Gossypium hirsutum",
            180,
            Medium,
            (20.0, 35.0),
            (40.0, 60.0),
            (35.0, 55.0),
            "Cotton is a soft, fluffy staple fiber that grows in a boll around the seeds of the cotton plants.",
        ),
        crop(
            6,
            "Sugarcane",
            "Saccharum officinarum",
            270,
            High,
            (24.0, 38.0),
            (60.0, 80.0),
            (60.0, 80.0),
            "Sugarcane is a perennial grass of the genus Saccharum, primarily cultivated for its juice from which sugar is processed.",
        ),
    ]
}

/// Look up a crop by name (case-insensitive)
pub fn find_crop(name: &str) -> Option<Crop> {
    crop_catalog()
        .into_iter()
        .find(|crop| crop.name.eq_ignore_ascii_case(name))
}
