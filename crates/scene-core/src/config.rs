use crate::color::Color;
use crate::constants::{
    FONT_URL, GROUND_COLOR, HOUSE_CAMERA_EYE, ROOF1_POSITION_X, ROOF_COLOR, ROOF_POSITION_Y,
    WALL_COLOR,
};
use serde::Deserialize;

/// Startup values for the house scene's parameters.
///
/// Deserializes from a partial JSON object; missing fields keep defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HouseConfig {
    pub wall_color: Color,
    pub ground_color: Color,
    pub roof_color: Color,
    pub roof1_position_x: f32,
    pub roof_position_y: f32,
    pub camera_position: [f32; 3],
    pub font_url: String,
    pub load_logo_letter: bool,
}

impl Default for HouseConfig {
    fn default() -> Self {
        Self {
            wall_color: Color::from_hex(WALL_COLOR),
            ground_color: Color::from_hex(GROUND_COLOR),
            roof_color: Color::from_hex(ROOF_COLOR),
            roof1_position_x: ROOF1_POSITION_X,
            roof_position_y: ROOF_POSITION_Y,
            camera_position: HOUSE_CAMERA_EYE,
            font_url: FONT_URL.to_string(),
            load_logo_letter: true,
        }
    }
}

impl HouseConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
