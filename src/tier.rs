use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Difficulty tier for target practice. Each tier trades target size
/// against how widely targets scatter through the scene.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Standard,
    Easy,
    Medium,
    Hard,
}

/// Spawn volume and target sizing for one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierParams {
    /// Width of the spawn volume, centered on the origin.
    pub x_range: f32,
    /// Height of the spawn volume, centered on the origin.
    pub y_range: f32,
    /// Depth of the spawn volume, extending away from the camera.
    pub z_range: f32,
    /// Uniform scale applied to the base target sphere.
    pub scale: f32,
    /// One-line description shown when the tier is picked.
    pub blurb: String,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Standard, Tier::Easy, Tier::Medium, Tier::Hard];

    /// Built-in tuning table. Hard ships with medium's numbers; the config
    /// file can retune either without a rebuild.
    pub fn params(self) -> TierParams {
        match self {
            Tier::Standard => TierParams {
                x_range: 6.0,
                y_range: 3.0,
                z_range: 3.0,
                scale: 1.0,
                blurb: "the classic spread".into(),
            },
            Tier::Easy => TierParams {
                x_range: 4.0,
                y_range: 2.0,
                z_range: 2.0,
                scale: 1.5,
                blurb: "big targets, narrow spread".into(),
            },
            Tier::Medium => TierParams {
                x_range: 8.0,
                y_range: 4.0,
                z_range: 3.0,
                scale: 0.75,
                blurb: "small targets, wide spread".into(),
            },
            Tier::Hard => TierParams {
                x_range: 8.0,
                y_range: 4.0,
                z_range: 3.0,
                scale: 0.75,
                blurb: "like medium, but you feel worse".into(),
            },
        }
    }
}
