//! Tide types, their reference text, and the tide-height models.
//!
//! A `TideModel` maps `(tide type, orbit angle, moon distance)` to a bulge height in
//! display units. Two models are provided and are interchangeable:
//! - `PresetTideModel`: one constant per tide type (the default)
//! - `GravitationalTideModel`: scaled inverse-cube lunar force plus a fixed solar term

use std::fmt;

/// Largest bulge height any model may report (display units)
pub const MAX_TIDE_HEIGHT: f32 = 0.2;

/// Smallest height reported by the gravitational model (display units)
pub const MIN_FORCED_TIDE_HEIGHT: f32 = 0.05;

/// Real-world meters per display unit of tide height
pub const REAL_WORLD_METERS_PER_UNIT: f32 = 20.0;

/// Moon distance the gravitational model is normalized against
pub const REFERENCE_MOON_DISTANCE: f32 = 1.5;

/// Solar tidal force as a fraction of the lunar force at the reference distance
pub const SUN_TO_MOON_TIDAL_RATIO: f32 = 0.46;

/// Lunar-only damping for low tide
pub const LOW_DAMPING: f32 = 0.5;

/// Flat damping for a normal tide
pub const NORMAL_DAMPING: f32 = 0.8;

/// Closed set of tide scenarios the visualization can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TideType {
    #[default]
    Normal,
    Spring,
    Neap,
    Low,
}

/// Preset Moon placement and bulge height applied when a tide type is selected
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TidePreset {
    pub orbit_angle_degrees: f32,
    pub moon_distance: f32,
    pub base_tide_height: f32,
}

/// Static descriptive text shown by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TideInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub formula: &'static str,
    pub explanation: &'static str,
    pub did_you_know: &'static str,
}

impl TideType {
    pub const ALL: [TideType; 4] = [
        TideType::Normal,
        TideType::Spring,
        TideType::Neap,
        TideType::Low,
    ];

    pub fn preset(self) -> TidePreset {
        let (orbit_angle_degrees, moon_distance, base_tide_height) = match self {
            TideType::Normal => (45.0, 1.5, 0.15),
            TideType::Spring => (0.0, 1.5, 0.2),
            TideType::Neap => (90.0, 1.5, 0.08),
            TideType::Low => (45.0, 3.0, 0.05),
        };
        TidePreset {
            orbit_angle_degrees,
            moon_distance,
            base_tide_height,
        }
    }

    pub fn info(self) -> &'static TideInfo {
        match self {
            TideType::Normal => &NORMAL_INFO,
            TideType::Spring => &SPRING_INFO,
            TideType::Neap => &NEAP_INFO,
            TideType::Low => &LOW_INFO,
        }
    }

    /// Case-insensitive lookup by short name ("spring") or display name ("Spring Tide")
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        let short = name.strip_suffix(" tide").unwrap_or(&name);
        match short {
            "normal" => Some(TideType::Normal),
            "spring" => Some(TideType::Spring),
            "neap" => Some(TideType::Neap),
            "low" => Some(TideType::Low),
            _ => None,
        }
    }
}

impl fmt::Display for TideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

const NORMAL_INFO: TideInfo = TideInfo {
    name: "Normal Tide",
    description: "Regular tidal pattern caused by Moon's gravitational pull",
    formula: "F = G * (M * m) / r²",
    explanation: "The Moon's gravity pulls on Earth's oceans, creating two bulges: one facing \
                  the Moon and one on the opposite side. As Earth rotates, these bulges cause \
                  high and low tides.",
    did_you_know: "Most coastal areas experience two high tides and two low tides each day!",
};

const SPRING_INFO: TideInfo = TideInfo {
    name: "Spring Tide",
    description: "Higher tides when Sun and Moon align, combining their gravitational forces",
    formula: "F = G * ((M + S) * m) / r²",
    explanation: "Spring tides occur during new and full moons when the Sun, Moon, and Earth \
                  align. The combined gravitational forces create higher high tides and lower \
                  low tides.",
    did_you_know: "Spring tides don't just happen in spring - they occur throughout the year \
                   during new and full moons!",
};

const NEAP_INFO: TideInfo = TideInfo {
    name: "Neap Tide",
    description: "Lower tides when Sun and Moon are at right angles, partially canceling their \
                  effects",
    formula: "F = G * (|M - S| * m) / r²",
    explanation: "Neap tides happen during quarter moons when the Sun and Moon are at right \
                  angles to Earth. Their gravitational forces partially cancel out, resulting in \
                  smaller tidal ranges.",
    did_you_know: "The word 'neap' comes from Anglo-Saxon, meaning 'without power' or 'very \
                   small'!",
};

const LOW_INFO: TideInfo = TideInfo {
    name: "Low Tide",
    description: "Minimal tidal effect when Moon is farthest from Earth",
    formula: "F = G * (M * m) / r³",
    explanation: "When the Moon is at its farthest point from Earth (apogee), its gravitational \
                  pull is weaker, resulting in smaller tidal ranges. This follows the inverse \
                  cube law of tidal force.",
    did_you_know: "The Moon's distance from Earth varies by about 50,000 kilometers throughout \
                   its orbit!",
};

/// Maps orbital state to a tide height in `[0, MAX_TIDE_HEIGHT]`
pub trait TideModel: Send + Sync {
    fn compute_tide_height(&self, tide_type: TideType, angle_degrees: f32, distance: f32) -> f32;

    fn name(&self) -> &'static str;
}

/// Constant height per tide type; angle and distance are ignored
#[derive(Debug, Clone, Copy, Default)]
pub struct PresetTideModel;

impl TideModel for PresetTideModel {
    fn compute_tide_height(&self, tide_type: TideType, _angle_degrees: f32, _distance: f32) -> f32 {
        clamp_tide_height(tide_type.preset().base_tide_height)
    }

    fn name(&self) -> &'static str {
        "preset"
    }
}

/// Inverse-cube lunar tidal force with a fixed solar contribution
///
/// The orbit angle is measured from the Earth–Sun line, so `cos(angle)` is the
/// Sun–Moon alignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct GravitationalTideModel;

impl GravitationalTideModel {
    fn lunar_force(distance: f32) -> f32 {
        1.0 / distance.powi(3)
    }

    /// Sun distance is fixed, so its tidal proxy is a constant
    fn solar_force() -> f32 {
        SUN_TO_MOON_TIDAL_RATIO * Self::lunar_force(REFERENCE_MOON_DISTANCE)
    }

    /// Spring alignment at the reference distance maps to the top of the height range
    fn reference_max_force() -> f32 {
        Self::lunar_force(REFERENCE_MOON_DISTANCE) + Self::solar_force()
    }

    /// Unnormalized tidal force proxy for one configuration
    pub fn force(tide_type: TideType, angle_degrees: f32, distance: f32) -> f32 {
        let lunar = Self::lunar_force(distance);
        let solar = Self::solar_force();
        let angle = angle_degrees.to_radians();

        match tide_type {
            TideType::Spring => lunar + solar * angle.cos().abs(),
            TideType::Neap => (lunar - solar * angle.sin().abs()).max(0.0),
            TideType::Low => lunar * LOW_DAMPING,
            TideType::Normal => lunar * NORMAL_DAMPING,
        }
    }
}

impl TideModel for GravitationalTideModel {
    fn compute_tide_height(&self, tide_type: TideType, angle_degrees: f32, distance: f32) -> f32 {
        let distance = distance.clamp(
            crate::params::MIN_MOON_DISTANCE,
            crate::params::MAX_MOON_DISTANCE,
        );
        let normalized = (Self::force(tide_type, angle_degrees, distance)
            / Self::reference_max_force())
        .clamp(0.0, 1.0);

        let height =
            MIN_FORCED_TIDE_HEIGHT + (MAX_TIDE_HEIGHT - MIN_FORCED_TIDE_HEIGHT) * normalized;
        clamp_tide_height(height)
    }

    fn name(&self) -> &'static str {
        "gravitational"
    }
}

/// Selectable tide model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TideModelKind {
    #[default]
    Preset,
    Gravitational,
}

impl TideModelKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "preset" => Some(Self::Preset),
            "gravitational" | "force" => Some(Self::Gravitational),
            _ => None,
        }
    }

    pub fn build(self) -> Box<dyn TideModel> {
        match self {
            Self::Preset => Box::new(PresetTideModel),
            Self::Gravitational => Box::new(GravitationalTideModel),
        }
    }
}

/// Keep NaN and out-of-range heights from reaching the mesh generator
pub fn clamp_tide_height(height: f32) -> f32 {
    if height.is_nan() {
        return 0.0;
    }
    height.clamp(0.0, MAX_TIDE_HEIGHT)
}

/// Display-unit tide height expressed as a real-world tidal range
pub fn real_world_height_m(tide_height: f32) -> f32 {
    tide_height * REAL_WORLD_METERS_PER_UNIT
}

/// A famous real-world tidal range for comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TideComparison {
    pub height_m: f32,
    pub place: &'static str,
    pub description: &'static str,
}

/// Ordered from highest to lowest range
pub const TIDE_COMPARISONS: [TideComparison; 5] = [
    TideComparison {
        height_m: 16.3,
        place: "Bay of Fundy, Canada",
        description: "World's highest tides, reaching up to 16.3m (53.5ft) - equivalent to a \
                      4-story building",
    },
    TideComparison {
        height_m: 14.7,
        place: "Severn Estuary, UK",
        description: "Europe's highest tidal range at 14.7m (48ft) - height of 3 London buses \
                      stacked",
    },
    TideComparison {
        height_m: 11.7,
        place: "Cook Inlet, Alaska",
        description: "North America's second-highest tides at 11.7m (38.4ft) - as tall as a \
                      telephone pole",
    },
    TideComparison {
        height_m: 8.4,
        place: "Mont Saint-Michel, France",
        description: "Famous tidal island with 8.4m (27.6ft) range - height of 2 giraffes",
    },
    TideComparison {
        height_m: 2.0,
        place: "Mediterranean Sea",
        description: "Very small tidal range of about 2m (6.6ft) - height of a door",
    },
];

/// Highest comparison not exceeding `height_m`, else the smallest one
pub fn comparison_for(height_m: f32) -> &'static TideComparison {
    TIDE_COMPARISONS
        .iter()
        .find(|c| c.height_m <= height_m)
        .unwrap_or(&TIDE_COMPARISONS[TIDE_COMPARISONS.len() - 1])
}

/// Trivia matched to a real-world tidal range
pub fn fact_for_height(height_m: f32) -> &'static str {
    if height_m > 15.0 {
        "The extreme tidal range you're seeing is similar to the Bay of Fundy, where the unique \
         funnel-shaped bay and resonance effect amplify the tidal forces dramatically!"
    } else if height_m > 10.0 {
        "At this height, tides can create powerful tidal bores - waves that travel upstream \
         against river currents, popular among surfers in places like the Amazon River!"
    } else if height_m > 5.0 {
        "This moderate tidal range is perfect for tidal energy generation. Places with such \
         tides often use tidal turbines to generate clean electricity!"
    } else {
        "Even these smaller tides play a crucial role in marine ecosystems, creating intertidal \
         zones where unique species thrive in the daily rhythm of high and low tides."
    }
}
