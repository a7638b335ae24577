//! Day-stage state machine.
//!
//! A fixed set of lighting/atmosphere presets and the transition entry
//! point. Transitions are externally triggered (user selection), never
//! time-driven, and swap the whole parameter tuple at once; the session
//! applies it through a single backend call so no partial state is ever
//! observable between frames.

/// Named lighting preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStage {
    Dawn,
    Morning,
    Afternoon,
    Dusk,
    Night,
}

pub const DEFAULT_STAGE: DayStage = DayStage::Afternoon;

impl DayStage {
    /// Recognize a stage name; a few common synonyms are accepted.
    /// Unknown names yield `None` (the cycle substitutes the default).
    pub fn from_name(s: &str) -> Option<DayStage> {
        Some(match s.trim().to_lowercase().as_str() {
            "dawn" | "sunrise" | "amanecer" => DayStage::Dawn,
            "morning" | "manana" | "mañana" => DayStage::Morning,
            "afternoon" | "noon" | "midday" | "tarde" => DayStage::Afternoon,
            "dusk" | "sunset" | "evening" | "atardecer" => DayStage::Dusk,
            "night" | "midnight" | "noche" => DayStage::Night,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            DayStage::Dawn => "dawn",
            DayStage::Morning => "morning",
            DayStage::Afternoon => "afternoon",
            DayStage::Dusk => "dusk",
            DayStage::Night => "night",
        }
    }
}

/// Complete atmosphere parameter tuple for one stage. Applied atomically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    pub sky_color: [f32; 3],
    pub fog_color: [f32; 3],
    pub fog_density: f32,
    pub sun_color: [f32; 3],
    pub sun_intensity: f32,
    pub ambient_intensity: f32,
}

// indexed by DayStage discriminant
const PRESETS: [Atmosphere; 5] = [
    // dawn
    Atmosphere {
        sky_color: [0.95, 0.66, 0.52],
        fog_color: [0.93, 0.72, 0.58],
        fog_density: 0.010,
        sun_color: [1.0, 0.72, 0.45],
        sun_intensity: 0.8,
        ambient_intensity: 0.35,
    },
    // morning
    Atmosphere {
        sky_color: [0.55, 0.75, 0.92],
        fog_color: [0.84, 0.86, 0.88],
        fog_density: 0.005,
        sun_color: [1.0, 0.96, 0.86],
        sun_intensity: 1.0,
        ambient_intensity: 0.50,
    },
    // afternoon
    Atmosphere {
        sky_color: [0.45, 0.68, 0.95],
        fog_color: [0.88, 0.84, 0.74],
        fog_density: 0.003,
        sun_color: [1.0, 0.98, 0.92],
        sun_intensity: 1.2,
        ambient_intensity: 0.55,
    },
    // dusk
    Atmosphere {
        sky_color: [0.85, 0.45, 0.38],
        fog_color: [0.76, 0.52, 0.46],
        fog_density: 0.012,
        sun_color: [1.0, 0.55, 0.30],
        sun_intensity: 0.6,
        ambient_intensity: 0.30,
    },
    // night
    Atmosphere {
        sky_color: [0.05, 0.07, 0.16],
        fog_color: [0.06, 0.08, 0.14],
        fog_density: 0.016,
        sun_color: [0.65, 0.72, 0.95],
        sun_intensity: 0.05,
        ambient_intensity: 0.12,
    },
];

/// Fixed preset lookup.
pub fn preset(stage: DayStage) -> &'static Atmosphere {
    &PRESETS[stage as usize]
}

/// Current-stage holder. Holds no other state; the full preset is re-applied
/// on every transition, so setting the same stage twice is harmless.
#[derive(Debug)]
pub struct DayCycle {
    current: DayStage,
}

impl Default for DayCycle {
    fn default() -> Self {
        Self {
            current: DEFAULT_STAGE,
        }
    }
}

impl DayCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> DayStage {
        self.current
    }

    pub fn atmosphere(&self) -> &'static Atmosphere {
        preset(self.current)
    }

    pub fn set(&mut self, stage: DayStage) -> &'static Atmosphere {
        self.current = stage;
        preset(stage)
    }

    /// Total transition entry point: an unrecognized name selects the
    /// default stage rather than erroring, so lighting is never undefined.
    pub fn set_by_name(&mut self, name: &str) -> (DayStage, &'static Atmosphere) {
        let stage = match DayStage::from_name(name) {
            Some(s) => s,
            None => {
                log::warn!("unknown day stage {name:?}; using {}", DEFAULT_STAGE.name());
                DEFAULT_STAGE
            }
        };
        (stage, self.set(stage))
    }
}
