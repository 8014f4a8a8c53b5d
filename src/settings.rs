//! Demo settings and selection
//!
//! Everything has a default; a JSON file can override any subset of fields.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::DemoError;
use crate::sim::ParticleConfig;

/// Which demo to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Demo {
    #[default]
    Snow,
    Cube,
    Blend,
    Square,
}

impl Demo {
    pub const ALL: [Demo; 4] = [Demo::Snow, Demo::Cube, Demo::Blend, Demo::Square];

    pub fn as_str(&self) -> &'static str {
        match self {
            Demo::Snow => "snow",
            Demo::Cube => "cube",
            Demo::Blend => "blend",
            Demo::Square => "square",
        }
    }

    /// Window title
    pub fn title(&self) -> &'static str {
        match self {
            Demo::Snow => "Snowfall",
            Demo::Cube => "Textured cube",
            Demo::Blend => "Texture blending",
            Demo::Square => "Catch the square",
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Demo {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "snow" | "snowfall" => Ok(Demo::Snow),
            "cube" => Ok(Demo::Cube),
            "blend" | "blending" => Ok(Demo::Blend),
            "square" | "hover" => Ok(Demo::Square),
            _ => Err(DemoError::UnknownDemo(s.to_string())),
        }
    }
}

/// Snow demo: sliding box and falling flake
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowSettings {
    pub world_half_extent: f32,
    pub box_half_width: f32,
    pub box_half_height: f32,
    /// Box units per tick
    pub box_speed: f32,
    /// Flake units per tick
    pub fall_rate: f32,
    pub drift: f32,
    pub initial_radius: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Circle tessellation
    pub segments: u32,
}

impl Default for SnowSettings {
    fn default() -> Self {
        Self {
            world_half_extent: SNOW_WORLD_HALF_EXTENT,
            box_half_width: BOX_HALF_WIDTH,
            box_half_height: BOX_HALF_HEIGHT,
            box_speed: BOX_SPEED,
            fall_rate: FLAKE_FALL_RATE,
            drift: FLAKE_DRIFT,
            initial_radius: FLAKE_INITIAL_RADIUS,
            radius_min: FLAKE_RADIUS_MIN,
            radius_max: FLAKE_RADIUS_MAX,
            segments: FLAKE_SEGMENTS,
        }
    }
}

impl SnowSettings {
    /// The flake lives inside the box: top and floor are the box edges
    pub fn particle_config(&self) -> ParticleConfig {
        ParticleConfig {
            top: self.box_half_height,
            floor: -self.box_half_height,
            half_width: self.box_half_width,
            fall_rate: self.fall_rate,
            drift: self.drift,
            initial_radius: self.initial_radius,
            radius_min: self.radius_min,
            radius_max: self.radius_max,
        }
    }
}

/// Rotating open cube
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeSettings {
    pub degrees_per_second: f32,
    pub axis: [f32; 3],
    /// Front and back faces
    pub texture_a: PathBuf,
    /// Left and right faces
    pub texture_b: PathBuf,
}

impl Default for CubeSettings {
    fn default() -> Self {
        Self {
            degrees_per_second: CUBE_DEGREES_PER_SECOND,
            axis: CUBE_AXIS,
            texture_a: PathBuf::from("textures/pollock.jpg"),
            texture_b: PathBuf::from("textures/pollock2.jpg"),
        }
    }
}

/// Rotating quad mixing two textures
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendSettings {
    pub degrees_per_second: f32,
    pub axis: [f32; 3],
    /// Weight of the front texture (0.0 - 1.0)
    pub alpha_front: f32,
    /// Weight of the back texture (0.0 - 1.0)
    pub alpha_back: f32,
    pub texture_front: PathBuf,
    pub texture_back: PathBuf,
}

impl Default for BlendSettings {
    fn default() -> Self {
        Self {
            degrees_per_second: BLEND_DEGREES_PER_SECOND,
            axis: BLEND_AXIS,
            alpha_front: BLEND_ALPHA_FRONT,
            alpha_back: BLEND_ALPHA_BACK,
            texture_front: PathBuf::from("textures/pollock2.jpg"),
            texture_back: PathBuf::from("textures/monalisa.jpg"),
        }
    }
}

/// Hover square
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SquareSettings {
    pub world_half_extent: f32,
    pub half_side: f32,
}

impl Default for SquareSettings {
    fn default() -> Self {
        Self {
            world_half_extent: SQUARE_WORLD_HALF_EXTENT,
            half_side: SQUARE_HALF_SIDE,
        }
    }
}

/// All demo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
    pub window_width: u32,
    pub window_height: u32,
    /// Simulation ticks per second
    pub tick_hz: f32,
    pub snow: SnowSettings,
    pub cube: CubeSettings,
    pub blend: BlendSettings,
    pub square: SquareSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            tick_hz: TICK_HZ,
            snow: SnowSettings::default(),
            cube: CubeSettings::default(),
            blend: BlendSettings::default(),
            square: SquareSettings::default(),
        }
    }
}

impl Settings {
    /// Looked up in the working directory when no path is given
    pub const DEFAULT_PATH: &'static str = "gl-demos.json";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, DemoError> {
        let json = std::fs::read_to_string(path).map_err(|source| DemoError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json).map_err(|source| DemoError::SettingsJson {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load `path` if given, else `DEFAULT_PATH` if it exists, else defaults.
    /// An explicitly named file must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, DemoError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default_path = Path::new(Self::DEFAULT_PATH);
        if default_path.exists() {
            return Self::load(default_path);
        }

        log::info!("Using default settings");
        Ok(Self::default())
    }

    /// Checks the values that no simulation constructor looks at
    pub fn validate(&self) -> Result<(), DemoError> {
        if !self.tick_hz.is_finite() || self.tick_hz <= 0.0 {
            return Err(DemoError::config(format!(
                "tick_hz must be positive (got {})",
                self.tick_hz
            )));
        }
        // A clamped frame must fit in the substep budget or the sim runs slow
        let max_hz = MAX_SUBSTEPS as f32 / MAX_FRAME_SECS;
        if self.tick_hz > max_hz {
            return Err(DemoError::config(format!(
                "tick_hz must be at most {max_hz} (got {})",
                self.tick_hz
            )));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(DemoError::config("window size must be non-zero"));
        }
        if self.snow.segments < 3 {
            return Err(DemoError::config("snow.segments must be at least 3"));
        }
        for (name, alpha) in [
            ("blend.alpha_front", self.blend.alpha_front),
            ("blend.alpha_back", self.blend.alpha_back),
        ] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(DemoError::config(format!(
                    "{name} must be in [0, 1] (got {alpha})"
                )));
            }
        }
        Ok(())
    }

    /// Seconds of wall time represented by one tick
    pub fn seconds_per_tick(&self) -> f32 {
        1.0 / self.tick_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let settings = Settings::default();
        assert_eq!(settings.window_width, 800);
        assert_eq!(settings.snow.box_speed, BOX_SPEED);
        assert_eq!(settings.blend.alpha_front, 0.4);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "snow": { "fall_rate": 0.01 } }"#)
            .unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.snow.fall_rate, 0.01);
        assert_eq!(settings.snow.box_half_width, BOX_HALF_WIDTH);
        assert_eq!(settings.cube.degrees_per_second, CUBE_DEGREES_PER_SECOND);
        assert_eq!(settings.tick_hz, TICK_HZ);
    }

    #[test]
    fn test_empty_json_is_default() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings.seed, None);
        assert_eq!(settings.square.half_side, SQUARE_HALF_SIDE);
    }

    #[test]
    fn test_bad_json_is_rejected() {
        assert!(Settings::from_json(r#"{ "tick_hz": "fast" }"#).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.tick_hz = 0.0;
        assert!(matches!(settings.validate(), Err(DemoError::Config(_))));

        let mut settings = Settings::default();
        settings.blend.alpha_back = 1.5;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.snow.segments = 2;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_caps_tick_rate() {
        let mut settings = Settings::default();
        settings.tick_hz = 1000.0;
        assert!(matches!(settings.validate(), Err(DemoError::Config(_))));

        settings.tick_hz = 60.0;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_explicit_file_errors() {
        let result = Settings::load_or_default(Some(Path::new("does/not/exist.json")));
        assert!(matches!(result, Err(DemoError::SettingsIo { .. })));
    }

    #[test]
    fn test_particle_config_from_box() {
        let config = SnowSettings::default().particle_config();
        assert_eq!(config.top, 3.0);
        assert_eq!(config.floor, -3.0);
        assert_eq!(config.half_width, 7.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_demo_parsing() {
        assert_eq!("snow".parse::<Demo>().unwrap(), Demo::Snow);
        assert_eq!("CUBE".parse::<Demo>().unwrap(), Demo::Cube);
        assert_eq!("blending".parse::<Demo>().unwrap(), Demo::Blend);
        assert_eq!("hover".parse::<Demo>().unwrap(), Demo::Square);
        assert!(matches!(
            "teapot".parse::<Demo>(),
            Err(DemoError::UnknownDemo(name)) if name == "teapot"
        ));
        for demo in Demo::ALL {
            assert_eq!(demo.as_str().parse::<Demo>().unwrap(), demo);
        }
    }
}
