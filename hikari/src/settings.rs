use std::{fs::File, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, EnumVariantNames};
use thiserror::Error;

use crate::{accel::AccelSettings, world::MAX_DEPTH};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to open settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// The built-in scenes.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Display,
    EnumString,
    EnumVariantNames,
    Deserialize,
    Serialize,
)]
pub enum SceneType {
    /// Patterned spheres in front of a wall
    #[default]
    Spheres,
    /// Dice carved out with CSG
    Dice,
    /// Hexagon of nested groups
    Hexagon,
    /// Glass and mirror spheres on a checkered floor
    Glass,
    /// Procedural triangle mesh
    Mesh,
    /// Quartic surfaces including a two-torus intersection
    Quartic,
    /// Wavefront OBJ file from `RenderSettings::obj_path`
    Obj,
}

/// Everything the renderer binary reads from its settings file.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderSettings {
    /// File to write, PPM or any format `image` supports by extension
    pub output: PathBuf,
    pub width: usize,
    pub height: usize,
    /// Field of view in degrees
    pub fov: f64,
    /// Bounces for reflected and refracted rays
    pub depth: u32,
    pub samples_per_pixel: u32,
    pub scene: SceneType,
    pub obj_path: Option<PathBuf>,
    pub accel: AccelSettings,
    /// Worker threads, 0 uses all cores
    pub threads: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            output: PathBuf::from("render.png"),
            width: 640,
            height: 480,
            fov: 60.0,
            depth: MAX_DEPTH,
            samples_per_pixel: 1,
            scene: SceneType::default(),
            obj_path: None,
            accel: AccelSettings::default(),
            threads: 0,
        }
    }
}

impl RenderSettings {
    /// Loads `RenderSettings` from the YAML at `path`. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let file = File::open(path)?;
        Ok(serde_yaml::from_reader(file)?)
    }

    /// Parses `RenderSettings` from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SettingsError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> Result<String, SettingsError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Returns the number of render threads to use.
    pub fn thread_count(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        }
    }
}
