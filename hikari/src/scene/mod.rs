pub mod demos;
pub mod obj;

use std::time::Instant;

use thiserror::Error;

use crate::{
    hikari_info,
    math::{Point3, Transform},
    settings::{RenderSettings, SceneType},
    world::World,
};
pub use obj::ObjError;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Scene type Obj needs obj_path to be set")]
    MissingObjPath,
    #[error(transparent)]
    Obj(#[from] ObjError),
}

/// A world along with the view it is meant to be seen from.
#[derive(Clone, Debug)]
pub struct Scene {
    pub world: World,
    /// World to camera transform
    pub view: Transform,
}

impl Scene {
    /// Creates a new `Scene` seen from `from` towards `to` with +y up.
    pub fn new(world: World, from: Point3, to: Point3) -> Self {
        Self {
            world,
            view: crate::math::transforms::view_transform(
                from,
                to,
                crate::math::Vec3::new(0.0, 1.0, 0.0),
            ),
        }
    }
}

/// Builds the scene `settings` select.
pub fn load(settings: &RenderSettings) -> Result<Scene, SceneError> {
    let load_start = Instant::now();
    let accel = &settings.accel;
    let scene = match settings.scene {
        SceneType::Spheres => demos::spheres(),
        SceneType::Dice => demos::dice(),
        SceneType::Hexagon => demos::hexagon(),
        SceneType::Glass => demos::glass(),
        SceneType::Mesh => demos::mesh(accel),
        SceneType::Quartic => demos::quartic(),
        SceneType::Obj => {
            let path = settings
                .obj_path
                .as_ref()
                .ok_or(SceneError::MissingObjPath)?;
            demos::obj_model(obj::load(path)?, accel)
        }
    };
    hikari_info!(
        "Built scene {} in {:.2}s",
        settings.scene,
        load_start.elapsed().as_secs_f32()
    );
    Ok(scene)
}
