mod macros;

pub mod accel;
pub mod camera;
pub mod canvas;
pub mod computations;
pub mod intersection;
pub mod lights;
pub mod material;
pub mod math;
pub mod patterns;
pub mod scene;
pub mod settings;
pub mod shapes;
pub mod world;

// Used by the logging macros
#[doc(hidden)]
pub use log;
