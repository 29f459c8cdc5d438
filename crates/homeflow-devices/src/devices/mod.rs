/*!
 * Device kinds for homeflow.
 *
 * One module per kind. Each kind knows how to build itself from named
 * parameters, how to describe itself, and which setters it exposes.
 */

pub mod air_conditioner;
pub mod camera;
pub mod door;
pub mod light;
pub mod tv;

pub use air_conditioner::AirConditioner;
pub use camera::Camera;
pub use door::Door;
pub use light::Light;
pub use tv::Tv;
