pub mod logging;
pub mod math;

pub use math::{quat_from_euler_degrees, Vector3};
