mod ellipsoid;
mod lambert;

pub use ellipsoid::{geocentric_radius, Ellipsoid};
pub use lambert::{lambert_equal_area, LambertEqualArea, ANTIPODAL_TOLERANCE};
