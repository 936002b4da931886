use crate::error::{DomainError, Result};

/// A reference ellipsoid of revolution given by its equatorial and polar radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    equatorial: f64,
    polar: f64,
}

impl Ellipsoid {
    /// The WGS 84 reference ellipsoid, in metres.
    pub const WGS84: Self = Self {
        equatorial: 6_378_137.0,
        polar: 6_356_752.314_245,
    };

    /// Creates a new ellipsoid.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRadius`] if either radius is not finite
    /// and strictly positive.
    pub fn new(equatorial: f64, polar: f64) -> Result<Self> {
        check_radius("equatorial radius", equatorial)?;
        check_radius("polar radius", polar)?;
        Ok(Self { equatorial, polar })
    }

    /// Creates a sphere, i.e. an ellipsoid with equal radii.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRadius`] if the radius is not finite and
    /// strictly positive.
    pub fn sphere(radius: f64) -> Result<Self> {
        Self::new(radius, radius)
    }

    /// Returns the equatorial radius.
    #[must_use]
    pub fn equatorial(&self) -> f64 {
        self.equatorial
    }

    /// Returns the polar radius.
    #[must_use]
    pub fn polar(&self) -> f64 {
        self.polar
    }

    /// Returns the geocentric radius at latitude `lat` (radians).
    ///
    /// `r(lat) = sqrt(((r1^2 cos lat)^2 + (r2^2 sin lat)^2) / ((r1 cos lat)^2 + (r2 sin lat)^2))`
    ///
    /// Both norms go through `hypot`, which keeps `r(0) == r1` and
    /// `r(pi/2) == r2` exact for integral radii.
    #[must_use]
    pub fn radius_at(&self, lat: f64) -> f64 {
        let (sin, cos) = lat.sin_cos();
        let a = self.equatorial * cos;
        let b = self.polar * sin;
        (self.equatorial * a).hypot(self.polar * b) / a.hypot(b)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

/// Returns the radius of the ellipsoid `(r1, r2)` at latitude `lat` (radians).
///
/// # Errors
///
/// Returns [`DomainError::InvalidRadius`] if either radius is not finite and
/// strictly positive.
pub fn geocentric_radius(lat: f64, r1: f64, r2: f64) -> Result<f64> {
    Ok(Ellipsoid::new(r1, r2)?.radius_at(lat))
}

fn check_radius(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DomainError::InvalidRadius { parameter, value }.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::MeshkernError;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn equator_and_pole() {
        let r1 = 6_378_137.0;
        let r2 = 6_356_752.0;
        assert_relative_eq!(geocentric_radius(0.0, r1, r2).unwrap(), r1, max_relative = 1e-15);
        assert_relative_eq!(geocentric_radius(FRAC_PI_2, r1, r2).unwrap(), r2, max_relative = 1e-15);
        assert_relative_eq!(geocentric_radius(-FRAC_PI_2, r1, r2).unwrap(), r2, max_relative = 1e-15);
    }

    #[test]
    fn monotonic_between_equator_and_pole() {
        let e = Ellipsoid::WGS84;
        let mut previous = e.radius_at(0.0);
        for i in 1..=90 {
            let lat = f64::from(i).to_radians();
            let r = e.radius_at(lat);
            assert!(r <= previous, "radius grew at {i} degrees");
            assert!(r >= e.polar() - 1e-6 && r <= e.equatorial() + 1e-6);
            previous = r;
        }
    }

    #[test]
    fn symmetric_about_equator() {
        let e = Ellipsoid::WGS84;
        for deg in [10.0_f64, 33.0, 45.0, 71.5] {
            assert_relative_eq!(e.radius_at(deg.to_radians()), e.radius_at(-deg.to_radians()), epsilon = 1e-12);
        }
    }

    #[test]
    fn sphere_is_constant() {
        let s = Ellipsoid::sphere(2.5).unwrap();
        for deg in [0.0_f64, 12.0, 45.0, 89.0] {
            assert_relative_eq!(s.radius_at(deg.to_radians()), 2.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn rejects_bad_radii() {
        let err = geocentric_radius(0.0, -1.0, 1.0).unwrap_err();
        assert!(matches!(
            err,
            MeshkernError::Domain(DomainError::InvalidRadius {
                parameter: "equatorial radius",
                ..
            })
        ));
        assert!(Ellipsoid::new(1.0, 0.0).is_err());
        assert!(Ellipsoid::new(f64::NAN, 1.0).is_err());
        assert!(Ellipsoid::new(1.0, f64::INFINITY).is_err());
    }
}
