use crate::error::{DomainError, Result, ShapeError};

/// Denominator `1 + cos(c)` below which a point counts as antipodal.
pub const ANTIPODAL_TOLERANCE: f64 = 1e-12;

/// Lambert azimuthal equal-area projection of the unit sphere.
///
/// Angles are in radians. The projected disk has radius 2; the antipode of
/// the centre maps to its whole boundary and is rejected.
///
/// Forward:
/// `k = sqrt(2 / (1 + sin(lat0) sin(lat) + cos(lat0) cos(lat) cos(dlon)))`,
/// `x = k cos(lat) sin(dlon)`,
/// `y = k (cos(lat0) sin(lat) - sin(lat0) cos(lat) cos(dlon))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambertEqualArea {
    lon0: f64,
    lat0: f64,
    sin_lat0: f64,
    cos_lat0: f64,
}

impl LambertEqualArea {
    /// Creates a projection centred at `(lon0, lat0)`.
    #[must_use]
    pub fn new(lon0: f64, lat0: f64) -> Self {
        let (sin_lat0, cos_lat0) = lat0.sin_cos();
        Self {
            lon0,
            lat0,
            sin_lat0,
            cos_lat0,
        }
    }

    /// Returns the projection centre `(lon0, lat0)`.
    #[must_use]
    pub fn centre(&self) -> (f64, f64) {
        (self.lon0, self.lat0)
    }

    /// Projects a single point, or `None` if it is antipodal to the centre.
    #[must_use]
    pub fn project(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_dlon, cos_dlon) = (lon - self.lon0).sin_cos();

        let denom = 1.0 + self.sin_lat0 * sin_lat + self.cos_lat0 * cos_lat * cos_dlon;
        if denom <= ANTIPODAL_TOLERANCE {
            return None;
        }
        let k = (2.0 / denom).sqrt();

        Some((
            k * cos_lat * sin_dlon,
            k * (self.cos_lat0 * sin_lat - self.sin_lat0 * cos_lat * cos_dlon),
        ))
    }

    /// Maps a projected point back to `(lon, lat)`, or `None` if it lies
    /// outside the projection disk.
    ///
    /// The returned longitude is `lon0 + dlon` with `dlon` in `[-pi, pi]`.
    #[must_use]
    pub fn unproject(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let rho = x.hypot(y);
        if rho > 2.0 + ANTIPODAL_TOLERANCE {
            return None;
        }
        if rho == 0.0 {
            return Some((self.lon0, self.lat0));
        }

        let c = 2.0 * (rho / 2.0).min(1.0).asin();
        let (sin_c, cos_c) = c.sin_cos();

        let lat = (cos_c * self.sin_lat0 + y * sin_c * self.cos_lat0 / rho)
            .clamp(-1.0, 1.0)
            .asin();
        let lon = self.lon0
            + (x * sin_c).atan2(rho * self.cos_lat0 * cos_c - y * self.sin_lat0 * sin_c);
        Some((lon, lat))
    }

    /// Projects parallel arrays of longitudes and latitudes.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::LengthMismatch`] if the arrays differ in length,
    /// or [`DomainError::Antipodal`] for the first point antipodal to the
    /// centre. No output is produced on error.
    pub fn forward(&self, lons: &[f64], lats: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
        check_parallel("latitudes", lons, lats)?;

        let mut xs = Vec::with_capacity(lons.len());
        let mut ys = Vec::with_capacity(lons.len());
        for (point, (&lon, &lat)) in lons.iter().zip(lats).enumerate() {
            let (x, y) = self
                .project(lon, lat)
                .ok_or(DomainError::Antipodal { point })?;
            xs.push(x);
            ys.push(y);
        }
        Ok((xs, ys))
    }

    /// Inverse of [`LambertEqualArea::forward`].
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::LengthMismatch`] if the arrays differ in length,
    /// or [`DomainError::OutsideProjection`] for the first point farther than
    /// 2 from the origin.
    pub fn inverse(&self, xs: &[f64], ys: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
        check_parallel("y coordinates", xs, ys)?;

        let mut lons = Vec::with_capacity(xs.len());
        let mut lats = Vec::with_capacity(xs.len());
        for (point, (&x, &y)) in xs.iter().zip(ys).enumerate() {
            let (lon, lat) = self
                .unproject(x, y)
                .ok_or(DomainError::OutsideProjection {
                    point,
                    rho: x.hypot(y),
                })?;
            lons.push(lon);
            lats.push(lat);
        }
        Ok((lons, lats))
    }
}

/// Projects `(lons, lats)` with a Lambert azimuthal equal-area projection
/// centred at `(lon0, lat0)`.
///
/// # Errors
///
/// See [`LambertEqualArea::forward`].
pub fn lambert_equal_area(
    lon0: f64,
    lat0: f64,
    lons: &[f64],
    lats: &[f64],
) -> Result<(Vec<f64>, Vec<f64>)> {
    LambertEqualArea::new(lon0, lat0).forward(lons, lats)
}

fn check_parallel(what: &'static str, first: &[f64], second: &[f64]) -> Result<()> {
    if first.len() == second.len() {
        Ok(())
    } else {
        Err(ShapeError::LengthMismatch {
            what,
            expected: first.len(),
            actual: second.len(),
        }
        .into())
    }
}
