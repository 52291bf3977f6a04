/*
    Flyby, fast n-body trajectory propagation
    Copyright (C) 2023 Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use crate::linalg::{Matrix3, Vector3};
use serde_derive::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

/// Classical orbital elements of a two-body orbit about some central body.
///
/// Angles in radians, semi-major axis in meters. This type only does
/// closed-form conversions: it is used to construct initial conditions and to
/// plot idealized ellipses, never inside the propagation hot path.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeplerianOrbit {
    /// Semi-major axis (m).
    pub sma_m: f64,
    /// Eccentricity.
    pub ecc: f64,
    /// Inclination (rad).
    pub inc_rad: f64,
    /// Right ascension of the ascending node (rad).
    pub raan_rad: f64,
    /// Argument of periapsis (rad).
    pub aop_rad: f64,
}

impl KeplerianOrbit {
    pub fn new(sma_m: f64, ecc: f64, inc_rad: f64, raan_rad: f64, aop_rad: f64) -> Self {
        Self {
            sma_m,
            ecc,
            inc_rad,
            raan_rad,
            aop_rad,
        }
    }

    /// Rotation from the perifocal frame into the inertial frame.
    pub fn perifocal_to_inertial(&self) -> Matrix3<f64> {
        let (s_raan, c_raan) = self.raan_rad.sin_cos();
        let (s_aop, c_aop) = self.aop_rad.sin_cos();
        let (s_inc, c_inc) = self.inc_rad.sin_cos();
        Matrix3::new(
            c_raan * c_aop - s_raan * s_aop * c_inc,
            -c_raan * s_aop - s_raan * c_aop * c_inc,
            s_raan * s_inc,
            s_raan * c_aop + c_raan * s_aop * c_inc,
            -s_raan * s_aop + c_raan * c_aop * c_inc,
            -c_raan * s_inc,
            s_aop * s_inc,
            c_aop * s_inc,
            c_inc,
        )
    }

    /// Orbital radius (m) at true anomaly `nu_rad`.
    pub fn radius_at(&self, nu_rad: f64) -> f64 {
        self.sma_m * (1.0 - self.ecc.powi(2)) / (1.0 + self.ecc * nu_rad.cos())
    }

    /// Position (m) and velocity (m/s) at true anomaly `nu_rad`, for a central
    /// body of gravitational parameter `gm` (m³/s²).
    pub fn state_at(&self, nu_rad: f64, gm: f64) -> (Vector3<f64>, Vector3<f64>) {
        let r = self.radius_at(nu_rad);
        let r_perifocal = r * Vector3::new(nu_rad.cos(), nu_rad.sin(), 0.0);

        let v_scale = (gm / (self.sma_m * (1.0 - self.ecc.powi(2)))).sqrt();
        let v_perifocal = v_scale * Vector3::new(-nu_rad.sin(), self.ecc + nu_rad.cos(), 0.0);

        let dcm = self.perifocal_to_inertial();
        (dcm * r_perifocal, dcm * v_perifocal)
    }

    /// `n` positions (m) sampled uniformly in true anomaly over one revolution,
    /// for plotting the idealized ellipse.
    pub fn positions(&self, n: usize) -> Vec<Vector3<f64>> {
        let dcm = self.perifocal_to_inertial();
        (0..n)
            .map(|k| {
                let nu = TAU * k as f64 / n as f64;
                let r = self.radius_at(nu);
                dcm * (r * Vector3::new(nu.cos(), nu.sin(), 0.0))
            })
            .collect()
    }

    /// Orbital period (s) about a central body of gravitational parameter `gm`.
    pub fn period_s(&self, gm: f64) -> f64 {
        TAU * (self.sma_m.powi(3) / gm).sqrt()
    }

    /// Fits the osculating orbit to a state about a central body.
    ///
    /// `r` in meters and `v` in meters per second, both expressed about the
    /// central body; `gm` in m³/s². Follows Curtis, Orbital Mechanics for
    /// Engineering Students, section 4.3, with quadrant-aware node and
    /// periapsis angles. Degenerate for exactly equatorial orbits (the node is
    /// undefined there, as in the textbook formulation).
    pub fn from_state(r: &Vector3<f64>, v: &Vector3<f64>, gm: f64) -> Self {
        let r_norm = r.norm();
        let v_norm = v.norm();
        let v_radial = r.dot(v) / r_norm;

        let h = r.cross(v);
        let inc = (h[2] / h.norm()).acos();

        let node = Vector3::z().cross(&h);
        let raan = node[1].atan2(node[0]);

        let e_vec = ((v_norm.powi(2) - gm / r_norm) * r - (r_norm * v_radial) * v) / gm;
        let aop = (e_vec[2] / inc.sin())
            .atan2(e_vec[0] * raan.cos() + e_vec[1] * raan.sin());

        let energy = v_norm.powi(2) / 2.0 - gm / r_norm;
        let sma = -gm / (2.0 * energy);

        Self::new(sma, e_vec.norm(), inc, raan, aop)
    }
}

impl fmt::Display for KeplerianOrbit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "KeplerianOrbit {{ a: {:.3} km, e: {:.6}, i: {:.4} rad, raan: {:.4} rad, aop: {:.4} rad }}",
            self.sma_m / 1e3,
            self.ecc,
            self.inc_rad,
            self.raan_rad,
            self.aop_rad
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosmic::Body;
    use approx::assert_relative_eq;

    #[test]
    fn circular_state() {
        let gm = Body::earth().gm();
        let orbit = KeplerianOrbit::new(7.0e6, 0.0, 0.0, 0.0, 0.0);
        let (r, v) = orbit.state_at(0.0, gm);
        assert_relative_eq!(r[0], 7.0e6, max_relative = 1e-12);
        assert_eq!(r[1], 0.0);
        // Circular speed from vis-viva.
        assert_relative_eq!(v.norm(), (gm / 7.0e6).sqrt(), max_relative = 1e-12);
        assert_eq!(v[0], 0.0);
    }

    #[test]
    fn osculating_fit_round_trip() {
        let gm = Body::earth().gm();
        let orbit = KeplerianOrbit::new(8.2e6, 0.05, 0.6, 1.2, 0.4);
        for nu in [0.0, 0.7, 2.9, 4.5] {
            let (r, v) = orbit.state_at(nu, gm);
            let fitted = KeplerianOrbit::from_state(&r, &v, gm);
            assert_relative_eq!(fitted.sma_m, orbit.sma_m, max_relative = 1e-9);
            assert_relative_eq!(fitted.ecc, orbit.ecc, max_relative = 1e-9);
            assert_relative_eq!(fitted.inc_rad, orbit.inc_rad, max_relative = 1e-9);
            assert_relative_eq!(fitted.raan_rad, orbit.raan_rad, max_relative = 1e-9);
            assert_relative_eq!(fitted.aop_rad, orbit.aop_rad, max_relative = 1e-9);
        }
    }

    #[test]
    fn sampled_ellipse_stays_between_apsides() {
        let orbit = KeplerianOrbit::new(1.0e7, 0.3, 0.2, 0.0, 0.0);
        let periapsis = orbit.sma_m * (1.0 - orbit.ecc);
        let apoapsis = orbit.sma_m * (1.0 + orbit.ecc);
        let points = orbit.positions(256);
        assert_eq!(points.len(), 256);
        for p in points {
            let r = p.norm();
            assert!(r >= periapsis * (1.0 - 1e-12) && r <= apoapsis * (1.0 + 1e-12));
        }
    }

    #[test]
    fn period_of_leo() {
        let gm = Body::earth().gm();
        let orbit = KeplerianOrbit::new(6.771e6, 0.0, 0.0, 0.0, 0.0);
        // ~92.5 minutes for a 400 km orbit.
        assert_relative_eq!(orbit.period_s(gm) / 60.0, 92.5, max_relative = 1e-2);
    }
}
