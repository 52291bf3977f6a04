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

//! Closed-form rotation helpers for presentation and initial conditions.
//! None of these feed back into the propagation math.

use crate::linalg::{Matrix3, Vector3};

/// Mean obliquity of the ecliptic (rad) at `jd`, cubic in Julian centuries
/// since J2000.
pub fn obliquity_of_ecliptic(jd: f64) -> f64 {
    let t = (jd - 2_451_545.0) / 36_525.0;
    let degrees =
        23.43929111 - 46.8150 * t / 3600.0 - 0.00059 * t * t / 3600.0
            + 0.001813 * t * t * t / 3600.0;
    degrees.to_radians()
}

/// Rotation taking equatorial (ICRS/J2000-aligned) coordinates into the
/// ecliptic frame at `jd`.
pub fn ecliptic_from_icrs(jd: f64) -> Matrix3<f64> {
    let (s, c) = obliquity_of_ecliptic(jd).sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, c, s, //
        0.0, -s, c,
    )
}

/// Rotation whose columns are the orbital-frame axes for a relative state:
/// x along the velocity (prograde), y along the orbit normal, z completing the
/// triad (radially outward for a circular orbit). Maps orbital-frame
/// components, e.g. an impulse, into the inertial frame.
pub fn orbital_frame(r_rel: &Vector3<f64>, v_rel: &Vector3<f64>) -> Matrix3<f64> {
    let x = v_rel.normalize();
    let y = r_rel.cross(v_rel).normalize();
    let z = x.cross(&y);
    Matrix3::from_columns(&[x, y, z])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn obliquity_at_j2000() {
        // 23.439° at the J2000 epoch.
        assert_relative_eq!(
            obliquity_of_ecliptic(2_451_545.0).to_degrees(),
            23.43929111,
            max_relative = 1e-9
        );
    }

    #[test]
    fn ecliptic_rotation_is_orthonormal() {
        let dcm = ecliptic_from_icrs(2_460_000.5);
        let should_be_eye = dcm * dcm.transpose();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(should_be_eye[(i, j)], expected, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn orbital_frame_for_circular_motion() {
        // Circular motion in the xy plane: prograde = +y, normal = +z, so the
        // completing axis is radially outward, +x.
        let dcm = orbital_frame(&Vector3::new(1.0, 0.0, 0.0), &Vector3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(dcm[(0, 2)], 1.0, epsilon = 1e-14);
        assert_relative_eq!(dcm[(1, 0)], 1.0, epsilon = 1e-14);
        assert_relative_eq!(dcm[(2, 1)], 1.0, epsilon = 1e-14);
    }
}
