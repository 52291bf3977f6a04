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

use super::{Body, KeplerianOrbit};
use crate::ephemeris::{EphemerisError, EphemerisSource, UnsupportedBodySnafu, M_PER_KM};
use crate::linalg::{Vector3, Vector6};
use crate::time::{Epoch, SECONDS_PER_DAY};
use snafu::prelude::*;
use std::fmt;

/// Spacecraft position and velocity in the barycentric inertial (J2000-aligned)
/// frame, tagged with the epoch it is valid at.
///
/// Units are meters and meters per second. During integration, relative time
/// is seconds elapsed since this epoch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpacecraftState {
    pub epoch: Epoch,
    /// Barycentric position (m).
    pub position_m: Vector3<f64>,
    /// Barycentric velocity (m/s).
    pub velocity_m_s: Vector3<f64>,
}

impl SpacecraftState {
    pub fn new(epoch: Epoch, position_m: Vector3<f64>, velocity_m_s: Vector3<f64>) -> Self {
        Self {
            epoch,
            position_m,
            velocity_m_s,
        }
    }

    /// Rebuilds a state from the 6-vector the integrator works on.
    pub fn from_vector(epoch: Epoch, vector: &Vector6<f64>) -> Self {
        Self {
            epoch,
            position_m: vector.fixed_rows::<3>(0).into_owned(),
            velocity_m_s: vector.fixed_rows::<3>(3).into_owned(),
        }
    }

    /// The 6-vector `[x, y, z, vx, vy, vz]` handed to the integrator.
    pub fn to_vector(&self) -> Vector6<f64> {
        Vector6::new(
            self.position_m[0],
            self.position_m[1],
            self.position_m[2],
            self.velocity_m_s[0],
            self.velocity_m_s[1],
            self.velocity_m_s[2],
        )
    }

    /// Position magnitude (m).
    pub fn rmag(&self) -> f64 {
        self.position_m.norm()
    }

    /// Velocity magnitude (m/s).
    pub fn vmag(&self) -> f64 {
        self.velocity_m_s.norm()
    }

    /// Builds the barycentric state of a spacecraft on `orbit` about `body` at
    /// true anomaly `nu_rad`, by querying the ephemeris source for the exact
    /// state of the central body at `epoch`.
    pub fn from_orbit<S: EphemerisSource>(
        orbit: &KeplerianOrbit,
        nu_rad: f64,
        body: &Body,
        epoch: Epoch,
        source: &S,
    ) -> Result<Self, EphemerisError> {
        let body_id = body.ephemeris_id.context(UnsupportedBodySnafu {
            name: body.name.clone(),
        })?;
        let (r_km, v_km_day) = source.position_velocity(body_id, epoch.to_jde_tdb_days())?;
        let (r_rel, v_rel) = orbit.state_at(nu_rad, body.gm());
        Ok(Self::new(
            epoch,
            r_rel + r_km * M_PER_KM,
            v_rel + v_km_day * (M_PER_KM / SECONDS_PER_DAY),
        ))
    }
}

impl fmt::Display for SpacecraftState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{}] position = [{:.3}, {:.3}, {:.3}] km  velocity = [{:.6}, {:.6}, {:.6}] km/s",
            self.epoch,
            self.position_m[0] / 1e3,
            self.position_m[1] / 1e3,
            self.position_m[2] / 1e3,
            self.velocity_m_s[0] / 1e3,
            self.velocity_m_s[1] / 1e3,
            self.velocity_m_s[2] / 1e3,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct OffsetSource;

    impl EphemerisSource for OffsetSource {
        fn position_velocity(
            &self,
            _body_id: i32,
            _jd: f64,
        ) -> Result<(Vector3<f64>, Vector3<f64>), EphemerisError> {
            Ok((Vector3::new(100.0, 0.0, 0.0), Vector3::new(0.0, 86_400.0, 0.0)))
        }
    }

    #[test]
    fn vector_round_trip() {
        let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 11, 16);
        let state = SpacecraftState::new(
            epoch,
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(4.0, 5.0, 6.0),
        );
        assert_eq!(SpacecraftState::from_vector(epoch, &state.to_vector()), state);
        assert_relative_eq!(state.rmag(), 14.0_f64.sqrt(), max_relative = 1e-15);
    }

    #[test]
    fn from_orbit_offsets_by_the_central_body() {
        let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 11, 16);
        let earth = Body::earth();
        let orbit = KeplerianOrbit::new(7.0e6, 0.0, 0.0, 0.0, 0.0);
        let state =
            SpacecraftState::from_orbit(&orbit, 0.0, &earth, epoch, &OffsetSource).unwrap();
        // 100 km offset in x, 86 400 km/day = 1 km/s offset in vy.
        assert_relative_eq!(state.position_m[0], 7.0e6 + 100.0e3, max_relative = 1e-12);
        let (_, v_rel) = orbit.state_at(0.0, earth.gm());
        assert_relative_eq!(state.velocity_m_s[1], v_rel[1] + 1000.0, max_relative = 1e-12);
    }

    #[test]
    fn from_orbit_requires_an_ephemeris_id() {
        let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 11, 16);
        let orbit = KeplerianOrbit::new(7.0e6, 0.0, 0.0, 0.0, 0.0);
        let err = SpacecraftState::from_orbit(&orbit, 0.0, &Body::kerbin(), epoch, &OffsetSource)
            .unwrap_err();
        assert!(matches!(err, EphemerisError::UnsupportedBody { .. }));
    }
}
