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

use super::{Dynamics, DynamicsError, PerturberBindSnafu};
use crate::cosmic::Body;
use crate::ephemeris::{BoundPerturbingBody, EphemerisSource};
use crate::linalg::{Vector3, Vector6};
use crate::time::{Duration, Epoch, Unit, SECONDS_PER_DAY};
use snafu::prelude::*;

/// Inverse-square point-mass acceleration (m/s²) of a perturbing body on a
/// test particle at barycentric `position_m` and time `jd`.
///
/// Singular when the particle sits exactly at the body center: the result is
/// non-finite there and the integrator reports it as divergence. Callers are
/// expected to stay above the body surface; no minimum distance is enforced.
pub fn point_mass_acceleration(
    position_m: &Vector3<f64>,
    jd: f64,
    body: &BoundPerturbingBody,
) -> Vector3<f64> {
    let r_rel = position_m - body.position_at(jd);
    -body.gm() * r_rel / r_rel.norm().powi(3)
}

/// The n-body right-hand side: perturbers are externally supplied trajectories
/// (a flat list, no hierarchy), the test particle does not affect them.
///
/// All ephemeris sampling happens in [`bind`](Self::bind), before integration
/// starts; the equations of motion only ever touch the interpolants.
#[derive(Clone, Debug)]
pub struct NBodyDynamics {
    epoch: Epoch,
    epoch_jd: f64,
    /// Test-particle mass (kg). Gravity cancels it out of the acceleration;
    /// the division stays explicit so mass-dependent force terms can be added.
    pub mass_kg: f64,
    bodies: Vec<BoundPerturbingBody>,
}

impl NBodyDynamics {
    /// Materializes every perturber over `[epoch, epoch + duration]` and
    /// anchors relative time at `epoch`.
    ///
    /// Any body that fails to bind aborts the whole construction: a
    /// perturbation model is either complete or not trusted.
    pub fn bind<S: EphemerisSource>(
        bodies: &[Body],
        source: &S,
        epoch: Epoch,
        duration: Duration,
    ) -> Result<Self, DynamicsError> {
        let epoch_jd = epoch.to_jde_tdb_days();
        let end_jd = epoch_jd + duration.to_unit(Unit::Day);
        let mut bound = Vec::with_capacity(bodies.len());
        for body in bodies {
            bound.push(
                BoundPerturbingBody::bind(body.clone(), source, epoch_jd, end_jd)
                    .context(PerturberBindSnafu)?,
            );
        }
        info!(
            "bound {} perturbing bodies over [{:.3}, {:.3}] JD",
            bound.len(),
            epoch_jd,
            end_jd
        );
        Ok(Self {
            epoch,
            epoch_jd,
            mass_kg: 1.0,
            bodies: bound,
        })
    }

    pub fn with_mass(mut self, mass_kg: f64) -> Self {
        self.mass_kg = mass_kg;
        self
    }

    /// The epoch relative time is anchored at.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn bodies(&self) -> &[BoundPerturbingBody] {
        &self.bodies
    }
}

impl Dynamics for NBodyDynamics {
    fn eom(&self, delta_t_s: f64, state_vec: &Vector6<f64>) -> Result<Vector6<f64>, DynamicsError> {
        let jd = self.epoch_jd + delta_t_s / SECONDS_PER_DAY;
        let position = state_vec.fixed_rows::<3>(0).into_owned();
        let velocity = state_vec.fixed_rows::<3>(3).into_owned();

        let mut force = Vector3::zeros();
        for body in &self.bodies {
            force += point_mass_acceleration(&position, jd, body) * self.mass_kg;
        }
        let accel = force / self.mass_kg;

        Ok(Vector6::new(
            velocity[0], velocity[1], velocity[2], accel[0], accel[1], accel[2],
        ))
    }
}
