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

use crate::cosmic::SpacecraftState;
use crate::ephemeris::EphemerisError;
use crate::linalg::Vector6;
use snafu::prelude::*;

/// Gravitational n-body dynamics against ephemeris-backed perturbers.
pub mod orbital;
pub use self::orbital::*;

/// A trait for models with equations of motion that can be integrated.
pub trait Dynamics {
    /// Defines the equations of motion.
    ///
    /// - `delta_t_s`: seconds past the anchor epoch of these dynamics.
    /// - `state_vec`: position (m) and velocity (m/s) as a 6-vector, which
    ///   changes at each integration stage.
    fn eom(&self, delta_t_s: f64, state_vec: &Vector6<f64>) -> Result<Vector6<f64>, DynamicsError>;

    /// Performs final changes after each accepted integration step.
    ///
    /// Also called before the first step to update the initial state if needed.
    fn finally(&self, next_state: SpacecraftState) -> Result<SpacecraftState, DynamicsError> {
        Ok(next_state)
    }
}

/// Dynamical model errors.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DynamicsError {
    /// A perturbing body could not be materialized over the propagation window.
    #[snafu(display("could not bind a perturbing body: {source}"))]
    PerturberBind { source: EphemerisError },
}
