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

mod trajectory;
pub use trajectory::Trajectory;

use crate::cosmic::{Body, SpacecraftState};
use crate::dynamics::NBodyDynamics;
use crate::ephemeris::EphemerisSource;
use crate::propagators::{DynamicsSnafu, InvalidDurationSnafu, PropagationError, Propagator};
use crate::time::Duration;
use snafu::prelude::*;

/// Propagates `initial` under the gravity of `bodies` for `duration` with a
/// default Prince-Dormand 78 propagator, returning the final state and the
/// dense step sequence.
///
/// Every perturber is materialized over the full window before integration
/// starts; a body the ephemeris source cannot resolve fails the whole call.
pub fn propagate<S: EphemerisSource>(
    initial: SpacecraftState,
    duration: Duration,
    bodies: &[Body],
    source: &S,
) -> Result<(SpacecraftState, Trajectory), PropagationError> {
    ensure!(duration > Duration::ZERO, InvalidDurationSnafu { duration });
    let dynamics =
        NBodyDynamics::bind(bodies, source, initial.epoch, duration).context(DynamicsSnafu)?;
    Propagator::default(dynamics)
        .with(initial)
        .for_duration_with_traj(duration)
}
