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

use snafu::prelude::*;
use std::fmt;

/// Provides different methods for controlling the error computation of the integrator.
pub mod error_ctrl;
pub use self::error_ctrl::*;

mod instance;
pub use instance::*;
mod propagator;
pub use propagator::*;
mod rk_methods;
pub use rk_methods::*;
mod options;
pub use options::*;

use crate::cosmic::SpacecraftState;
use crate::dynamics::DynamicsError;
use crate::md::Trajectory;
use crate::time::Duration;

/// Stores the details of the previous integration step of a given propagator.
#[derive(Copy, Clone, Debug)]
pub struct IntegrationDetails {
    /// step size used
    pub step: Duration,
    /// error in the previous integration step
    pub error: f64,
    /// number of attempts needed by an adaptive step size to be within the tolerance
    pub attempts: u8,
}

impl fmt::Display for IntegrationDetails {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "IntegrationDetails {{step: {}, error: {:.3e}, attempts: {}}}",
            self.step, self.error, self.attempts
        )
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PropagationError {
    #[snafu(display("encountered a dynamics error: {source}"))]
    Dynamics { source: DynamicsError },
    #[snafu(display("propagation duration must be strictly positive, got {duration}"))]
    InvalidDuration { duration: Duration },
    /// The solver produced non-finite values; the furthest valid state is
    /// preserved. Surfaced, never clamped or retried.
    #[snafu(display("integration diverged at {}: {reason}", furthest.epoch))]
    Diverged {
        reason: &'static str,
        furthest: Box<SpacecraftState>,
    },
    /// User-requested halt; the step sequence produced so far is preserved.
    #[snafu(display("propagation cancelled after {} accepted states", partial.len()))]
    Cancelled { partial: Box<Trajectory> },
}
