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

use crate::interp::InterpError;
use crate::linalg::Vector3;
use snafu::prelude::*;

mod perturber;
pub use perturber::*;

/// Meters per kilometer, the position unit conversion from ephemeris-native data.
pub const M_PER_KM: f64 = 1.0e3;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum EphemerisError {
    /// The body cannot be resolved by any ephemeris source.
    #[snafu(display("{name} has no ephemeris identifier"))]
    UnsupportedBody { name: String },
    /// Interpolants can only be built over a window of positive length.
    #[snafu(display("invalid sampling window [{start}, {end}] JD: end must be after start"))]
    InvalidWindow { start: f64, end: f64 },
    /// For source implementors: the kernel has no segment covering this query.
    #[snafu(display("no ephemeris data for body {body_id} at JD {jd}"))]
    NoEphemerisData { body_id: i32, jd: f64 },
    #[snafu(display("could not build an interpolant from ephemeris samples: {source}"))]
    InterpolantConstruction { source: InterpError },
}

/// Capability over a binary planetary ephemeris, e.g. an SPK kernel read by an
/// external decoder.
///
/// Implementors own the kernel file entirely, including its acquisition: the
/// conventional contract is an idempotent "fetch if absent" (succeed if a local
/// copy exists or a download completes) performed before the source is handed
/// to this crate. Positions and velocities are expected in the kernel's native
/// units, kilometers and kilometers per day, in the barycentric inertial frame.
///
/// Body identifiers follow the usual planetary-kernel numbering: Sun = 10,
/// Mercury = 1, Venus = 2, Earth = 3, Mars = 4, Jupiter = 5, Saturn = 6,
/// Uranus = 7, Neptune = 8.
pub trait EphemerisSource {
    /// Exact position (km) and velocity (km/day) of `body_id` at `jd` (TDB).
    fn position_velocity(
        &self,
        body_id: i32,
        jd: f64,
    ) -> Result<(Vector3<f64>, Vector3<f64>), EphemerisError>;

    /// Exact position (km) of `body_id` at `jd` (TDB).
    fn position(&self, body_id: i32, jd: f64) -> Result<Vector3<f64>, EphemerisError> {
        Ok(self.position_velocity(body_id, jd)?.0)
    }
}
