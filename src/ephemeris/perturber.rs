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

use super::{
    EphemerisError, EphemerisSource, InterpolantConstructionSnafu, InvalidWindowSnafu,
    UnsupportedBodySnafu, M_PER_KM,
};
use crate::cosmic::Body;
use crate::interp::LinearInterpolant;
use crate::linalg::Vector3;
use crate::time::SECONDS_PER_DAY;
use snafu::prelude::*;

/// Sampling cadence used when pre-tabulating a perturber over a window.
pub const SAMPLES_PER_DAY: f64 = 10.0;

/// A [`Body`] bound to a propagation window, with its position and velocity
/// pre-sampled from an [`EphemerisSource`] into linear interpolants.
///
/// Binding happens exactly once per propagation run: the source is queried at a
/// fixed cadence over the window, and everything the integration loop needs is
/// tabulated up front. A new window means a new bound value, so interpolants
/// can never be reused stale across runs.
#[derive(Clone, Debug)]
pub struct BoundPerturbingBody {
    body: Body,
    gm: f64,
    position: LinearInterpolant,
    velocity: LinearInterpolant,
}

impl BoundPerturbingBody {
    /// Samples `source` at [`SAMPLES_PER_DAY`] over `[start_jd, end_jd]` (both
    /// endpoints included) and converts the ephemeris-native units into meters
    /// and meters per second.
    pub fn bind<S: EphemerisSource>(
        body: Body,
        source: &S,
        start_jd: f64,
        end_jd: f64,
    ) -> Result<Self, EphemerisError> {
        ensure!(
            end_jd > start_jd,
            InvalidWindowSnafu {
                start: start_jd,
                end: end_jd
            }
        );
        let body_id = body.ephemeris_id.context(UnsupportedBodySnafu {
            name: body.name.clone(),
        })?;

        let span_days = end_jd - start_jd;
        let intervals = (span_days * SAMPLES_PER_DAY).ceil().max(1.0) as usize;
        let step_days = span_days / intervals as f64;

        let mut times = Vec::with_capacity(intervals + 1);
        let mut positions = Vec::with_capacity(intervals + 1);
        let mut velocities = Vec::with_capacity(intervals + 1);
        for k in 0..=intervals {
            let jd = if k == intervals {
                end_jd
            } else {
                start_jd + step_days * k as f64
            };
            let (r_km, v_km_day) = source.position_velocity(body_id, jd)?;
            times.push(jd);
            positions.push(r_km * M_PER_KM);
            velocities.push(v_km_day * (M_PER_KM / SECONDS_PER_DAY));
        }
        debug!(
            "sampled {} at {} points over [{:.3}, {:.3}] JD",
            body.name,
            times.len(),
            start_jd,
            end_jd
        );

        let position = LinearInterpolant::try_new(times.clone(), positions)
            .context(InterpolantConstructionSnafu)?;
        let velocity =
            LinearInterpolant::try_new(times, velocities).context(InterpolantConstructionSnafu)?;
        let gm = body.gm();

        Ok(Self {
            body,
            gm,
            position,
            velocity,
        })
    }

    /// Interpolated barycentric position (m) at `jd`, clamped to the window.
    pub fn position_at(&self, jd: f64) -> Vector3<f64> {
        self.position.evaluate(jd)
    }

    /// Interpolated barycentric velocity (m/s) at `jd`, clamped to the window.
    pub fn velocity_at(&self, jd: f64) -> Vector3<f64> {
        self.velocity.evaluate(jd)
    }

    /// Gravitational parameter of the bound body (m³/s²), cached at bind time.
    pub fn gm(&self) -> f64 {
        self.gm
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// The window the interpolants were built over, as `(start_jd, end_jd)`.
    pub fn window(&self) -> (f64, f64) {
        self.position.domain()
    }
}
