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

use crate::linalg::Vector3;
use snafu::prelude::*;

/// Errors raised when building a [`LinearInterpolant`].
#[derive(Debug, Snafu, PartialEq)]
pub enum InterpError {
    #[snafu(display("an interpolant requires at least one sample"))]
    EmptySeries,
    #[snafu(display("got {times} sample times for {samples} samples"))]
    LengthMismatch { times: usize, samples: usize },
    #[snafu(display("sample times must be strictly increasing (violated at index {index})"))]
    NonMonotonicTimes { index: usize },
}

/// Linear interpolation over a strictly increasing time grid of 3-vector samples.
///
/// Construction validates the grid once so that [`evaluate`](Self::evaluate) is
/// infallible, allocation-free, and cheap enough to sit inside the equations of
/// motion of an adaptive integrator. Queries outside the sampled domain clamp
/// to the nearest sample, they never extrapolate.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearInterpolant {
    times: Vec<f64>,
    samples: Vec<Vector3<f64>>,
}

impl LinearInterpolant {
    /// Builds a new interpolant from co-indexed sample times and samples.
    ///
    /// Times must be strictly increasing: equal adjacent stamps are rejected
    /// here so that the blend below can never divide by zero.
    pub fn try_new(times: Vec<f64>, samples: Vec<Vector3<f64>>) -> Result<Self, InterpError> {
        ensure!(!times.is_empty(), EmptySeriesSnafu);
        ensure!(
            times.len() == samples.len(),
            LengthMismatchSnafu {
                times: times.len(),
                samples: samples.len()
            }
        );
        for (index, pair) in times.windows(2).enumerate() {
            ensure!(pair[0] < pair[1], NonMonotonicTimesSnafu { index: index + 1 });
        }
        Ok(Self { times, samples })
    }

    /// Evaluates the interpolant at `t`.
    ///
    /// Below the first sample time this returns the first sample, above the
    /// last it returns the last sample. In between, the two bracketing samples
    /// are blended affinely. Evaluating exactly at a sample time returns that
    /// sample bit for bit.
    pub fn evaluate(&self, t: f64) -> Vector3<f64> {
        let i = self.times.partition_point(|&tk| tk < t);
        if i == 0 {
            return self.samples[0];
        }
        if i == self.times.len() {
            return self.samples[i - 1];
        }
        if self.times[i] == t {
            return self.samples[i];
        }
        let (t0, t1) = (self.times[i - 1], self.times[i]);
        let (s0, s1) = (self.samples[i - 1], self.samples[i]);
        s0 + (s1 - s0) * ((t - t0) / (t1 - t0))
    }

    /// The sampled time domain as `(first, last)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.times[0], self.times[self.times.len() - 1])
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp() -> LinearInterpolant {
        let times = vec![0.0, 1.0, 2.0, 4.0];
        let samples = times
            .iter()
            .map(|&t| Vector3::new(t, 2.0 * t, -t))
            .collect();
        LinearInterpolant::try_new(times, samples).unwrap()
    }

    #[test]
    fn reproduces_samples_exactly() {
        let interp = ramp();
        for &t in &[0.0, 1.0, 2.0, 4.0] {
            assert_eq!(interp.evaluate(t), Vector3::new(t, 2.0 * t, -t));
        }
    }

    #[test]
    fn clamps_outside_domain() {
        let interp = ramp();
        assert_eq!(interp.evaluate(-10.0), Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(interp.evaluate(100.0), Vector3::new(4.0, 8.0, -4.0));
    }

    #[test]
    fn blends_affinely_between_samples() {
        let interp = ramp();
        // The synthetic signal is linear, so the interpolant must match the
        // closed form everywhere inside the domain.
        for &t in &[0.25, 0.5, 1.75, 3.3] {
            let got = interp.evaluate(t);
            assert_relative_eq!(got[0], t, max_relative = 1e-15);
            assert_relative_eq!(got[1], 2.0 * t, max_relative = 1e-15);
            assert_relative_eq!(got[2], -t, max_relative = 1e-15);
        }
    }

    #[test]
    fn single_sample_clamps_everywhere() {
        let interp =
            LinearInterpolant::try_new(vec![5.0], vec![Vector3::new(1.0, 2.0, 3.0)]).unwrap();
        for &t in &[-1.0, 5.0, 9.0] {
            assert_eq!(interp.evaluate(t), Vector3::new(1.0, 2.0, 3.0));
        }
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            LinearInterpolant::try_new(vec![], vec![]),
            Err(InterpError::EmptySeries)
        );
        assert_eq!(
            LinearInterpolant::try_new(vec![0.0, 1.0], vec![Vector3::zeros()]),
            Err(InterpError::LengthMismatch {
                times: 2,
                samples: 1
            })
        );
        // Duplicated stamps would divide by zero at evaluation.
        assert_eq!(
            LinearInterpolant::try_new(
                vec![0.0, 1.0, 1.0],
                vec![Vector3::zeros(), Vector3::zeros(), Vector3::zeros()]
            ),
            Err(InterpError::NonMonotonicTimes { index: 2 })
        );
    }
}
