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

use crate::linalg::{Vector3, Vector6};

// This determines when to take into consideration the magnitude of the state_delta -- prevents dividing by too small of a number.
const REL_ERR_THRESH: f64 = 0.1;

/// Turns the embedded local truncation error estimate into the scalar the
/// adaptive step control compares against the tolerance.
pub trait ErrorCtrl: Copy + Clone + Send + Sync {
    /// Computes the error estimate from the error vector of the equations of
    /// motion, the candidate next state, and the current state.
    fn estimate(error_est: &Vector6<f64>, candidate: &Vector6<f64>, cur_state: &Vector6<f64>) -> f64;
}

/// An RSS step error control which effectively computes the L2 norm of the
/// provided Vector of size 3.
///
/// Note that this error controller should be preferably be used only with
/// slices of a state with the same units, e.g. position separately from
/// velocity.
fn rss_step(prop_err: &Vector3<f64>, candidate: &Vector3<f64>, cur_state: &Vector3<f64>) -> f64 {
    let mag = (candidate - cur_state).norm();
    let err = prop_err.norm();
    if mag > REL_ERR_THRESH {
        err / mag
    } else {
        err
    }
}

/// An RSS step error control over a Cartesian state: the RSS step error is
/// computed on the position block and the velocity block independently, and
/// the largest of the two is kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct RSSCartesianStep;

impl ErrorCtrl for RSSCartesianStep {
    fn estimate(
        error_est: &Vector6<f64>,
        candidate: &Vector6<f64>,
        cur_state: &Vector6<f64>,
    ) -> f64 {
        let err_radius = rss_step(
            &error_est.fixed_rows::<3>(0).into_owned(),
            &candidate.fixed_rows::<3>(0).into_owned(),
            &cur_state.fixed_rows::<3>(0).into_owned(),
        );
        let err_velocity = rss_step(
            &error_est.fixed_rows::<3>(3).into_owned(),
            &candidate.fixed_rows::<3>(3).into_owned(),
            &cur_state.fixed_rows::<3>(3).into_owned(),
        );
        err_radius.max(err_velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn relative_above_threshold_absolute_below() {
        let cur = Vector6::zeros();
        // Large position step: the error is normalized by the step magnitude.
        let candidate = Vector6::new(1000.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let err = Vector6::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(
            RSSCartesianStep::estimate(&err, &candidate, &cur),
            1.0 / 1000.0,
            max_relative = 1e-15
        );
        // Tiny step: the raw error is used as-is.
        let candidate = Vector6::new(1e-3, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(
            RSSCartesianStep::estimate(&err, &candidate, &cur),
            1.0,
            max_relative = 1e-15
        );
    }

    #[test]
    fn takes_the_worse_of_both_blocks() {
        let cur = Vector6::zeros();
        let candidate = Vector6::new(1000.0, 0.0, 0.0, 10.0, 0.0, 0.0);
        let err = Vector6::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        // Velocity block: 1/10 dominates position's 1/1000.
        assert_relative_eq!(
            RSSCartesianStep::estimate(&err, &candidate, &cur),
            0.1,
            max_relative = 1e-15
        );
    }
}
