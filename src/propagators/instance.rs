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

use super::error_ctrl::ErrorCtrl;
use super::{
    DynamicsSnafu, IntegrationDetails, InvalidDurationSnafu, PropagationError, Propagator,
};
use crate::cosmic::SpacecraftState;
use crate::dynamics::Dynamics;
use crate::linalg::Vector6;
use crate::md::Trajectory;
use crate::time::{Duration, Epoch, Unit};
use snafu::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Pollable progress and cancellation token of a propagation.
///
/// The elapsed counter is written after each accepted step and only ever grows;
/// the cancel switch is checked between steps. Both are side channels: neither
/// influences step acceptance or the numerical trajectory in any way.
#[derive(Clone, Debug, Default)]
pub struct ProgressMonitor {
    elapsed_bits: Arc<AtomicU64>,
    cancelled: Arc<AtomicBool>,
}

impl ProgressMonitor {
    /// Simulated seconds elapsed since the start of the propagation.
    pub fn elapsed_s(&self) -> f64 {
        f64::from_bits(self.elapsed_bits.load(Ordering::Relaxed))
    }

    /// Requests the propagation to halt at the next step boundary.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn observe(&self, elapsed_s: f64) {
        self.elapsed_bits
            .store(elapsed_s.to_bits(), Ordering::Relaxed);
    }
}

/// A `PropInstance` owns the propagation of one state through the dynamics of
/// its parent [`Propagator`].
#[derive(Debug)]
pub struct PropInstance<'a, D: Dynamics, E: ErrorCtrl> {
    /// The state of this propagator instance
    pub state: SpacecraftState,
    /// The propagator setup (kind, stages, etc.)
    pub prop: &'a Propagator<D, E>,
    /// Stores the details of the previous integration step
    pub details: IntegrationDetails,
    pub(crate) monitor: ProgressMonitor,
    pub(crate) step_size: Duration, // Stores the adapted step for the _next_ call
    pub(crate) fixed_step: bool,
    // Allows us to do pre-allocation of the ki vectors
    pub(crate) k: Vec<Vector6<f64>>,
}

impl<D: Dynamics, E: ErrorCtrl> PropInstance<'_, D, E> {
    /// Allows setting the step size of the propagator
    pub fn set_step(&mut self, step_size: Duration, fixed: bool) {
        self.step_size = step_size;
        self.fixed_step = fixed;
    }

    /// A handle on the progress/cancellation token of this instance.
    pub fn monitor(&self) -> ProgressMonitor {
        self.monitor.clone()
    }

    fn for_duration_option(
        &mut self,
        duration: Duration,
        mut maybe_states: Option<&mut Vec<SpacecraftState>>,
    ) -> Result<SpacecraftState, PropagationError> {
        ensure!(duration > Duration::ZERO, InvalidDurationSnafu { duration });

        let start_epoch = self.state.epoch;
        let stop_time = start_epoch + duration;
        if duration > 2 * Unit::Minute {
            info!("Propagating for {} until {}", duration, stop_time);
        }
        // Call `finally` on the current state to set anything up
        self.state = self
            .prop
            .dynamics
            .finally(self.state)
            .context(DynamicsSnafu)?;

        loop {
            if self.monitor.is_cancelled() {
                let states = maybe_states
                    .as_mut()
                    .map(|s| std::mem::take(*s))
                    .unwrap_or_default();
                let mut partial = Trajectory::from_states(states);
                partial.finalize();
                warn!("propagation cancelled at {}", self.state.epoch);
                return Err(PropagationError::Cancelled {
                    partial: Box::new(partial),
                });
            }

            let epoch = self.state.epoch;
            if epoch + self.step_size > stop_time {
                if stop_time == epoch {
                    // No propagation necessary
                    return Ok(self.state);
                }
                // Take one final step of exactly the needed duration until the stop time
                let prev_step_size = self.step_size;
                let prev_step_kind = self.fixed_step;
                self.set_step(stop_time - epoch, true);

                self.single_step()?;
                self.monitor
                    .observe((self.state.epoch - start_epoch).to_seconds());
                if let Some(states) = maybe_states.as_mut() {
                    states.push(self.state);
                }

                // Restore the step size for subsequent calls
                self.set_step(prev_step_size, prev_step_kind);
                return Ok(self.state);
            } else {
                self.single_step()?;
                self.monitor
                    .observe((self.state.epoch - start_epoch).to_seconds());
                if let Some(states) = maybe_states.as_mut() {
                    states.push(self.state);
                }
            }
        }
    }

    /// This method propagates the provided Dynamics for the provided duration,
    /// and returns the final state only.
    pub fn for_duration(&mut self, duration: Duration) -> Result<SpacecraftState, PropagationError> {
        self.for_duration_option(duration, None)
    }

    /// This method propagates the provided Dynamics for the provided duration
    /// and returns the final state along with the solver's own accepted step
    /// sequence (dense and non-uniform in time).
    pub fn for_duration_with_traj(
        &mut self,
        duration: Duration,
    ) -> Result<(SpacecraftState, Trajectory), PropagationError> {
        let mut states = vec![self.state];
        let end_state = self.for_duration_option(duration, Some(&mut states))?;
        let mut traj = Trajectory::from_states(states);
        traj.finalize();
        Ok((end_state, traj))
    }

    /// Propagates the provided Dynamics until the provided epoch. Returns the end state.
    pub fn until_epoch(&mut self, end_time: Epoch) -> Result<SpacecraftState, PropagationError> {
        let duration: Duration = end_time - self.state.epoch;
        self.for_duration(duration)
    }

    /// Propagates the provided Dynamics until the provided epoch, returning
    /// the end state and the accepted step sequence.
    pub fn until_epoch_with_traj(
        &mut self,
        end_time: Epoch,
    ) -> Result<(SpacecraftState, Trajectory), PropagationError> {
        let duration: Duration = end_time - self.state.epoch;
        self.for_duration_with_traj(duration)
    }

    /// Take a single propagator step
    pub fn single_step(&mut self) -> Result<(), PropagationError> {
        let (t, state_vec) = self.derive()?;
        self.state = SpacecraftState::from_vector(self.state.epoch + t, &state_vec);
        self.state = self
            .prop
            .dynamics
            .finally(self.state)
            .context(DynamicsSnafu)?;

        Ok(())
    }

    /// This method integrates the equations of motion. Everything passed to this function is in **seconds**.
    ///
    /// This function returns the step size used (as a Duration) and the new state as y_{n+1} = y_n + \frac{dy_n}{dt}.
    /// To get the integration details, check `self.details`.
    fn derive(&mut self) -> Result<(Duration, Vector6<f64>), PropagationError> {
        let state_vec = self.state.to_vector();
        // Reset the number of attempts used (we don't reset the error because it's set before it's read)
        self.details.attempts = 1;
        // Convert the step size to seconds -- it's mutable because we may change it below
        let mut step_size = self.step_size.to_seconds();
        loop {
            let ki = self
                .prop
                .dynamics
                .eom(0.0, &state_vec)
                .context(DynamicsSnafu)?;
            self.k[0] = ki;
            let mut a_idx: usize = 0;
            for i in 0..(self.prop.stages - 1) {
                // Let's compute the c_i by summing the relevant items from the list of coefficients.
                // \sum_{j=1}^{i-1} a_ij  ∀ i ∈ [2, s]
                let mut ci: f64 = 0.0;
                // The wi stores the a_{s1} * k_1 + a_{s2} * k_2 + ... + a_{s, s-1} * k_{s-1} +
                let mut wi = Vector6::<f64>::zeros();
                for kj in &self.k[0..i + 1] {
                    let a_ij = self.prop.a_coeffs[a_idx];
                    ci += a_ij;
                    wi += a_ij * kj;
                    a_idx += 1;
                }

                let ki = self
                    .prop
                    .dynamics
                    .eom(ci * step_size, &(state_vec + step_size * wi))
                    .context(DynamicsSnafu)?;
                self.k[i + 1] = ki;
            }
            // Compute the next state and the error
            let mut next_state = state_vec;
            // State error estimation from https://en.wikipedia.org/wiki/Runge%E2%80%93Kutta_methods#Adaptive_Runge%E2%80%93Kutta_methods
            let mut error_est = Vector6::<f64>::zeros();
            for (i, ki) in self.k.iter().enumerate() {
                let b_i = self.prop.b_coeffs[i];
                if !self.fixed_step {
                    let b_i_star = self.prop.b_coeffs[i + self.prop.stages];
                    error_est += step_size * (b_i - b_i_star) * ki;
                }
                next_state += step_size * b_i * ki;
            }

            // A non-finite candidate or error estimate means the dynamics blew
            // up (e.g. the gravity singularity): surface it with the furthest
            // valid state, do not attempt to recover.
            if next_state.iter().any(|x| !x.is_finite()) {
                return Err(PropagationError::Diverged {
                    reason: "non-finite state candidate",
                    furthest: Box::new(self.state),
                });
            }
            if !self.fixed_step && error_est.iter().any(|x| !x.is_finite()) {
                return Err(PropagationError::Diverged {
                    reason: "non-finite error estimate",
                    furthest: Box::new(self.state),
                });
            }

            if self.fixed_step {
                // Using a fixed step, no adaptive step necessary
                self.details.step = self.step_size;
                return Ok((self.details.step, next_state));
            } else {
                // Compute the error estimate.
                self.details.error = E::estimate(&error_est, &next_state, &state_vec);
                if self.details.error <= self.prop.opts.tolerance
                    || step_size <= self.prop.opts.min_step.to_seconds()
                    || self.details.attempts >= self.prop.opts.attempts
                {
                    if self.details.attempts >= self.prop.opts.attempts {
                        warn!(
                            "Could not further decrease step size: maximum number of attempts reached ({})",
                            self.details.attempts
                        );
                    }

                    self.details.step = step_size * Unit::Second;
                    if self.details.error < self.prop.opts.tolerance {
                        // Error is less than tolerance, let's attempt to increase the step for the next iteration.
                        let proposed_step = 0.9
                            * step_size
                            * (self.prop.opts.tolerance / self.details.error)
                                .powf(1.0 / f64::from(self.prop.order));
                        step_size = if proposed_step > self.prop.opts.max_step.to_seconds() {
                            self.prop.opts.max_step.to_seconds()
                        } else {
                            proposed_step
                        };
                    }
                    // In all cases, let's update the step size to whatever was the adapted step size
                    self.step_size = step_size * Unit::Second;
                    return Ok((self.details.step, next_state));
                } else {
                    // Error is too high and we aren't using the smallest step, and we haven't hit the max number of attempts.
                    // So let's adapt the step size.
                    self.details.attempts += 1;
                    let proposed_step = 0.9
                        * step_size
                        * (self.prop.opts.tolerance / self.details.error)
                            .powf(1.0 / f64::from(self.prop.order - 1));
                    step_size = if proposed_step < self.prop.opts.min_step.to_seconds() {
                        self.prop.opts.min_step.to_seconds()
                    } else {
                        proposed_step
                    };
                    // Note that we don't set self.step_size, that will be updated right before we return
                }
            }
        }
    }

    /// Copy the details of the latest integration step.
    pub fn latest_details(&self) -> IntegrationDetails {
        self.details
    }
}
