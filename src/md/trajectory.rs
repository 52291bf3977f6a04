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
use crate::linalg::Vector3;
use crate::time::Duration;
use std::fmt;

/// The dense output of a propagation: the solver's own accepted steps.
///
/// States are non-uniform in time; consumers must not assume a fixed spacing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    pub states: Vec<SpacecraftState>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    pub fn from_states(states: Vec<SpacecraftState>) -> Self {
        Self { states }
    }

    /// Orders the states by epoch and drops duplicate epochs (the final exact
    /// step may coincide with a previously accepted step).
    pub fn finalize(&mut self) {
        self.states.sort_by(|a, b| a.epoch.cmp(&b.epoch));
        self.states.dedup_by_key(|state| state.epoch);
    }

    pub fn first(&self) -> Option<&SpacecraftState> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&SpacecraftState> {
        self.states.last()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpacecraftState> {
        self.states.iter()
    }

    /// Time covered between the first and last state.
    pub fn span(&self) -> Option<Duration> {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => Some(last.epoch - first.epoch),
            _ => None,
        }
    }

    /// The positions (m) of every state, for renderers.
    pub fn positions(&self) -> Vec<Vector3<f64>> {
        self.states.iter().map(|state| state.position_m).collect()
    }
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => write!(
                f,
                "Trajectory of {} states from {} to {}",
                self.len(),
                first.epoch,
                last.epoch
            ),
            _ => write!(f, "empty trajectory"),
        }
    }
}
