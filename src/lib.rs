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

/*! # flyby

Propagates spacecraft trajectories through the solar system under n-body
gravitational perturbation, using precomputed planetary ephemerides for the
perturbing bodies.

Planetary positions come from an external [`EphemerisSource`](crate::ephemeris::EphemerisSource)
(typically backed by an SPK kernel). Each perturbing body is pre-sampled over
the propagation window and queried through a cheap linear interpolant inside
the integration loop, so the expensive polynomial-evaluating source is never
touched while the adaptive integrator runs.
*/

/// Provides the propagators / integrators available in `flyby`.
pub mod propagators;

/// Provides the gravitational dynamics integrated by the propagators.
pub mod dynamics;

/// Provides the celestial bodies, the spacecraft state, and Keplerian orbits.
pub mod cosmic;

/// The ephemeris capability and the per-run bound perturbing bodies.
pub mod ephemeris;

/// Time-indexed linear interpolation over vector samples.
pub mod interp;

/// Closed-form rotation helpers (ecliptic, orbital frame).
pub mod frames;

/// Mission-level driver and the trajectory container.
pub mod md;

/// Loading of body catalogs and other configuration from YAML files.
pub mod io;

#[macro_use]
extern crate log;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export nalgebra
pub mod linalg {
    pub use nalgebra::base::*;
}

/// Re-export some useful things
pub use self::cosmic::{Body, KeplerianOrbit, SpacecraftState};
pub use self::ephemeris::EphemerisSource;
pub use self::md::{propagate, Trajectory};
