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

use super::GRAVITATIONAL_CONSTANT;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Physical constants record backing the built-in catalog.
struct BodyConstants {
    name: &'static str,
    radius_m: f64,
    mass_kg: f64,
    color: u32,
    ephemeris_id: Option<i32>,
}

/// The closed set of bodies this crate knows out of the box: the Sun, the
/// eight planets, Earth's Moon, and Kerbin as a non-real example body.
const CATALOG: &[BodyConstants] = &[
    BodyConstants { name: "Sun", radius_m: 695_700_000.0, mass_kg: 1.989e30, color: 0xffff66, ephemeris_id: Some(10) },
    BodyConstants { name: "Mercury", radius_m: 2_439_700.0, mass_kg: 3.285e23, color: 0x999999, ephemeris_id: Some(1) },
    BodyConstants { name: "Venus", radius_m: 6_051_800.0, mass_kg: 4.867e24, color: 0xffe6b3, ephemeris_id: Some(2) },
    BodyConstants { name: "Earth", radius_m: 6_371_000.0, mass_kg: 5.972e24, color: 0x0099ff, ephemeris_id: Some(3) },
    BodyConstants { name: "Mars", radius_m: 3_389_500.0, mass_kg: 6.39e23, color: 0xff6600, ephemeris_id: Some(4) },
    BodyConstants { name: "Jupiter", radius_m: 69_911_000.0, mass_kg: 1.898e27, color: 0xffcc66, ephemeris_id: Some(5) },
    BodyConstants { name: "Saturn", radius_m: 58_232_000.0, mass_kg: 5.683e26, color: 0xfff7e6, ephemeris_id: Some(6) },
    BodyConstants { name: "Uranus", radius_m: 25_362_000.0, mass_kg: 8.681e25, color: 0xcceeff, ephemeris_id: Some(7) },
    BodyConstants { name: "Neptune", radius_m: 24_622_000.0, mass_kg: 1.024e26, color: 0x0066ff, ephemeris_id: Some(8) },
    BodyConstants { name: "Moon", radius_m: 1_737_000.0, mass_kg: 7.34767309e22, color: 0xCCCCCC, ephemeris_id: None },
    BodyConstants { name: "Kerbin", radius_m: 600_000.0, mass_kg: 5.2915793e22, color: 0xCCCCCC, ephemeris_id: None },
];

/// A celestial body: identity and physical constants, immutable once built.
///
/// The color is carried through for renderers and never used by the physics.
/// A body without an `ephemeris_id` (e.g. one defined purely by a fitted
/// orbit) cannot be queried from an ephemeris source and therefore cannot
/// perturb a propagation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub name: String,
    /// Equatorial radius (m).
    pub radius_m: f64,
    /// Mass (kg).
    pub mass_kg: f64,
    /// Display color as a hex RGB value.
    pub color: u32,
    /// Identifier in the external ephemeris numbering, if any.
    #[serde(default)]
    pub ephemeris_id: Option<i32>,
}

impl Body {
    fn from_constants(constants: &BodyConstants) -> Self {
        Self {
            name: constants.name.to_string(),
            radius_m: constants.radius_m,
            mass_kg: constants.mass_kg,
            color: constants.color,
            ephemeris_id: constants.ephemeris_id,
        }
    }

    /// Looks a body up in the built-in catalog by name, case-insensitively.
    pub fn named(name: &str) -> Option<Self> {
        CATALOG
            .iter()
            .find(|constants| constants.name.eq_ignore_ascii_case(name))
            .map(Self::from_constants)
    }

    /// Gravitational parameter μ = mass × G (m³/s²).
    pub fn gm(&self) -> f64 {
        self.mass_kg * GRAVITATIONAL_CONSTANT
    }

    pub fn sun() -> Self {
        Self::from_constants(&CATALOG[0])
    }

    pub fn mercury() -> Self {
        Self::from_constants(&CATALOG[1])
    }

    pub fn venus() -> Self {
        Self::from_constants(&CATALOG[2])
    }

    pub fn earth() -> Self {
        Self::from_constants(&CATALOG[3])
    }

    pub fn mars() -> Self {
        Self::from_constants(&CATALOG[4])
    }

    pub fn jupiter() -> Self {
        Self::from_constants(&CATALOG[5])
    }

    pub fn saturn() -> Self {
        Self::from_constants(&CATALOG[6])
    }

    pub fn uranus() -> Self {
        Self::from_constants(&CATALOG[7])
    }

    pub fn neptune() -> Self {
        Self::from_constants(&CATALOG[8])
    }

    pub fn moon() -> Self {
        Self::from_constants(&CATALOG[9])
    }

    pub fn kerbin() -> Self {
        Self::from_constants(&CATALOG[10])
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Body::sun(), 695_700_000.0, Some(10))]
    #[case(Body::mercury(), 2_439_700.0, Some(1))]
    #[case(Body::venus(), 6_051_800.0, Some(2))]
    #[case(Body::earth(), 6_371_000.0, Some(3))]
    #[case(Body::mars(), 3_389_500.0, Some(4))]
    #[case(Body::jupiter(), 69_911_000.0, Some(5))]
    #[case(Body::saturn(), 58_232_000.0, Some(6))]
    #[case(Body::uranus(), 25_362_000.0, Some(7))]
    #[case(Body::neptune(), 24_622_000.0, Some(8))]
    #[case(Body::moon(), 1_737_000.0, None)]
    #[case(Body::kerbin(), 600_000.0, None)]
    fn catalog_presets(
        #[case] body: Body,
        #[case] radius_m: f64,
        #[case] ephemeris_id: Option<i32>,
    ) {
        assert_eq!(body.radius_m, radius_m);
        assert_eq!(body.ephemeris_id, ephemeris_id);
        assert!(body.mass_kg > 0.0);
    }

    #[test]
    fn earth_gm() {
        assert_relative_eq!(Body::earth().gm(), 3.986e14, max_relative = 1e-3);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(Body::named("earth"), Some(Body::earth()));
        assert_eq!(Body::named("NEPTUNE"), Some(Body::neptune()));
        assert_eq!(Body::named("Vulcan"), None);
    }
}
