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

use crate::cosmic::Body;
use serde::de::DeserializeOwned;
use snafu::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("failed to read configuration: {source}"))]
    ReadError { source: std::io::Error },
    #[snafu(display("failed to parse YAML configuration: {source}"))]
    ParseError { source: serde_yaml::Error },
}

/// Trait to specify that a type is configurable from a YAML file.
pub trait ConfigRepr: DeserializeOwned {
    /// Builds a sequence of self from the provided file path
    fn load_many<P>(path: P) -> Result<Vec<Self>, ConfigError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path).context(ReadSnafu)?;
        serde_yaml::from_reader(BufReader::new(file)).context(ParseSnafu)
    }

    /// Builds a single self from the provided file path
    fn load<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path).context(ReadSnafu)?;
        serde_yaml::from_reader(BufReader::new(file)).context(ParseSnafu)
    }

    /// Builds a sequence of self from the provided string of YAML data
    fn loads_many(data: &str) -> Result<Vec<Self>, ConfigError> {
        serde_yaml::from_str(data).context(ParseSnafu)
    }
}

impl ConfigRepr for Body {}
