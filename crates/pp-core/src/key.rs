use crate::error::PlannerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Integer column/row of one grid cell.
///
/// Persisted and displayed as the composite string `"x,y"`, which is also
/// the key format of the stored pixel map.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub x: u32,
    pub y: u32,
}

impl CellKey {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Debug for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for CellKey {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || PlannerError::MalformedKey(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(malformed)?;
        let x = x.trim().parse::<u32>().map_err(|_| malformed())?;
        let y = y.trim().parse::<u32>().map_err(|_| malformed())?;
        Ok(Self { x, y })
    }
}

impl Serialize for CellKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
