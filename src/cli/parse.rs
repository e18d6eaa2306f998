//! Value parsers for CLI arguments

use std::fmt::Display;
use std::str::FromStr;

use topomap_core::map::TraversalMode;

/// Parse a traversal mode name
pub fn parse_traversal_mode(s: &str) -> Result<TraversalMode, String> {
    s.parse::<TraversalMode>().map_err(|_| {
        let names: Vec<&str> = TraversalMode::ALL.iter().map(|m| m.name()).collect();
        format!("unknown mode '{}' (expected one of: {})", s, names.join(", "))
    })
}

/// Parse a number in `[0, 1]`
pub fn parse_unit_interval<T>(s: &str) -> Result<T, String>
where
    T: FromStr + PartialOrd + From<u8> + Copy,
    T::Err: Display,
{
    let value: T = s.parse().map_err(|e| format!("{}", e))?;
    if value >= T::from(0u8) && value <= T::from(1u8) {
        Ok(value)
    } else {
        Err(format!("{} is not between 0 and 1", s))
    }
}
