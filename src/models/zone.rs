use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Delivery area used as the batching key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Manhattan,
    Brooklyn,
    Queens,
    Bronx,
    #[serde(rename = "Staten Island")]
    StatenIsland,
}

impl Zone {
    /// Every zone in canonical order.
    pub const ALL: [Zone; 5] = [
        Zone::Manhattan,
        Zone::Brooklyn,
        Zone::Queens,
        Zone::Bronx,
        Zone::StatenIsland,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Manhattan => "Manhattan",
            Zone::Brooklyn => "Brooklyn",
            Zone::Queens => "Queens",
            Zone::Bronx => "Bronx",
            Zone::StatenIsland => "Staten Island",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Zone::ALL
            .into_iter()
            .find(|zone| zone.as_str() == raw)
            .ok_or_else(|| format!("unknown zone: {raw}"))
    }
}

#[cfg(test)]
mod tests {
    use super::Zone;

    #[test]
    fn parses_display_names() {
        for zone in Zone::ALL {
            assert_eq!(zone.as_str().parse::<Zone>(), Ok(zone));
        }
    }

    #[test]
    fn rejects_unknown_zone() {
        assert!("Hoboken".parse::<Zone>().is_err());
        assert!("brooklyn".parse::<Zone>().is_err());
    }

    #[test]
    fn serializes_multi_word_zone_with_space() {
        let json = serde_json::to_string(&Zone::StatenIsland).unwrap();
        assert_eq!(json, "\"Staten Island\"");
    }
}
