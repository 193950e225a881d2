//! Stable color assignment for stations.

use std::collections::HashMap;

/// The fixed trace palette. Stations are colored by their index in the
/// discovery-order station list, modulo the palette length, so a station
/// keeps its color no matter which subset is currently selected.
pub const STATION_PALETTE: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

/// Maps every known station to its palette color.
pub fn station_colors(stations: &[String]) -> HashMap<&str, &'static str> {
    stations
        .iter()
        .enumerate()
        .map(|(i, station)| (station.as_str(), STATION_PALETTE[i % STATION_PALETTE.len()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_follow_discovery_order_and_wrap() {
        let stations: Vec<String> = (0..12).map(|i| format!("S{i}")).collect();
        let colors = station_colors(&stations);
        assert_eq!(colors["S0"], STATION_PALETTE[0]);
        assert_eq!(colors["S9"], STATION_PALETTE[9]);
        assert_eq!(colors["S10"], STATION_PALETTE[0]);
        assert_eq!(colors["S11"], STATION_PALETTE[1]);
    }
}
