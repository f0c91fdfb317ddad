use crate::math::stats::StatsHelper;
use crate::model::Transmitter;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Lat/lon rectangle sampled by the heatmap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub const REUNION: BoundingBox = BoundingBox {
        lat_min: -21.4,
        lat_max: -20.8,
        lon_min: 55.2,
        lon_max: 55.7,
    };

    pub fn center(&self) -> (f64, f64) {
        (
            (self.lat_min + self.lat_max) / 2.0,
            (self.lon_min + self.lon_max) / 2.0,
        )
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        BoundingBox::REUNION
    }
}

/// Aggregate coverage strength sampled on a regular grid.
///
/// `signal[[row, col]]` is the strength at `(latitudes[row], longitudes[col])`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageHeatmap {
    pub bounds: BoundingBox,
    pub latitudes: Vec<f64>,
    pub longitudes: Vec<f64>,
    pub signal: Array2<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapCell {
    pub latitude: f64,
    pub longitude: f64,
    pub signal: f64,
}

impl CoverageHeatmap {
    pub fn resolution(&self) -> (usize, usize) {
        self.signal.dim()
    }

    pub fn is_empty(&self) -> bool {
        self.signal.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = HeatmapCell> + '_ {
        self.signal
            .indexed_iter()
            .map(move |((row, col), &signal)| HeatmapCell {
                latitude: self.latitudes[row],
                longitude: self.longitudes[col],
                signal,
            })
    }

    pub fn max_signal(&self) -> f64 {
        self.signal.iter().copied().fold(0.0, f64::max)
    }
}

/// Strongest contribution of any active transmitter at a point.
///
/// Distance is planar in degree space and compared directly against the
/// radius in kilometres.
pub fn signal_strength_at(transmitters: &[Transmitter], latitude: f64, longitude: f64) -> f64 {
    transmitters
        .iter()
        .filter(|transmitter| transmitter.is_active() && transmitter.coverage_radius_km > 0.0)
        .map(|transmitter| {
            let distance = ((latitude - transmitter.latitude).powi(2)
                + (longitude - transmitter.longitude).powi(2))
            .sqrt();
            (100.0 - distance * 100.0 / transmitter.coverage_radius_km).max(0.0)
        })
        .fold(0.0, f64::max)
}

/// Samples `grid_resolution` points per axis over `bounds`, endpoints included.
pub fn coverage_heatmap(
    transmitters: &[Transmitter],
    bounds: BoundingBox,
    grid_resolution: usize,
) -> CoverageHeatmap {
    let latitudes = StatsHelper::linspace(bounds.lat_min, bounds.lat_max, grid_resolution);
    let longitudes = StatsHelper::linspace(bounds.lon_min, bounds.lon_max, grid_resolution);
    let signal = Array2::from_shape_fn((latitudes.len(), longitudes.len()), |(row, col)| {
        signal_strength_at(transmitters, latitudes[row], longitudes[col])
    });

    CoverageHeatmap {
        bounds,
        latitudes,
        longitudes,
        signal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use crate::synthesis::generate_fleet;
    use rand::{rngs::StdRng, SeedableRng};

    fn fleet_with_status(status: Status) -> Vec<Transmitter> {
        let mut fleet = generate_fleet(&mut StdRng::seed_from_u64(42));
        for transmitter in &mut fleet {
            transmitter.status = status;
        }
        fleet
    }

    #[test]
    fn grid_point_on_active_transmitter_reads_full_strength() {
        let mut fleet = fleet_with_status(Status::Active);
        fleet.truncate(1);
        fleet[0].latitude = BoundingBox::REUNION.lat_min;
        fleet[0].longitude = BoundingBox::REUNION.lon_min;

        let heatmap = coverage_heatmap(&fleet, BoundingBox::REUNION, 50);
        assert_eq!(heatmap.resolution(), (50, 50));
        assert_eq!(heatmap.signal[[0, 0]], 100.0);
        assert_eq!(heatmap.max_signal(), 100.0);
    }

    #[test]
    fn strength_at_transmitter_location_is_100() {
        let fleet = fleet_with_status(Status::Active);
        for transmitter in &fleet {
            let strength = signal_strength_at(&fleet, transmitter.latitude, transmitter.longitude);
            assert_eq!(strength, 100.0);
        }
    }

    #[test]
    fn non_active_transmitters_contribute_nothing() {
        for status in [Status::Maintenance, Status::Inactive] {
            let fleet = fleet_with_status(status);
            let heatmap = coverage_heatmap(&fleet, BoundingBox::REUNION, 20);
            assert!(heatmap.cells().all(|cell| cell.signal == 0.0));
        }
    }

    #[test]
    fn strength_decays_linearly_with_distance() {
        let mut fleet = fleet_with_status(Status::Active);
        fleet.truncate(1);
        fleet[0].latitude = 0.0;
        fleet[0].longitude = 0.0;
        fleet[0].coverage_radius_km = 2.0;
        assert!((signal_strength_at(&fleet, 1.0, 0.0) - 50.0).abs() < 1e-9);
        assert_eq!(signal_strength_at(&fleet, 3.0, 0.0), 0.0);
    }

    #[test]
    fn degenerate_inputs_yield_empty_or_zero_grids() {
        let heatmap = coverage_heatmap(&[], BoundingBox::REUNION, 10);
        assert_eq!(heatmap.cells().count(), 100);
        assert_eq!(heatmap.max_signal(), 0.0);

        let fleet = fleet_with_status(Status::Active);
        let empty = coverage_heatmap(&fleet, BoundingBox::REUNION, 0);
        assert!(empty.is_empty());
        assert_eq!(empty.cells().count(), 0);
    }

    #[test]
    fn cells_carry_grid_coordinates() {
        let heatmap = coverage_heatmap(&[], BoundingBox::REUNION, 3);
        let cells: Vec<_> = heatmap.cells().collect();
        assert_eq!(cells[0].latitude, -21.4);
        assert_eq!(cells[0].longitude, 55.2);
        assert!((cells[8].latitude + 20.8).abs() < 1e-12);
        assert!((cells[8].longitude - 55.7).abs() < 1e-12);
    }
}
