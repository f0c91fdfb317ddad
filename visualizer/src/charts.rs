use fleetcore::analysis::{BoundingBox, CoverageHeatmap};
use fleetcore::prelude::{Status, Transmitter};
use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke},
    Color, Point, Rectangle, Renderer, Size, Theme,
};

/// Kilometres per degree, used to draw coverage rings on a lat/lon map.
const KM_PER_DEGREE: f64 = 111.0;

const SERIES_PALETTE: [Color; 6] = [
    Color { r: 0.18, g: 0.72, b: 0.89, a: 1.0 },
    Color { r: 0.95, g: 0.55, b: 0.2, a: 1.0 },
    Color { r: 0.55, g: 0.85, b: 0.35, a: 1.0 },
    Color { r: 0.85, g: 0.4, b: 0.75, a: 1.0 },
    Color { r: 0.95, g: 0.85, b: 0.3, a: 1.0 },
    Color { r: 0.6, g: 0.6, b: 0.95, a: 1.0 },
];

pub fn status_color(status: Status) -> Color {
    match status {
        Status::Active => Color::from_rgb(0.2, 0.75, 0.35),
        Status::Maintenance => Color::from_rgb(0.95, 0.6, 0.15),
        Status::Inactive => Color::from_rgb(0.85, 0.25, 0.25),
    }
}

pub fn series_color(index: usize) -> Color {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

/// Dark blue through green to yellow as `value` goes from 0 to 100.
pub fn signal_color(value: f64) -> Color {
    let t = (value / 100.0).clamp(0.0, 1.0) as f32;
    if t < 0.5 {
        let k = t * 2.0;
        Color::from_rgb(0.1 * (1.0 - k) + 0.15 * k, 0.1 + 0.55 * k, 0.35 - 0.05 * k)
    } else {
        let k = (t - 0.5) * 2.0;
        Color::from_rgb(0.15 + 0.8 * k, 0.65 + 0.25 * k, 0.3 - 0.2 * k)
    }
}

fn background(renderer: &Renderer, bounds: Rectangle) -> Frame {
    let mut frame = Frame::new(renderer, bounds.size());
    frame.fill_rectangle(
        Point::ORIGIN,
        bounds.size(),
        Color::from_rgb(0.05, 0.05, 0.05),
    );
    frame
}

fn grid_lines(frame: &mut Frame, size: Size) {
    let grid = Path::new(|builder| {
        for step in 1..4 {
            let y = size.height * step as f32 / 4.0;
            builder.move_to(Point::new(0.0, y));
            builder.line_to(Point::new(size.width, y));
        }
    });
    frame.stroke(
        &grid,
        Stroke::default()
            .with_color(Color::from_rgb(0.2, 0.2, 0.25))
            .with_width(1.0),
    );
}

/// Maps a coordinate inside `bounds` onto a canvas of `size`, north up.
pub fn project(bounds: &BoundingBox, size: Size, latitude: f64, longitude: f64) -> Point {
    let lon_span = (bounds.lon_max - bounds.lon_min).max(f64::EPSILON);
    let lat_span = (bounds.lat_max - bounds.lat_min).max(f64::EPSILON);
    let x = (longitude - bounds.lon_min) / lon_span * size.width as f64;
    let y = (bounds.lat_max - latitude) / lat_span * size.height as f64;
    Point::new(x as f32, y as f32)
}

#[derive(Debug, Clone)]
pub struct Bar {
    pub value: f32,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct BarChart {
    bars: Vec<Bar>,
    max: f32,
}

impl BarChart {
    /// Without an explicit `max` the tallest bar fills the canvas.
    pub fn new(bars: Vec<Bar>, max: Option<f32>) -> Self {
        let max = max
            .unwrap_or_else(|| bars.iter().map(|bar| bar.value).fold(0.0, f32::max))
            .max(1.0);
        Self { bars, max }
    }
}

impl<Message> canvas::Program<Message> for BarChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = background(renderer, bounds);
        grid_lines(&mut frame, bounds.size());

        if !self.bars.is_empty() {
            let slot = bounds.width / self.bars.len() as f32;
            let width = slot * 0.7;
            for (i, bar) in self.bars.iter().enumerate() {
                let height = (bar.value / self.max).clamp(0.0, 1.0) * bounds.height;
                let x = i as f32 * slot + (slot - width) / 2.0;
                frame.fill_rectangle(
                    Point::new(x, bounds.height - height),
                    Size::new(width, height),
                    bar.color,
                );
            }
        }

        vec![frame.into_geometry()]
    }
}

#[derive(Debug, Clone)]
pub struct LineSeries {
    pub values: Vec<f32>,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct LineChart {
    series: Vec<LineSeries>,
    y_max: f32,
}

impl LineChart {
    pub fn new(series: Vec<LineSeries>, y_max: f32) -> Self {
        Self {
            series,
            y_max: y_max.max(1.0),
        }
    }
}

impl<Message> canvas::Program<Message> for LineChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = background(renderer, bounds);
        grid_lines(&mut frame, bounds.size());

        for series in &self.series {
            if series.values.is_empty() {
                continue;
            }
            let step = if series.values.len() > 1 {
                bounds.width / (series.values.len() as f32 - 1.0)
            } else {
                0.0
            };
            let points: Vec<Point> = series
                .values
                .iter()
                .enumerate()
                .map(|(i, value)| {
                    let normalized = (value / self.y_max).clamp(0.0, 1.0);
                    Point::new(i as f32 * step, bounds.height - normalized * bounds.height)
                })
                .collect();

            let path = Path::new(|builder| {
                for (i, point) in points.iter().enumerate() {
                    if i == 0 {
                        builder.move_to(*point);
                    } else {
                        builder.line_to(*point);
                    }
                }
            });
            frame.stroke(
                &path,
                Stroke::default().with_width(2.0).with_color(series.color),
            );
            for point in &points {
                let marker = Path::new(|builder| builder.circle(*point, 2.5));
                frame.fill(&marker, series.color);
            }
        }

        vec![frame.into_geometry()]
    }
}

#[derive(Debug, Clone)]
struct Marker {
    latitude: f64,
    longitude: f64,
    coverage_radius_km: f64,
    color: Color,
}

/// Transmitter positions over the island, optionally with coverage rings.
#[derive(Debug, Clone)]
pub struct FleetMap {
    markers: Vec<Marker>,
    bounds: BoundingBox,
    show_coverage: bool,
}

impl FleetMap {
    pub fn new(transmitters: &[&Transmitter], show_coverage: bool) -> Self {
        let markers = transmitters
            .iter()
            .map(|transmitter| Marker {
                latitude: transmitter.latitude,
                longitude: transmitter.longitude,
                coverage_radius_km: transmitter.coverage_radius_km,
                color: status_color(transmitter.status),
            })
            .collect();
        Self {
            markers,
            bounds: BoundingBox::REUNION,
            show_coverage,
        }
    }
}

impl<Message> canvas::Program<Message> for FleetMap {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.02, 0.02, 0.04),
        );

        let size = bounds.size();
        let (center_lat, center_lon) = self.bounds.center();
        let center = project(&self.bounds, size, center_lat, center_lon);
        let axes = Path::new(|builder| {
            builder.move_to(Point::new(0.0, center.y));
            builder.line_to(Point::new(size.width, center.y));
            builder.move_to(Point::new(center.x, 0.0));
            builder.line_to(Point::new(center.x, size.height));
        });
        frame.stroke(
            &axes,
            Stroke::default()
                .with_color(Color::from_rgb(0.2, 0.2, 0.28))
                .with_width(1.0),
        );

        let pixels_per_degree =
            size.width as f64 / (self.bounds.lon_max - self.bounds.lon_min).max(f64::EPSILON);

        for marker in &self.markers {
            let position = project(&self.bounds, size, marker.latitude, marker.longitude);
            if self.show_coverage && marker.coverage_radius_km > 0.0 {
                let radius = (marker.coverage_radius_km / KM_PER_DEGREE * pixels_per_degree) as f32;
                let ring = Path::new(|builder| builder.circle(position, radius));
                frame.fill(&ring, Color { a: 0.08, ..marker.color });
                frame.stroke(
                    &ring,
                    Stroke::default()
                        .with_color(Color { a: 0.5, ..marker.color })
                        .with_width(1.0),
                );
            }
            let dot = Path::new(|builder| builder.circle(position, 6.0));
            frame.fill(&dot, marker.color);
        }

        vec![frame.into_geometry()]
    }
}

#[derive(Debug, Clone)]
pub struct HeatmapView {
    heatmap: CoverageHeatmap,
}

impl HeatmapView {
    pub fn new(heatmap: CoverageHeatmap) -> Self {
        Self { heatmap }
    }
}

impl<Message> canvas::Program<Message> for HeatmapView {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = background(renderer, bounds);
        let (rows, cols) = self.heatmap.resolution();
        if rows > 0 && cols > 0 {
            let cell = Size::new(bounds.width / cols as f32, bounds.height / rows as f32);
            for point in self.heatmap.cells() {
                // Grid points are cell centres; edge cells are clipped.
                let centre = project(&self.heatmap.bounds, bounds.size(), point.latitude, point.longitude);
                let origin = Point::new(centre.x - cell.width / 2.0, centre.y - cell.height / 2.0);
                frame.fill_rectangle(origin, cell, signal_color(point.signal));
            }
        }

        vec![frame.into_geometry()]
    }
}
