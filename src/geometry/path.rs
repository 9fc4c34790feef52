use crate::foundation::core::{Point, Rect};

const SMOOTH_SIDE: f64 = 0.15;
const SMOOTH_CENTER: f64 = 0.70;

/// Low-pass filter a stroke with `iterations` passes of a 0.15/0.70/0.15 moving average.
///
/// Endpoints never move. Fewer than three points, or `iterations == 0`, returns the input.
pub fn smooth_points(points: &[Point], iterations: u32) -> Vec<Point> {
    let mut cur = points.to_vec();
    if iterations == 0 || cur.len() < 3 {
        return cur;
    }

    let mut next = cur.clone();
    for _ in 0..iterations {
        for i in 1..cur.len() - 1 {
            let (a, b, c) = (cur[i - 1], cur[i], cur[i + 1]);
            next[i] = Point::new(
                SMOOTH_SIDE * a.x + SMOOTH_CENTER * b.x + SMOOTH_SIDE * c.x,
                SMOOTH_SIDE * a.y + SMOOTH_CENTER * b.y + SMOOTH_SIDE * c.y,
            );
        }
        std::mem::swap(&mut cur, &mut next);
    }
    cur
}

/// Axis-aligned bounds of a point set. The center is the pivot for path scale/rotate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathBounds {
    pub rect: Rect,
}

impl PathBounds {
    /// `None` for an empty set.
    pub fn of(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut rect = Rect::from_points(*first, *first);
        for p in &points[1..] {
            rect = rect.union_pt(*p);
        }
        Some(Self { rect })
    }

    /// Box center (not the centroid of mass).
    pub fn center(&self) -> Point {
        self.rect.center()
    }
}

/// Cumulative arc length over a polyline.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcLengthTable {
    points: Vec<Point>,
    cumulative: Vec<f64>,
}

impl ArcLengthTable {
    pub fn new(points: &[Point]) -> Self {
        let mut cumulative = Vec::with_capacity(points.len());
        let mut acc = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                acc += p.distance(points[i - 1]);
            }
            cumulative.push(acc);
        }
        Self {
            points: points.to_vec(),
            cumulative,
        }
    }

    pub fn len(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.points.len() < 2
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Position and tangent angle (degrees) at `distance` along the path.
    ///
    /// `None` when the path has fewer than two points or `distance` is outside `[0, len]`.
    pub fn sample(&self, distance: f64) -> Option<PathSample> {
        if self.is_empty() || !distance.is_finite() || distance < 0.0 || distance > self.len() {
            return None;
        }

        // First index whose cumulative distance reaches `distance`; the segment ends there.
        let hi = self
            .cumulative
            .partition_point(|&d| d < distance)
            .clamp(1, self.points.len() - 1);
        let lo = hi - 1;

        let seg_start = self.cumulative[lo];
        let seg_len = self.cumulative[hi] - seg_start;
        let (a, b) = (self.points[lo], self.points[hi]);
        let t = if seg_len > 0.0 {
            ((distance - seg_start) / seg_len).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Some(PathSample {
            point: a.lerp(b, t),
            tangent_deg: (b.y - a.y).atan2(b.x - a.x).to_degrees(),
        })
    }
}

/// A point on a path plus its local direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSample {
    pub point: Point,
    pub tangent_deg: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/path.rs"]
mod tests;
