use serde::{Deserialize, Serialize};

use crate::coord::Coordinate;

/// Axis-aligned geographic rectangle, inclusive on every edge.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl GeoBounds {
    /// Builds a rectangle from two opposite corners in any order.
    pub fn new(a: Coordinate, b: Coordinate) -> Self {
        GeoBounds {
            south_west: Coordinate::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: Coordinate::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        c.lat >= self.south_west.lat
            && c.lat <= self.north_east.lat
            && c.lng >= self.south_west.lng
            && c.lng <= self.north_east.lng
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.south_west.lat + self.north_east.lat) * 0.5,
            (self.south_west.lng + self.north_east.lng) * 0.5,
        )
    }

    pub fn extend(&mut self, c: Coordinate) {
        self.south_west.lat = self.south_west.lat.min(c.lat);
        self.south_west.lng = self.south_west.lng.min(c.lng);
        self.north_east.lat = self.north_east.lat.max(c.lat);
        self.north_east.lng = self.north_east.lng.max(c.lng);
    }

    /// Smallest rectangle containing every point, or `None` for no points.
    pub fn fit<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = GeoBounds::new(first, first);
        for c in iter {
            b.extend(c);
        }
        Some(b)
    }
}

#[cfg(test)]
mod tests {
    use super::GeoBounds;
    use crate::coord::Coordinate;

    fn campus() -> GeoBounds {
        GeoBounds::new(
            Coordinate::new(-30.063, -51.175),
            Coordinate::new(-30.057, -51.169),
        )
    }

    #[test]
    fn contains_is_inclusive() {
        let b = campus();
        assert!(b.contains(Coordinate::new(-30.06, -51.17)));
        assert!(b.contains(Coordinate::new(-30.063, -51.175)));
        assert!(b.contains(Coordinate::new(-30.057, -51.169)));
        assert!(!b.contains(Coordinate::new(-30.05, -51.17)));
        assert!(!b.contains(Coordinate::new(-30.06, -51.18)));
    }

    #[test]
    fn corners_are_normalized() {
        let b = GeoBounds::new(
            Coordinate::new(-30.057, -51.169),
            Coordinate::new(-30.063, -51.175),
        );
        assert_eq!(b, campus());
    }

    #[test]
    fn fit_covers_all_points() {
        assert!(GeoBounds::fit(Vec::new()).is_none());
        let b = GeoBounds::fit(vec![
            Coordinate::new(-30.06, -51.17),
            Coordinate::new(-30.05, -51.16),
            Coordinate::new(-30.07, -51.165),
        ])
        .unwrap();
        assert_eq!(b.south_west, Coordinate::new(-30.07, -51.17));
        assert_eq!(b.north_east, Coordinate::new(-30.05, -51.16));
        let c = b.center();
        assert!((c.lat - -30.06).abs() < 1e-9);
        assert!((c.lng - -51.165).abs() < 1e-9);
    }
}
