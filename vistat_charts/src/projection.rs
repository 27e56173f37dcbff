// Copyright 2026 the Vistat Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Natural Earth map projection with fit-to-extent.
//!
//! The Natural Earth projection is a pseudocylindrical compromise
//! projection defined by published polynomial approximations in the
//! latitude; it is the projection the original dashboard used for its
//! world map. A projection here is just a pure mapping from
//! `(longitude, latitude)` degrees into scene coordinates, fitted so a
//! geometry collection fills a target extent.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect};

/// Projects `(longitude, latitude)` in degrees onto the unit-sphere Natural
/// Earth plane. Returns y *up*; fitting flips into screen space.
fn natural_earth_raw(lambda: f64, phi: f64) -> (f64, f64) {
    let phi2 = phi * phi;
    let phi4 = phi2 * phi2;
    let x = lambda
        * (0.870_700 - 0.131_979 * phi2
            + phi4 * (-0.013_791 + phi4 * (0.003_971 * phi2 - 0.001_529 * phi4)));
    let y = phi
        * (1.007_226 + phi2 * (0.015_085 + phi4 * (-0.044_475 + 0.028_874 * phi2 - 0.005_916 * phi4)));
    (x, y)
}

/// A fitted projection: raw Natural Earth, then scale + translate into a
/// target extent with y pointing down.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    scale: f64,
    tx: f64,
    ty: f64,
}

impl Projection {
    /// Fits the projection to `extent` so that the given geometry fills it,
    /// preserving aspect ratio and centering the slack dimension.
    ///
    /// `rings` iterates every ring of every polygon of the collection, as
    /// `(longitude, latitude)` degree pairs.
    pub fn fit_extent<'a>(
        extent: Rect,
        rings: impl Iterator<Item = &'a [(f64, f64)]>,
    ) -> Self {
        let mut x0 = f64::INFINITY;
        let mut y0 = f64::INFINITY;
        let mut x1 = f64::NEG_INFINITY;
        let mut y1 = f64::NEG_INFINITY;

        for ring in rings {
            for &(lon, lat) in ring {
                let (x, y) = natural_earth_raw(lon.to_radians(), lat.to_radians());
                // y flips here so the bounds are already in screen space.
                let y = -y;
                x0 = x0.min(x);
                y0 = y0.min(y);
                x1 = x1.max(x);
                y1 = y1.max(y);
            }
        }

        if !(x0.is_finite() && y0.is_finite() && x1 > x0 && y1 > y0) {
            return Self {
                scale: 1.0,
                tx: 0.0,
                ty: 0.0,
            };
        }

        let scale = (extent.width() / (x1 - x0))
            .min(extent.height() / (y1 - y0))
            .max(1.0e-12);
        let tx = extent.x0 + 0.5 * (extent.width() - scale * (x1 - x0)) - scale * x0;
        let ty = extent.y0 + 0.5 * (extent.height() - scale * (y1 - y0)) - scale * y0;

        Self { scale, tx, ty }
    }

    /// Projects a `(longitude, latitude)` degree pair into scene
    /// coordinates.
    pub fn project(&self, lon: f64, lat: f64) -> Point {
        let (x, y) = natural_earth_raw(lon.to_radians(), lat.to_radians());
        Point::new(self.scale * x + self.tx, self.scale * (-y) + self.ty)
    }

    /// Builds a closed path from polygon rings (outer ring first, holes
    /// after, per GeoJSON winding conventions).
    pub fn path(&self, rings: &[Vec<(f64, f64)>]) -> BezPath {
        let mut path = BezPath::new();
        for ring in rings {
            let mut points = ring.iter();
            let Some(&(lon, lat)) = points.next() else {
                continue;
            };
            path.move_to(self.project(lon, lat));
            for &(lon, lat) in points {
                path.line_to(self.project(lon, lat));
            }
            path.close_path();
        }
        path
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn fitted_geometry_stays_inside_the_extent() {
        let ring = vec![
            (-180.0, -85.0),
            (180.0, -85.0),
            (180.0, 85.0),
            (-180.0, 85.0),
            (-180.0, -85.0),
        ];
        let extent = Rect::new(0.0, 0.0, 800.0, 440.0);
        let proj = Projection::fit_extent(extent, core::iter::once(ring.as_slice()));

        for &(lon, lat) in &ring {
            let p = proj.project(lon, lat);
            assert!(p.x >= extent.x0 - 1e-6 && p.x <= extent.x1 + 1e-6, "x out of extent: {p:?}");
            assert!(p.y >= extent.y0 - 1e-6 && p.y <= extent.y1 + 1e-6, "y out of extent: {p:?}");
        }
    }

    #[test]
    fn north_is_up_and_east_is_right() {
        let ring = vec![
            (-180.0, -85.0),
            (180.0, -85.0),
            (180.0, 85.0),
            (-180.0, 85.0),
        ];
        let extent = Rect::new(0.0, 0.0, 800.0, 440.0);
        let proj = Projection::fit_extent(extent, core::iter::once(ring.as_slice()));

        let north = proj.project(0.0, 60.0);
        let south = proj.project(0.0, -60.0);
        assert!(north.y < south.y, "screen y grows downward");

        let west = proj.project(-90.0, 0.0);
        let east = proj.project(90.0, 0.0);
        assert!(west.x < east.x);
    }

    #[test]
    fn equator_projects_proportionally_to_longitude() {
        let ring = vec![
            (-180.0, -85.0),
            (180.0, -85.0),
            (180.0, 85.0),
            (-180.0, 85.0),
        ];
        let proj = Projection::fit_extent(
            Rect::new(0.0, 0.0, 1000.0, 500.0),
            core::iter::once(ring.as_slice()),
        );
        let a = proj.project(-90.0, 0.0);
        let b = proj.project(0.0, 0.0);
        let c = proj.project(90.0, 0.0);
        assert!((b.x - a.x - (c.x - b.x)).abs() < 1e-9, "equator spacing is linear");
    }

    #[test]
    fn path_closes_each_ring() {
        let rings = vec![vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]];
        let proj = Projection::fit_extent(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            rings.iter().map(|r| r.as_slice()),
        );
        let path = proj.path(&rings);
        let closes = path
            .elements()
            .iter()
            .filter(|e| matches!(e, kurbo::PathEl::ClosePath))
            .count();
        assert_eq!(closes, 1);
    }
}
