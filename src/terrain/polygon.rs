//! Polygon validation and ear-clipping triangulation in the XZ plane.
//!
//! Points are `Vec2(x, z)`. Triangles come back counter-clockwise in that
//! 2D frame regardless of the input winding.

use bevy::math::Vec2;

const EPS: f32 = 1e-6;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TerrainError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("vertex {0} is not finite")]
    NonFinite(usize),
    #[error("vertex {0} repeats its predecessor")]
    DuplicateVertex(usize),
    #[error("polygon encloses no area")]
    ZeroArea,
    #[error("edge {first} crosses edge {second}")]
    SelfIntersecting { first: usize, second: usize },
    #[error("rectangle [{x_min}, {x_max}] x [{z_min}, {z_max}] has no extent")]
    DegenerateBounds { x_min: f32, x_max: f32, z_min: f32, z_max: f32 },
}

/// Twice-signed area; positive for counter-clockwise rings.
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum * 0.5
}

/// Reject anything that is not a simple polygon with at least three vertices.
pub fn validate_polygon(points: &[Vec2]) -> Result<(), TerrainError> {
    let n = points.len();
    if n < 3 {
        return Err(TerrainError::TooFewVertices(n));
    }
    if let Some(i) = points.iter().position(|p| !p.is_finite()) {
        return Err(TerrainError::NonFinite(i));
    }
    for i in 0..n {
        if points[i].distance_squared(points[(i + n - 1) % n]) <= EPS * EPS {
            return Err(TerrainError::DuplicateVertex(i));
        }
    }
    // Edge i runs from vertex i to vertex i+1. Neighbouring edges share a
    // vertex and are skipped; every other pair must stay disjoint.
    for i in 0..n {
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            if adjacent {
                continue;
            }
            let (a, b) = (points[i], points[(i + 1) % n]);
            let (c, d) = (points[j], points[(j + 1) % n]);
            if segments_intersect(a, b, c, d) {
                return Err(TerrainError::SelfIntersecting { first: i, second: j });
            }
        }
    }
    if signed_area(points).abs() <= EPS {
        return Err(TerrainError::ZeroArea);
    }
    Ok(())
}

/// Ear-clip a validated polygon. Returns vertex index triples into `points`.
pub fn triangulate(points: &[Vec2]) -> Result<Vec<[u32; 3]>, TerrainError> {
    validate_polygon(points)?;

    let mut ring: Vec<usize> = (0..points.len()).collect();
    if signed_area(points) < 0.0 {
        ring.reverse();
    }

    let mut tris = Vec::with_capacity(points.len() - 2);
    while ring.len() > 3 {
        let m = ring.len();
        let mut clipped = false;

        for i in 0..m {
            let (ip, ic, inx) = (ring[(i + m - 1) % m], ring[i], ring[(i + 1) % m]);
            let (a, b, c) = (points[ip], points[ic], points[inx]);
            if cross(b - a, c - b) <= EPS {
                continue; // reflex or flat corner
            }
            let blocked = ring
                .iter()
                .filter(|&&k| k != ip && k != ic && k != inx)
                .any(|&k| point_in_triangle(points[k], a, b, c));
            if blocked {
                continue;
            }
            tris.push([ip as u32, ic as u32, inx as u32]);
            ring.remove(i);
            clipped = true;
            break;
        }

        if !clipped {
            // Only collinear corners left to shed; they add no area.
            let flat = (0..m).find(|&i| {
                let a = points[ring[(i + m - 1) % m]];
                let b = points[ring[i]];
                let c = points[ring[(i + 1) % m]];
                cross(b - a, c - b).abs() <= EPS
            });
            match flat {
                Some(i) => {
                    ring.remove(i);
                }
                None => return Err(TerrainError::ZeroArea),
            }
        }
    }

    if cross(points[ring[1]] - points[ring[0]], points[ring[2]] - points[ring[1]]).abs() > EPS {
        tris.push([ring[0] as u32, ring[1] as u32, ring[2] as u32]);
    }
    Ok(tris)
}

#[inline]
fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

#[inline]
fn orient(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    cross(b - a, c - a)
}

fn on_segment(a: Vec2, b: Vec2, p: Vec2) -> bool {
    p.x >= a.x.min(b.x) - EPS
        && p.x <= a.x.max(b.x) + EPS
        && p.y >= a.y.min(b.y) - EPS
        && p.y <= a.y.max(b.y) + EPS
}

/// Closed-segment intersection, touching counts.
fn segments_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    let d1 = orient(c, d, a);
    let d2 = orient(c, d, b);
    let d3 = orient(a, b, c);
    let d4 = orient(a, b, d);

    if ((d1 > EPS && d2 < -EPS) || (d1 < -EPS && d2 > EPS))
        && ((d3 > EPS && d4 < -EPS) || (d3 < -EPS && d4 > EPS))
    {
        return true;
    }

    (d1.abs() <= EPS && on_segment(c, d, a))
        || (d2.abs() <= EPS && on_segment(c, d, b))
        || (d3.abs() <= EPS && on_segment(a, b, c))
        || (d4.abs() <= EPS && on_segment(a, b, d))
}

/// Inclusive test against a counter-clockwise triangle.
fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    orient(a, b, p) >= -EPS && orient(b, c, p) >= -EPS && orient(c, a, p) >= -EPS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(points: &[(f32, f32)]) -> Vec<Vec2> {
        points.iter().map(|&(x, z)| Vec2::new(x, z)).collect()
    }

    fn covered_area(points: &[Vec2], tris: &[[u32; 3]]) -> f32 {
        tris.iter()
            .map(|t| {
                let (a, b, c) = (points[t[0] as usize], points[t[1] as usize], points[t[2] as usize]);
                orient(a, b, c) * 0.5
            })
            .sum()
    }

    #[test]
    fn rejects_short_rings() {
        assert_eq!(validate_polygon(&v(&[(0.0, 0.0), (1.0, 0.0)])), Err(TerrainError::TooFewVertices(2)));
        assert_eq!(validate_polygon(&[]), Err(TerrainError::TooFewVertices(0)));
    }

    #[test]
    fn rejects_bowtie() {
        let bowtie = v(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]);
        assert!(matches!(validate_polygon(&bowtie), Err(TerrainError::SelfIntersecting { .. })));
    }

    #[test]
    fn rejects_collinear_and_repeated_points() {
        assert_eq!(
            validate_polygon(&v(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)])),
            Err(TerrainError::ZeroArea)
        );
        assert_eq!(
            validate_polygon(&v(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0), (0.0, 1.0)])),
            Err(TerrainError::DuplicateVertex(1))
        );
    }

    #[test]
    fn rejects_nan() {
        let pts = v(&[(0.0, 0.0), (f32::NAN, 0.0), (0.0, 1.0)]);
        assert_eq!(validate_polygon(&pts), Err(TerrainError::NonFinite(1)));
    }

    #[test]
    fn dogleg_fairway_triangulates_to_its_full_area() {
        // Concave L-shaped dogleg.
        let pts = v(&[
            (0.0, 0.0),
            (40.0, 0.0),
            (40.0, -200.0),
            (120.0, -200.0),
            (120.0, -240.0),
            (0.0, -240.0),
        ]);
        let tris = triangulate(&pts).unwrap();
        assert_eq!(tris.len(), pts.len() - 2);
        let expected = signed_area(&pts).abs();
        assert!((covered_area(&pts, &tris) - expected).abs() < 1e-2);
    }

    #[test]
    fn triangles_are_counter_clockwise_for_either_winding() {
        let mut pts = v(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (2.0, 1.0), (0.0, 4.0)]);
        for _ in 0..2 {
            let tris = triangulate(&pts).unwrap();
            for t in &tris {
                let (a, b, c) = (pts[t[0] as usize], pts[t[1] as usize], pts[t[2] as usize]);
                assert!(orient(a, b, c) > 0.0);
            }
            pts.reverse();
        }
    }

    #[test]
    fn collinear_corner_is_shed_without_slivers() {
        let pts = v(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let tris = triangulate(&pts).unwrap();
        assert!((covered_area(&pts, &tris) - 100.0).abs() < 1e-3);
        for t in &tris {
            let (a, b, c) = (pts[t[0] as usize], pts[t[1] as usize], pts[t[2] as usize]);
            assert!(orient(a, b, c).abs() > EPS);
        }
    }
}
