//! Planar-faced solids assembled from oriented profiles.

use std::collections::HashMap;

use loopweld_geom::{Polygon, PolygonError};
use loopweld_math::{Dir3, Point3, PointKey, Tolerance, Vec3};
use slotmap::SlotMap;

use crate::profile::Profile;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in a [`Solid`].
    pub struct VertexId;
    /// Unique identifier for a face in a [`Solid`].
    pub struct FaceId;
}

/// A planar face: outer loop plus holes, as vertex ids.
#[derive(Debug, Clone)]
pub struct Face {
    /// Outer loop, wound so its normal points out of the solid.
    pub outer: Vec<VertexId>,
    /// Hole loops.
    pub inner: Vec<Vec<VertexId>>,
    /// Unit normal of the outer loop.
    pub normal: Dir3,
}

/// A collection of planar faces sharing vertices.
///
/// Vertices closer than the tolerance (same [`PointKey`]) are stored once.
/// Faces and vertices are never removed, so iteration follows insertion
/// order. No check is made that the faces close up into a valid shell.
#[derive(Debug, Clone)]
pub struct Solid {
    tol: Tolerance,
    vertices: SlotMap<VertexId, Point3>,
    faces: SlotMap<FaceId, Face>,
    vertex_index: HashMap<PointKey, VertexId>,
}

impl Solid {
    /// Create an empty solid that merges vertices with `tol`.
    pub fn new(tol: Tolerance) -> Self {
        Self {
            tol,
            vertices: SlotMap::with_key(),
            faces: SlotMap::with_key(),
            vertex_index: HashMap::new(),
        }
    }

    /// Tolerance used for vertex merging.
    pub fn tolerance(&self) -> Tolerance {
        self.tol
    }

    /// Add a face from its outer loop and holes.
    ///
    /// Loops are stored with the winding they are given.
    pub fn add_face(&mut self, outer: &Polygon, inner: &[Polygon]) -> FaceId {
        let outer_ids = self.add_loop(outer);
        let inner_ids = inner.iter().map(|hole| self.add_loop(hole)).collect();
        self.faces.insert(Face {
            outer: outer_ids,
            inner: inner_ids,
            normal: outer.normal(),
        })
    }

    /// Add a profile as one face.
    pub fn add_profile(&mut self, profile: &Profile) -> FaceId {
        self.add_face(&profile.perimeter, &profile.voids)
    }

    fn add_loop(&mut self, polygon: &Polygon) -> Vec<VertexId> {
        polygon
            .vertices()
            .iter()
            .map(|p| self.vertex_at(*p))
            .collect()
    }

    fn vertex_at(&mut self, point: Point3) -> VertexId {
        let key = self.tol.key(&point);
        if let Some(&id) = self.vertex_index.get(&key) {
            return id;
        }
        let id = self.vertices.insert(point);
        self.vertex_index.insert(key, id);
        id
    }

    /// All faces in insertion order.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &Face)> + '_ {
        self.faces.iter()
    }

    /// Look up a face.
    pub fn face(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id)
    }

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Position of a vertex.
    pub fn vertex(&self, id: VertexId) -> Option<Point3> {
        self.vertices.get(id).copied()
    }

    /// Number of distinct vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Positions of a face's loops, outer loop first.
    pub fn face_loop_points(&self, id: FaceId) -> Option<Vec<Vec<Point3>>> {
        let face = self.faces.get(id)?;
        std::iter::once(&face.outer)
            .chain(face.inner.iter())
            .map(|ids| ids.iter().map(|&v| self.vertex(v)).collect::<Option<Vec<_>>>())
            .collect()
    }

    /// Read a face back as a profile, at the merged vertex positions.
    ///
    /// Returns `None` for an unknown face. Merging can pull a loop's
    /// vertices together, so the loops are validated again and may fail.
    pub fn face_profile(&self, id: FaceId) -> Option<Result<Profile, PolygonError>> {
        let mut loops = self
            .face_loop_points(id)?
            .into_iter()
            .map(|points| Polygon::new(points, &self.tol));
        let perimeter = loops.next()?;
        Some(perimeter.and_then(|perimeter| {
            let voids = loops.collect::<Result<Vec<_>, _>>()?;
            Ok(Profile::new(perimeter, voids))
        }))
    }

    /// Enclosed volume by the divergence theorem.
    ///
    /// Positive when the faces form a closed shell with outward normals,
    /// negative when they all point inward. Holes always subtract from
    /// their face, whatever their winding. Meaningless for open shells.
    pub fn signed_volume(&self) -> f64 {
        self.faces
            .keys()
            .filter_map(|id| self.face_loop_points(id))
            .map(|loops| {
                let Some((outer, holes)) = loops.split_first() else {
                    return 0.0;
                };
                let outer_area = area_vector(outer);
                let net = holes.iter().fold(outer_area, |acc, hole| {
                    let a = area_vector(hole);
                    if a.dot(&outer_area) > 0.0 {
                        acc - a
                    } else {
                        acc + a
                    }
                });
                outer.first().map_or(0.0, |p| p.coords.dot(&net) / 3.0)
            })
            .sum()
    }
}

/// Newell area vector: normal scaled by enclosed area.
fn area_vector(points: &[Point3]) -> Vec3 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].coords.cross(&points[(i + 1) % n].coords))
        .fold(Vec3::zeros(), |acc, c| acc + c)
        * 0.5
}

/// Build a solid with one face per profile, in order.
pub fn build_solid(profiles: &[Profile], tol: Tolerance) -> Solid {
    let mut solid = Solid::new(tol);
    for profile in profiles {
        solid.add_profile(profile);
    }
    solid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orient::tests::box_faces;
    use crate::orient::orient;
    use approx::assert_abs_diff_eq;

    fn square(z: f64, lo: f64, hi: f64) -> Polygon {
        Polygon::new(
            vec![
                Point3::new(lo, lo, z),
                Point3::new(hi, lo, z),
                Point3::new(hi, hi, z),
                Point3::new(lo, hi, z),
            ],
            &Tolerance::DEFAULT,
        )
        .unwrap()
    }

    #[test]
    fn test_cube_shares_vertices() {
        let solid = build_solid(
            &box_faces(Point3::origin(), Point3::new(2.0, 2.0, 2.0)),
            Tolerance::DEFAULT,
        );
        assert_eq!(solid.face_count(), 6);
        assert_eq!(solid.vertex_count(), 8);
        assert_abs_diff_eq!(solid.signed_volume(), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_near_vertices_merge() {
        let mut solid = Solid::new(Tolerance::DEFAULT);
        solid.add_face(&square(0.0, 0.0, 1.0), &[]);
        let shifted = Polygon::new(
            vec![
                Point3::new(1.0 + 1e-8, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
                Point3::new(1.0, 1.0 - 1e-8, 0.0),
            ],
            &Tolerance::DEFAULT,
        )
        .unwrap();
        solid.add_face(&shifted, &[]);
        assert_eq!(solid.vertex_count(), 6);
    }

    #[test]
    fn test_faces_keep_order_and_holes() {
        let mut solid = Solid::new(Tolerance::DEFAULT);
        let a = solid.add_face(&square(0.0, 0.0, 4.0), &[square(0.0, 1.0, 2.0)]);
        let b = solid.add_face(&square(1.0, 0.0, 4.0), &[]);

        let ids: Vec<FaceId> = solid.faces().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b]);

        let loops = solid.face_loop_points(a).unwrap();
        assert_eq!(loops.len(), 2);
        assert_eq!(loops[1][0], Point3::new(1.0, 1.0, 0.0));
        assert_eq!(solid.face(b).unwrap().inner.len(), 0);
        assert_abs_diff_eq!(solid.face(a).unwrap().normal.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_volume_sign_follows_orientation() {
        let cube = box_faces(Point3::origin(), Point3::new(1.0, 2.0, 3.0));
        let inverted: Vec<Profile> = cube.iter().map(Profile::reversed).collect();
        let tol = Tolerance::DEFAULT;

        assert_abs_diff_eq!(build_solid(&inverted, tol).signed_volume(), -6.0, epsilon = 1e-9);

        let mut one_bad = cube.clone();
        one_bad[3] = one_bad[3].reversed();
        let fixed = build_solid(&orient(&one_bad, tol), tol);
        assert_abs_diff_eq!(fixed.signed_volume(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_hole_subtracts_volume() {
        // Unit-height slab 4x4 with a 2x2 square hole through it.
        let tol = Tolerance::DEFAULT;
        let mut faces = Vec::new();
        let outer = box_faces(Point3::origin(), Point3::new(4.0, 4.0, 1.0));
        let hole_walls: Vec<Profile> = box_faces(Point3::new(1.0, 1.0, 0.0), Point3::new(3.0, 3.0, 1.0))
            .into_iter()
            .skip(2)
            .map(|f| f.reversed())
            .collect();
        faces.push(Profile::new(
            outer[0].perimeter.clone(),
            vec![square(0.0, 1.0, 3.0)],
        ));
        faces.push(Profile::new(
            outer[1].perimeter.clone(),
            vec![square(1.0, 1.0, 3.0).reversed()],
        ));
        faces.extend(outer[2..].iter().cloned());
        faces.extend(hole_walls);

        let solid = build_solid(&faces, tol);
        assert_abs_diff_eq!(solid.signed_volume(), 16.0 - 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_faces_read_back_as_profiles() {
        let tol = Tolerance::DEFAULT;
        let mut faces = box_faces(Point3::origin(), Point3::new(4.0, 4.0, 1.0));
        faces[1] = Profile::new(faces[1].perimeter.clone(), vec![square(1.0, 1.0, 3.0).reversed()]);

        let solid = build_solid(&faces, tol);
        let read: Vec<Profile> = solid
            .faces()
            .map(|(id, _)| solid.face_profile(id).unwrap().unwrap())
            .collect();
        assert_eq!(read, faces);

        // A face added with near-duplicate corners comes back on the merged grid.
        let mut merged = Solid::new(tol);
        merged.add_face(&square(0.0, 0.0, 1.0), &[]);
        let nudged = Polygon::new(
            vec![
                Point3::new(1.0 + 1e-8, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
                Point3::new(1.0, 1.0 - 1e-8, 0.0),
            ],
            &tol,
        )
        .unwrap();
        let id = merged.add_face(&nudged, &[]);
        let profile = merged.face_profile(id).unwrap().unwrap();
        assert_eq!(profile.perimeter.vertices()[0], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(profile.perimeter.vertices()[3], Point3::new(1.0, 1.0, 0.0));
        assert_abs_diff_eq!(profile.area(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_face_profile_unknown_face() {
        let mut other = Solid::new(Tolerance::DEFAULT);
        let id = other.add_face(&square(0.0, 0.0, 1.0), &[]);
        assert!(Solid::new(Tolerance::DEFAULT).face_profile(id).is_none());
    }
}
