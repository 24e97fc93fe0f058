//! Outward orientation of planar faces by ray-cast parity.
//!
//! A ray cast from a face along its normal leaves a closed shell after
//! crossing an even number of other faces when the normal points outward,
//! and an odd number when it points inward. Faces with an odd count are
//! reversed.
//!
//! This is a heuristic. It assumes the faces form a closed shell and
//! ignores grazing hits: rays through an edge or vertex of another face
//! ([`Containment::OnBoundary`]) are not counted, and faces parallel to
//! the ray are skipped entirely.

use loopweld_geom::{Containment, Ray};
use loopweld_math::Tolerance;

use crate::profile::Profile;

/// Ray-cast outcome for one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceParity {
    /// Other perimeters the ray passed strictly through.
    pub crossings: usize,
    /// Whether the face points inward and must be reversed.
    pub flip: bool,
}

/// Cast one ray per profile and count crossings.
///
/// The ray starts at the perimeter's area centroid and runs along the
/// perimeter normal. Hits within `tol.linear` of the origin are ignored.
/// Every ray is tested against the input windings, so the result does not
/// depend on profile order.
pub fn classify_orientation(profiles: &[Profile], tol: Tolerance) -> Vec<FaceParity> {
    profiles
        .iter()
        .enumerate()
        .map(|(i, profile)| {
            let perimeter = &profile.perimeter;
            let ray = Ray::new(perimeter.centroid(), perimeter.normal().into_inner());
            let crossings = profiles
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .filter_map(|(_, other)| ray.intersect_polygon(&other.perimeter, &tol))
                .filter(|hit| hit.containment == Containment::Inside)
                .count();
            FaceParity {
                crossings,
                flip: crossings % 2 == 1,
            }
        })
        .collect()
}

/// Return `profiles` with every inward-facing profile reversed.
///
/// Output order matches input order.
pub fn orient(profiles: &[Profile], tol: Tolerance) -> Vec<Profile> {
    apply_parity(profiles, &classify_orientation(profiles, tol))
}

/// Reverse the profiles whose parity says so.
pub fn apply_parity(profiles: &[Profile], parity: &[FaceParity]) -> Vec<Profile> {
    profiles
        .iter()
        .zip(parity)
        .map(|(profile, parity)| {
            if parity.flip {
                profile.reversed()
            } else {
                profile.clone()
            }
        })
        .collect()
}
