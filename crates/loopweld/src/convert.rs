//! Face reconstruction and the B-rep to solid pipeline.
//!
//! Every loop is rebuilt the same way: trims are resolved to their 3D
//! curves, the curves are split into line and arc segments, and the
//! segments are joined into one closed chain whose vertices form the
//! loop's polygon. Outer loops become face perimeters, inner loops become
//! voids.

use loopweld_geom::{Polygon, PolygonError, Segment};
use loopweld_join::{join_observed, JoinError, LogObserver};
use loopweld_solid::{apply_parity, build_solid, classify_orientation, FaceParity, Profile, Solid};
use serde::Serialize;

use crate::brep::{BrepInput, BrepLoop, LoopKind};
use crate::error::{ConvertError, LoopRef, Result};
use crate::settings::{ConversionSettings, DegenerateLoopPolicy};

/// A loop left out of the solid under [`DegenerateLoopPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedLoop {
    /// Where the loop sits in the B-rep.
    pub face: usize,
    /// Loop index within the face.
    pub loop_index: usize,
    /// Outer loops take their whole face with them.
    pub kind: LoopKind,
    /// Why the polygon was rejected.
    #[serde(serialize_with = "display")]
    pub reason: PolygonError,
}

fn display<S: serde::Serializer>(err: &PolygonError, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.collect_str(err)
}

/// A face rebuilt from its loops.
#[derive(Debug, Clone)]
pub struct FaceProfile {
    /// The face, or `None` if its outer loop was dropped.
    pub profile: Option<Profile>,
    /// Loops dropped from this face.
    pub dropped: Vec<DroppedLoop>,
}

/// Outcome of [`brep_to_solid`].
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The assembled solid, one face per kept profile.
    pub solid: Solid,
    /// Kept profiles after orientation, in face order.
    pub profiles: Vec<Profile>,
    /// B-rep face index of each kept profile.
    pub source_faces: Vec<usize>,
    /// Ray-cast result per kept profile. All `flip: false` when orientation
    /// is disabled.
    pub parity: Vec<FaceParity>,
    /// Loops that were dropped as degenerate.
    pub dropped: Vec<DroppedLoop>,
}

impl Conversion {
    /// Number of faces that were reversed.
    pub fn flipped_count(&self) -> usize {
        self.parity.iter().filter(|p| p.flip).count()
    }
}

/// Resolve a loop's trims to segments, ready for joining.
///
/// Zero-length segments are dropped, since they would sit twice on one
/// node. With `settings.sort_by_length` the rest are stably sorted by
/// ascending length; this only affects which segment a closed walk starts
/// from.
pub fn loop_segments(
    brep: &BrepInput,
    lp: &BrepLoop,
    at: LoopRef,
    settings: &ConversionSettings,
) -> Result<Vec<Segment>> {
    let tol = settings.tolerance();
    let mut segments = Vec::new();
    for trim in &lp.trims {
        for segment in brep.trim_curve(trim, at)?.to_segments() {
            if segment.is_degenerate(&tol) {
                log::debug!("skipping zero-length {:?} segment in loop {at}", segment.kind());
                continue;
            }
            segments.push(segment);
        }
    }
    if settings.sort_by_length {
        segments.sort_by(|a, b| a.length().total_cmp(&b.length()));
    }
    Ok(segments)
}

/// Rebuild one loop as a polygon.
///
/// # Errors
///
/// - [`ConvertError::MissingFace`] / [`ConvertError::MissingLoop`] if `at`
///   is out of range
/// - [`ConvertError::MissingEdge`] / [`ConvertError::MissingCurve`] for
///   dangling references
/// - [`ConvertError::Join`] if the segments do not form one closed chain
/// - [`ConvertError::DegenerateLoop`] if the chain is not a valid polygon
pub fn loop_polygon(
    brep: &BrepInput,
    at: LoopRef,
    settings: &ConversionSettings,
) -> Result<Polygon> {
    let lp = brep
        .faces
        .get(at.face)
        .ok_or(ConvertError::MissingFace(at.face))?
        .loops
        .get(at.loop_index)
        .ok_or(ConvertError::MissingLoop(at))?;
    let tol = settings.tolerance();

    let segments = loop_segments(brep, lp, at, settings)?;
    let chain = join_observed(&segments, tol, &mut LogObserver)
        .map_err(|source| ConvertError::Join { at, source })?;
    chain.to_polygon(&tol).map_err(|err| match err {
        JoinError::DegenerateLoop(source) => ConvertError::DegenerateLoop { at, source },
        source => ConvertError::Join { at, source },
    })
}

/// Rebuild face `face` as a profile.
///
/// Loops of kind [`LoopKind::Other`] are ignored. Degenerate loops are
/// dropped or fail the face according to `settings.degenerate_loops`.
///
/// # Errors
///
/// [`ConvertError::MissingOuterLoop`] and
/// [`ConvertError::MultipleOuterLoops`] for malformed faces, plus any error
/// from [`loop_polygon`].
pub fn face_profile(
    brep: &BrepInput,
    face: usize,
    settings: &ConversionSettings,
) -> Result<FaceProfile> {
    let loops = &brep.faces.get(face).ok_or(ConvertError::MissingFace(face))?.loops;

    let outer_count = loops.iter().filter(|l| l.kind == LoopKind::Outer).count();
    match outer_count {
        0 => return Err(ConvertError::MissingOuterLoop(face)),
        1 => {}
        count => return Err(ConvertError::MultipleOuterLoops { face, count }),
    }

    let mut perimeter = None;
    let mut voids = Vec::new();
    let mut dropped = Vec::new();

    for (loop_index, lp) in loops.iter().enumerate() {
        if lp.kind == LoopKind::Other {
            continue;
        }
        let at = LoopRef { face, loop_index };
        let polygon = match loop_polygon(brep, at, settings) {
            Ok(polygon) => polygon,
            Err(ConvertError::DegenerateLoop { source, .. })
                if settings.degenerate_loops == DegenerateLoopPolicy::Skip =>
            {
                log::warn!("dropping {:?} loop at {at}: {source}", lp.kind);
                dropped.push(DroppedLoop {
                    face,
                    loop_index,
                    kind: lp.kind,
                    reason: source,
                });
                continue;
            }
            Err(err) => return Err(err),
        };
        match lp.kind {
            LoopKind::Outer => perimeter = Some(polygon),
            LoopKind::Inner => voids.push(polygon),
            LoopKind::Other => {}
        }
    }

    Ok(FaceProfile {
        profile: perimeter.map(|perimeter| Profile::new(perimeter, voids)),
        dropped,
    })
}

/// Convert a planar B-rep into a solid.
///
/// Faces are rebuilt in order, oriented outward by ray-cast parity (unless
/// disabled) and added to a new [`Solid`]. A face whose outer loop is
/// dropped is left out of the solid, which may then be open.
///
/// # Errors
///
/// Invalid settings, or the first face that fails in [`face_profile`].
pub fn brep_to_solid(brep: &BrepInput, settings: &ConversionSettings) -> Result<Conversion> {
    settings.validate()?;
    let tol = settings.tolerance();

    let mut profiles = Vec::with_capacity(brep.faces.len());
    let mut source_faces = Vec::with_capacity(brep.faces.len());
    let mut dropped = Vec::new();
    for face in 0..brep.faces.len() {
        let rebuilt = face_profile(brep, face, settings)?;
        dropped.extend(rebuilt.dropped);
        if let Some(profile) = rebuilt.profile {
            profiles.push(profile);
            source_faces.push(face);
        }
    }

    let parity = if settings.orient_faces {
        classify_orientation(&profiles, tol)
    } else {
        profiles
            .iter()
            .map(|_| FaceParity {
                crossings: 0,
                flip: false,
            })
            .collect()
    };
    let profiles = apply_parity(&profiles, &parity);
    let solid = build_solid(&profiles, tol);

    let conversion = Conversion {
        solid,
        profiles,
        source_faces,
        parity,
        dropped,
    };
    log::debug!(
        "converted {} of {} faces ({} reversed, {} loops dropped)",
        conversion.profiles.len(),
        brep.faces.len(),
        conversion.flipped_count(),
        conversion.dropped.len()
    );
    Ok(conversion)
}
