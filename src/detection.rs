// src/detection.rs
//
// Boundary contract with the object-detection step. The detector itself
// (camera decode + model inference) lives outside this crate; what crosses
// the boundary is one LaneSample per lane per cycle, plus the bounding-box
// union helper adapters use to fill in `occupied_px`.

use serde::Serialize;

/// One lane's measurement for one control cycle.
///
/// The count is signed at this boundary: upstream detectors speak foreign
/// ABIs, and a garbage negative count must be representable so ingestion
/// can reject it instead of propagating a negative green duration.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LaneSample {
    pub vehicle_count: i32,
    pub occupied_px: f64,
    pub frame_width: u32,
    pub frame_height: u32,
}

impl LaneSample {
    pub fn new(vehicle_count: i32, occupied_px: f64, frame_width: u32, frame_height: u32) -> Self {
        Self {
            vehicle_count,
            occupied_px,
            frame_width,
            frame_height,
        }
    }

    pub fn has_valid_dims(&self) -> bool {
        self.frame_width > 0 && self.frame_height > 0
    }
}

/// Recoverable per-lane input faults. None of these abort a cycle: the
/// controller logs them, the scheduler falls back to the lane's last good
/// count, and the area estimate short-circuits to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SampleFault {
    Missing,
    OutOfRangeCount,
    InvalidDimensions,
}

impl SampleFault {
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleFault::Missing => "missing sample",
            SampleFault::OutOfRangeCount => "out-of-range count",
            SampleFault::InvalidDimensions => "invalid frame dimensions",
        }
    }
}

/// Supplies one optional sample per lane each cycle. `None` marks a lane
/// whose detector produced nothing this cycle.
pub trait DetectionSource {
    fn poll(&mut self) -> Vec<Option<LaneSample>>;
}

/// Axis-aligned box in pixel coordinates, end-exclusive like an image slice.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// Union area of the boxes in pixels: the size of the pixel set covered by
/// at least one box. Overlapping boxes count once, so this is not the sum
/// of individual box areas. Boxes are clamped to the frame.
pub fn coverage_area(boxes: &[BoundingBox], frame_width: u32, frame_height: u32) -> f64 {
    if frame_width == 0 || frame_height == 0 || boxes.is_empty() {
        return 0.0;
    }

    let w = frame_width as usize;
    let h = frame_height as usize;
    let mut mask = vec![false; w * h];

    for b in boxes {
        let x1 = (b.x1.floor().max(0.0) as usize).min(w);
        let y1 = (b.y1.floor().max(0.0) as usize).min(h);
        let x2 = (b.x2.floor().max(0.0) as usize).min(w);
        let y2 = (b.y2.floor().max(0.0) as usize).min(h);

        for y in y1..y2 {
            let row = y * w;
            for x in x1..x2 {
                mask[row + x] = true;
            }
        }
    }

    mask.iter().filter(|covered| **covered).count() as f64
}
