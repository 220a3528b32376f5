//! Raw detector output decoding.
//!
//! `DetectionTensor` is a borrowed view of a row-major `[batch, 5, anchors]`
//! buffer as produced by YOLO-style heads: for each batch element, five
//! contiguous channel planes `(x, y, width, height, confidence)` of length
//! `anchors`. Shape checks run when the view is built, so decoding itself
//! cannot fail.

use crate::boxes::CenterBox;
use crate::trace::trace_stage;
use crate::util::{BoxSieveError, BoxSieveResult};

/// Number of channels per anchor: `x, y, width, height, confidence`.
pub const DETECTION_CHANNELS: usize = 5;

const CHANNEL_X: usize = 0;
const CHANNEL_Y: usize = 1;
const CHANNEL_WIDTH: usize = 2;
const CHANNEL_HEIGHT: usize = 3;
const CHANNEL_CONFIDENCE: usize = 4;

/// Borrowed, shape-checked view of a `[batch, 5, anchors]` detection tensor.
#[derive(Copy, Clone, Debug)]
pub struct DetectionTensor<'a> {
    data: &'a [f32],
    batch: usize,
    anchors: usize,
}

impl<'a> DetectionTensor<'a> {
    /// Creates a view over `data` with shape `[batch, 5, anchors]`.
    pub fn new(data: &'a [f32], batch: usize, anchors: usize) -> BoxSieveResult<Self> {
        let needed = required_len(batch, DETECTION_CHANNELS, anchors)?;
        if data.len() != needed {
            return Err(BoxSieveError::BufferSizeMismatch {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            batch,
            anchors,
        })
    }

    /// Creates a view from a runtime-reported shape such as `[1, 5, 8400]`.
    pub fn from_shape(data: &'a [f32], shape: &[usize]) -> BoxSieveResult<Self> {
        let &[batch, channels, anchors] = shape else {
            return Err(BoxSieveError::InvalidRank { rank: shape.len() });
        };
        if channels != DETECTION_CHANNELS {
            return Err(BoxSieveError::ChannelMismatch {
                expected: DETECTION_CHANNELS,
                got: channels,
            });
        }
        Self::new(data, batch, anchors)
    }

    /// Returns the batch dimension.
    pub fn batch(&self) -> usize {
        self.batch
    }

    /// Returns the number of channels per anchor (always 5).
    pub fn channels(&self) -> usize {
        DETECTION_CHANNELS
    }

    /// Returns the number of anchors per batch element.
    pub fn anchors(&self) -> usize {
        self.anchors
    }

    /// Returns `true` when the tensor holds no anchors at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the backing buffer.
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Returns the value at `[batch, channel, anchor]` if it is within bounds.
    pub fn get(&self, batch: usize, channel: usize, anchor: usize) -> Option<f32> {
        if batch >= self.batch || channel >= DETECTION_CHANNELS || anchor >= self.anchors {
            return None;
        }
        let idx = (batch * DETECTION_CHANNELS + channel) * self.anchors + anchor;
        self.data.get(idx).copied()
    }

    /// Reads one anchor as a center-form box without applying any threshold.
    pub fn anchor(&self, batch: usize, anchor: usize) -> Option<CenterBox> {
        Some(CenterBox {
            x: self.get(batch, CHANNEL_X, anchor)?,
            y: self.get(batch, CHANNEL_Y, anchor)?,
            width: self.get(batch, CHANNEL_WIDTH, anchor)?,
            height: self.get(batch, CHANNEL_HEIGHT, anchor)?,
            confidence: self.get(batch, CHANNEL_CONFIDENCE, anchor)?,
        })
    }

    /// Returns one channel plane (all anchors) for one batch element.
    fn channel_plane(&self, batch: usize, channel: usize) -> &'a [f32] {
        let data = self.data;
        let start = (batch * DETECTION_CHANNELS + channel) * self.anchors;
        &data[start..start + self.anchors]
    }
}

fn required_len(batch: usize, channels: usize, anchors: usize) -> BoxSieveResult<usize> {
    batch
        .checked_mul(channels)
        .and_then(|v| v.checked_mul(anchors))
        .ok_or(BoxSieveError::DimensionOverflow {
            batch,
            channels,
            anchors,
        })
}

/// Decodes every anchor whose confidence is strictly above `confidence_threshold`.
///
/// Iterates batch-major, anchor-minor. An anchor exactly at the threshold is
/// dropped, as is any anchor with a NaN confidence.
pub fn decode_center_boxes(
    tensor: &DetectionTensor<'_>,
    confidence_threshold: f32,
) -> Vec<CenterBox> {
    let mut boxes = Vec::new();
    for batch in 0..tensor.batch() {
        let xs = tensor.channel_plane(batch, CHANNEL_X);
        let ys = tensor.channel_plane(batch, CHANNEL_Y);
        let widths = tensor.channel_plane(batch, CHANNEL_WIDTH);
        let heights = tensor.channel_plane(batch, CHANNEL_HEIGHT);
        let confidences = tensor.channel_plane(batch, CHANNEL_CONFIDENCE);

        for (anchor, &confidence) in confidences.iter().enumerate() {
            if confidence > confidence_threshold {
                boxes.push(CenterBox {
                    x: xs[anchor],
                    y: ys[anchor],
                    width: widths[anchor],
                    height: heights[anchor],
                    confidence,
                });
            }
        }
    }

    trace_stage!(
        "decode",
        anchors = tensor.batch() * tensor.anchors(),
        candidates = boxes.len()
    );
    boxes
}
