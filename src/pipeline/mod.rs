//! End-to-end post-processing: decode, convert, suppress.
//!
//! Thresholds are supplied by the caller through `PostProcessConfig`; nothing
//! is read from process-wide state. A `PostProcessor` holds only its
//! configuration and may be shared freely across threads.

use crate::boxes::convert::center_to_corner;
use crate::boxes::CornerBox;
use crate::decode::{decode_center_boxes, DetectionTensor};
use crate::suppress::nms::non_max_suppression;
use crate::trace::{trace_span, trace_stage};
use crate::util::{BoxSieveError, BoxSieveResult};

/// Thresholds controlling post-processing.
///
/// Lowering `confidence_threshold` admits more candidates into suppression;
/// lowering `iou_threshold` suppresses more aggressively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostProcessConfig {
    /// Anchors must score strictly above this to become candidates.
    pub confidence_threshold: f32,
    /// Boxes overlapping a kept box by strictly more than this are dropped.
    pub iou_threshold: f32,
    /// Optional cap on the number of boxes returned, highest confidence first.
    pub max_detections: Option<usize>,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            iou_threshold: 0.5,
            max_detections: None,
        }
    }
}

impl PostProcessConfig {
    /// Checks that the thresholds are usable.
    pub fn validate(&self) -> BoxSieveResult<()> {
        if !self.confidence_threshold.is_finite() {
            return Err(BoxSieveError::InvalidConfig {
                reason: "confidence_threshold must be finite",
            });
        }
        if !self.iou_threshold.is_finite() {
            return Err(BoxSieveError::InvalidConfig {
                reason: "iou_threshold must be finite",
            });
        }
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(BoxSieveError::InvalidConfig {
                reason: "iou_threshold must be within [0, 1]",
            });
        }
        if self.max_detections == Some(0) {
            return Err(BoxSieveError::InvalidConfig {
                reason: "max_detections must be at least 1",
            });
        }
        Ok(())
    }
}

/// Runs the full pipeline on one tensor with an explicit configuration.
pub fn process_detections(
    tensor: &DetectionTensor<'_>,
    config: &PostProcessConfig,
) -> BoxSieveResult<Vec<CornerBox>> {
    config.validate()?;

    let _span = trace_span!(
        "postprocess",
        batch = tensor.batch(),
        anchors = tensor.anchors()
    )
    .entered();

    let centers = decode_center_boxes(tensor, config.confidence_threshold);
    let corners = center_to_corner(&centers);
    let mut kept = non_max_suppression(&corners, config.iou_threshold);
    if let Some(limit) = config.max_detections {
        kept.truncate(limit);
    }

    trace_stage!(
        "postprocess",
        candidates = corners.len(),
        kept = kept.len()
    );
    Ok(kept)
}

/// Reusable post-processor bound to one configuration.
#[derive(Clone, Debug, Default)]
pub struct PostProcessor {
    config: PostProcessConfig,
}

impl PostProcessor {
    /// Creates a post-processor with the given configuration.
    pub fn new(config: PostProcessConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PostProcessConfig {
        &self.config
    }

    /// Decodes, converts and suppresses the detections in `tensor`.
    pub fn process(&self, tensor: &DetectionTensor<'_>) -> BoxSieveResult<Vec<CornerBox>> {
        process_detections(tensor, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::PostProcessConfig;
    use crate::util::BoxSieveError;

    #[test]
    fn default_config_is_valid() {
        assert!(PostProcessConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_thresholds() {
        let cfg = PostProcessConfig {
            iou_threshold: 1.5,
            ..PostProcessConfig::default()
        };
        assert_eq!(
            cfg.validate().unwrap_err(),
            BoxSieveError::InvalidConfig {
                reason: "iou_threshold must be within [0, 1]",
            }
        );

        let cfg = PostProcessConfig {
            confidence_threshold: f32::NAN,
            ..PostProcessConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = PostProcessConfig {
            max_detections: Some(0),
            ..PostProcessConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
