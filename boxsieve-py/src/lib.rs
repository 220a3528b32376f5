//! Python bindings for the boxsieve post-processing library.
//!
//! Exposes box types, IoU, greedy suppression and the full tensor pipeline so
//! a Python inference service can hand raw detector output straight to Rust.

use numpy::{PyReadonlyArray3, PyUntypedArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use boxsieve::{
    BoxSieveError, CenterBox as RustCenterBox, CornerBox as RustCornerBox, DetectionTensor,
    PostProcessConfig as RustPostProcessConfig, PostProcessor,
};

/// Convert a BoxSieveError to a Python exception.
fn to_py_err(err: BoxSieveError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Box in center form: center (x, y), width, height and confidence.
#[pyclass]
#[derive(Clone)]
pub struct CenterBox {
    inner: RustCenterBox,
}

#[pymethods]
impl CenterBox {
    #[new]
    fn new(x: f32, y: f32, width: f32, height: f32, confidence: f32) -> Self {
        Self {
            inner: RustCenterBox::new(x, y, width, height, confidence),
        }
    }

    #[getter]
    fn x(&self) -> f32 {
        self.inner.x
    }

    #[getter]
    fn y(&self) -> f32 {
        self.inner.y
    }

    #[getter]
    fn width(&self) -> f32 {
        self.inner.width
    }

    #[getter]
    fn height(&self) -> f32 {
        self.inner.height
    }

    #[getter]
    fn confidence(&self) -> f32 {
        self.inner.confidence
    }

    /// Convert to corner form.
    fn to_corner(&self) -> CornerBox {
        self.inner.to_corner().into()
    }

    fn __repr__(&self) -> String {
        format!(
            "CenterBox(x={}, y={}, width={}, height={}, confidence={:.4})",
            self.inner.x, self.inner.y, self.inner.width, self.inner.height, self.inner.confidence
        )
    }
}

/// Box in corner form: (x1, y1) to (x2, y2) plus confidence.
#[pyclass]
#[derive(Clone)]
pub struct CornerBox {
    inner: RustCornerBox,
}

impl From<RustCornerBox> for CornerBox {
    fn from(inner: RustCornerBox) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl CornerBox {
    #[new]
    fn new(x1: f32, y1: f32, x2: f32, y2: f32, confidence: f32) -> Self {
        RustCornerBox::new(x1, y1, x2, y2, confidence).into()
    }

    #[getter]
    fn x1(&self) -> f32 {
        self.inner.x1
    }

    #[getter]
    fn y1(&self) -> f32 {
        self.inner.y1
    }

    #[getter]
    fn x2(&self) -> f32 {
        self.inner.x2
    }

    #[getter]
    fn y2(&self) -> f32 {
        self.inner.y2
    }

    #[getter]
    fn confidence(&self) -> f32 {
        self.inner.confidence
    }

    /// Area with inverted extents clamped to zero.
    fn area(&self) -> f32 {
        self.inner.area()
    }

    /// Intersection over union with another box.
    fn iou(&self, other: PyRef<'_, CornerBox>) -> f32 {
        boxsieve::iou(&self.inner, &other.inner)
    }

    fn __eq__(&self, other: PyRef<'_, CornerBox>) -> bool {
        self.inner == other.inner
    }

    fn __repr__(&self) -> String {
        format!(
            "CornerBox(x1={}, y1={}, x2={}, y2={}, confidence={:.4})",
            self.inner.x1, self.inner.y1, self.inner.x2, self.inner.y2, self.inner.confidence
        )
    }
}

/// Thresholds for the decode / suppress pipeline.
#[pyclass]
#[derive(Clone)]
pub struct PostProcessConfig {
    inner: RustPostProcessConfig,
}

#[pymethods]
impl PostProcessConfig {
    /// Create a new PostProcessConfig.
    ///
    /// Args:
    ///     confidence_threshold: Anchors must score strictly above this (default: 0.5)
    ///     iou_threshold: Suppress boxes overlapping a kept box above this (default: 0.5)
    ///     max_detections: Optional cap on returned boxes (default: None)
    #[new]
    #[pyo3(signature = (confidence_threshold = 0.5, iou_threshold = 0.5, max_detections = None))]
    fn new(
        confidence_threshold: f32,
        iou_threshold: f32,
        max_detections: Option<usize>,
    ) -> PyResult<Self> {
        let inner = RustPostProcessConfig {
            confidence_threshold,
            iou_threshold,
            max_detections,
        };
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Validate the configuration.
    fn validate(&self) -> PyResult<()> {
        self.inner.validate().map_err(to_py_err)
    }

    #[getter]
    fn confidence_threshold(&self) -> f32 {
        self.inner.confidence_threshold
    }

    #[getter]
    fn iou_threshold(&self) -> f32 {
        self.inner.iou_threshold
    }

    #[getter]
    fn max_detections(&self) -> Option<usize> {
        self.inner.max_detections
    }

    fn __repr__(&self) -> String {
        let max_detections = match self.inner.max_detections {
            Some(limit) => limit.to_string(),
            None => "None".to_string(),
        };
        format!(
            "PostProcessConfig(confidence_threshold={}, iou_threshold={}, max_detections={})",
            self.inner.confidence_threshold, self.inner.iou_threshold, max_detections
        )
    }
}

/// Convert a list of center-form boxes to corner form, preserving order.
#[pyfunction]
fn center_to_corner(boxes: Vec<CenterBox>) -> Vec<CornerBox> {
    boxes
        .iter()
        .map(|b| CornerBox::from(b.inner.to_corner()))
        .collect()
}

/// Intersection over union of two corner-form boxes.
#[pyfunction]
fn iou(a: PyRef<'_, CornerBox>, b: PyRef<'_, CornerBox>) -> f32 {
    boxsieve::iou(&a.inner, &b.inner)
}

/// Greedy non-maximum suppression.
///
/// Returns the surviving boxes, highest confidence first. A box whose IoU
/// with a kept box equals the threshold is kept.
#[pyfunction]
#[pyo3(signature = (boxes, iou_threshold = 0.5))]
fn non_max_suppression(boxes: Vec<CornerBox>, iou_threshold: f32) -> Vec<CornerBox> {
    let rust_boxes: Vec<RustCornerBox> = boxes.iter().map(|b| b.inner).collect();
    boxsieve::non_max_suppression(&rust_boxes, iou_threshold)
        .into_iter()
        .map(CornerBox::from)
        .collect()
}

/// Decode, convert and suppress a raw detector output.
///
/// Args:
///     detections: float32 numpy array shaped (batch, 5, anchors)
///     config: PostProcessConfig (default: PostProcessConfig())
///
/// Returns:
///     List of CornerBox, highest confidence first
#[pyfunction]
#[pyo3(signature = (detections, config = None))]
fn process_detections(
    detections: PyReadonlyArray3<'_, f32>,
    config: Option<PostProcessConfig>,
) -> PyResult<Vec<CornerBox>> {
    let shape = detections.shape().to_vec();
    let data = detections.as_slice()?;
    let tensor = DetectionTensor::from_shape(data, &shape).map_err(to_py_err)?;

    let cfg = config.map(|c| c.inner).unwrap_or_default();
    let boxes = PostProcessor::new(cfg).process(&tensor).map_err(to_py_err)?;
    Ok(boxes.into_iter().map(CornerBox::from).collect())
}

/// Python module for boxsieve detection post-processing.
#[pymodule]
fn _boxsieve(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<CenterBox>()?;
    m.add_class::<CornerBox>()?;
    m.add_class::<PostProcessConfig>()?;
    m.add_function(wrap_pyfunction!(center_to_corner, m)?)?;
    m.add_function(wrap_pyfunction!(iou, m)?)?;
    m.add_function(wrap_pyfunction!(non_max_suppression, m)?)?;
    m.add_function(wrap_pyfunction!(process_detections, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
