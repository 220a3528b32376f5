//! Feature-gated tracing hooks for the post-processing stages.
//!
//! The pipeline reports through two macros:
//!
//! * `trace_span!` wraps a whole `process_detections` call in an info-level
//!   `postprocess` span carrying the tensor `batch` and `anchors`.
//! * `trace_stage!` records the counters of one finished stage as a
//!   debug-level `"stage complete"` event with a `stage` field:
//!   `decode` (`anchors`, `candidates`), `nms` (`candidates`, `kept`,
//!   `iou_threshold`) and `postprocess` (`candidates`, `kept`).
//!
//! Without the `tracing` feature both expand to no-ops.

#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

#[cfg(feature = "tracing")]
macro_rules! trace_stage {
    ($stage:literal, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::debug!(stage = $stage, $($key = $value),+, "stage complete")
    };
}

// Counter expressions are still evaluated so callers see no unused bindings.
#[cfg(not(feature = "tracing"))]
macro_rules! trace_stage {
    ($stage:literal, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

pub(crate) use trace_span;
pub(crate) use trace_stage;

/// Guard returned by `trace_span!(..).entered()` when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
