//! Point-wise coordinate transforms between reference systems.
use mint::Point2;
use thiserror::Error;

/// Failure to transform a single point.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("cannot transform ({x}, {y}): {reason}")]
pub struct TransformError {
    pub x: f64,
    pub y: f64,
    pub reason: String,
}

impl TransformError {
    pub fn new(p: Point2<f64>, reason: impl Into<String>) -> Self {
        Self {
            x: p.x,
            y: p.y,
            reason: reason.into(),
        }
    }
}

/// Converts points from a source reference system into a target one.
///
/// A failure affects only the point in question.
pub trait CoordinateTransformer: Send + Sync {
    fn transform(&self, p: Point2<f64>) -> Result<Point2<f64>, TransformError>;
}

/// Returns every point unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransformer;

impl CoordinateTransformer for IdentityTransformer {
    #[inline]
    fn transform(&self, p: Point2<f64>) -> Result<Point2<f64>, TransformError> {
        Ok(p)
    }
}

/// Axis-aligned scale followed by an offset: `p' = p * scale + offset`.
#[derive(Debug, Clone, Copy)]
pub struct AffineTransformer {
    pub scale: [f64; 2],
    pub offset: [f64; 2],
}

impl AffineTransformer {
    pub fn new(scale: [f64; 2], offset: [f64; 2]) -> Self {
        Self { scale, offset }
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self::new([1.0, 1.0], [dx, dy])
    }
}

impl CoordinateTransformer for AffineTransformer {
    fn transform(&self, p: Point2<f64>) -> Result<Point2<f64>, TransformError> {
        let out = Point2 {
            x: p.x * self.scale[0] + self.offset[0],
            y: p.y * self.scale[1] + self.offset[1],
        };
        if out.x.is_finite() && out.y.is_finite() {
            Ok(out)
        } else {
            Err(TransformError::new(p, "result is not finite"))
        }
    }
}

/// Adapter that forwards to a user-provided closure.
pub struct FnTransformer<F>
where
    F: Fn(Point2<f64>) -> Result<Point2<f64>, TransformError> + Send + Sync,
{
    f: F,
}

impl<F> FnTransformer<F>
where
    F: Fn(Point2<f64>) -> Result<Point2<f64>, TransformError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> CoordinateTransformer for FnTransformer<F>
where
    F: Fn(Point2<f64>) -> Result<Point2<f64>, TransformError> + Send + Sync,
{
    #[inline]
    fn transform(&self, p: Point2<f64>) -> Result<Point2<f64>, TransformError> {
        (self.f)(p)
    }
}
