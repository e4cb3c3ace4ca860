//! Event types and sinks for observing scatter runs.
//!
//! The sampler reports what it skipped and why through [`ScatterEvent`]s
//! instead of logging from inside the grid walk. Pass `&mut ()` to ignore
//! events, a [`VecSink`] to collect them, or an [`FnSink`] to forward them.
use crate::sampling::SampleStats;

/// Why a polygon produced no grid walk at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    /// The polygon has no vertices.
    Empty,
    /// The bounding box has no positive width or height.
    DegenerateBounds,
    /// The estimated grid cell count exceeds the configured limit.
    TooManyCells { estimated: f64 },
}

/// Describes events emitted while scattering.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum ScatterEvent {
    /// Emitted once the grid cell size is known and sampling begins.
    RunStarted {
        /// Grid step in polygon/raster units.
        cell_size: f64,
        /// Name of the polygon source.
        polygons: String,
        /// Name of the raster source.
        raster: String,
    },

    /// Emitted when all polygons have been processed.
    RunFinished {
        /// Number of points produced.
        points: usize,
        /// Aggregated counters.
        stats: SampleStats,
    },

    /// Emitted before a polygon's grid walk.
    PolygonStarted {
        index: usize,
        estimated_cells: f64,
    },

    /// Emitted when a polygon is skipped without walking it.
    PolygonSkipped { index: usize, reason: SkipReason },

    /// Emitted when a polygon's walk stopped at the iteration cap.
    PolygonTruncated { index: usize, iterations: usize },

    /// Emitted after a polygon's walk.
    PolygonFinished { index: usize, points: usize },

    /// Non-fatal warning, e.g. a raster that cannot be sampled.
    Warning {
        /// Context string (e.g. raster name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`ScatterEvent`] used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScatterEventKind {
    RunStarted,
    RunFinished,
    PolygonStarted,
    PolygonSkipped,
    PolygonTruncated,
    PolygonFinished,
    Warning,
}

impl ScatterEvent {
    pub fn kind(&self) -> ScatterEventKind {
        match self {
            ScatterEvent::RunStarted { .. } => ScatterEventKind::RunStarted,
            ScatterEvent::RunFinished { .. } => ScatterEventKind::RunFinished,
            ScatterEvent::PolygonStarted { .. } => ScatterEventKind::PolygonStarted,
            ScatterEvent::PolygonSkipped { .. } => ScatterEventKind::PolygonSkipped,
            ScatterEvent::PolygonTruncated { .. } => ScatterEventKind::PolygonTruncated,
            ScatterEvent::PolygonFinished { .. } => ScatterEventKind::PolygonFinished,
            ScatterEvent::Warning { .. } => ScatterEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`ScatterEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: ScatterEvent);

    /// Whether events of `kind` should be built and sent at all.
    fn wants(&self, _kind: ScatterEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: ScatterEvent) {}

    #[inline]
    fn wants(&self, _kind: ScatterEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    #[inline]
    fn send(&mut self, event: ScatterEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<ScatterEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<ScatterEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[ScatterEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: ScatterEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: ScatterEvent) {
        self.events.push(event);
    }
}
