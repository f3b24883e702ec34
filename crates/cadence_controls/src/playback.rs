//! Playback model and clock
//!
//! The playback model is the logical state the controls display and edit:
//! two independent switches (`paused`, `running`), a position within a
//! duration, looping, and a set of time markers. It is distinct from the
//! render clock that animates the controls themselves.

use std::sync::Arc;

// ─────────────────────────────────────────────────────────────────────────────
// Markers
// ─────────────────────────────────────────────────────────────────────────────

/// Visual treatment of a marker
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Proximity-responsive tick on the seek bar
    #[default]
    Tick,
    /// Any other code; kept for round-tripping, never drawn
    Other(u8),
}

impl MarkerKind {
    /// Decode a numeric marker type
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => MarkerKind::Tick,
            other => MarkerKind::Other(other),
        }
    }

    /// Numeric marker type
    pub fn code(&self) -> u8 {
        match self {
            MarkerKind::Tick => 0,
            MarkerKind::Other(code) => *code,
        }
    }
}

/// A point in time with a visual kind
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub time: f64,
    pub kind: MarkerKind,
}

impl Marker {
    pub fn new(time: f64, kind: MarkerKind) -> Self {
        Self { time, kind }
    }

    pub fn tick(time: f64) -> Self {
        Self::new(time, MarkerKind::Tick)
    }
}

/// Time-keyed marker set, iterated in ascending time order
///
/// At most one marker exists per time; inserting at an existing time
/// replaces its kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Markers {
    entries: Vec<Marker>,
}

impl Markers {
    pub fn new() -> Self {
        Self::default()
    }

    fn search(&self, time: f64) -> std::result::Result<usize, usize> {
        self.entries.binary_search_by(|m| m.time.total_cmp(&time))
    }

    /// Insert or replace the marker at `time`
    ///
    /// Returns the kind previously stored there. Non-finite times are
    /// ignored.
    pub fn insert(&mut self, time: f64, kind: MarkerKind) -> Option<MarkerKind> {
        if !time.is_finite() {
            tracing::debug!("Markers: ignoring non-finite marker time {}", time);
            return None;
        }
        match self.search(time) {
            Ok(index) => Some(std::mem::replace(&mut self.entries[index].kind, kind)),
            Err(index) => {
                self.entries.insert(index, Marker::new(time, kind));
                None
            }
        }
    }

    /// Remove the marker at `time`
    pub fn remove(&mut self, time: f64) -> Option<MarkerKind> {
        self.search(time)
            .ok()
            .map(|index| self.entries.remove(index).kind)
    }

    /// Kind of the marker at `time`
    pub fn get(&self, time: f64) -> Option<MarkerKind> {
        self.search(time).ok().map(|index| self.entries[index].kind)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Markers in ascending time order
    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.entries.iter()
    }
}

impl FromIterator<(f64, MarkerKind)> for Markers {
    fn from_iter<I: IntoIterator<Item = (f64, MarkerKind)>>(iter: I) -> Self {
        let mut markers = Markers::new();
        for (time, kind) in iter {
            markers.insert(time, kind);
        }
        markers
    }
}

impl<'a> IntoIterator for &'a Markers {
    type Item = &'a Marker;
    type IntoIter = std::slice::Iter<'a, Marker>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Playback Model
// ─────────────────────────────────────────────────────────────────────────────

/// Logical playback state edited by the controls
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackModel {
    /// Gates the play/pause toggle
    pub paused: bool,
    /// Gates the run/stop toggle; independent of `paused`
    pub running: bool,
    /// Position in seconds
    pub current_time: f64,
    /// Length in seconds
    pub duration: f64,
    /// Wrap to the start at the end instead of pausing
    pub looping: bool,
    markers: Arc<Markers>,
}

impl Default for PlaybackModel {
    fn default() -> Self {
        Self {
            paused: true,
            running: false,
            current_time: 0.0,
            duration: 10.0,
            looping: true,
            markers: Arc::new(Markers::new()),
        }
    }
}

impl PlaybackModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Replace the marker set
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = Arc::new(markers);
        self
    }

    pub fn play(&mut self) {
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn run(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// True when the playback clock may advance
    pub fn is_advancing(&self) -> bool {
        self.running && !self.paused
    }

    /// Shared snapshot of the markers
    ///
    /// A snapshot never changes; later edits copy the set first.
    pub fn markers(&self) -> &Arc<Markers> {
        &self.markers
    }

    /// Mutable access to the markers, copying them if a snapshot is shared
    pub fn markers_mut(&mut self) -> &mut Markers {
        Arc::make_mut(&mut self.markers)
    }

    pub fn set_markers(&mut self, markers: Markers) {
        self.markers = Arc::new(markers);
    }

    pub fn add_marker(&mut self, time: f64, kind: MarkerKind) -> Option<MarkerKind> {
        self.markers_mut().insert(time, kind)
    }

    pub fn remove_marker(&mut self, time: f64) -> Option<MarkerKind> {
        self.markers_mut().remove(time)
    }

    pub fn clear_markers(&mut self) {
        self.markers_mut().clear();
    }

    /// Set the position from a user gesture, clamped to `[0, duration]`
    pub fn scrub_to(&mut self, time: f64) {
        self.current_time = time.clamp(0.0, self.duration.max(0.0));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Playback Clock
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of advancing the playback clock
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackStep {
    /// Not running, paused, or nothing to play
    Idle,
    /// Position moved forward
    Advanced,
    /// Position passed the end and wrapped
    Looped,
    /// Position reached the end and playback paused
    Ended,
}

/// Host-driven clock that moves `current_time`
///
/// Only advances while `running && !paused`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackClock {
    /// Playback seconds per wall-clock second
    pub rate: f64,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self { rate: 1.0 }
    }
}

impl PlaybackClock {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Advance `model` by `dt` wall-clock seconds
    pub fn advance(&self, model: &mut PlaybackModel, dt: f64) -> PlaybackStep {
        if !model.is_advancing() || model.duration <= 0.0 || dt <= 0.0 {
            return PlaybackStep::Idle;
        }

        let next = model.current_time + dt * self.rate;
        if next < model.duration {
            model.current_time = next.max(0.0);
            return PlaybackStep::Advanced;
        }

        if model.looping {
            model.current_time = next.rem_euclid(model.duration);
            PlaybackStep::Looped
        } else {
            model.current_time = model.duration;
            model.pause();
            tracing::debug!("PlaybackClock: reached end at {:.3}s", model.duration);
            PlaybackStep::Ended
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_defaults() {
        let model = PlaybackModel::new();
        assert!(model.paused);
        assert!(!model.running);
        assert_eq!(model.current_time, 0.0);
        assert_eq!(model.duration, 10.0);
        assert!(model.looping);
        assert!(model.markers().is_empty());
    }

    #[test]
    fn test_markers_iterate_in_time_order() {
        let markers: Markers = [
            (9.0, MarkerKind::Tick),
            (1.0, MarkerKind::Tick),
            (4.0, MarkerKind::Other(3)),
        ]
        .into_iter()
        .collect();

        let times: Vec<f64> = markers.iter().map(|m| m.time).collect();
        assert_eq!(times, vec![1.0, 4.0, 9.0]);
        assert_eq!(markers.get(4.0), Some(MarkerKind::Other(3)));
    }

    #[test]
    fn test_marker_insert_replaces_and_rejects_nan() {
        let mut markers = Markers::new();
        assert_eq!(markers.insert(2.0, MarkerKind::Tick), None);
        assert_eq!(
            markers.insert(2.0, MarkerKind::Other(1)),
            Some(MarkerKind::Tick)
        );
        assert_eq!(markers.len(), 1);

        assert_eq!(markers.insert(f64::NAN, MarkerKind::Tick), None);
        assert_eq!(markers.len(), 1);

        assert_eq!(markers.remove(2.0), Some(MarkerKind::Other(1)));
        assert!(markers.is_empty());
    }

    #[test]
    fn test_marker_kind_codes() {
        assert_eq!(MarkerKind::from_code(0), MarkerKind::Tick);
        assert_eq!(MarkerKind::from_code(7), MarkerKind::Other(7));
        assert_eq!(MarkerKind::Other(7).code(), 7);
    }

    #[test]
    fn test_marker_snapshot_is_copy_on_write() {
        let mut model = PlaybackModel::new();
        model.add_marker(2.0, MarkerKind::Tick);

        let snapshot = Arc::clone(model.markers());
        model.add_marker(8.0, MarkerKind::Tick);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(model.markers().len(), 2);
    }

    #[test]
    fn test_scrub_clamps() {
        let mut model = PlaybackModel::new();
        model.scrub_to(15.0);
        assert_eq!(model.current_time, 10.0);
        model.scrub_to(-1.0);
        assert_eq!(model.current_time, 0.0);
    }

    #[test]
    fn test_clock_requires_running_and_unpaused() {
        let clock = PlaybackClock::default();
        let mut model = PlaybackModel::new();

        assert_eq!(clock.advance(&mut model, 1.0), PlaybackStep::Idle);

        model.run();
        assert_eq!(clock.advance(&mut model, 1.0), PlaybackStep::Idle);

        model.play();
        assert_eq!(clock.advance(&mut model, 1.0), PlaybackStep::Advanced);
        assert_eq!(model.current_time, 1.0);

        model.stop();
        assert_eq!(clock.advance(&mut model, 1.0), PlaybackStep::Idle);
        assert_eq!(model.current_time, 1.0);
    }

    #[test]
    fn test_clock_loops_at_end() {
        let clock = PlaybackClock::default();
        let mut model = PlaybackModel::new();
        model.run();
        model.play();
        model.current_time = 9.5;

        assert_eq!(clock.advance(&mut model, 1.0), PlaybackStep::Looped);
        assert!((model.current_time - 0.5).abs() < 1e-9);
        assert!(!model.paused);
    }

    #[test]
    fn test_clock_pauses_at_end_without_loop() {
        let clock = PlaybackClock::new(2.0);
        let mut model = PlaybackModel::new();
        model.looping = false;
        model.run();
        model.play();
        model.current_time = 9.0;

        assert_eq!(clock.advance(&mut model, 1.0), PlaybackStep::Ended);
        assert_eq!(model.current_time, 10.0);
        assert!(model.paused);
    }

    #[test]
    fn test_clock_ignores_empty_duration() {
        let clock = PlaybackClock::default();
        let mut model = PlaybackModel::new().with_duration(0.0);
        model.run();
        model.play();

        assert_eq!(clock.advance(&mut model, 1.0), PlaybackStep::Idle);
        assert_eq!(model.current_time, 0.0);
    }
}
