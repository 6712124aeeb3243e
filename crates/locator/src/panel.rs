//! Draggable bottom panel.
//!
//! The panel rests at one of a fixed, ascending set of snap fractions of the
//! viewport height. While a pointer drags the handle the height tracks the
//! pointer, clamped to `[min snap, max snap]`; on release (or cancel) it
//! snaps to the nearest rest height.
//!
//! # Invariants
//!
//! 1. At rest, `height == fraction * viewport_height` for one snap fraction.
//! 2. During a drag, `min_height() <= height <= max_height()`.
//! 3. Pointer capture is released exactly once per captured drag, including
//!    when the controller is dropped mid-drag.
//! 4. The page-scroll lock is held iff `height > min_height() + margin`, and
//!    is released when the controller is dropped.

use crate::scroll_lock::ScrollLock;

/// Identifies the pointer that owns a drag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PointerId(pub i32);

/// Host pointer-capture primitive. Calls are always paired.
pub trait PointerCapture: Send {
    fn capture(&mut self, pointer: PointerId);
    fn release(&mut self, pointer: PointerId);
}

/// For hosts that route pointer events to the handle without capture.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPointerCapture;

impl PointerCapture for NoPointerCapture {
    fn capture(&mut self, _pointer: PointerId) {}
    fn release(&mut self, _pointer: PointerId) {}
}

/// How the host should animate to the current height.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Follow the pointer with no animation.
    Immediate,
    Eased { duration_ms: u32 },
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum PanelState {
    Resting,
    Dragging {
        pointer: PointerId,
        start_y: f64,
        start_height: f64,
    },
}

/// Strictly ascending, finite snap fractions.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapPoints {
    fractions: Vec<f64>,
}

impl SnapPoints {
    /// Sorts and dedups `fractions`, dropping non-finite and non-positive
    /// values.
    pub fn new(mut fractions: Vec<f64>) -> Self {
        fractions.retain(|f| f.is_finite() && *f > 0.0);
        fractions.sort_by(f64::total_cmp);
        fractions.dedup();
        Self { fractions }
    }

    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    pub fn heights(&self, viewport_height: f64) -> impl Iterator<Item = f64> + '_ {
        self.fractions.iter().map(move |f| f * viewport_height)
    }

    pub fn min_fraction(&self) -> f64 {
        self.fractions.first().copied().unwrap_or(0.0)
    }

    pub fn max_fraction(&self) -> f64 {
        self.fractions.last().copied().unwrap_or(0.0)
    }

    /// Rest height closest to `height`. Ties go to the smaller fraction.
    pub fn nearest(&self, height: f64, viewport_height: f64) -> f64 {
        let mut heights = self.heights(viewport_height);
        let Some(first) = heights.next() else {
            return height;
        };
        heights.fold(first, |best, candidate| {
            if (candidate - height).abs() < (best - height).abs() {
                candidate
            } else {
                best
            }
        })
    }
}

pub struct PanelGestureController {
    snaps: SnapPoints,
    viewport_height: f64,
    height: f64,
    measured: bool,
    state: PanelState,
    collapse_on_release: bool,
    lock_margin_px: f64,
    animation_ms: u32,
    capture: Box<dyn PointerCapture>,
    scroll_lock: ScrollLock,
}

impl std::fmt::Debug for PanelGestureController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelGestureController")
            .field("viewport_height", &self.viewport_height)
            .field("height", &self.height)
            .field("state", &self.state)
            .field("scroll_lock", &self.scroll_lock)
            .finish()
    }
}

impl PanelGestureController {
    pub fn new(
        snaps: SnapPoints,
        lock_margin_px: f64,
        animation_ms: u32,
        capture: Box<dyn PointerCapture>,
        scroll_lock: ScrollLock,
    ) -> Self {
        Self {
            snaps,
            viewport_height: 0.0,
            height: 0.0,
            measured: false,
            state: PanelState::Resting,
            collapse_on_release: false,
            lock_margin_px,
            animation_ms,
            capture,
            scroll_lock,
        }
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn snaps(&self) -> &SnapPoints {
        &self.snaps
    }

    pub fn min_height(&self) -> f64 {
        self.snaps.min_fraction() * self.viewport_height
    }

    pub fn max_height(&self) -> f64 {
        self.snaps.max_fraction() * self.viewport_height
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, PanelState::Dragging { .. })
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_lock.is_held()
    }

    pub fn transition(&self) -> Transition {
        if self.is_dragging() {
            Transition::Immediate
        } else {
            Transition::Eased {
                duration_ms: self.animation_ms,
            }
        }
    }

    /// Records a new viewport height.
    ///
    /// The first measurement places the panel at the smallest snap; later
    /// ones leave the current height alone. Returns the new height if it
    /// changed.
    pub fn measure_viewport(&mut self, viewport_height: f64) -> Option<f64> {
        self.viewport_height = viewport_height.max(0.0);
        if !self.measured {
            self.measured = true;
            let changed = self.set_height(self.min_height());
            self.sync_scroll_lock();
            return changed;
        }
        self.sync_scroll_lock();
        None
    }

    /// Starts a drag owned by `pointer`. Ignored while another pointer
    /// already owns the panel.
    pub fn drag_start(&mut self, pointer: PointerId, pointer_y: f64) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.capture.capture(pointer);
        self.state = PanelState::Dragging {
            pointer,
            start_y: pointer_y,
            start_height: self.height,
        };
        true
    }

    /// Moves the panel with the pointer. Dragging upward (smaller `y`) grows
    /// the panel.
    pub fn drag_move(&mut self, pointer: PointerId, pointer_y: f64) -> Option<f64> {
        let PanelState::Dragging {
            pointer: owner,
            start_y,
            start_height,
        } = self.state
        else {
            return None;
        };
        if owner != pointer || self.viewport_height <= 0.0 {
            return None;
        }
        let delta = start_y - pointer_y;
        let target = (start_height + delta).clamp(self.min_height(), self.max_height());
        self.set_height(target)
    }

    /// Ends the drag and snaps to the nearest rest height, or to the
    /// smallest one if [`snap_to_min`](Self::snap_to_min) was requested
    /// during the drag.
    pub fn drag_end(&mut self, pointer: PointerId) -> Option<f64> {
        match self.state {
            PanelState::Dragging { pointer: owner, .. } if owner == pointer => {}
            _ => return None,
        }
        self.state = PanelState::Resting;
        self.capture.release(pointer);
        let target = if std::mem::take(&mut self.collapse_on_release) {
            self.min_height()
        } else {
            self.snaps.nearest(self.height, self.viewport_height)
        };
        self.set_height(target)
    }

    /// Pointer cancellation snaps exactly like a release.
    pub fn drag_cancel(&mut self, pointer: PointerId) -> Option<f64> {
        self.drag_end(pointer)
    }

    /// Moves to the smallest rest height, e.g. to reveal the map.
    ///
    /// During a drag the pointer keeps control and the collapse is applied
    /// on release instead.
    pub fn snap_to_min(&mut self) -> Option<f64> {
        if self.is_dragging() {
            self.collapse_on_release = true;
            return None;
        }
        self.set_height(self.min_height())
    }

    fn set_height(&mut self, height: f64) -> Option<f64> {
        if height == self.height {
            return None;
        }
        self.height = height;
        self.sync_scroll_lock();
        Some(height)
    }

    fn sync_scroll_lock(&mut self) {
        let expanded = self.height > self.min_height() + self.lock_margin_px;
        self.scroll_lock.set(expanded);
    }
}

impl Drop for PanelGestureController {
    fn drop(&mut self) {
        if let PanelState::Dragging { pointer, .. } = self.state {
            self.state = PanelState::Resting;
            self.capture.release(pointer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll_lock::tests::RecordingLock;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingCapture(Arc<Mutex<Vec<(&'static str, i32)>>>);

    impl PointerCapture for RecordingCapture {
        fn capture(&mut self, pointer: PointerId) {
            self.0.lock().unwrap().push(("capture", pointer.0));
        }
        fn release(&mut self, pointer: PointerId) {
            self.0.lock().unwrap().push(("release", pointer.0));
        }
    }

    fn controller() -> (PanelGestureController, RecordingCapture, RecordingLock) {
        let capture = RecordingCapture::default();
        let lock = RecordingLock::default();
        let panel = PanelGestureController::new(
            SnapPoints::new(vec![0.10, 0.40, 0.85]),
            5.0,
            300,
            Box::new(capture.clone()),
            ScrollLock::new(Box::new(lock.clone())),
        );
        (panel, capture, lock)
    }

    const P: PointerId = PointerId(1);

    #[test]
    fn first_measurement_rests_at_smallest_snap() {
        let (mut panel, _, _) = controller();
        assert_eq!(panel.measure_viewport(800.0), Some(80.0));
        assert_eq!(panel.height(), 80.0);
        assert_eq!(panel.measure_viewport(1000.0), None);
        assert_eq!(panel.height(), 80.0);
        assert_eq!(panel.max_height(), 850.0);
    }

    #[test]
    fn drag_up_grows_and_clamps() {
        let (mut panel, _, _) = controller();
        panel.measure_viewport(800.0);
        assert!(panel.drag_start(P, 700.0));
        assert_eq!(panel.transition(), Transition::Immediate);
        assert_eq!(panel.drag_move(P, 600.0), Some(180.0));
        assert_eq!(panel.drag_move(P, 0.0), Some(680.0));
        assert_eq!(panel.drag_move(P, -500.0), None);
        assert_eq!(panel.drag_move(P, 900.0), Some(80.0));
    }

    #[test]
    fn release_past_max_snaps_to_largest() {
        let (mut panel, _, _) = controller();
        panel.measure_viewport(800.0);
        panel.drag_start(P, 700.0);
        // Would reach 720px unclamped.
        panel.drag_move(P, 60.0);
        assert_eq!(panel.height(), 680.0);
        assert_eq!(panel.drag_end(P), None);
        assert_eq!(panel.height(), 0.85 * 800.0);
        assert!(!panel.is_dragging());
        assert_eq!(panel.transition(), Transition::Eased { duration_ms: 300 });
    }

    #[test]
    fn release_snaps_to_nearest() {
        let (mut panel, _, _) = controller();
        panel.measure_viewport(1000.0);
        panel.drag_start(P, 900.0);
        panel.drag_move(P, 500.0);
        assert_eq!(panel.height(), 500.0);
        assert_eq!(panel.drag_end(P), Some(400.0));
    }

    #[test]
    fn unordered_fractions_are_sorted() {
        let snaps = SnapPoints::new(vec![0.85, 0.40, f64::NAN, 0.10, 0.40, -1.0]);
        assert_eq!(snaps.fractions(), &[0.10, 0.40, 0.85]);

        let mut panel = PanelGestureController::new(
            snaps,
            5.0,
            300,
            Box::new(NoPointerCapture),
            ScrollLock::new(Box::new(crate::scroll_lock::NoScrollLock)),
        );
        panel.measure_viewport(800.0);
        panel.drag_start(P, 700.0);
        assert_eq!(panel.drag_move(P, 600.0), Some(180.0));
        assert_eq!(panel.drag_end(P), Some(80.0));
    }

    #[test]
    fn empty_snaps_keep_the_panel_closed() {
        let mut panel = PanelGestureController::new(
            SnapPoints::new(Vec::new()),
            5.0,
            300,
            Box::new(NoPointerCapture),
            ScrollLock::new(Box::new(crate::scroll_lock::NoScrollLock)),
        );
        panel.measure_viewport(800.0);
        panel.drag_start(P, 700.0);
        assert_eq!(panel.drag_move(P, 100.0), None);
        panel.drag_end(P);
        assert_eq!(panel.height(), 0.0);
    }

    #[test]
    fn ties_snap_to_the_smaller_fraction() {
        let snaps = SnapPoints::new(vec![0.10, 0.40, 0.85]);
        assert_eq!(snaps.nearest(250.0, 1000.0), 100.0);
        assert_eq!(snaps.nearest(251.0, 1000.0), 400.0);
    }

    #[test]
    fn capture_is_exclusive_and_symmetric() {
        let (mut panel, capture, _) = controller();
        panel.measure_viewport(800.0);
        assert!(panel.drag_start(P, 700.0));
        assert!(!panel.drag_start(PointerId(2), 100.0));
        assert_eq!(panel.drag_move(PointerId(2), 100.0), None);
        assert_eq!(panel.drag_end(PointerId(2)), None);
        panel.drag_cancel(P);
        assert_eq!(panel.drag_end(P), None);
        assert_eq!(
            *capture.0.lock().unwrap(),
            vec![("capture", 1), ("release", 1)]
        );
    }

    #[test]
    fn moves_without_a_drag_or_viewport_are_ignored() {
        let (mut panel, _, _) = controller();
        assert_eq!(panel.drag_move(P, 10.0), None);
        panel.drag_start(P, 100.0);
        assert_eq!(panel.drag_move(P, 10.0), None);
        assert_eq!(panel.height(), 0.0);
    }

    #[test]
    fn scroll_lock_follows_threshold() {
        let (mut panel, _, lock) = controller();
        panel.measure_viewport(800.0);
        panel.drag_start(P, 700.0);
        panel.drag_move(P, 696.0);
        assert!(!panel.is_scroll_locked());
        panel.drag_move(P, 694.0);
        assert!(panel.is_scroll_locked());
        panel.drag_end(P);
        assert!(!panel.is_scroll_locked());
        assert_eq!(*lock.0.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn drop_mid_drag_releases_everything() {
        let (mut panel, capture, lock) = controller();
        panel.measure_viewport(800.0);
        panel.drag_start(P, 700.0);
        panel.drag_move(P, 300.0);
        assert!(panel.is_scroll_locked());
        drop(panel);
        assert_eq!(
            *capture.0.lock().unwrap(),
            vec![("capture", 1), ("release", 1)]
        );
        assert_eq!(lock.0.lock().unwrap().last(), Some(&false));
    }

    #[test]
    fn snap_to_min_from_expanded() {
        let (mut panel, _, _) = controller();
        panel.measure_viewport(800.0);
        panel.drag_start(P, 700.0);
        panel.drag_move(P, 400.0);
        panel.drag_end(P);
        assert_eq!(panel.height(), 320.0);
        assert_eq!(panel.snap_to_min(), Some(80.0));
        assert_eq!(panel.snap_to_min(), None);
    }

    #[test]
    fn snap_to_min_mid_drag_collapses_on_release() {
        let (mut panel, _, _) = controller();
        panel.measure_viewport(800.0);
        panel.drag_start(P, 700.0);
        panel.drag_move(P, 200.0);
        assert_eq!(panel.snap_to_min(), None);
        assert_eq!(panel.height(), 580.0);
        assert_eq!(panel.drag_move(P, 100.0), Some(680.0));
        assert_eq!(panel.drag_end(P), Some(80.0));
        assert!(!panel.is_scroll_locked());

        // The request does not outlive the drag it was made in.
        panel.drag_start(P, 700.0);
        panel.drag_move(P, 400.0);
        assert_eq!(panel.drag_end(P), Some(320.0));
    }
}
