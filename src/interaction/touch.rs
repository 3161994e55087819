use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use tracing::trace;

pub const DOUBLE_TAP_MAX_INTERVAL_MS: f64 = 500.0;
pub const DOUBLE_TAP_MAX_DISTANCE: f64 = 20.0;
pub const LONG_TAP_MIN_DURATION_MS: f64 = 1_000.0;
pub const LONG_TAP_MAX_DISTANCE: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

pub type TouchList = SmallVec<[TouchPoint; 2]>;

/// Raw touch input. `touches` lists the contacts still down after the
/// event, so an `End` of the last finger carries an empty list.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub touches: TouchList,
    pub timestamp_ms: f64,
}

impl TouchEvent {
    #[must_use]
    pub fn new(
        phase: TouchPhase,
        touches: impl IntoIterator<Item = TouchPoint>,
        timestamp_ms: f64,
    ) -> Self {
        Self {
            phase,
            touches: touches.into_iter().collect(),
            timestamp_ms,
        }
    }

    #[must_use]
    pub fn start(touches: impl IntoIterator<Item = TouchPoint>, timestamp_ms: f64) -> Self {
        Self::new(TouchPhase::Start, touches, timestamp_ms)
    }

    #[must_use]
    pub fn moved(touches: impl IntoIterator<Item = TouchPoint>, timestamp_ms: f64) -> Self {
        Self::new(TouchPhase::Move, touches, timestamp_ms)
    }

    #[must_use]
    pub fn end(touches: impl IntoIterator<Item = TouchPoint>, timestamp_ms: f64) -> Self {
        Self::new(TouchPhase::End, touches, timestamp_ms)
    }
}

/// Synthetic navigation gestures.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    PanStart { touches: TouchList },
    PanDrag { touches: TouchList },
    PanEnd,
    PinchStart { touches: TouchList },
    PinchDrag { touches: TouchList },
    PinchEnd,
    DoubleTap { first: TouchPoint, second: TouchPoint },
    LongTap { point: TouchPoint },
}

pub type GestureBatch = SmallVec<[GestureEvent; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TouchNavigationConfig {
    pub enable_touch: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct GestureState {
    pinch_active: bool,
    tap_start: TouchPoint,
    tap_latest: TouchPoint,
    tap_start_ms: Option<f64>,
    long_tap_fired: bool,
    double_tap_fired: bool,
    last_tap: Option<(TouchPoint, f64)>,
}

/// Turns raw touch streams into pan, pinch, double-tap and long-tap
/// gestures. Input is ignored while unbound.
#[derive(Debug, Clone, Default)]
pub struct TouchGestureRecognizer {
    config: TouchNavigationConfig,
    bound: bool,
    state: GestureState,
}

impl TouchGestureRecognizer {
    #[must_use]
    pub fn new(config: TouchNavigationConfig) -> Self {
        Self {
            config,
            bound: false,
            state: GestureState::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> TouchNavigationConfig {
        self.config
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Starts listening when touch navigation is enabled; returns whether
    /// the recognizer is now bound.
    pub fn bind(&mut self) -> bool {
        self.bound = self.config.enable_touch;
        self.bound
    }

    pub fn shutdown(&mut self) {
        self.bound = false;
        self.state = GestureState::default();
    }

    pub fn handle(&mut self, event: &TouchEvent) -> GestureBatch {
        if !self.bound {
            return GestureBatch::new();
        }

        let gestures = if event.touches.len() == 2 {
            self.handle_pinch(event)
        } else {
            self.handle_pan(event)
        };
        trace!(phase = ?event.phase, gestures = gestures.len(), "touch event");
        gestures
    }

    fn handle_pinch(&mut self, event: &TouchEvent) -> GestureBatch {
        let touches = event.touches.clone();
        match event.phase {
            TouchPhase::Start => smallvec![GestureEvent::PinchStart { touches }],
            TouchPhase::Move => {
                self.state.pinch_active = true;
                smallvec![GestureEvent::PinchDrag { touches }]
            }
            TouchPhase::End => GestureBatch::new(),
        }
    }

    fn handle_pan(&mut self, event: &TouchEvent) -> GestureBatch {
        let mut gestures = GestureBatch::new();
        let now = event.timestamp_ms;

        match event.phase {
            TouchPhase::Start => {
                let Some(&point) = event.touches.first() else {
                    return gestures;
                };
                let double_tap = self.take_double_tap(point, now);

                let state = &mut self.state;
                state.tap_start = point;
                state.tap_latest = point;
                state.tap_start_ms = Some(now);
                state.long_tap_fired = false;
                state.double_tap_fired = double_tap.is_some();

                gestures.push(GestureEvent::PanStart {
                    touches: event.touches.clone(),
                });
                if let Some(first) = double_tap {
                    gestures.push(GestureEvent::DoubleTap {
                        first,
                        second: point,
                    });
                }
            }
            TouchPhase::Move => {
                if let Some(&point) = event.touches.first() {
                    self.state.tap_latest = point;
                }
                gestures.push(GestureEvent::PanDrag {
                    touches: event.touches.clone(),
                });
                self.push_long_tap(&mut gestures, now);
            }
            TouchPhase::End => {
                if self.state.pinch_active && event.touches.len() == 1 {
                    // Pinch collapsed to one finger: continue as a fresh pan
                    // without arming tap detection.
                    self.state.pinch_active = false;
                    self.state.tap_start_ms = None;
                    gestures.push(GestureEvent::PinchEnd);
                    gestures.push(GestureEvent::PanStart {
                        touches: event.touches.clone(),
                    });
                    return gestures;
                }

                if event.touches.is_empty() {
                    gestures.push(GestureEvent::PanEnd);
                }
                self.push_long_tap(&mut gestures, now);

                if event.touches.is_empty() {
                    let state = &mut self.state;
                    let armed = state.tap_start_ms.is_some()
                        && !state.double_tap_fired
                        && !state.pinch_active;
                    state.last_tap = armed.then_some((state.tap_latest, now));
                    state.pinch_active = false;
                    state.tap_start_ms = None;
                }
            }
        }

        gestures
    }

    fn take_double_tap(&mut self, point: TouchPoint, now: f64) -> Option<TouchPoint> {
        let (previous, ended_at) = self.state.last_tap.take()?;
        let interval = now - ended_at;
        let is_double = (0.0..DOUBLE_TAP_MAX_INTERVAL_MS).contains(&interval)
            && previous.distance_to(point) < DOUBLE_TAP_MAX_DISTANCE;
        is_double.then_some(previous)
    }

    fn push_long_tap(&mut self, gestures: &mut GestureBatch, now: f64) {
        let state = &mut self.state;
        let Some(started_at) = state.tap_start_ms else {
            return;
        };
        if state.long_tap_fired || now - started_at < LONG_TAP_MIN_DURATION_MS {
            return;
        }
        if state.tap_start.distance_to(state.tap_latest) < LONG_TAP_MAX_DISTANCE {
            state.long_tap_fired = true;
            gestures.push(GestureEvent::LongTap {
                point: state.tap_latest,
            });
        }
    }
}
