pub mod touch;

pub use touch::{
    GestureBatch, GestureEvent, TouchEvent, TouchGestureRecognizer, TouchList,
    TouchNavigationConfig, TouchPhase, TouchPoint,
};
