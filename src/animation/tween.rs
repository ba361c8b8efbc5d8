use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::animation::value::{Lerp, Property, Value};
use crate::eval::diff::StyleFrame;
use crate::foundation::core::TargetId;

/// Time-based interpolation of one value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: Value,
    to: Value,
    ease: Ease,
    duration_secs: f64,
    elapsed_secs: f64,
}

impl Tween {
    pub fn new(from: Value, to: Value, duration_secs: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            ease,
            duration_secs: duration_secs.max(0.0),
            elapsed_secs: 0.0,
        }
    }

    pub fn advance(&mut self, dt_secs: f64) {
        if dt_secs.is_finite() && dt_secs > 0.0 {
            self.elapsed_secs = (self.elapsed_secs + dt_secs).min(self.duration_secs);
        }
    }

    pub fn t(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            1.0
        } else {
            (self.elapsed_secs / self.duration_secs).clamp(0.0, 1.0)
        }
    }

    pub fn value(&self) -> Value {
        Value::lerp(&self.from, &self.to, self.ease.apply(self.t()))
    }

    pub fn target_value(&self) -> Value {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.t() >= 1.0
    }
}

type Key = (TargetId, Property);

/// Tween state for every `(target, property)` pair, with overwrite semantics.
#[derive(Clone, Debug, Default)]
pub struct TweenSet {
    current: BTreeMap<Key, Value>,
    active: BTreeMap<Key, Tween>,
}

impl TweenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animate toward `value`, starting from whatever is currently shown.
    ///
    /// A pair with no known value snaps. Retargeting to the value an in-flight tween already
    /// heads for keeps that tween.
    pub fn to(
        &mut self,
        target: &TargetId,
        property: Property,
        value: Value,
        duration_secs: f64,
        ease: Ease,
    ) {
        let key = (target.clone(), property);
        if let Some(t) = self.active.get(&key)
            && t.target_value() == value
        {
            return;
        }
        let Some(&from) = self.current.get(&key) else {
            self.current.insert(key, value);
            return;
        };
        if from == value || duration_secs <= 0.0 {
            self.active.remove(&key);
            self.current.insert(key, value);
            return;
        }
        self.active
            .insert(key, Tween::new(from, value, duration_secs, ease));
    }

    /// Cancel any tween and show `value` immediately.
    pub fn set(&mut self, target: &TargetId, property: Property, value: Value) {
        let key = (target.clone(), property);
        self.active.remove(&key);
        self.current.insert(key, value);
    }

    pub fn advance(&mut self, dt_secs: f64) {
        let mut done: Vec<Key> = Vec::new();
        for (key, tween) in self.active.iter_mut() {
            tween.advance(dt_secs);
            self.current.insert(key.clone(), tween.value());
            if tween.is_finished() {
                done.push(key.clone());
            }
        }
        for key in done {
            self.active.remove(&key);
        }
    }

    /// Forget every tween and value for `target`.
    pub fn cancel_target(&mut self, target: &TargetId) {
        self.active.retain(|(t, _), _| t != target);
        self.current.retain(|(t, _), _| t != target);
    }

    pub fn value(&self, target: &TargetId, property: Property) -> Option<Value> {
        self.current.get(&(target.clone(), property)).copied()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    pub fn in_flight(&self) -> usize {
        self.active.len()
    }

    pub fn snapshot(&self) -> StyleFrame {
        let mut out = StyleFrame::new();
        for ((t, p), v) in &self.current {
            out.set(t.clone(), *p, *v);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
