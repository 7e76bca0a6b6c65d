//! Last-value comparison gate

/// Admits a value only when it differs from the last admitted one
///
/// Each subscriber of a
/// [`DistinctBroadcaster`](crate::notifications::api::DistinctBroadcaster)
/// has one, so that it observes transitions rather than repeated confirmations
/// of the same value.
#[derive(Debug, Clone)]
pub struct DistinctGate<V> {
    last: Option<V>,
}

impl<V> Default for DistinctGate<V> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<V: Clone + PartialEq> DistinctGate<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when `value` should be forwarded, recording it as the last value
    pub fn admit(&mut self, value: &V) -> bool {
        if self.last.as_ref() == Some(value) {
            return false;
        }
        self.last = Some(value.clone());
        true
    }
}
