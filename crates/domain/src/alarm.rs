use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque key value extras that travel with an `AlarmRequest` and are handed
/// back unchanged when the alarm fires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlarmPayload(Map<String, Value>);

impl AlarmPayload {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn put_int(&mut self, key: &str, value: i64) {
        self.0.insert(key.to_string(), Value::from(value));
    }

    pub fn put_str(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), Value::from(value));
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for AlarmPayload {
    fn from(extras: Map<String, Value>) -> Self {
        Self(extras)
    }
}

/// One-shot request for the alarm service. At most one request
/// per `id` is outstanding, a new request for the same `id` replaces the old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmRequest {
    pub id: ID,
    /// Timestamp in millis. Requests in the past fire as soon as possible.
    pub fire_at: i64,
    pub payload: AlarmPayload,
}

impl AlarmRequest {
    /// Millis left until the alarm should fire, never negative
    pub fn delay_millis(&self, now_millis: i64) -> u64 {
        self.fire_at.saturating_sub(now_millis).max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_accessors_check_types() {
        let mut payload = AlarmPayload::new();
        payload.put_int("count", 3);
        payload.put_str("name", "x");

        assert_eq!(payload.get_int("count"), Some(3));
        assert_eq!(payload.get_str("name"), Some("x"));
        assert_eq!(payload.get_int("name"), None);
        assert_eq!(payload.get_str("count"), None);
        assert_eq!(payload.get_str("missing"), None);
    }

    #[test]
    fn delay_is_clamped_at_zero() {
        let request = AlarmRequest {
            id: ID::new(1),
            fire_at: 1_000,
            payload: AlarmPayload::new(),
        };
        assert_eq!(request.delay_millis(400), 600);
        assert_eq!(request.delay_millis(1_000), 0);
        assert_eq!(request.delay_millis(5_000), 0);
    }

    #[test]
    fn delay_saturates_for_extreme_timestamps() {
        let mut request = AlarmRequest {
            id: ID::new(1),
            fire_at: i64::MIN,
            payload: AlarmPayload::new(),
        };
        assert_eq!(request.delay_millis(1), 0);
        assert_eq!(request.delay_millis(i64::MAX), 0);

        request.fire_at = i64::MAX;
        assert_eq!(request.delay_millis(-1), i64::MAX as u64);
        assert_eq!(request.delay_millis(0), i64::MAX as u64);
    }
}
