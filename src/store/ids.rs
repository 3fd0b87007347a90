//! Timestamp-derived id generation.

/// Hands out millisecond timestamps, bumped so ids strictly increase
/// even when several are created within the same millisecond.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let id = now.max(self.last + 1);
        self.last = id;
        id
    }

    /// Make sure later ids sort after an id that already exists
    pub fn observe(&mut self, id: i64) {
        self.last = self.last.max(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_strictly_increase() {
        let mut ids = IdGenerator::new();
        let generated: Vec<i64> = (0..100).map(|_| ids.next()).collect();
        assert!(generated.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_observe_skips_past_existing() {
        let mut ids = IdGenerator::new();
        let future = chrono::Utc::now().timestamp_millis() + 1_000_000;
        ids.observe(future);
        assert_eq!(ids.next(), future + 1);
    }
}
