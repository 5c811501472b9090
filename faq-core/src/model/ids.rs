use chrono::Utc;

/// Issues creation-timestamp ids that never repeat within a session.
///
/// Ids are milliseconds since the Unix epoch. Two requests in the same
/// millisecond (or a clock that steps backwards) still get distinct,
/// increasing ids because the generator never hands out a value at or
/// below the last one it issued or observed.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> i64 {
        self.next_at(Utc::now().timestamp_millis())
    }

    /// Record an id that already exists so it is never issued again
    pub fn observe(&mut self, id: i64) {
        self.last = self.last.max(id);
    }

    fn next_at(&mut self, now_ms: i64) -> i64 {
        let id = now_ms.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_strictly_increase_within_one_millisecond() {
        let mut ids = IdGenerator::new();
        let a = ids.next_at(1_000);
        let b = ids.next_at(1_000);
        let c = ids.next_at(999);
        assert_eq!(a, 1_000);
        assert_eq!(b, 1_001);
        assert_eq!(c, 1_002);
    }

    #[test]
    fn test_observed_ids_are_skipped() {
        let mut ids = IdGenerator::new();
        ids.observe(5_000);
        assert_eq!(ids.next_at(1_000), 5_001);
    }

    #[test]
    fn test_next_id_tracks_the_clock() {
        let mut ids = IdGenerator::new();
        let before = Utc::now().timestamp_millis();
        let id = ids.next_id();
        assert!(id >= before);
    }
}
