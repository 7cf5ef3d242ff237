use orrery_scene::CelestialBody;
use std::time::{Duration, Instant};
use tracing::warn;

/// Dwell used when the configured one can't be represented.
pub const DEFAULT_DWELL: Duration = Duration::from_secs(5);

/// The current focus target and the deadline that clears it.
///
/// Setting a new target rearms the single deadline, so at most one
/// expiry fires per dwell however many matches arrive inside it.
#[derive(Debug, Clone)]
pub struct FocusSlot {
    target: Option<CelestialBody>,
    deadline: Option<Instant>,
    dwell: Duration,
}

impl FocusSlot {
    pub fn new(dwell: Duration) -> Self {
        Self {
            target: None,
            deadline: None,
            dwell,
        }
    }

    /// Negative values clamp to zero; infinite or oversized ones fall back
    /// to [`DEFAULT_DWELL`].
    pub fn from_secs(dwell_secs: f32) -> Self {
        let dwell = Duration::try_from_secs_f32(dwell_secs.max(0.0)).unwrap_or_else(|e| {
            warn!(dwell_secs, %e, "Invalid focus dwell, using default");
            DEFAULT_DWELL
        });
        Self::new(dwell)
    }

    pub fn current(&self) -> Option<CelestialBody> {
        self.target
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    /// Focus `body` for one dwell starting at `now`.
    pub fn set(&mut self, body: CelestialBody, now: Instant) {
        self.target = Some(body);
        self.deadline = Some(now + self.dwell);
    }

    /// Clear the target if its deadline has passed. Returns the body that
    /// was cleared.
    pub fn expire(&mut self, now: Instant) -> Option<CelestialBody> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.target.take()
            }
            _ => None,
        }
    }

    /// Drop the target and void its deadline.
    pub fn clear(&mut self) {
        self.target = None;
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DWELL: Duration = Duration::from_secs(5);

    #[test]
    fn expires_after_dwell() {
        let t0 = Instant::now();
        let mut slot = FocusSlot::new(DWELL);
        slot.set(CelestialBody::Mars, t0);

        assert_eq!(slot.expire(t0 + Duration::from_millis(4999)), None);
        assert_eq!(slot.current(), Some(CelestialBody::Mars));
        assert_eq!(slot.expire(t0 + DWELL), Some(CelestialBody::Mars));
        assert_eq!(slot.current(), None);
        assert_eq!(slot.deadline(), None);
    }

    #[test]
    fn second_match_rearms_instead_of_stacking() {
        let t0 = Instant::now();
        let mut slot = FocusSlot::new(DWELL);
        slot.set(CelestialBody::Mars, t0);
        slot.set(CelestialBody::Venus, t0 + Duration::from_secs(3));

        // The first dwell would have ended here.
        assert_eq!(slot.expire(t0 + Duration::from_secs(6)), None);
        assert_eq!(slot.current(), Some(CelestialBody::Venus));

        let mut cleared = 0;
        for s in 6..20 {
            if slot.expire(t0 + Duration::from_secs(s)).is_some() {
                cleared += 1;
            }
        }
        assert_eq!(cleared, 1);
        assert_eq!(slot.current(), None);
    }

    #[test]
    fn unrepresentable_dwell_falls_back_to_default() {
        assert_eq!(FocusSlot::from_secs(f32::INFINITY).dwell(), DEFAULT_DWELL);
        assert_eq!(FocusSlot::from_secs(f32::MAX).dwell(), DEFAULT_DWELL);
        assert_eq!(FocusSlot::from_secs(-2.0).dwell(), Duration::ZERO);
        assert_eq!(FocusSlot::from_secs(1.5).dwell(), Duration::from_millis(1500));
    }

    #[test]
    fn clear_voids_deadline() {
        let t0 = Instant::now();
        let mut slot = FocusSlot::from_secs(5.0);
        slot.set(CelestialBody::Earth, t0);
        slot.clear();
        assert_eq!(slot.current(), None);
        assert_eq!(slot.expire(t0 + DWELL), None);
    }
}
