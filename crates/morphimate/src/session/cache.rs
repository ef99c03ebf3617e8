/// Which cached derivatives a `morph` call has to rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Recompute {
    /// The endpoints must be re-warped onto new way-points.
    pub geometry: bool,
    /// The endpoints must be re-tweened between their last two warps.
    pub temporal: bool,
}

/// Tracks the last applied morph and tween positions of a session.
///
/// Both positions start unset, so the first update always asks for a full recompute. A new
/// geometry always invalidates the temporal position, since the pair of warps it tweens between
/// has changed.
///
/// # Example
///
/// ```
/// use morphimate::session::CacheState;
///
/// let mut cache = CacheState::default();
/// assert!(cache.update(0.5, 0.0).geometry);
///
/// cache.commit_geometry(0.5);
/// cache.commit_temporal(0.0);
///
/// let plan = cache.update(0.5, 0.0);
/// assert!(!plan.geometry && !plan.temporal);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CacheState {
    morph_pos: Option<f32>,
    tween_pos: Option<f32>,
    geometry_dirty: bool,
    temporal_dirty: bool,
}

impl Default for CacheState {
    fn default() -> Self {
        Self {
            morph_pos: None,
            tween_pos: None,
            geometry_dirty: true,
            temporal_dirty: true,
        }
    }
}

impl CacheState {
    /// Plan the work for a call at `(morph, tween)` without changing the state.
    pub fn update(&self, morph: f32, tween: f32) -> Recompute {
        let geometry = self.geometry_dirty || self.morph_pos != Some(morph);
        let temporal = geometry || self.temporal_dirty || self.tween_pos != Some(tween);
        Recompute { geometry, temporal }
    }

    /// Record that both endpoints are warped at `morph`.
    pub fn commit_geometry(&mut self, morph: f32) {
        self.morph_pos = Some(morph);
        self.geometry_dirty = false;
        self.tween_pos = None;
        self.temporal_dirty = true;
    }

    /// Record that both endpoints are tweened at `tween`.
    pub fn commit_temporal(&mut self, tween: f32) {
        self.tween_pos = Some(tween);
        self.temporal_dirty = false;
    }

    /// Force the next update to re-warp, whatever the morph position.
    pub fn invalidate_geometry(&mut self) {
        self.geometry_dirty = true;
        self.temporal_dirty = true;
    }

    /// The last committed morph position.
    pub fn morph_position(&self) -> Option<f32> {
        self.morph_pos
    }

    /// The last committed tween position.
    pub fn tween_position(&self) -> Option<f32> {
        self.tween_pos
    }
}

#[cfg(test)]
mod tests {
    use super::{CacheState, Recompute};

    const ALL: Recompute = Recompute {
        geometry: true,
        temporal: true,
    };
    const NONE: Recompute = Recompute {
        geometry: false,
        temporal: false,
    };

    #[test]
    fn fresh_state_recomputes_everything() {
        let cache = CacheState::default();
        assert_eq!(cache.update(0.0, 0.0), ALL);
        assert_eq!(cache.morph_position(), None);
        assert_eq!(cache.tween_position(), None);
    }

    #[test]
    fn unchanged_positions_are_cached() {
        let mut cache = CacheState::default();
        cache.commit_geometry(0.25);
        cache.commit_temporal(0.5);
        assert_eq!(cache.update(0.25, 0.5), NONE);
        assert_eq!(
            cache.update(0.25, 0.75),
            Recompute {
                geometry: false,
                temporal: true
            }
        );
        assert_eq!(cache.update(0.3, 0.5), ALL);
    }

    #[test]
    fn geometry_resets_tween_position() {
        let mut cache = CacheState::default();
        cache.commit_geometry(0.1);
        cache.commit_temporal(1.0);
        cache.commit_geometry(0.2);
        assert_eq!(cache.tween_position(), None);
        assert_eq!(
            cache.update(0.2, 1.0),
            Recompute {
                geometry: false,
                temporal: true
            }
        );
    }

    #[test]
    fn invalidate_forces_rewarp_at_same_position() {
        let mut cache = CacheState::default();
        cache.commit_geometry(0.5);
        cache.commit_temporal(0.0);
        cache.invalidate_geometry();
        assert_eq!(cache.update(0.5, 0.0), ALL);
        assert_eq!(cache.morph_position(), Some(0.5));
    }

    #[test]
    fn update_does_not_commit() {
        let cache = CacheState::default();
        let _ = cache.update(0.4, 0.4);
        assert_eq!(cache, CacheState::default());
    }
}
