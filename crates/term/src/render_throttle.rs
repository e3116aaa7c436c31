use crate::core::Snapshot;

/// Skips redundant redraws.
///
/// While the game is running every frame is drawn. While it is static (paused,
/// over, or not started) a frame is drawn only when the snapshot fingerprint
/// changes, or as a keep-alive after `min_static_interval_ms`.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: Option<u64>,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: None,
        }
    }

    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let changed = self.last_fingerprint != Some(fingerprint);
        let due = now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;

        if !is_static || changed || due {
            self.last_render_ms = now_ms;
            self.last_fingerprint = Some(fingerprint);
            return true;
        }
        false
    }

    pub fn should_render_snapshot(&mut self, now_ms: u64, snap: &Snapshot) -> bool {
        self.should_render(now_ms, snap.fingerprint(), !snap.playable())
    }

    /// Draw the next frame no matter what, e.g. after a resize.
    pub fn reset(&mut self) {
        self.last_fingerprint = None;
    }
}
