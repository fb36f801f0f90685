use glam::Vec2;

/// Tracks the cursor and whether the primary button is held.
#[derive(Debug, Default, Clone)]
pub(crate) struct PointerState {
    /// Last known cursor position, `None` until the first move.
    pub position: Option<Vec2>,
    /// Whether the primary button is held.
    pub pressed: bool,
}

impl PointerState {
    /// Record a new cursor position and return the delta from the last one.
    pub fn move_to(&mut self, position: Vec2) -> Vec2 {
        let delta = self.position.map_or(Vec2::ZERO, |last| position - last);
        self.position = Some(position);
        delta
    }

    /// Primary button went down at the current position.
    pub fn press(&mut self) {
        self.pressed = true;
    }

    /// Primary button released or the cursor left the surface.
    pub fn release(&mut self) {
        self.pressed = false;
    }
}
