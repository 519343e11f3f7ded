use std::collections::HashSet;

/// Browser-style key code, matching what the key-event collaborator emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const LEFT: KeyCode = KeyCode(37);
    pub const UP: KeyCode = KeyCode(38);
    pub const RIGHT: KeyCode = KeyCode(39);
    pub const DOWN: KeyCode = KeyCode(40);
    pub const A: KeyCode = KeyCode(65);
    pub const D: KeyCode = KeyCode(68);
    pub const S: KeyCode = KeyCode(83);
    pub const W: KeyCode = KeyCode(87);
}

/// Which keys steer a vessel. Remote vessels carry no binding.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlBinding {
    pub up: Option<KeyCode>,
    pub right: Option<KeyCode>,
    pub down: Option<KeyCode>,
    pub left: Option<KeyCode>,
}

impl ControlBinding {
    pub fn wasd() -> Self {
        Self {
            up: Some(KeyCode::W),
            right: Some(KeyCode::D),
            down: Some(KeyCode::S),
            left: Some(KeyCode::A),
        }
    }
}

/// Snapshot of the keys currently held.
///
/// Updated asynchronously by the external key-event collaborator (published
/// over a watch channel); the simulation only ever reads it.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    held: HashSet<KeyCode>,
}

impl InputSnapshot {
    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    /// An unbound control is never down.
    pub fn is_down(&self, key: Option<KeyCode>) -> bool {
        key.is_some_and(|k| self.held.contains(&k))
    }
}
