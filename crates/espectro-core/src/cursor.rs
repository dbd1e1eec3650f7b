//! Cross-thread playback cursor.

use std::sync::Mutex;

/// Playback position shared between an audio-output thread (writer) and a
/// display thread (reader).
///
/// Access is guarded by a lock with latest-write-wins semantics; there is
/// no queue of intermediate positions.
#[derive(Debug, Default)]
pub struct PlayCursor {
    position: Mutex<u64>,
}

impl PlayCursor {
    /// Creates a cursor at position 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes the current playback position in samples.
    pub fn set(&self, position: u64) {
        *self.position.lock().expect("cursor lock") = position;
    }

    /// Reads the most recently published position.
    pub fn get(&self) -> u64 {
        *self.position.lock().expect("cursor lock")
    }
}
