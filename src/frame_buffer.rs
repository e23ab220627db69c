use crate::*;
use std::collections::VecDeque;

pub static DEFAULT_GAME_FRAME_BUFFER_SIZE: usize = 5;

/// Bounded history of the most recently dispatched frames. Once `capacity`
/// frames are held, adding another evicts the oldest.
#[derive(Debug, Clone)]
pub struct GameFrameBuffer {
    frames: VecDeque<GameFrame>,
    capacity: usize,
}

impl GameFrameBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn add_game_frame(&mut self, frame: GameFrame) {
        self.frames.push_back(frame);
        while self.frames.len() > self.capacity {
            self.frames.pop_front();
        }
    }

    /// Frames in insertion order, oldest first.
    pub fn frames(&self) -> impl Iterator<Item = &GameFrame> {
        self.frames.iter()
    }

    pub fn snapshot(&self) -> Vec<GameFrame> {
        self.frames.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&GameFrame> {
        self.frames.back()
    }

    /// The frame `steps_back` positions before the latest one; `previous(0)`
    /// is the latest frame.
    pub fn previous(&self, steps_back: usize) -> Option<&GameFrame> {
        self.frames
            .len()
            .checked_sub(steps_back + 1)
            .and_then(|index| self.frames.get(index))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for GameFrameBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_GAME_FRAME_BUFFER_SIZE)
    }
}
