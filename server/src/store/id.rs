//! Task id allocation: 4 bytes of seconds, 5 random bytes, a 3-byte counter.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use todos_shared::{TASK_ID_LEN, TaskId};

const COUNTER_MASK: u32 = 0x00ff_ffff;

/// Hands out object-id style task ids.
///
/// Layout: 4 bytes of big-endian Unix seconds, 5 random bytes fixed for the
/// generator, then a 3-byte big-endian counter that starts at a random value.
#[derive(Debug)]
pub struct IdGenerator {
    process: [u8; 5],
    counter: AtomicU32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            process: rand::random(),
            counter: AtomicU32::new(rand::random::<u32>() & COUNTER_MASK),
        }
    }

    pub fn next_id(&self) -> TaskId {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or_default();
        let count = self.counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut bytes = [0u8; TASK_ID_LEN];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&self.process);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        TaskId::from_bytes(bytes)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
