use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{ConnectionId, RoomCode};

/// Монотонный генератор id соединений (для транспорта и dev CLI).
#[derive(Debug)]
pub struct ConnectionIds {
    counter: AtomicU64,
}

impl ConnectionIds {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_id(&self) -> ConnectionId {
        self.counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for ConnectionIds {
    fn default() -> Self {
        Self::new()
    }
}

/// Источник кодов комнат. `is_taken` - занят ли код уже.
pub trait RoomCodeSource: Send {
    fn next_code(&mut self, is_taken: &dyn Fn(&str) -> bool) -> RoomCode;
}

/// Случайные 4-значные коды 1000..=9999.
#[derive(Debug)]
pub struct RandomRoomCodes {
    rng: StdRng,
}

impl RandomRoomCodes {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomRoomCodes {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomCodeSource for RandomRoomCodes {
    fn next_code(&mut self, is_taken: &dyn Fn(&str) -> bool) -> RoomCode {
        // 9000 кодов; при живых комнатах в пределах сотни повтор маловероятен.
        loop {
            let code = self.rng.gen_range(1000..=9999u32).to_string();
            if !is_taken(&code) {
                return code;
            }
        }
    }
}

/// Коды по порядку: 1000, 1001, ... Удобно в тестах.
#[derive(Debug, Default)]
pub struct SequentialRoomCodes {
    next: u32,
}

impl RoomCodeSource for SequentialRoomCodes {
    fn next_code(&mut self, is_taken: &dyn Fn(&str) -> bool) -> RoomCode {
        loop {
            let code = (1000 + self.next % 9000).to_string();
            self.next += 1;
            if !is_taken(&code) {
                return code;
            }
        }
    }
}
