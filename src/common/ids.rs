// src/common/ids.rs

use chrono::Utc;
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

// IDs derivados do relógio em milissegundos, como `Date.now()`.
// Dois pedidos no mesmo milissegundo recebem valores consecutivos.
#[derive(Clone, Default)]
pub struct IdGenerator {
    last: Arc<AtomicI64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next timestamp-derived id; strictly increasing within this process.
    pub fn next_millis(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(current + 1);
            match self
                .last
                .compare_exchange_weak(current, candidate, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => current = actual,
            }
        }
    }

    pub fn next_id(&self) -> String {
        self.next_millis().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_never_repeat() {
        let ids = IdGenerator::new();
        let mut previous = ids.next_millis();
        for _ in 0..1_000 {
            let next = ids.next_millis();
            assert!(next > previous);
            previous = next;
        }
    }
}
