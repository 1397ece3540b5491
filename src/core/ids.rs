//! Identifier sources for ephemeral instances (enemies, loot, bought items).

/// Produces unique ids. Injected so combat and loot stay reproducible in tests.
pub trait IdSource {
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Monotonic counter: `enemy-1`, `item-2`, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    counter: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering after `counter` (e.g. when resuming a saved run).
    pub fn starting_at(counter: u64) -> Self {
        Self { counter }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{}-{}", prefix, self.counter)
    }
}

/// Random v4 UUIDs, for live services.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self, prefix: &str) -> String {
        format!("{}-{}", prefix, uuid::Uuid::new_v4())
    }
}
