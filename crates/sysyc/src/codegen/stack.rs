//! Stack Allocator (§4.4): computes a function's frame size up front by
//! counting distinct `@name`/`%k` tokens in its IR text, then hands out
//! 4-byte slots for them, in first-use order, during emission.

/// `scanStackSize`: every whitespace-separated token beginning with `@` or
/// `%` (after stripping a trailing comma) names one distinct stack slot.
/// `4 * count`, rounded up to 16.
pub fn scan_stack_size(ir_text: &str) -> u32 {
    use std::collections::HashSet;

    let mut identifiers: HashSet<&str> = HashSet::new();
    for word in ir_text.split_whitespace() {
        let word = word.trim_end_matches(',');
        if word.starts_with('@') || (word.starts_with('%') && !word.starts_with("%L")) {
            identifiers.insert(word);
        }
    }
    round_up_16((identifiers.len() as u32) * 4)
}

fn round_up_16(n: u32) -> u32 {
    (n + 15) & !15
}

/// `getStackPos`: a per-function `value -> offset` map. The key is
/// whatever text token identifies the value (`@x_0`, `%3`, ...) — the same
/// token [`scan_stack_size`] counted — so the two stay in sync without
/// sharing any other state. Offsets are assigned 0, 4, 8, ... in the order
/// keys are first seen.
#[derive(Default)]
pub struct StackFrame {
    offsets: std::collections::HashMap<String, u32>,
    next: u32,
}

impl StackFrame {
    pub fn new() -> Self {
        StackFrame::default()
    }

    pub fn slot_for(&mut self, key: &str) -> u32 {
        if let Some(&off) = self.offsets.get(key) {
            return off;
        }
        let off = self.next;
        self.next += 4;
        self.offsets.insert(key.to_string(), off);
        off
    }
}
