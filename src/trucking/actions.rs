//! Semantic action IDs for Semi Trucker click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.
//! Per-business actions add the business tier index to their base.

// ── Fleet actions (base + business index 0..6) ──────────────────
pub const RUN_BASE: u16 = 100;
pub const BUY_BASE: u16 = 200;
pub const AUTO_BASE: u16 = 300;

// ── Keyboard bindings, indexed by business tier ─────────────────
pub const RUN_KEYS: [char; 7] = ['1', '2', '3', '4', '5', '6', '7'];
pub const BUY_KEYS: [char; 7] = ['q', 'w', 'e', 'r', 't', 'y', 'u'];
pub const AUTO_KEYS: [char; 7] = ['a', 's', 'd', 'f', 'g', 'h', 'j'];
