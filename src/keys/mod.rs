//! Translation tables between toolkit and native key representations
//!
//! Pure, static mappings: toolkit modifier bits to native modifier bits and
//! toolkit keycodes to native keysyms. No state, no locking.

mod keysyms;
mod masks;

pub use keysyms::{to_native_keysym, toolkit_key, NO_SYMBOL};
pub use masks::{native_mask, to_native_mask, toolkit_mask};
