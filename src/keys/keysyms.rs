//! Keycode to keysym translation
//!
//! Best-effort lookup from toolkit virtual-key codes to native keysyms.
//! Keys with no native equivalent resolve to [`NO_SYMBOL`], never to an
//! arbitrary wrong key, since a wrong mapping would grab the wrong physical
//! key system-wide.

/// Sentinel for "no native keysym". Callers must check for it before
/// registering; register calls reject it.
pub const NO_SYMBOL: u32 = 0;

/// Toolkit virtual-key codes accepted by [`to_native_keysym`].
pub mod toolkit_key {
    pub const BACK_SPACE: u32 = 0x08;
    pub const TAB: u32 = 0x09;
    pub const ENTER: u32 = 0x0a;
    pub const PAUSE: u32 = 0x13;
    pub const CAPS_LOCK: u32 = 0x14;
    pub const ESCAPE: u32 = 0x1b;
    pub const SPACE: u32 = 0x20;
    pub const PAGE_UP: u32 = 0x21;
    pub const PAGE_DOWN: u32 = 0x22;
    pub const END: u32 = 0x23;
    pub const HOME: u32 = 0x24;
    pub const LEFT: u32 = 0x25;
    pub const UP: u32 = 0x26;
    pub const RIGHT: u32 = 0x27;
    pub const DOWN: u32 = 0x28;
    pub const COMMA: u32 = 0x2c;
    pub const MINUS: u32 = 0x2d;
    pub const PERIOD: u32 = 0x2e;
    pub const SLASH: u32 = 0x2f;

    pub const DIGIT_0: u32 = 0x30;
    pub const DIGIT_1: u32 = 0x31;
    pub const DIGIT_2: u32 = 0x32;
    pub const DIGIT_3: u32 = 0x33;
    pub const DIGIT_4: u32 = 0x34;
    pub const DIGIT_5: u32 = 0x35;
    pub const DIGIT_6: u32 = 0x36;
    pub const DIGIT_7: u32 = 0x37;
    pub const DIGIT_8: u32 = 0x38;
    pub const DIGIT_9: u32 = 0x39;

    pub const SEMICOLON: u32 = 0x3b;
    pub const EQUALS: u32 = 0x3d;

    pub const A: u32 = 0x41;
    pub const B: u32 = 0x42;
    pub const C: u32 = 0x43;
    pub const D: u32 = 0x44;
    pub const E: u32 = 0x45;
    pub const F: u32 = 0x46;
    pub const G: u32 = 0x47;
    pub const H: u32 = 0x48;
    pub const I: u32 = 0x49;
    pub const J: u32 = 0x4a;
    pub const K: u32 = 0x4b;
    pub const L: u32 = 0x4c;
    pub const M: u32 = 0x4d;
    pub const N: u32 = 0x4e;
    pub const O: u32 = 0x4f;
    pub const P: u32 = 0x50;
    pub const Q: u32 = 0x51;
    pub const R: u32 = 0x52;
    pub const S: u32 = 0x53;
    pub const T: u32 = 0x54;
    pub const U: u32 = 0x55;
    pub const V: u32 = 0x56;
    pub const W: u32 = 0x57;
    pub const X: u32 = 0x58;
    pub const Y: u32 = 0x59;
    pub const Z: u32 = 0x5a;

    pub const OPEN_BRACKET: u32 = 0x5b;
    pub const BACK_SLASH: u32 = 0x5c;
    pub const CLOSE_BRACKET: u32 = 0x5d;

    pub const NUMPAD_0: u32 = 0x60;
    pub const NUMPAD_1: u32 = 0x61;
    pub const NUMPAD_2: u32 = 0x62;
    pub const NUMPAD_3: u32 = 0x63;
    pub const NUMPAD_4: u32 = 0x64;
    pub const NUMPAD_5: u32 = 0x65;
    pub const NUMPAD_6: u32 = 0x66;
    pub const NUMPAD_7: u32 = 0x67;
    pub const NUMPAD_8: u32 = 0x68;
    pub const NUMPAD_9: u32 = 0x69;
    pub const MULTIPLY: u32 = 0x6a;
    pub const ADD: u32 = 0x6b;
    pub const SEPARATOR: u32 = 0x6c;
    pub const SUBTRACT: u32 = 0x6d;
    pub const DECIMAL: u32 = 0x6e;
    pub const DIVIDE: u32 = 0x6f;

    pub const F1: u32 = 0x70;
    pub const F2: u32 = 0x71;
    pub const F3: u32 = 0x72;
    pub const F4: u32 = 0x73;
    pub const F5: u32 = 0x74;
    pub const F6: u32 = 0x75;
    pub const F7: u32 = 0x76;
    pub const F8: u32 = 0x77;
    pub const F9: u32 = 0x78;
    pub const F10: u32 = 0x79;
    pub const F11: u32 = 0x7a;
    pub const F12: u32 = 0x7b;

    pub const DELETE: u32 = 0x7f;
    pub const NUM_LOCK: u32 = 0x90;
    pub const SCROLL_LOCK: u32 = 0x91;
    pub const PRINT_SCREEN: u32 = 0x9a;
    pub const INSERT: u32 = 0x9b;
    pub const BACK_QUOTE: u32 = 0xc0;
    pub const QUOTE: u32 = 0xde;
}

/// Look up the native keysym for a toolkit keycode.
///
/// Pure lookup. Unmapped or out-of-range input returns [`NO_SYMBOL`].
/// Letter keys map to the lowercase latin keysyms, which is what the
/// window system resolves to the unshifted keycode.
pub fn to_native_keysym(keycode: u32) -> u32 {
    use toolkit_key as key;

    match keycode {
        key::BACK_SPACE => 0xff08,
        key::TAB => 0xff09,
        key::ENTER => 0xff0d,
        key::PAUSE => 0xff13,
        key::CAPS_LOCK => 0xffe5,
        key::ESCAPE => 0xff1b,
        key::SPACE => 0x0020,
        key::PAGE_UP => 0xff55,
        key::PAGE_DOWN => 0xff56,
        key::END => 0xff57,
        key::HOME => 0xff50,
        key::LEFT => 0xff51,
        key::UP => 0xff52,
        key::RIGHT => 0xff53,
        key::DOWN => 0xff54,
        key::COMMA => 0x002c,
        key::MINUS => 0x002d,
        key::PERIOD => 0x002e,
        key::SLASH => 0x002f,

        // Digit row: toolkit codes coincide with the native keysyms.
        key::DIGIT_0..=key::DIGIT_9 => keycode,

        key::SEMICOLON => 0x003b,
        key::EQUALS => 0x003d,

        // Letters map to the lowercase latin keysyms (0x61..0x7a).
        key::A..=key::Z => keycode + 0x20,

        key::OPEN_BRACKET => 0x005b,
        key::BACK_SLASH => 0x005c,
        key::CLOSE_BRACKET => 0x005d,

        key::NUMPAD_0 => 0xffb0,
        key::NUMPAD_1 => 0xffb1,
        key::NUMPAD_2 => 0xffb2,
        key::NUMPAD_3 => 0xffb3,
        key::NUMPAD_4 => 0xffb4,
        key::NUMPAD_5 => 0xffb5,
        key::NUMPAD_6 => 0xffb6,
        key::NUMPAD_7 => 0xffb7,
        key::NUMPAD_8 => 0xffb8,
        key::NUMPAD_9 => 0xffb9,
        key::MULTIPLY => 0xffaa,
        key::ADD => 0xffab,
        key::SEPARATOR => 0xffac,
        key::SUBTRACT => 0xffad,
        key::DECIMAL => 0xffae,
        key::DIVIDE => 0xffaf,

        key::F1 => 0xffbe,
        key::F2 => 0xffbf,
        key::F3 => 0xffc0,
        key::F4 => 0xffc1,
        key::F5 => 0xffc2,
        key::F6 => 0xffc3,
        key::F7 => 0xffc4,
        key::F8 => 0xffc5,
        key::F9 => 0xffc6,
        key::F10 => 0xffc7,
        key::F11 => 0xffc8,
        key::F12 => 0xffc9,

        key::DELETE => 0xffff,
        key::NUM_LOCK => 0xff7f,
        key::SCROLL_LOCK => 0xff14,
        key::PRINT_SCREEN => 0xff61,
        key::INSERT => 0xff63,
        key::BACK_QUOTE => 0x0060,
        key::QUOTE => 0x0027,

        _ => NO_SYMBOL,
    }
}
