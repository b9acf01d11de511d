//! Modifier mask translation
//!
//! Maps toolkit modifier flags onto the native modifier bits, one bit at a
//! time. Unrecognized toolkit bits are dropped, never an error.

/// Native modifier bits as the window system reports them.
pub mod native_mask {
    pub const SHIFT: u32 = 1 << 0;
    pub const LOCK: u32 = 1 << 1;
    pub const CONTROL: u32 = 1 << 2;
    pub const MOD1: u32 = 1 << 3;
    pub const MOD2: u32 = 1 << 4;
    pub const MOD3: u32 = 1 << 5;
    pub const MOD4: u32 = 1 << 6;
    pub const MOD5: u32 = 1 << 7;
}

/// Toolkit modifier flags accepted by [`to_native_mask`].
pub mod toolkit_mask {
    pub const SHIFT: u32 = 1 << 0;
    pub const CONTROL: u32 = 1 << 1;
    pub const META: u32 = 1 << 2;
    pub const ALT: u32 = 1 << 3;
    pub const ALT_GRAPH: u32 = 1 << 5;
}

/// Convert a toolkit modifier mask into a native modifier mask.
///
/// Shift and control keep their meaning; alt maps to Mod1, meta to Mod2 and
/// alt-graph to Mod5. The lock bit is never produced here: lock-style
/// modifiers (caps, num, scroll) are filtered out by the native backend so
/// they do not change which hotkeys match.
pub fn to_native_mask(toolkit: u32) -> u32 {
    let mut native = 0;
    if toolkit & toolkit_mask::SHIFT != 0 {
        native |= native_mask::SHIFT;
    }
    if toolkit & toolkit_mask::CONTROL != 0 {
        native |= native_mask::CONTROL;
    }
    if toolkit & toolkit_mask::ALT != 0 {
        native |= native_mask::MOD1;
    }
    if toolkit & toolkit_mask::META != 0 {
        native |= native_mask::MOD2;
    }
    if toolkit & toolkit_mask::ALT_GRAPH != 0 {
        native |= native_mask::MOD5;
    }
    native
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bits() {
        assert_eq!(to_native_mask(toolkit_mask::SHIFT), native_mask::SHIFT);
        assert_eq!(to_native_mask(toolkit_mask::CONTROL), native_mask::CONTROL);
        assert_eq!(to_native_mask(toolkit_mask::ALT), native_mask::MOD1);
        assert_eq!(to_native_mask(toolkit_mask::META), native_mask::MOD2);
        assert_eq!(to_native_mask(toolkit_mask::ALT_GRAPH), native_mask::MOD5);
    }

    #[test]
    fn test_bits_combine_independently() {
        let toolkit = toolkit_mask::CONTROL | toolkit_mask::ALT;
        assert_eq!(
            to_native_mask(toolkit),
            native_mask::CONTROL | native_mask::MOD1
        );

        let all = toolkit_mask::SHIFT
            | toolkit_mask::CONTROL
            | toolkit_mask::META
            | toolkit_mask::ALT
            | toolkit_mask::ALT_GRAPH;
        assert_eq!(
            to_native_mask(all),
            native_mask::SHIFT
                | native_mask::CONTROL
                | native_mask::MOD2
                | native_mask::MOD1
                | native_mask::MOD5
        );
    }

    #[test]
    fn test_unrecognized_bits_dropped() {
        assert_eq!(to_native_mask(1 << 12), 0);
        assert_eq!(
            to_native_mask(toolkit_mask::SHIFT | 1 << 30),
            native_mask::SHIFT
        );
    }

    #[test]
    fn test_empty_mask() {
        assert_eq!(to_native_mask(0), 0);
    }

    #[test]
    fn test_repeatable() {
        for mask in 0..64u32 {
            assert_eq!(to_native_mask(mask), to_native_mask(mask));
        }
    }
}
