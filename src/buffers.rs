/// Code points of the unit being composed. Unbounded: a run of `w` keys
/// keeps appending viramas to one unit.
pub type CodePoints = Vec<char>;

#[inline(always)]
pub fn new_code_points() -> CodePoints {
    Vec::with_capacity(8)
}

/// UTF-8 encode code points in order.
pub fn encode(chars: &[char]) -> String {
    chars.iter().collect()
}
