/// Per-question progress marker behind one sidebar dot.
///
/// Rendering state only; nothing here feeds the score. `current` is true
/// for exactly one index, `viewed` is sticky for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerDot {
    pub index: usize,
    pub current: bool,
    pub answered: bool,
    pub viewed: bool,
}
