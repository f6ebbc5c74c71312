//! # Numerical tolerances
//!
//! Every comparison of a computed value against zero goes through one of these. They determine when
//! the method terminates, so they are kept together.

/// A reduced cost with an absolute value below this is zero.
pub const OPTIMALITY: f64 = 1e-9;
/// A basic variable within this distance of its bounds is feasible.
pub const FEASIBILITY: f64 = 1e-9;
/// Direction elements with an absolute value below this are ignored in ratio tests.
pub const PIVOT: f64 = 1e-9;
/// Relative size of a pivot element below which a basis update is rejected as singular.
pub const SINGULAR: f64 = 1e-11;
/// Step lengths within this distance of the minimum ratio are ties.
pub const RATIO: f64 = 1e-12;
/// A phase one objective below this means the problem is feasible.
pub const PHASE_ONE: f64 = 1e-8;
/// Entries of elementary matrices with an absolute value below this are dropped.
pub const DROP: f64 = 1e-14;

/// Collection of all tolerances used by a solver instance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tolerances {
    /// See [`OPTIMALITY`].
    pub optimality: f64,
    /// See [`FEASIBILITY`].
    pub feasibility: f64,
    /// See [`PIVOT`].
    pub pivot: f64,
    /// See [`SINGULAR`].
    pub singular: f64,
    /// See [`RATIO`].
    pub ratio: f64,
    /// See [`PHASE_ONE`].
    pub phase_one: f64,
    /// See [`DROP`].
    pub drop: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            optimality: OPTIMALITY,
            feasibility: FEASIBILITY,
            pivot: PIVOT,
            singular: SINGULAR,
            ratio: RATIO,
            phase_one: PHASE_ONE,
            drop: DROP,
        }
    }
}
