//! Single clock domain.
//!
//! The clock is a level that the testbench toggles. Only the low-to-high transition commits
//! state; the falling edge changes nothing but the level.

/// Direction of a clock transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Low to high: state is committed.
    Rising,
    /// High to low: no state change.
    Falling,
}

/// Clock level and edge counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClockDomain {
    clk: bool,
    rising_edges: u64,
    toggles: u64,
}

impl ClockDomain {
    /// Creates a clock that starts low with no edges seen.
    pub const fn new() -> Self {
        Self {
            clk: false,
            rising_edges: 0,
            toggles: 0,
        }
    }

    /// Inverts the clock level and reports the edge produced.
    pub fn toggle(&mut self) -> Edge {
        self.clk = !self.clk;
        self.toggles += 1;
        if self.clk {
            self.rising_edges += 1;
            Edge::Rising
        } else {
            Edge::Falling
        }
    }

    /// Current level of `clk`.
    pub const fn level(&self) -> bool {
        self.clk
    }

    /// Rising edges since construction.
    pub const fn rising_edges(&self) -> u64 {
        self.rising_edges
    }

    /// Half-cycles since construction.
    pub const fn toggles(&self) -> u64 {
        self.toggles
    }
}
