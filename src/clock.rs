//! Clock acquisition and system-clock resolution.
//!
//! [`resolve_clock`] walks a fixed priority of clock sources for one side of
//! a dai-link and records the outcome in a [`SimpleDai`]. Acquisition goes
//! through the [`ClockProvider`] capability, so the same resolution runs
//! against platform clock trees and against [`crate::mem::MemClocks`] alike.

use thiserror::Error;
use tracing::debug;

use crate::tree::TreeSource;

/// Property holding an explicit rate when no clock resource is wired up.
const SYSTEM_CLOCK_FREQUENCY: &str = "system-clock-frequency";

/// Errors reported by a [`ClockProvider`].
///
/// Never surfaced past [`resolve_clock`]: every acquisition failure is a
/// soft fallback to the next source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// No clock is wired at the requested index.
    #[error("no clock at index {index}")]
    NotFound {
        /// Index that was probed.
        index: u32,
    },

    /// The provider failed to acquire the clock.
    #[error("clock unavailable: {message}")]
    Unavailable {
        /// Provider diagnostic.
        message: String,
    },
}

/// An acquired clock resource.
pub trait Clock {
    /// Current rate in Hz.
    fn rate(&self) -> u32;
}

/// Capability for acquiring clock resources wired to tree nodes.
///
/// `N` is the node handle type of the tree provider in use.
pub trait ClockProvider<N> {
    /// Handle type for acquired clocks. Dropping a handle releases the
    /// underlying resource.
    type Clock: Clock;

    /// Acquire the clock wired to `node` at `index`.
    fn clock(&self, node: &N, index: u32) -> Result<Self::Clock, ClockError>;
}

/// Per-side clock state populated by [`resolve_clock`].
///
/// When a handle is recorded, ownership rests with the caller: the handle is
/// released by dropping the `SimpleDai` (or taking the handle out) when the
/// link is torn down, exactly once.
#[derive(Debug)]
pub struct SimpleDai<K> {
    /// System clock rate in Hz; 0 when no source answered.
    pub sysclk: u32,
    /// Retained clock handle, present only when the rate came from a clock
    /// resource on the primary node.
    pub clk: Option<K>,
}

impl<K> Default for SimpleDai<K> {
    fn default() -> Self {
        Self { sysclk: 0, clk: None }
    }
}

/// Populate `dai` from the first clock source that answers.
///
/// Priority order:
///
/// 1. a clock resource wired to `node`: the handle is retained in `dai.clk`
///    and `sysclk` takes its rate;
/// 2. an explicit `system-clock-frequency` property on `node`: rate only;
/// 3. a clock resource wired to `fallback`: rate only, the handle is
///    dropped immediately.
///
/// No source answering is a valid outcome, the device then runs from an
/// internal clock: `sysclk` keeps its prior value and no handle is recorded.
/// A malformed frequency property is skipped like an absent one.
pub fn resolve_clock<T, C>(
    tree: &T,
    clocks: &C,
    node: &T::Node,
    fallback: &T::Node,
    dai: &mut SimpleDai<C::Clock>,
) where
    T: TreeSource,
    C: ClockProvider<T::Node>,
{
    match clocks.clock(node, 0) {
        Ok(clk) => {
            dai.sysclk = clk.rate();
            dai.clk = Some(clk);
            return;
        }
        Err(err) => debug!(?node, %err, "no clock resource on primary node"),
    }

    match tree.read_u32(node, SYSTEM_CLOCK_FREQUENCY) {
        Ok(Some(rate)) => {
            dai.sysclk = rate;
            return;
        }
        Ok(None) => {}
        Err(err) => debug!(?node, %err, "skipping malformed clock frequency property"),
    }

    if let Ok(clk) = clocks.clock(fallback, 0) {
        dai.sysclk = clk.rate();
    }
}
