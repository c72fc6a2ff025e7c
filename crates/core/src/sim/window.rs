//! PC-range profiling window.
//!
//! The window watches the PC of every executed instruction and reports when
//! the profiling gate should flip. It supports both activation conventions
//! used by the testbenches:
//! 1. **PC range:** Open at `pc_start`, close at `pc_stop`, optionally re-arming for later passes.
//! 2. **On boot:** Open from the first cycle, close at `pc_stop`.

use crate::config::ProfilingConfig;

/// Gate transition policy driven by the program counter.
#[derive(Clone, Debug)]
pub struct ProfilingWindow {
    start: u32,
    stop: u32,
    single_match: bool,
    armed: bool,
    active: bool,
    opened: u32,
}

impl ProfilingWindow {
    /// Builds the window; it starts active when `on_boot` is set.
    pub const fn new(cfg: &ProfilingConfig) -> Self {
        Self {
            start: cfg.pc_start,
            stop: cfg.pc_stop,
            single_match: cfg.single_match,
            armed: true,
            active: cfg.on_boot,
            opened: if cfg.on_boot { 1 } else { 0 },
        }
    }

    /// Returns whether profiling should currently be on.
    #[inline]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Number of times the window has opened.
    pub const fn windows_opened(&self) -> u32 {
        self.opened
    }

    /// Opens or closes the window regardless of the PC.
    ///
    /// A forced open still closes at `pc_stop`; a forced close waits for the
    /// next `pc_start`. A disarmed single-match window stays disarmed.
    pub const fn force(&mut self, active: bool) {
        self.active = active;
    }

    /// Feeds the PC of the next instruction.
    ///
    /// Returns `Some(true)` when the window opens, `Some(false)` when it
    /// closes and `None` otherwise. A single-match window ignores every PC
    /// after its first close.
    pub fn observe(&mut self, pc: u32) -> Option<bool> {
        if !self.armed {
            return None;
        }
        if !self.active && pc == self.start {
            self.active = true;
            self.opened += 1;
            tracing::debug!("profiling window opened at {pc:#x}");
            return Some(true);
        }
        if self.active && pc == self.stop {
            self.active = false;
            if self.single_match {
                self.armed = false;
            }
            tracing::debug!("profiling window closed at {pc:#x}");
            return Some(false);
        }
        None
    }
}
