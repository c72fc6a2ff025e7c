//! Trace entry correlating RTL and model execution.
//!
//! The RTL reports one [`TraceEntry`] per retired instruction. The record is
//! pooled by the session: it is reset and repopulated for every sample rather
//! than allocated per cycle, and the execution model compares it against its
//! own state to locate divergence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::HitMiss;

/// Instruction size reported when the RTL does not support compressed instructions.
pub const DEFAULT_INST_SIZE: u8 = 4;

/// Instruction channel transaction flags between the core and memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImemChannel {
    /// Core issued a fetch request.
    pub core: bool,
    /// Memory returned fetch data.
    pub mem: bool,
}

/// Data channel transaction flags between the core and memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DmemChannel {
    /// Core issued a read request.
    pub core_r: bool,
    /// Core issued a write request.
    pub core_w: bool,
    /// Memory serviced a read.
    pub mem_r: bool,
    /// Memory serviced a write.
    pub mem_w: bool,
}

/// One RTL-side execution sample.
///
/// `reset` must be called before the record is reused for a sample that does
/// not continue the previous one; [`CosimSession::add_trace_entry`](crate::sim::CosimSession::add_trace_entry)
/// does this automatically.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Program counter of the retired instruction.
    pub pc: u32,
    /// Instruction encoding.
    pub inst: u32,
    /// Expected next PC; `None` when the RTL does not know it.
    pub next_pc: Option<u32>,
    /// Stack pointer (`x2`) after the instruction.
    pub sp: u32,
    /// Branch or jump was taken.
    pub taken: bool,
    /// Data memory address accessed.
    pub dmem: u32,
    /// Data memory access size in bytes.
    pub dmem_size: u8,
    /// Instruction size in bytes.
    pub inst_size: u8,
    /// Clock count at which the sample was taken.
    pub sample_cnt: u64,
    /// Instruction cache outcome.
    pub ic_hm: HitMiss,
    /// Data cache outcome.
    pub dc_hm: HitMiss,
    /// Branch predictor outcome.
    pub bp_hm: HitMiss,
    /// Instruction channel transactions.
    pub imem: ImemChannel,
    /// Data channel transactions.
    pub dmem_ch: DmemChannel,
}

impl TraceEntry {
    /// Restores every field to its default: PC and counters zero, next PC unknown,
    /// outcomes unknown, no channel activity.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Sets the retired instruction and its location.
    pub const fn set_inst(&mut self, pc: u32, inst: u32, inst_size: u8) {
        self.pc = pc;
        self.inst = inst;
        self.inst_size = inst_size;
    }

    /// Sets the data memory access.
    pub const fn set_dmem(&mut self, addr: u32, size: u8) {
        self.dmem = addr;
        self.dmem_size = size;
    }

    /// Sets the cache and predictor outcomes from the RTL two-bit encodings.
    pub const fn set_hm_bits(&mut self, ic: u8, dc: u8, bp: u8) {
        self.ic_hm = HitMiss::from_bits(ic);
        self.dc_hm = HitMiss::from_bits(dc);
        self.bp_hm = HitMiss::from_bits(bp);
    }

    /// Returns `true` when any core/memory transaction was flagged.
    pub const fn has_channel_activity(&self) -> bool {
        let i = self.imem;
        let d = self.dmem_ch;
        i.core || i.mem || d.core_r || d.core_w || d.mem_r || d.mem_w
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>10}  pc {:08x}  inst {:08x}  sp {:08x}",
            self.sample_cnt, self.pc, self.inst, self.sp
        )?;
        match self.next_pc {
            Some(next) => write!(f, "  next {next:08x}")?,
            None => f.write_str("  next --------")?,
        }
        if self.taken {
            f.write_str("  T")?;
        }
        if self.dmem_size != 0 {
            write!(f, "  dmem {:08x}/{}", self.dmem, self.dmem_size)?;
        }
        write!(
            f,
            "  ic:{} dc:{} bp:{}",
            self.ic_hm.tag(),
            self.dc_hm.tag(),
            self.bp_hm.tag()
        )
    }
}
