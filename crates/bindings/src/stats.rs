//! Statistics session Python binding.
//!
//! Exposes one co-simulation session to a Python testbench: step the clock,
//! log the per-cycle samples of each unit, then print or export the
//! statistics. `to_dict` returns the same document that is written to
//! `hw_stats.json`.

use cosim_core::CosimSession;
use cosim_core::common::HitMiss;
use cosim_core::events::{CoreEventSample, MemoryEventSample};
use cosim_core::trace::{DEFAULT_INST_SIZE, DmemChannel, ImemChannel};
use pyo3::prelude::*;

use crate::conversion::{py_dict_to_config, stats_error_to_py};

/// Python-exposed statistics session: wraps `CosimSession`.
#[pyclass]
#[derive(Debug)]
pub struct PyCosimStats {
    inner: CosimSession,
}

#[pymethods]
impl PyCosimStats {
    /// Creates a session from an optional config dict.
    ///
    /// # Errors
    ///
    /// Raises `ValueError` if the dict is not a valid configuration.
    #[new]
    #[pyo3(signature = (config_dict=None))]
    fn new(py: Python<'_>, config_dict: Option<&Bound<'_, PyAny>>) -> PyResult<Self> {
        let config = match config_dict {
            Some(dict) => py_dict_to_config(py, dict)?,
            None => cosim_core::CosimConfig::default(),
        };
        tracing::debug!(
            pc_start = config.profiling.pc_start,
            pc_stop = config.profiling.pc_stop,
            "cosim session created"
        );
        Ok(Self {
            inner: CosimSession::new(config),
        })
    }

    /// Advances to clock `clk`, about to execute the instruction at `pc`.
    fn step(&mut self, clk: u64, pc: u32) {
        self.inner.step(clk, pc);
    }

    /// Forces the profiling gate on or off.
    fn set_profiling(&mut self, enable: bool) {
        self.inner.set_profiling(enable);
    }

    #[getter]
    fn is_profiling(&self) -> bool {
        self.inner.is_profiling()
    }

    #[getter]
    fn simulation_cycles(&self) -> u64 {
        self.inner.simulation_cycles()
    }

    #[getter]
    fn profiled_cycles(&self) -> u64 {
        self.inner.stats().core().cycles()
    }

    /// Logs the core sample of one cycle.
    #[pyo3(signature = (bad_spec=false, fe=false, fe_ic=false, be=false, be_dc=false, ret_simd=false))]
    fn log_core(
        &mut self,
        bad_spec: bool,
        fe: bool,
        fe_ic: bool,
        be: bool,
        be_dc: bool,
        ret_simd: bool,
    ) {
        self.inner.log_core(&CoreEventSample {
            bad_spec,
            fe,
            fe_ic,
            be,
            be_dc,
            ret_simd,
        });
    }

    /// Logs an instruction (`icache=True`) or data cache sample.
    #[pyo3(signature = (icache, accessed, hit, miss, writeback=false, is_store=false, size=4))]
    #[allow(clippy::too_many_arguments)]
    fn log_memory(
        &mut self,
        icache: bool,
        accessed: bool,
        hit: bool,
        miss: bool,
        writeback: bool,
        is_store: bool,
        size: u8,
    ) {
        let ev = memory_sample(accessed, hit, miss, writeback, is_store, size);
        self.inner.stats_mut().on_memory_event(&ev, icache);
    }

    /// Logs a branch predictor sample; `correct` means the prediction was right.
    fn log_branch(&mut self, accessed: bool, correct: bool) {
        let ev = if accessed {
            MemoryEventSample::prediction(correct)
        } else {
            MemoryEventSample::IDLE
        };
        self.inner.stats_mut().on_branch_event(&ev);
    }

    /// Human-readable summary of the run.
    fn summary(&mut self) -> String {
        self.inner.summary()
    }

    /// Writes the report file and returns the summary.
    ///
    /// # Errors
    ///
    /// Raises `IOError` if the report cannot be written.
    fn finish(&mut self) -> PyResult<String> {
        self.inner.finish().map_err(stats_error_to_py)
    }

    /// Records the trace entry of the instruction retired at `clk`.
    ///
    /// `ic_hm`, `dc_hm` and `bp_hm` use the RTL encoding: bit 0 hit, bit 1 miss.
    /// The `ct_*` flags mark core/memory channel transactions. The entry is
    /// kept in the history only when tracing is enabled in the configuration.
    #[pyo3(signature = (
        clk, pc, inst, sp=0, dmem_addr=0, dmem_size=0, taken=false,
        ic_hm=0, dc_hm=0, bp_hm=0, next_pc=None, inst_size=DEFAULT_INST_SIZE,
        ct_imem_core=false, ct_imem_mem=false,
        ct_dmem_core_r=false, ct_dmem_core_w=false, ct_dmem_mem_r=false, ct_dmem_mem_w=false
    ))]
    #[allow(clippy::too_many_arguments)]
    fn add_trace_entry(
        &mut self,
        clk: u64,
        pc: u32,
        inst: u32,
        sp: u32,
        dmem_addr: u32,
        dmem_size: u8,
        taken: bool,
        ic_hm: u8,
        dc_hm: u8,
        bp_hm: u8,
        next_pc: Option<u32>,
        inst_size: u8,
        ct_imem_core: bool,
        ct_imem_mem: bool,
        ct_dmem_core_r: bool,
        ct_dmem_core_w: bool,
        ct_dmem_mem_r: bool,
        ct_dmem_mem_w: bool,
    ) {
        self.inner.add_trace_entry(clk, |te| {
            te.set_inst(pc, inst, inst_size);
            te.next_pc = next_pc;
            te.sp = sp;
            te.taken = taken;
            te.set_dmem(dmem_addr, dmem_size);
            te.set_hm_bits(ic_hm, dc_hm, bp_hm);
            te.imem = ImemChannel {
                core: ct_imem_core,
                mem: ct_imem_mem,
            };
            te.dmem_ch = DmemChannel {
                core_r: ct_dmem_core_r,
                core_w: ct_dmem_core_w,
                mem_r: ct_dmem_mem_r,
                mem_w: ct_dmem_mem_w,
            };
        });
    }

    /// Text of the most recent trace entry.
    fn last_trace_entry(&self) -> String {
        self.inner.trace_entry().to_string()
    }

    /// Retained trace entries, one line each.
    fn trace_history(&self) -> String {
        self.inner.render_trace_history()
    }

    /// Export the report document as a Python dict.
    fn to_dict(&mut self, py: Python<'_>) -> PyResult<PyObject> {
        let text = self
            .inner
            .stats_mut()
            .report()
            .to_json()
            .map_err(stats_error_to_py)?;
        let json = py.import("json")?;
        Ok(json.call_method1("loads", (text,))?.unbind())
    }
}

/// Builds a cache or predictor sample from the flags passed by Python.
fn memory_sample(
    accessed: bool,
    hit: bool,
    miss: bool,
    writeback: bool,
    is_store: bool,
    size: u8,
) -> MemoryEventSample {
    MemoryEventSample {
        accessed,
        hit,
        miss,
        writeback,
        is_store,
        size,
        outcome: HitMiss::from_flags(hit, miss),
    }
}
