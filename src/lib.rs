//! # thumb0-core
//!
//! A minimal instruction-set simulator core for a 32-bit microcontroller CPU
//! loosely modeled on the ARMv6-M (Cortex-M0) Thumb profile: a register
//! file and condition flags, a fetch/decode/execute step over a small
//! Thumb-1 opcode subset, vector-driven exception entry with a simplified
//! stack frame, and a SysTick down-counter.
//!
//! The core only consumes a [`core::memory::Memory`] capability from its
//! embedder — it owns no memory itself. See `DESIGN.md` for what's
//! intentionally out of scope.

pub mod core;
pub mod sim_memory;

pub use core::cpu::{Cpu, SysTick};
pub use core::exceptions::{exception, power_on_reset, reset};
pub use core::execute::step;
pub use core::memory::{Access, Memory, MemoryError};
pub use core::systick::systick_tick;
pub use core::types::{Status, vector};
pub use sim_memory::SimMemory;
