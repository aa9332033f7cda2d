//! Exception entry, reset, and power-on reset.

use super::cpu::{Cpu, LR};
use super::memory::Memory;
use super::types::Status;

/// Sentinel written into every frame slot except slot 6.
pub const FRAME_SENTINEL: u32 = 0xDEAD_BEEF;

/// Take exception `vector_num`: look up its handler, push the simplified
/// eight-word frame, and redirect PC.
///
/// Returns `Status::Invalid` without recursing if the vector-table read or
/// any frame-push word-write fails; SP is left at its partially-decremented
/// position.
pub fn exception<M: Memory>(cpu: &mut Cpu, vector_num: u32, mem: &mut M) -> Status {
    let vector_addr = vector_num.wrapping_mul(4);

    let handler = match mem.read_word(vector_addr) {
        Ok(value) => value,
        Err(_) => return Status::Invalid,
    };

    let lr = cpu.regs[LR];
    for i in (0..8).rev() {
        let slot_value = if i == 6 { lr } else { FRAME_SENTINEL };
        cpu.regs[super::cpu::SP] = cpu.regs[super::cpu::SP].wrapping_sub(4);
        let sp = cpu.regs[super::cpu::SP];
        if mem.write_word(sp, slot_value).is_err() {
            return Status::Invalid;
        }
    }

    log::debug!("exception: vector={vector_num} handler={handler:#010x}");
    cpu.write_pc(handler);
    Status::Ok
}

/// Reset the CPU: zero all registers, clear CPSR and SysTick, then load the
/// supplied PC/SP.
pub fn reset(cpu: &mut Cpu, pc: u32, sp: u32) {
    cpu.regs = [0; 16];
    cpu.cpsr = 0;
    cpu.systick = super::cpu::SysTick::default();
    cpu.write_pc(pc);
    cpu.set_sp(sp);
}

/// Power-on reset: read the initial SP and PC from the vector table at
/// address 0, then call [`reset`].
///
/// If either vector-table read fails, the CPU is left untouched and
/// `Status::Invalid` is returned.
pub fn power_on_reset<M: Memory>(cpu: &mut Cpu, mem: &mut M) -> Status {
    let sp = match mem.read_word(0x0000_0000) {
        Ok(value) => value,
        Err(_) => return Status::Invalid,
    };
    let pc = match mem.read_word(0x0000_0004) {
        Ok(value) => value,
        Err(_) => return Status::Invalid,
    };
    reset(cpu, pc, sp);
    Status::Ok
}
