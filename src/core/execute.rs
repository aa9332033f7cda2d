//! Fetch-decode-execute step.

use super::cpu::{Cpu, SP};
use super::decode::{Opcode, decode};
use super::exceptions::exception;
use super::flags;
use super::memory::Memory;
use super::types::{Status, vector};

/// Advance the CPU by one instruction.
///
/// Fetches at the current PC, advances PC by 2 *before* executing the
/// instruction body (branches and exception entry overwrite PC after this
/// advance), decodes, and dispatches. A fetch failure or unknown opcode
/// takes HardFault; `Status::Ok` covers that case too.
pub fn step<M: Memory>(cpu: &mut Cpu, mem: &mut M) -> Status {
    let pc = cpu.pc();
    let op = match mem.fetch_halfword(pc) {
        Ok(op) => op,
        Err(_) => return exception(cpu, vector::HARD_FAULT, mem),
    };
    cpu.write_pc(pc.wrapping_add(2));

    log::trace!("step: pc={pc:#010x} opcode={op:#06x}");

    match decode(op) {
        Opcode::AddReg { rd, rs, rn } => {
            let a = cpu.regs[rs as usize];
            let b = cpu.regs[rn as usize];
            let result = a.wrapping_add(b);
            cpu.regs[rd as usize] = result;
            let new_flags = flags::additive(a, b, result);
            cpu.set_flags(new_flags);
            Status::Ok
        }
        Opcode::SubReg { rd, rs, rn } => {
            let a = cpu.regs[rn as usize];
            let b = cpu.regs[rs as usize];
            let result = a.wrapping_sub(b);
            cpu.regs[rd as usize] = result;
            let new_flags = flags::subtractive(a, b, result);
            cpu.set_flags(new_flags);
            Status::Ok
        }
        Opcode::MovImm { rd, imm } => {
            let result = imm as u32;
            cpu.regs[rd as usize] = result;
            let new_flags = flags::logical(result, cpu.cpsr);
            cpu.set_flags(new_flags);
            Status::Ok
        }
        Opcode::AddImm { rd, imm } => {
            let a = cpu.regs[rd as usize];
            let b = imm as u32;
            let result = a.wrapping_add(b);
            cpu.regs[rd as usize] = result;
            let new_flags = flags::additive(a, b, result);
            cpu.set_flags(new_flags);
            Status::Ok
        }
        Opcode::SubImm { rd, imm } => {
            let a = cpu.regs[rd as usize];
            let b = imm as u32;
            let result = a.wrapping_sub(b);
            cpu.regs[rd as usize] = result;
            let new_flags = flags::subtractive(a, b, result);
            cpu.set_flags(new_flags);
            Status::Ok
        }
        Opcode::Str { rd, rn, rm } => {
            let addr = cpu.regs[rn as usize].wrapping_add(cpu.regs[rm as usize]);
            let value = cpu.regs[rd as usize];
            // Verbatim propagation, no fault entry: STR and LDR are asymmetric on failure.
            match mem.write_word(addr, value) {
                Ok(()) => Status::Ok,
                Err(_) => Status::Invalid,
            }
        }
        Opcode::Ldr { rd, rn, rm } => {
            let addr = cpu.regs[rn as usize].wrapping_add(cpu.regs[rm as usize]);
            match mem.read_word(addr) {
                Ok(value) => {
                    cpu.regs[rd as usize] = value;
                    let new_flags = flags::logical(value, cpu.cpsr);
                    cpu.set_flags(new_flags);
                    Status::Ok
                }
                Err(_) => exception(cpu, vector::HARD_FAULT, mem),
            }
        }
        Opcode::Push { list } => {
            for i in (0..8).rev() {
                if list & (1 << i) == 0 {
                    continue;
                }
                cpu.regs[SP] = cpu.regs[SP].wrapping_sub(4);
                let sp = cpu.regs[SP];
                if mem.write_word(sp, cpu.regs[i]).is_err() {
                    return exception(cpu, vector::HARD_FAULT, mem);
                }
            }
            Status::Ok
        }
        Opcode::Pop { list } => {
            for i in 0..8 {
                if list & (1 << i) == 0 {
                    continue;
                }
                let sp = cpu.regs[SP];
                match mem.read_word(sp) {
                    Ok(value) => {
                        cpu.regs[i] = value;
                        cpu.regs[SP] = cpu.regs[SP].wrapping_add(4);
                    }
                    Err(_) => return exception(cpu, vector::HARD_FAULT, mem),
                }
            }
            Status::Ok
        }
        Opcode::Svc => exception(cpu, vector::SVC, mem),
        Opcode::Unknown => exception(cpu, vector::HARD_FAULT, mem),
    }
}
