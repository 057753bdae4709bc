//! Control transfer: BR, JMP/RET, JSR/JSRR and TRAP.

use crate::core::bus::Bus;
use crate::cpu::{
    Cpu, base_r, is_jsr, nzp, pcoffset9, pcoffset11, sign_extend, trapvect8,
};

impl Cpu {
    /// Branch when any condition bit of the instruction overlaps the PSR's.
    pub(crate) fn op_br(&mut self, instruction: u16) {
        if nzp(instruction) & self.psr & 0x0007 != 0 {
            self.pc = self.pc.wrapping_add(sign_extend(pcoffset9(instruction), 9));
        }
    }

    /// JMP loads PC from baseR; RET is the baseR = R7 encoding.
    pub(crate) fn op_jmp(&mut self, instruction: u16) {
        self.pc = self.r[base_r(instruction)];
    }

    /// JSR (bit 11 set) is PC-relative; JSRR jumps through baseR. The
    /// return address lands in R7 after the target is computed, so
    /// `JSRR R7` jumps through the old link value.
    pub(crate) fn op_jsr(&mut self, instruction: u16) {
        let return_address = self.pc;
        self.pc = if is_jsr(instruction) {
            self.pc.wrapping_add(sign_extend(pcoffset11(instruction), 11))
        } else {
            self.r[base_r(instruction)]
        };
        self.r[7] = return_address;
    }

    /// TRAP links through R7 and loads PC from the trap vector table at
    /// the bottom of memory. It does not switch privilege; the OS image's
    /// service routines manage the PSR through the RTI convention.
    pub(crate) fn op_trap(&mut self, instruction: u16, bus: &mut Bus) {
        self.r[7] = self.pc;
        self.pc = bus.read(trapvect8(instruction));
    }
}
