//! The memory access group: LD, LDI, LDR, LEA and ST, STI, STR.
//!
//! Every load updates the condition codes, LEA included — that is the
//! LC-3 revision this simulator implements.

use crate::core::bus::Bus;
use crate::cpu::{Cpu, base_r, dr, offset6, pcoffset9, sign_extend};

impl Cpu {
    pub(crate) fn op_ld(&mut self, instruction: u16, bus: &mut Bus) {
        let dest = dr(instruction);
        let address = self.direct_address(instruction);
        self.r[dest] = bus.read(address);
        self.set_condition_codes(dest);
    }

    pub(crate) fn op_ldi(&mut self, instruction: u16, bus: &mut Bus) {
        let dest = dr(instruction);
        let address = self.indirect_address(instruction, bus);
        self.r[dest] = bus.read(address);
        self.set_condition_codes(dest);
    }

    pub(crate) fn op_ldr(&mut self, instruction: u16, bus: &mut Bus) {
        let dest = dr(instruction);
        let address = self.base_plus_offset(instruction);
        self.r[dest] = bus.read(address);
        self.set_condition_codes(dest);
    }

    pub(crate) fn op_lea(&mut self, instruction: u16) {
        let dest = dr(instruction);
        self.r[dest] = self.direct_address(instruction);
        self.set_condition_codes(dest);
    }

    pub(crate) fn op_st(&mut self, instruction: u16, bus: &mut Bus) {
        let address = self.direct_address(instruction);
        bus.write(address, self.r[dr(instruction)]);
    }

    pub(crate) fn op_sti(&mut self, instruction: u16, bus: &mut Bus) {
        let address = self.indirect_address(instruction, bus);
        bus.write(address, self.r[dr(instruction)]);
    }

    pub(crate) fn op_str(&mut self, instruction: u16, bus: &mut Bus) {
        let address = self.base_plus_offset(instruction);
        bus.write(address, self.r[dr(instruction)]);
    }

    /// PC + sign-extended PCoffset9. The PC already points past the
    /// instruction when this runs.
    fn direct_address(&self, instruction: u16) -> u16 {
        self.pc.wrapping_add(sign_extend(pcoffset9(instruction), 9))
    }

    /// The word the PC-relative cell points at.
    fn indirect_address(&self, instruction: u16, bus: &mut Bus) -> u16 {
        bus.read(self.direct_address(instruction))
    }

    /// baseR + sign-extended offset6.
    fn base_plus_offset(&self, instruction: u16) -> u16 {
        self.r[base_r(instruction)].wrapping_add(sign_extend(offset6(instruction), 6))
    }
}
