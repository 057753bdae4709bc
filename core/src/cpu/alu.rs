//! ADD, AND and NOT: the register-to-register group.

use crate::cpu::{Cpu, base_r, dr, imm5, is_imm, sign_extend, sr2};

impl Cpu {
    pub(crate) fn op_add(&mut self, instruction: u16) {
        let dest = dr(instruction);
        let lhs = self.r[base_r(instruction)];
        let rhs = self.second_operand(instruction);
        self.r[dest] = lhs.wrapping_add(rhs);
        self.set_condition_codes(dest);
    }

    pub(crate) fn op_and(&mut self, instruction: u16) {
        let dest = dr(instruction);
        let lhs = self.r[base_r(instruction)];
        let rhs = self.second_operand(instruction);
        self.r[dest] = lhs & rhs;
        self.set_condition_codes(dest);
    }

    pub(crate) fn op_not(&mut self, instruction: u16) {
        let dest = dr(instruction);
        self.r[dest] = !self.r[base_r(instruction)];
        self.set_condition_codes(dest);
    }

    /// SR2 or the sign-extended imm5, selected by bit 5.
    fn second_operand(&self, instruction: u16) -> u16 {
        if is_imm(instruction) {
            sign_extend(imm5(instruction), 5)
        } else {
            self.r[sr2(instruction)]
        }
    }
}
