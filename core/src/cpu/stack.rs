//! Ring transitions: the supervisor stack, RTI, interrupt acceptance and
//! exception dispatch.
//!
//! R6 is the stack pointer. Push pre-decrements then writes; pop reads
//! then post-increments. Entering supervisor service from user mode swaps
//! R6 for the saved SSP; RTI restoring a user-mode PSR swaps it back.

use crate::core::bus::Bus;
use crate::cpu::{
    Cpu, ILLEGAL_OPCODE_VECTOR, INTERRUPT_VECTOR_TABLE, PRIV_MODE_VIOLATION_VECTOR,
    PSR_PRIORITY_MASK, PSR_PRIORITY_SHIFT, PSR_Z,
};

impl Cpu {
    /// RTI. In user mode this is a privilege violation; in supervisor mode
    /// it pops PC then PSR, and returns R6 to the user stack when the
    /// restored PSR is user-mode.
    pub(crate) fn op_rti(&mut self, bus: &mut Bus) {
        if self.in_user_mode() {
            self.priv_mode_violation = true;
            return;
        }
        self.pc = self.supervisor_stack_pop(bus);
        self.psr = self.supervisor_stack_pop(bus);
        if self.in_user_mode() {
            self.saved_ssp = self.r[6];
            self.r[6] = self.saved_usp;
        }
    }

    /// Accept an external interrupt the simulator decided to deliver. The
    /// new PSR runs at the interrupt's priority.
    pub fn accept_interrupt(&mut self, vector: u8, priority: u8, bus: &mut Bus) {
        log::debug!("cpu: accepting interrupt {vector:#04x} at priority {priority}");
        self.enter_service(vector, priority, bus);
    }

    /// Service at most one latched exception, privilege violation first.
    /// Exceptions keep the current execution priority.
    pub(crate) fn service_exceptions(&mut self, bus: &mut Bus) {
        if self.priv_mode_violation {
            self.priv_mode_violation = false;
            log::debug!("cpu: dispatching privilege-violation exception");
            self.enter_service(PRIV_MODE_VIOLATION_VECTOR, self.priority(), bus);
        } else if self.illegal_opcode {
            self.illegal_opcode = false;
            log::debug!("cpu: dispatching illegal-opcode exception");
            self.enter_service(ILLEGAL_OPCODE_VECTOR, self.priority(), bus);
        }
    }

    /// The common ring-entry sequence: swap to the supervisor stack when
    /// coming from user mode, push PSR then PC, drop into supervisor mode
    /// at `priority`, and vector through the table.
    fn enter_service(&mut self, vector: u8, priority: u8, bus: &mut Bus) {
        if self.in_user_mode() {
            self.saved_usp = self.r[6];
            self.r[6] = self.saved_ssp;
        }
        self.supervisor_stack_push(self.psr, bus);
        self.supervisor_stack_push(self.pc, bus);
        // Supervisor mode (bit 15 clear) at the service priority; condition
        // codes start out at Z.
        self.psr = PSR_Z | ((u16::from(priority) << PSR_PRIORITY_SHIFT) & PSR_PRIORITY_MASK);
        self.pc = bus.read(INTERRUPT_VECTOR_TABLE | u16::from(vector));
    }

    fn supervisor_stack_push(&mut self, value: u16, bus: &mut Bus) {
        self.r[6] = self.r[6].wrapping_sub(1);
        bus.write(self.r[6], value);
    }

    fn supervisor_stack_pop(&mut self, bus: &mut Bus) -> u16 {
        let value = bus.read(self.r[6]);
        self.r[6] = self.r[6].wrapping_add(1);
        value
    }
}
