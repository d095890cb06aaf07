// Instructions module for 6502 CPU
// This module organizes CPU instructions by semantic grouping
//
// The groups hold the data operations of each instruction. How many bus
// cycles an instruction spends and in which order lives in `execute.rs`;
// the multi-cycle control flow instructions (branches, jumps, stack and
// interrupt sequences) keep their cycle steps next to their semantics here.

pub mod arithmetic;
pub mod branch;
pub mod compare;
pub mod flags;
pub mod illegal;
pub mod jump_subroutine;
pub mod load_store;
pub mod logic;
pub mod miscellaneous;
pub mod shift_rotate;
pub mod stack;
pub mod transfer;

use crate::bus::MemoryMappedDevice;
use crate::cpu::addressing::AddressingMode;

impl crate::cpu::Cpu {
    // ========================================
    // Helper Functions
    // ========================================

    /// Helper function to read the operand of the current instruction
    ///
    /// Immediate operands were fetched by the addressing cycles. Implied and
    /// accumulator instructions spend their cycle on a dummy read of PC.
    #[inline]
    pub(crate) fn read_operand(&mut self, bus: &mut dyn MemoryMappedDevice) -> u8 {
        if let Some(value) = self.operand.value {
            return value;
        }

        match self.op.mode {
            AddressingMode::Implied | AddressingMode::Accumulator => bus.read(self.pc),
            _ => bus.read(self.operand.address),
        }
    }
}
