//! Instruction semantics. One arm per [`Instruction`]; the addressing mode
//! from the opcode table decides where the operand comes from.

use crate::bus::Bus;
use crate::cpu::addressing::{AddressingMode, Operand};
use crate::cpu::cpu::{CPU, HaltReason};
use crate::cpu::flags::*;
use crate::cpu::opcodes::{Instruction, Opcode};

impl<B: Bus> CPU<B> {
    pub(crate) fn execute(&mut self, opcode: Opcode) {
        let mode = opcode.mode;

        match opcode.instruction {
            // Loads / stores
            Instruction::Lda => {
                self.a = self.fetch_operand(mode);
                self.update_zero_and_negative_flags(self.a);
            }
            Instruction::Ldx => {
                self.x = self.fetch_operand(mode);
                self.update_zero_and_negative_flags(self.x);
            }
            Instruction::Ldy => {
                self.y = self.fetch_operand(mode);
                self.update_zero_and_negative_flags(self.y);
            }
            Instruction::Sta => self.store(mode, self.a),
            Instruction::Stx => self.store(mode, self.x),
            Instruction::Sty => self.store(mode, self.y),

            // Transfers
            Instruction::Tax => {
                self.x = self.a;
                self.update_zero_and_negative_flags(self.x);
            }
            Instruction::Tay => {
                self.y = self.a;
                self.update_zero_and_negative_flags(self.y);
            }
            Instruction::Tsx => {
                self.x = self.sp;
                self.update_zero_and_negative_flags(self.x);
            }
            Instruction::Txa => {
                self.a = self.x;
                self.update_zero_and_negative_flags(self.a);
            }
            Instruction::Tya => {
                self.a = self.y;
                self.update_zero_and_negative_flags(self.a);
            }
            // TXS leaves the flags alone.
            Instruction::Txs => self.sp = self.x,

            // Arithmetic
            Instruction::Adc => {
                let value = self.fetch_operand(mode);
                self.add_with_carry(value);
            }
            Instruction::Sbc => {
                let value = self.fetch_operand(mode);
                self.add_with_carry(!value);
            }
            Instruction::And => {
                self.a &= self.fetch_operand(mode);
                self.update_zero_and_negative_flags(self.a);
            }
            Instruction::Ora => {
                self.a |= self.fetch_operand(mode);
                self.update_zero_and_negative_flags(self.a);
            }
            Instruction::Eor => {
                self.a ^= self.fetch_operand(mode);
                self.update_zero_and_negative_flags(self.a);
            }
            Instruction::Cmp => {
                let value = self.fetch_operand(mode);
                self.compare(self.a, value);
            }
            Instruction::Cpx => {
                let value = self.fetch_operand(mode);
                self.compare(self.x, value);
            }
            Instruction::Cpy => {
                let value = self.fetch_operand(mode);
                self.compare(self.y, value);
            }
            Instruction::Bit => {
                let value = self.fetch_operand(mode);
                self.set_flag(FLAG_ZERO, self.a & value == 0);
                self.set_flag(FLAG_OVERFLOW, value & 0x40 != 0);
                self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
            }

            // Increments / decrements
            Instruction::Inc => {
                self.modify(mode, Self::increment);
            }
            Instruction::Dec => {
                self.modify(mode, Self::decrement);
            }
            Instruction::Inx => self.x = self.increment(self.x),
            Instruction::Iny => self.y = self.increment(self.y),
            Instruction::Dex => self.x = self.decrement(self.x),
            Instruction::Dey => self.y = self.decrement(self.y),

            // Shifts / rotates
            Instruction::Asl => {
                self.modify(mode, Self::shift_left);
            }
            Instruction::Lsr => {
                self.modify(mode, Self::shift_right);
            }
            Instruction::Rol => {
                self.modify(mode, Self::rotate_left);
            }
            Instruction::Ror => {
                self.modify(mode, Self::rotate_right);
            }

            // Control flow
            Instruction::Jmp => {
                if let Some(target) = self.resolve(mode).address() {
                    self.pc = target;
                }
            }
            Instruction::Jsr => {
                let target = self.fetch_word();
                self.push_word(self.pc.wrapping_sub(1));
                self.pc = target;
            }
            Instruction::Rts => {
                self.pc = self.pop_word().wrapping_add(1);
            }
            Instruction::Rti => {
                self.pull_status();
                self.pc = self.pop_word();
            }
            Instruction::Bcc => self.branch(!self.flag(FLAG_CARRY)),
            Instruction::Bcs => self.branch(self.flag(FLAG_CARRY)),
            Instruction::Bne => self.branch(!self.flag(FLAG_ZERO)),
            Instruction::Beq => self.branch(self.flag(FLAG_ZERO)),
            Instruction::Bpl => self.branch(!self.flag(FLAG_NEGATIVE)),
            Instruction::Bmi => self.branch(self.flag(FLAG_NEGATIVE)),
            Instruction::Bvc => self.branch(!self.flag(FLAG_OVERFLOW)),
            Instruction::Bvs => self.branch(self.flag(FLAG_OVERFLOW)),

            // Stack
            Instruction::Pha => self.push(self.a),
            Instruction::Pla => {
                self.a = self.pop();
                self.update_zero_and_negative_flags(self.a);
            }
            Instruction::Php => self.push(self.status | FLAG_BREAK | FLAG_UNUSED),
            Instruction::Plp => self.pull_status(),

            // Flags
            Instruction::Clc => self.set_flag(FLAG_CARRY, false),
            Instruction::Sec => self.set_flag(FLAG_CARRY, true),
            Instruction::Cli => self.set_flag(FLAG_INTERRUPT_DISABLE, false),
            Instruction::Sei => self.set_flag(FLAG_INTERRUPT_DISABLE, true),
            Instruction::Cld => self.set_flag(FLAG_DECIMAL, false),
            Instruction::Sed => self.set_flag(FLAG_DECIMAL, true),
            Instruction::Clv => self.set_flag(FLAG_OVERFLOW, false),

            Instruction::Nop => {
                // Operand bytes are consumed and the read still happens.
                if mode != AddressingMode::Implied {
                    self.fetch_operand(mode);
                }
            }

            // Halts
            Instruction::Brk => {
                self.set_flag(FLAG_BREAK, true);
                self.halt(HaltReason::Break);
            }
            Instruction::Jam => self.halt(HaltReason::Jam(opcode.code)),

            // Undocumented
            Instruction::Lax => {
                let value = self.fetch_operand(mode);
                self.a = value;
                self.x = value;
                self.update_zero_and_negative_flags(value);
            }
            Instruction::Sax => self.store(mode, self.a & self.x),
            Instruction::Slo => {
                let value = self.modify(mode, Self::shift_left);
                self.a |= value;
                self.update_zero_and_negative_flags(self.a);
            }
            Instruction::Rla => {
                let value = self.modify(mode, Self::rotate_left);
                self.a &= value;
                self.update_zero_and_negative_flags(self.a);
            }
            Instruction::Sre => {
                let value = self.modify(mode, Self::shift_right);
                self.a ^= value;
                self.update_zero_and_negative_flags(self.a);
            }
            Instruction::Rra => {
                let value = self.modify(mode, Self::rotate_right);
                self.add_with_carry(value);
            }
            Instruction::Dcp => {
                let value = self.modify(mode, Self::decrement);
                self.compare(self.a, value);
            }
            Instruction::Isc => {
                let value = self.modify(mode, Self::increment);
                self.add_with_carry(!value);
            }
        }
    }

    fn store(&mut self, mode: AddressingMode, value: u8) {
        let operand = self.resolve(mode);
        self.write_operand(operand, value);
    }

    /// Read-modify-write: the new byte is written back before the caller
    /// combines it with anything else. Returns the written byte.
    fn modify(&mut self, mode: AddressingMode, op: fn(&mut Self, u8) -> u8) -> u8 {
        let operand: Operand = self.resolve(mode);
        let value = self.read_operand(operand);
        let result = op(self, value);
        self.write_operand(operand, result);
        result
    }

    pub(crate) fn add_with_carry(&mut self, value: u8) {
        let carry_in = self.flag(FLAG_CARRY) as u16;
        let sum = self.a as u16 + value as u16 + carry_in;
        let result = sum as u8;

        self.set_flag(FLAG_CARRY, sum > 0xFF);
        // Both inputs share a sign and the result does not.
        self.set_flag(
            FLAG_OVERFLOW,
            (!(self.a ^ value) & (self.a ^ result)) & 0x80 != 0,
        );

        self.a = result;
        self.update_zero_and_negative_flags(self.a);
    }

    fn compare(&mut self, register: u8, value: u8) {
        self.set_flag(FLAG_CARRY, register >= value);
        self.update_zero_and_negative_flags(register.wrapping_sub(value));
    }

    fn increment(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.update_zero_and_negative_flags(result);
        result
    }

    fn decrement(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.update_zero_and_negative_flags(result);
        result
    }

    fn shift_left(&mut self, value: u8) -> u8 {
        self.set_flag(FLAG_CARRY, value & 0x80 != 0);
        let result = value << 1;
        self.update_zero_and_negative_flags(result);
        result
    }

    fn shift_right(&mut self, value: u8) -> u8 {
        self.set_flag(FLAG_CARRY, value & 0x01 != 0);
        let result = value >> 1;
        self.update_zero_and_negative_flags(result);
        result
    }

    fn rotate_left(&mut self, value: u8) -> u8 {
        let carry_in = self.flag(FLAG_CARRY) as u8;
        self.set_flag(FLAG_CARRY, value & 0x80 != 0);
        let result = (value << 1) | carry_in;
        self.update_zero_and_negative_flags(result);
        result
    }

    fn rotate_right(&mut self, value: u8) -> u8 {
        let carry_in = self.flag(FLAG_CARRY) as u8;
        self.set_flag(FLAG_CARRY, value & 0x01 != 0);
        let result = (value >> 1) | (carry_in << 7);
        self.update_zero_and_negative_flags(result);
        result
    }

    fn branch(&mut self, condition: bool) {
        let operand = self.fetch_operand(AddressingMode::Relative);
        let offset = i8::from_ne_bytes([operand]);

        if condition {
            self.pc = self.pc.wrapping_add_signed(offset as i16);
        }
    }

    /// Bit 4 keeps its current value and bit 5 is forced on.
    fn pull_status(&mut self) {
        let pulled = self.pop();
        self.status = (pulled & !FLAG_BREAK) | (self.status & FLAG_BREAK) | FLAG_UNUSED;
    }
}
