//! Opcode table: one entry per opcode byte, naming the instruction and its
//! addressing mode.
//!
//! Built once on first use. Bytes without an entry (ANC, ALR, ARR, XAA, AXS,
//! LAS, LAX #imm and the unstable SH* stores) are reported as unimplemented.

use std::sync::OnceLock;

use crate::cpu::addressing::AddressingMode::{self, *};

use Instruction::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    // Undocumented
    Dcp,
    Isc,
    Jam,
    Lax,
    Rla,
    Rra,
    Sax,
    Slo,
    Sre,
}

impl Instruction {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Adc => "ADC",
            And => "AND",
            Asl => "ASL",
            Bcc => "BCC",
            Bcs => "BCS",
            Beq => "BEQ",
            Bit => "BIT",
            Bmi => "BMI",
            Bne => "BNE",
            Bpl => "BPL",
            Brk => "BRK",
            Bvc => "BVC",
            Bvs => "BVS",
            Clc => "CLC",
            Cld => "CLD",
            Cli => "CLI",
            Clv => "CLV",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Eor => "EOR",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Jmp => "JMP",
            Jsr => "JSR",
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Lsr => "LSR",
            Nop => "NOP",
            Ora => "ORA",
            Pha => "PHA",
            Php => "PHP",
            Pla => "PLA",
            Plp => "PLP",
            Rol => "ROL",
            Ror => "ROR",
            Rti => "RTI",
            Rts => "RTS",
            Sbc => "SBC",
            Sec => "SEC",
            Sed => "SED",
            Sei => "SEI",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Tax => "TAX",
            Tay => "TAY",
            Tsx => "TSX",
            Txa => "TXA",
            Txs => "TXS",
            Tya => "TYA",
            Dcp => "DCP",
            Isc => "ISB",
            Jam => "JAM",
            Lax => "LAX",
            Rla => "RLA",
            Rra => "RRA",
            Sax => "SAX",
            Slo => "SLO",
            Sre => "SRE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub code: u8,
    pub instruction: Instruction,
    pub mode: AddressingMode,
    pub documented: bool,
}

impl Opcode {
    /// Opcode byte plus operand bytes.
    pub fn byte_len(&self) -> u16 {
        1 + self.mode.operand_len()
    }
}

const DOCUMENTED: &[(u8, Instruction, AddressingMode)] = &[
    (0x69, Adc, Immediate),
    (0x65, Adc, ZeroPage),
    (0x75, Adc, ZeroPageX),
    (0x6D, Adc, Absolute),
    (0x7D, Adc, AbsoluteX),
    (0x79, Adc, AbsoluteY),
    (0x61, Adc, IndexedIndirect),
    (0x71, Adc, IndirectIndexed),
    (0x29, And, Immediate),
    (0x25, And, ZeroPage),
    (0x35, And, ZeroPageX),
    (0x2D, And, Absolute),
    (0x3D, And, AbsoluteX),
    (0x39, And, AbsoluteY),
    (0x21, And, IndexedIndirect),
    (0x31, And, IndirectIndexed),
    (0x0A, Asl, Accumulator),
    (0x06, Asl, ZeroPage),
    (0x16, Asl, ZeroPageX),
    (0x0E, Asl, Absolute),
    (0x1E, Asl, AbsoluteX),
    (0x90, Bcc, Relative),
    (0xB0, Bcs, Relative),
    (0xF0, Beq, Relative),
    (0x30, Bmi, Relative),
    (0xD0, Bne, Relative),
    (0x10, Bpl, Relative),
    (0x50, Bvc, Relative),
    (0x70, Bvs, Relative),
    (0x24, Bit, ZeroPage),
    (0x2C, Bit, Absolute),
    (0x00, Brk, Implied),
    (0x18, Clc, Implied),
    (0xD8, Cld, Implied),
    (0x58, Cli, Implied),
    (0xB8, Clv, Implied),
    (0xC9, Cmp, Immediate),
    (0xC5, Cmp, ZeroPage),
    (0xD5, Cmp, ZeroPageX),
    (0xCD, Cmp, Absolute),
    (0xDD, Cmp, AbsoluteX),
    (0xD9, Cmp, AbsoluteY),
    (0xC1, Cmp, IndexedIndirect),
    (0xD1, Cmp, IndirectIndexed),
    (0xE0, Cpx, Immediate),
    (0xE4, Cpx, ZeroPage),
    (0xEC, Cpx, Absolute),
    (0xC0, Cpy, Immediate),
    (0xC4, Cpy, ZeroPage),
    (0xCC, Cpy, Absolute),
    (0xC6, Dec, ZeroPage),
    (0xD6, Dec, ZeroPageX),
    (0xCE, Dec, Absolute),
    (0xDE, Dec, AbsoluteX),
    (0xCA, Dex, Implied),
    (0x88, Dey, Implied),
    (0x49, Eor, Immediate),
    (0x45, Eor, ZeroPage),
    (0x55, Eor, ZeroPageX),
    (0x4D, Eor, Absolute),
    (0x5D, Eor, AbsoluteX),
    (0x59, Eor, AbsoluteY),
    (0x41, Eor, IndexedIndirect),
    (0x51, Eor, IndirectIndexed),
    (0xE6, Inc, ZeroPage),
    (0xF6, Inc, ZeroPageX),
    (0xEE, Inc, Absolute),
    (0xFE, Inc, AbsoluteX),
    (0xE8, Inx, Implied),
    (0xC8, Iny, Implied),
    (0x4C, Jmp, Absolute),
    (0x6C, Jmp, Indirect),
    (0x20, Jsr, Absolute),
    (0xA9, Lda, Immediate),
    (0xA5, Lda, ZeroPage),
    (0xB5, Lda, ZeroPageX),
    (0xAD, Lda, Absolute),
    (0xBD, Lda, AbsoluteX),
    (0xB9, Lda, AbsoluteY),
    (0xA1, Lda, IndexedIndirect),
    (0xB1, Lda, IndirectIndexed),
    (0xA2, Ldx, Immediate),
    (0xA6, Ldx, ZeroPage),
    (0xB6, Ldx, ZeroPageY),
    (0xAE, Ldx, Absolute),
    (0xBE, Ldx, AbsoluteY),
    (0xA0, Ldy, Immediate),
    (0xA4, Ldy, ZeroPage),
    (0xB4, Ldy, ZeroPageX),
    (0xAC, Ldy, Absolute),
    (0xBC, Ldy, AbsoluteX),
    (0x4A, Lsr, Accumulator),
    (0x46, Lsr, ZeroPage),
    (0x56, Lsr, ZeroPageX),
    (0x4E, Lsr, Absolute),
    (0x5E, Lsr, AbsoluteX),
    (0xEA, Nop, Implied),
    (0x09, Ora, Immediate),
    (0x05, Ora, ZeroPage),
    (0x15, Ora, ZeroPageX),
    (0x0D, Ora, Absolute),
    (0x1D, Ora, AbsoluteX),
    (0x19, Ora, AbsoluteY),
    (0x01, Ora, IndexedIndirect),
    (0x11, Ora, IndirectIndexed),
    (0x48, Pha, Implied),
    (0x08, Php, Implied),
    (0x68, Pla, Implied),
    (0x28, Plp, Implied),
    (0x2A, Rol, Accumulator),
    (0x26, Rol, ZeroPage),
    (0x36, Rol, ZeroPageX),
    (0x2E, Rol, Absolute),
    (0x3E, Rol, AbsoluteX),
    (0x6A, Ror, Accumulator),
    (0x66, Ror, ZeroPage),
    (0x76, Ror, ZeroPageX),
    (0x6E, Ror, Absolute),
    (0x7E, Ror, AbsoluteX),
    (0x40, Rti, Implied),
    (0x60, Rts, Implied),
    (0xE9, Sbc, Immediate),
    (0xE5, Sbc, ZeroPage),
    (0xF5, Sbc, ZeroPageX),
    (0xED, Sbc, Absolute),
    (0xFD, Sbc, AbsoluteX),
    (0xF9, Sbc, AbsoluteY),
    (0xE1, Sbc, IndexedIndirect),
    (0xF1, Sbc, IndirectIndexed),
    (0x38, Sec, Implied),
    (0xF8, Sed, Implied),
    (0x78, Sei, Implied),
    (0x85, Sta, ZeroPage),
    (0x95, Sta, ZeroPageX),
    (0x8D, Sta, Absolute),
    (0x9D, Sta, AbsoluteX),
    (0x99, Sta, AbsoluteY),
    (0x81, Sta, IndexedIndirect),
    (0x91, Sta, IndirectIndexed),
    (0x86, Stx, ZeroPage),
    (0x96, Stx, ZeroPageY),
    (0x8E, Stx, Absolute),
    (0x84, Sty, ZeroPage),
    (0x94, Sty, ZeroPageX),
    (0x8C, Sty, Absolute),
    (0xAA, Tax, Implied),
    (0xA8, Tay, Implied),
    (0xBA, Tsx, Implied),
    (0x8A, Txa, Implied),
    (0x9A, Txs, Implied),
    (0x98, Tya, Implied),
];

const UNDOCUMENTED: &[(u8, Instruction, AddressingMode)] = &[
    (0x1A, Nop, Implied),
    (0x3A, Nop, Implied),
    (0x5A, Nop, Implied),
    (0x7A, Nop, Implied),
    (0xDA, Nop, Implied),
    (0xFA, Nop, Implied),
    (0x80, Nop, Immediate),
    (0x82, Nop, Immediate),
    (0x89, Nop, Immediate),
    (0xC2, Nop, Immediate),
    (0xE2, Nop, Immediate),
    (0x04, Nop, ZeroPage),
    (0x44, Nop, ZeroPage),
    (0x64, Nop, ZeroPage),
    (0x14, Nop, ZeroPageX),
    (0x34, Nop, ZeroPageX),
    (0x54, Nop, ZeroPageX),
    (0x74, Nop, ZeroPageX),
    (0xD4, Nop, ZeroPageX),
    (0xF4, Nop, ZeroPageX),
    (0x0C, Nop, Absolute),
    (0x1C, Nop, AbsoluteX),
    (0x3C, Nop, AbsoluteX),
    (0x5C, Nop, AbsoluteX),
    (0x7C, Nop, AbsoluteX),
    (0xDC, Nop, AbsoluteX),
    (0xFC, Nop, AbsoluteX),
    (0xA7, Lax, ZeroPage),
    (0xB7, Lax, ZeroPageY),
    (0xAF, Lax, Absolute),
    (0xBF, Lax, AbsoluteY),
    (0xA3, Lax, IndexedIndirect),
    (0xB3, Lax, IndirectIndexed),
    (0x87, Sax, ZeroPage),
    (0x97, Sax, ZeroPageY),
    (0x8F, Sax, Absolute),
    (0x83, Sax, IndexedIndirect),
    (0xEB, Sbc, Immediate),
    (0x02, Jam, Implied),
    (0x12, Jam, Implied),
    (0x22, Jam, Implied),
    (0x32, Jam, Implied),
    (0x42, Jam, Implied),
    (0x52, Jam, Implied),
    (0x62, Jam, Implied),
    (0x72, Jam, Implied),
    (0x92, Jam, Implied),
    (0xB2, Jam, Implied),
    (0xD2, Jam, Implied),
    (0xF2, Jam, Implied),
];

/// The combined read-modify-write opcodes share one layout per column:
/// (zp,X) $x3, zp $x7, abs $xF, (zp),Y $x3+$10, zp,X $x7+$10, abs,Y $xB+$10,
/// abs,X $xF+$10.
const COMBINED_RMW: &[(u8, Instruction)] = &[
    (0x00, Slo),
    (0x20, Rla),
    (0x40, Sre),
    (0x60, Rra),
    (0xC0, Dcp),
    (0xE0, Isc),
];

const COMBINED_RMW_MODES: &[(u8, AddressingMode)] = &[
    (0x03, IndexedIndirect),
    (0x07, ZeroPage),
    (0x0F, Absolute),
    (0x13, IndirectIndexed),
    (0x17, ZeroPageX),
    (0x1B, AbsoluteY),
    (0x1F, AbsoluteX),
];

pub type OpcodeTable = [Option<Opcode>; 256];

fn build_table() -> OpcodeTable {
    let mut table: OpcodeTable = [None; 256];

    let mut insert = |code: u8, instruction, mode, documented| {
        debug_assert!(table[code as usize].is_none(), "duplicate opcode ${code:02X}");
        table[code as usize] = Some(Opcode {
            code,
            instruction,
            mode,
            documented,
        });
    };

    for &(code, instruction, mode) in DOCUMENTED {
        insert(code, instruction, mode, true);
    }
    for &(code, instruction, mode) in UNDOCUMENTED {
        insert(code, instruction, mode, false);
    }
    for &(base, instruction) in COMBINED_RMW {
        for &(offset, mode) in COMBINED_RMW_MODES {
            insert(base | offset, instruction, mode, false);
        }
    }

    table
}

pub fn opcode_table() -> &'static OpcodeTable {
    static TABLE: OnceLock<OpcodeTable> = OnceLock::new();
    TABLE.get_or_init(build_table)
}

pub fn decode(code: u8) -> Option<Opcode> {
    opcode_table()[code as usize]
}
