use super::{decode_cb, Bus, CbInstruction, Cpu, Flags, Operand};

impl Cpu {
    /// Handle CB-prefixed instructions (bit operations, shifts, and rotates).
    ///
    /// The prefix byte has been consumed; the second byte is fetched here
    /// and looked up in the CB table. The returned cost includes the prefix.
    pub(super) fn step_cb<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let opcode = self.fetch8(bus);
        self.execute_cb(bus, decode_cb(opcode))
    }

    fn execute_cb<B: Bus>(&mut self, bus: &mut B, instr: CbInstruction) -> u32 {
        match instr {
            CbInstruction::Shift(op, operand) => {
                let value = self.read_operand(bus, operand);
                let result = self.alu_shift(op, value);
                self.write_operand(bus, operand, result);
                if operand == Operand::HlIndirect {
                    16
                } else {
                    8
                }
            }
            CbInstruction::Bit(bit, operand) => {
                let value = self.read_operand(bus, operand);
                // C is preserved, H set, N cleared.
                self.regs.set_flag(Flags::Z, value & (1 << bit) == 0);
                self.regs.set_flag(Flags::N, false);
                self.regs.set_flag(Flags::H, true);
                if operand == Operand::HlIndirect {
                    12
                } else {
                    8
                }
            }
            CbInstruction::Res(bit, operand) => {
                let value = self.read_operand(bus, operand) & !(1 << bit);
                self.write_operand(bus, operand, value);
                if operand == Operand::HlIndirect {
                    16
                } else {
                    8
                }
            }
            CbInstruction::Set(bit, operand) => {
                let value = self.read_operand(bus, operand) | (1 << bit);
                self.write_operand(bus, operand, value);
                if operand == Operand::HlIndirect {
                    16
                } else {
                    8
                }
            }
        }
    }
}
