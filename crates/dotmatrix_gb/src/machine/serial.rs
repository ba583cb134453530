use crate::cpu::Interrupt;

/// Serial port (SB/SC) without a link partner.
///
/// A transfer started with the internal clock (SC bits 7 and 0 set)
/// completes immediately: SB is appended to `output`, SB then reads 0xFF
/// (nothing was shifted in), SC bit 7 clears and the serial interrupt is
/// requested. Test ROMs report their results this way.
#[derive(Default)]
pub(crate) struct Serial {
    sb: u8,
    sc: u8,
    output: Vec<u8>,
}

impl Serial {
    pub(super) fn apply_boot_state(&mut self) {
        self.sb = 0x00;
        self.sc = 0x7E;
    }

    pub(super) fn read_sb(&self) -> u8 {
        self.sb
    }

    pub(super) fn read_sc(&self) -> u8 {
        self.sc | 0x7E
    }

    pub(super) fn write_sb(&mut self, value: u8) {
        self.sb = value;
    }

    pub(super) fn write_sc(&mut self, value: u8, if_reg: &mut u8) {
        self.sc = value;
        if self.sc & 0x81 == 0x81 {
            self.output.push(self.sb);
            log::trace!("GB serial: sent 0x{:02X}", self.sb);
            self.sb = 0xFF;
            self.sc &= !0x80;
            *if_reg |= Interrupt::Serial.mask();
        }
    }

    pub(crate) fn output(&self) -> &[u8] {
        &self.output
    }
}
