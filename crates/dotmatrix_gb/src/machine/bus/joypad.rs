use crate::cpu::Interrupt;

/// Console buttons as seen by the joypad register (P1, 0xFF00).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Button {
    Right,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start,
}

impl Button {
    /// Bit in the active group's low nibble, and whether the button belongs
    /// to the action group (P1 bit 5) rather than the d-pad (P1 bit 4).
    fn line(self) -> (u8, bool) {
        match self {
            Button::Right => (0x01, false),
            Button::Left => (0x02, false),
            Button::Up => (0x04, false),
            Button::Down => (0x08, false),
            Button::A => (0x01, true),
            Button::B => (0x02, true),
            Button::Select => (0x04, true),
            Button::Start => (0x08, true),
        }
    }
}

/// P1 select bits plus host-supplied pressed state. Pressed bits are 1 here
/// and read back inverted.
pub(super) struct Joypad {
    select: u8,
    buttons: u8,
    dpad: u8,
    /// A press happened since the bus last reported a STOP wake-up.
    wake: bool,
}

impl Joypad {
    pub(super) fn new() -> Self {
        Self {
            select: 0x30,
            buttons: 0,
            dpad: 0,
            wake: false,
        }
    }

    pub(super) fn read(&self) -> u8 {
        let mut low = 0x0F;
        if self.select & 0x10 == 0 {
            low &= !self.dpad;
        }
        if self.select & 0x20 == 0 {
            low &= !self.buttons;
        }
        0xC0 | self.select | (low & 0x0F)
    }

    pub(super) fn write(&mut self, value: u8) {
        self.select = value & 0x30;
    }

    pub(super) fn set(&mut self, button: Button, pressed: bool, if_reg: &mut u8) {
        let (mask, action) = button.line();
        let group = if action {
            &mut self.buttons
        } else {
            &mut self.dpad
        };
        let was_pressed = *group & mask != 0;
        if pressed {
            *group |= mask;
        } else {
            *group &= !mask;
        }
        if pressed && !was_pressed {
            *if_reg |= Interrupt::Joypad.mask();
            self.wake = true;
        }
    }

    pub(super) fn take_wake(&mut self) -> bool {
        std::mem::take(&mut self.wake)
    }
}
