use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock source for the MBC3 real-time clock, in whole seconds.
pub trait RtcClock {
    fn now(&self) -> u64;
}

/// Host system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl RtcClock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

const SECONDS_PER_DAY: u64 = 86_400;
/// The day counter is 9 bits wide.
const DAY_LIMIT: u64 = 512;

const DH_DAY_BIT8: u8 = 0x01;
const DH_HALT: u8 = 0x40;
const DH_CARRY: u8 = 0x80;

/// MBC3 clock registers 0x08-0x0C.
///
/// Time is derived from an epoch: the counter value is `now - epoch` seconds
/// while running. Halting freezes the counter at its current value.
#[derive(Clone, Debug)]
pub(super) struct Rtc {
    epoch: u64,
    halted_at: Option<u64>,
    carry: bool,
    /// Seconds, minutes, hours, day low, day high as last latched.
    latched: [u8; 5],
    /// The last write to the latch register was 0x00.
    latch_armed: bool,
}

impl Rtc {
    pub(super) fn new(now: u64) -> Self {
        Self {
            epoch: now,
            halted_at: None,
            carry: false,
            latched: [0; 5],
            latch_armed: false,
        }
    }

    pub(super) fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(super) fn set_epoch(&mut self, epoch: u64) {
        self.epoch = epoch;
    }

    fn elapsed(&self, now: u64) -> u64 {
        self.halted_at.unwrap_or_else(|| now.wrapping_sub(self.epoch))
    }

    /// Handle a write to 0x6000-0x7FFF. Writing 0x00 then 0x01 copies the
    /// live counter into the readable registers.
    pub(super) fn write_latch(&mut self, value: u8, now: u64) {
        if self.latch_armed && value == 0x01 {
            self.latch(now);
        }
        self.latch_armed = value == 0x00;
    }

    fn latch(&mut self, now: u64) {
        self.latched = self.live_fields(now);
        self.carry = self.latched[4] & DH_CARRY != 0;
        log::debug!(
            "GB MBC3 RTC latch: day={} {:02}:{:02}:{:02} carry={}",
            u16::from(self.latched[3]) | (u16::from(self.latched[4] & DH_DAY_BIT8) << 8),
            self.latched[2],
            self.latched[1],
            self.latched[0],
            self.carry
        );
    }

    /// Seconds, minutes, hours, day low and day high of the running counter.
    fn live_fields(&self, now: u64) -> [u8; 5] {
        let total = self.elapsed(now);
        let mut days = total / SECONDS_PER_DAY;
        let mut carry = self.carry;
        if days >= DAY_LIMIT {
            carry = true;
            days %= DAY_LIMIT;
        }
        let secs_of_day = total % SECONDS_PER_DAY;

        let mut day_high = ((days >> 8) as u8) & DH_DAY_BIT8;
        if self.halted_at.is_some() {
            day_high |= DH_HALT;
        }
        if carry {
            day_high |= DH_CARRY;
        }

        [
            (secs_of_day % 60) as u8,
            (secs_of_day / 60 % 60) as u8,
            (secs_of_day / 3600) as u8,
            days as u8,
            day_high,
        ]
    }

    pub(super) fn read(&self, register: u8) -> u8 {
        match register {
            0x08..=0x0C => self.latched[usize::from(register - 0x08)],
            _ => 0xFF,
        }
    }

    /// Write one clock register. The running counter is split into fields,
    /// the written field replaced, and the epoch moved to match.
    pub(super) fn write(&mut self, register: u8, value: u8, now: u64) {
        let index = match register {
            0x08..=0x0C => usize::from(register - 0x08),
            _ => return,
        };
        let masks = [0x3F, 0x3F, 0x1F, 0xFF, DH_DAY_BIT8 | DH_HALT | DH_CARRY];
        let value = value & masks[index];
        self.latched[index] = value;

        let mut fields = self.live_fields(now);
        fields[index] = value;
        let [seconds, minutes, hours, day_low, day_high] = fields.map(u64::from);
        let days = day_low | ((day_high & u64::from(DH_DAY_BIT8)) << 8);
        let total = days * SECONDS_PER_DAY + hours * 3600 + minutes * 60 + seconds;

        self.carry = fields[4] & DH_CARRY != 0;
        if fields[4] & DH_HALT != 0 {
            self.halted_at = Some(total);
        } else {
            self.halted_at = None;
            self.epoch = now.wrapping_sub(total);
        }
    }
}
