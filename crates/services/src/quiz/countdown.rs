use super::session::AdvanceTicket;

/// What a countdown tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    Remaining(u32),
    Fire(AdvanceTicket),
    Idle,
}

/// One-shot auto-advance timer, driven by whole-second ticks.
#[derive(Debug, Clone)]
pub struct Countdown {
    ticket: AdvanceTicket,
    remaining: u32,
    fired: bool,
}

impl Countdown {
    #[must_use]
    pub fn new(ticket: AdvanceTicket, secs: u32) -> Self {
        Self {
            ticket,
            remaining: secs.max(1),
            fired: false,
        }
    }

    /// Seconds left before firing; 0 once fired.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        if self.fired { 0 } else { self.remaining }
    }

    #[must_use]
    pub fn ticket(&self) -> AdvanceTicket {
        self.ticket
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> CountdownTick {
        if self.fired {
            return CountdownTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.fired = true;
            return CountdownTick::Fire(self.ticket);
        }
        CountdownTick::Remaining(self.remaining)
    }
}
