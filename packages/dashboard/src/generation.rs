//! Load tagging for list views.
//!
//! Each load takes a [`Ticket`] from its view's [`Generation`]. When the
//! response arrives it is applied only if no newer load was started in the
//! meantime; otherwise it belongs to a superseded filter and is dropped.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Generation {
    pub fn next(&mut self) -> Ticket {
        self.0 += 1;
        Ticket(self.0)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.0 == ticket.0
    }
}
