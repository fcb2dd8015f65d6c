//! Delayed placement timer
//!
//! A [`PlacementTicket`] remembers the epoch it was issued in. The queue only
//! tracks time; whether a fired ticket still applies is up to the game.

/// Handle for one pending delayed placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementTicket {
    pub epoch: u64,
    pub level: u32,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    remaining: f32,
    ticket: PlacementTicket,
}

/// Pending tickets, fired in the order they fall due
#[derive(Debug, Clone, Default)]
pub struct DelayQueue {
    pending: Vec<Pending>,
}

impl DelayQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `ticket` after `delay` seconds of [`advance`](Self::advance)
    pub fn schedule(&mut self, ticket: PlacementTicket, delay: f32) {
        self.pending.push(Pending {
            remaining: delay,
            ticket,
        });
    }

    /// Move time forward and return every ticket that fell due
    pub fn advance(&mut self, dt: f32) -> Vec<PlacementTicket> {
        for p in &mut self.pending {
            p.remaining -= dt;
        }
        let (mut due, waiting): (Vec<Pending>, Vec<Pending>) =
            self.pending.drain(..).partition(|p| p.remaining <= 0.0);
        self.pending = waiting;
        // Earliest deadline first; stable for equal deadlines
        due.sort_by(|a, b| a.remaining.total_cmp(&b.remaining));
        due.into_iter().map(|p| p.ticket).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
