//! # Boundary — Collaborator Contracts
//!
//! The FIFO's neighbours (a sample packer upstream, a streaming adapter
//! downstream) only ever meet it through these two traits. They pull or
//! receive one fixed-width word at a time; framing is their concern.

/// Upstream collaborator: yields the next word when it has one ready.
pub trait WordSource {
    fn next_word(&mut self) -> Option<u64>;
}

/// Downstream collaborator: receives popped words in write order.
pub trait WordSink {
    fn accept(&mut self, word: u64);
}

impl<I> WordSource for I
where
    I: Iterator<Item = u64>,
{
    #[inline]
    fn next_word(&mut self) -> Option<u64> {
        self.next()
    }
}

impl WordSink for Vec<u64> {
    #[inline]
    fn accept(&mut self, word: u64) {
        self.push(word);
    }
}
