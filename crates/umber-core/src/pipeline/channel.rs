//! Bounded, closable queues coupling the pipeline stages.
//!
//! Queues are MPMC so a pool of transform workers can share one input. A
//! queue closes when its last sender is dropped; receivers then drain the
//! remaining buffered items and see the channel end. Capacities are fixed at
//! construction — a full queue blocks the sender, an empty open queue blocks
//! the receiver. Both are backpressure, not errors.

use flume::{Receiver, Sender};

/// Create a bounded channel pair with the given capacity.
pub fn bounded<T>(capacity: usize) -> (Sender<T>, Receiver<T>) {
    flume::bounded(capacity)
}
