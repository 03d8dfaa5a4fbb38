//! Port trait for queueing requests on the shared bus.
//!
//! A cache's only outbound dependency is the ability to queue a request for
//! later arbitration; it never holds a bus handle. The simulator owns the bus
//! and the caches and connects them per call, so no component stores pointers
//! into another.

use super::bus::BusRequest;

/// Write side of the shared bus as seen by a cache controller.
pub trait BusPort {
    /// Queues `req` for arbitration in a later bus cycle.
    fn enqueue(&mut self, req: BusRequest);
}

/// Requests can be collected into a plain vector and drained into the bus
/// afterwards; the bus uses this while it is itself mid-tick.
impl BusPort for Vec<BusRequest> {
    fn enqueue(&mut self, req: BusRequest) {
        self.push(req);
    }
}
