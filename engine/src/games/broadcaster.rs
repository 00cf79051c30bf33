use std::future::Future;

use super::snake::{GameSignal, TickReport};

/// Presentation-side receiver of simulation output. The core never draws;
/// it hands each finished tick and each out-of-tick signal to a broadcaster.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_tick(&self, report: TickReport) -> impl Future<Output = ()> + Send;

    fn broadcast_signal(&self, signal: GameSignal) -> impl Future<Output = ()> + Send;
}
