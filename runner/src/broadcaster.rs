use snake_duel_engine::games::GameBroadcaster;
use snake_duel_engine::games::snake::{GameSignal, TickReport};
use tokio::sync::mpsc;

#[derive(Clone, Debug)]
pub enum SessionEvent {
    Tick(TickReport),
    Signal(GameSignal),
}

/// Forwards everything the session emits to the autopilot task.
#[derive(Clone)]
pub struct ChannelBroadcaster {
    sender: mpsc::UnboundedSender<SessionEvent>,
}

impl ChannelBroadcaster {
    pub fn new(sender: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self { sender }
    }
}

impl GameBroadcaster for ChannelBroadcaster {
    async fn broadcast_tick(&self, report: TickReport) {
        let _ = self.sender.send(SessionEvent::Tick(report));
    }

    async fn broadcast_signal(&self, signal: GameSignal) {
        let _ = self.sender.send(SessionEvent::Signal(signal));
    }
}
