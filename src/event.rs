//! Notifications posted from a plot to the UI thread.
//!
//! Plots never redraw synchronously. They post a [`PlotEvent`] to an
//! [`EventSink`] and the UI thread acts on it during its next tick.

use std::sync::mpsc;

/// Notification raised by a plot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotEvent {
    /// The series name changed to the contained value.
    NameChanged(String),
    /// New data was drained and the plot should be repainted.
    Redraw,
}

/// Destination for plot events.
///
/// Implementations must not block and must be callable from any thread.
pub trait EventSink: Send + Sync {
    /// Post an event. Delivery is best-effort.
    fn post(&self, event: PlotEvent);
}

impl EventSink for mpsc::Sender<PlotEvent> {
    fn post(&self, event: PlotEvent) {
        if self.send(event).is_err() {
            tracing::trace!("plot event receiver dropped");
        }
    }
}

/// Create a channel-backed sink and its receiving end.
pub fn channel() -> (mpsc::Sender<PlotEvent>, mpsc::Receiver<PlotEvent>) {
    mpsc::channel()
}
