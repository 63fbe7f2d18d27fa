//! Cross-thread highlight requests
//!
//! Any thread may ask for a toolpath line to be highlighted through a
//! [`HighlightHandle`]. The render thread drains the matching
//! [`HighlightQueue`] once per frame. Each request is received exactly once.

use tokio::sync::mpsc;
use tracing::trace;

/// Sending side; cheap to clone and usable from any thread
#[derive(Debug, Clone)]
pub struct HighlightHandle {
    tx: mpsc::UnboundedSender<usize>,
}

impl HighlightHandle {
    /// Queue a 1-based source line for highlighting.
    ///
    /// Returns `false` if the owning path has been dropped.
    pub fn highlight_line(&self, line_number: usize) -> bool {
        self.tx.send(line_number).is_ok()
    }
}

/// Receiving side, owned by the item that draws the path
#[derive(Debug)]
pub struct HighlightQueue {
    tx: mpsc::UnboundedSender<usize>,
    rx: mpsc::UnboundedReceiver<usize>,
}

impl Default for HighlightQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub fn handle(&self) -> HighlightHandle {
        HighlightHandle {
            tx: self.tx.clone(),
        }
    }

    /// Number of requests waiting
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Take every request queued so far.
    ///
    /// Requests sent while draining are left for the next call.
    pub fn drain(&mut self) -> Vec<usize> {
        let pending = self.rx.len();
        let mut lines = Vec::with_capacity(pending);
        for _ in 0..pending {
            match self.rx.try_recv() {
                Ok(line) => lines.push(line),
                Err(_) => break,
            }
        }
        if !lines.is_empty() {
            trace!("Drained {} highlight requests", lines.len());
        }
        lines
    }
}
