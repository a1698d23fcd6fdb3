//! Display sink that forwards frames to every connected browser.

use super::server::WebServer;
use crate::display::{DisplaySink, Frame, SinkError};
use std::sync::Arc;

pub struct BroadcastSink {
    server: Arc<WebServer>,
}

impl BroadcastSink {
    pub fn new(server: Arc<WebServer>) -> Self {
        Self { server }
    }
}

impl DisplaySink for BroadcastSink {
    fn name(&self) -> &'static str {
        "web"
    }

    fn show(&mut self, frame: &Frame) -> Result<(), SinkError> {
        // Nobody listening is not a failure; the next client picks up the next frame.
        let _ = self.server.frames_tx.send(frame.text.clone());
        Ok(())
    }
}
