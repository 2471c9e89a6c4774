use crate::bmp::{self, DecodeError};
use crate::session::Session;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// A handle to one open document. Clones share the same session; every access goes through
/// the single per-document lock.
#[derive(Clone)]
pub struct Document {
    session: Arc<Mutex<Session>>,
}
impl Document {
    pub fn new(session: Session) -> Self {
        Document {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Lock the session. Hold the guard for the whole of one input event.
    pub fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock()
    }

    /// Replace the content with a decoded bitmap. On error the document is left untouched.
    pub fn open(&self, bytes: &[u8]) -> Result<(), DecodeError> {
        let raster = bmp::decode(bytes)?;
        self.lock().load(raster);
        Ok(())
    }

    /// Encode the current content as a bitmap file.
    pub fn save(&self) -> Vec<u8> {
        bmp::encode(self.lock().raster())
    }
}
