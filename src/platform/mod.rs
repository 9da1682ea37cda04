//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame on web)
//! - Wall-clock time

#[cfg(target_arch = "wasm32")]
mod raf;

#[cfg(target_arch = "wasm32")]
pub use raf::{FrameCallback, RafScheduler};

/// Handle of a scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Source of one-shot "next frame" callbacks
pub trait FrameScheduler {
    /// Schedule the next frame; `None` if the host refused
    fn request(&mut self) -> Option<FrameHandle>;
    /// Cancel a scheduled frame; unknown handles are ignored
    fn cancel(&mut self, handle: FrameHandle);
}

/// Scheduler driven by hand (tests, headless runs)
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: Option<FrameHandle>,
    next_handle: i32,
    /// Total `request` calls
    pub requested: u32,
    /// Total `cancel` calls that hit the pending frame
    pub cancelled: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A frame is waiting to be delivered
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the pending frame, as the host would when firing it
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request(&mut self) -> Option<FrameHandle> {
        self.next_handle += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending = Some(handle);
        Some(handle)
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

/// Current time in milliseconds (same basis as animation frame timestamps)
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
