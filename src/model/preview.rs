//! Media preview overlay state machine
//!
//! Exactly one preview session may be open at a time. While a session is
//! open, exactly one image is in flight: every navigation hands out a load
//! ticket with a fresh generation number and cancels the previous loader, so
//! a superseded load can never touch the current state.

use tokio::task::AbortHandle;

use super::types::{ActiveSection, MediaImage, PreviewRequest};

/// How long a single image load may stay pending before the loading
/// indicator is cleared regardless of outcome.
pub const LOAD_TIMEOUT_SECS: u64 = 10;

/// Loading progress of the image at the current index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready { byte_len: u64 },
    Failed,
}

/// Terminal outcome reported by a loader task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { byte_len: u64 },
    Failed,
    TimedOut,
}

/// Handed to the controller whenever a new image must be fetched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub index: usize,
    pub src: String,
}

struct PreviewSession {
    images: Vec<MediaImage>,
    current_index: usize,
    load_state: LoadState,
    generation: u64,
    load_abort: Option<AbortHandle>,
    prior_focus: ActiveSection,
}

/// Render-ready snapshot of the open session.
#[derive(Clone, Debug)]
pub struct PreviewView {
    pub images: Vec<MediaImage>,
    pub current_index: usize,
    pub load_state: LoadState,
}

impl PreviewView {
    pub fn current(&self) -> &MediaImage {
        &self.images[self.current_index]
    }

    pub fn has_navigation(&self) -> bool {
        self.images.len() > 1
    }

    pub fn prev_enabled(&self) -> bool {
        self.current_index > 0
    }

    pub fn next_enabled(&self) -> bool {
        self.current_index + 1 < self.images.len()
    }
}

/// The singleton overlay. `None` session means Closed.
pub struct MediaPreview {
    session: Option<PreviewSession>,
    next_generation: u64,
}

impl Default for MediaPreview {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaPreview {
    pub fn new() -> Self {
        Self { session: None, next_generation: 0 }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Opens a session at index 0, remembering where focus should return.
    /// Re-opening while already open supersedes the session but keeps the
    /// original focus target.
    pub fn open(&mut self, request: PreviewRequest, prior_focus: ActiveSection) -> LoadTicket {
        let prior_focus = match self.session.take() {
            Some(old) => {
                cancel(old.load_abort);
                old.prior_focus
            }
            None => prior_focus,
        };
        self.session = Some(PreviewSession {
            images: request.into_images(),
            current_index: 0,
            load_state: LoadState::Loading,
            generation: 0,
            load_abort: None,
            prior_focus,
        });
        self.issue_ticket(0)
    }

    /// Jumps to `index`. Out-of-range indices (and a closed preview) are a
    /// no-op; otherwise the pending load is cancelled and a new ticket issued.
    pub fn show_image(&mut self, index: usize) -> Option<LoadTicket> {
        let len = self.session.as_ref()?.images.len();
        if index >= len {
            return None;
        }
        Some(self.issue_ticket(index))
    }

    /// Relative navigation for the prev/next controls and arrow keys.
    pub fn navigate(&mut self, delta: isize) -> Option<LoadTicket> {
        let current = self.session.as_ref()?.current_index;
        let target = current.checked_add_signed(delta)?;
        self.show_image(target)
    }

    fn issue_ticket(&mut self, index: usize) -> LoadTicket {
        self.next_generation += 1;
        let generation = self.next_generation;

        let session = self.session.as_mut().expect("ticket issued without session");
        cancel(session.load_abort.take());
        session.current_index = index;
        session.load_state = LoadState::Loading;
        session.generation = generation;

        LoadTicket {
            generation,
            index,
            src: session.images[index].src.clone(),
        }
    }

    /// Registers the loader task driving `generation` so a later navigation
    /// or close can cancel it. Stale generations are ignored.
    pub fn attach_loader(&mut self, generation: u64, handle: AbortHandle) {
        if let Some(session) = self.session.as_mut() {
            if session.generation == generation && session.load_state == LoadState::Loading {
                session.load_abort = Some(handle);
            }
        }
    }

    /// A loader finished. Only the outcome for the current generation is
    /// applied; anything else belongs to a superseded load or a closed
    /// session and is dropped.
    pub fn finish_load(&mut self, generation: u64, outcome: LoadOutcome) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.generation != generation || session.load_state != LoadState::Loading {
            return;
        }
        session.load_abort = None;
        session.load_state = match outcome {
            LoadOutcome::Loaded { byte_len } => LoadState::Ready { byte_len },
            LoadOutcome::Failed | LoadOutcome::TimedOut => LoadState::Failed,
        };
    }

    /// Closes the session, cancelling any in-flight load, and returns the
    /// section that held focus before the preview opened.
    pub fn close(&mut self) -> Option<ActiveSection> {
        let session = self.session.take()?;
        cancel(session.load_abort);
        Some(session.prior_focus)
    }

    pub fn view(&self) -> Option<PreviewView> {
        self.session.as_ref().map(|s| PreviewView {
            images: s.images.clone(),
            current_index: s.current_index,
            load_state: s.load_state,
        })
    }
}

fn cancel(handle: Option<AbortHandle>) {
    if let Some(handle) = handle {
        handle.abort();
    }
}
