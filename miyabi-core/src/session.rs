//! Rally session: the view state machine and the stamp sequence.
//!
//! A session owns which screen is visible, the overlay fields, and the
//! in-memory stamp set. Events that do not apply in the current context are
//! ignored and report `false`.
use std::rc::Rc;

use crate::catalog::{Catalog, Checkpoint, CheckpointId, Prize};
use crate::fortune::FortuneClient;
use crate::progress::{ProgressStorage, ProgressStore, StampSet};
use crate::view::{NavTarget, View};

/// Fortune text shown after a stamp, with the checkpoint it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct FortuneResult {
    pub text: String,
    pub checkpoint: Checkpoint,
}

/// A simulated scan waiting for its decode delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingScan {
    id: u64,
}

impl PendingScan {
    #[must_use]
    pub const fn id(self) -> u64 {
        self.id
    }
}

/// Handle on one run of the stamp sequence for a scanned checkpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct StampTicket {
    generation: u64,
    checkpoint: Checkpoint,
}

impl StampTicket {
    #[must_use]
    pub const fn checkpoint(&self) -> &Checkpoint {
        &self.checkpoint
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RallySession {
    catalog: Rc<Catalog>,
    stamps: StampSet,
    view: View,
    selected_checkpoint: Option<Checkpoint>,
    scanned_checkpoint: Option<Checkpoint>,
    fortune_result: Option<FortuneResult>,
    is_loading_fortune: bool,
    next_scan_id: u64,
    pending_scan: Option<u64>,
    scan_generation: u64,
    stamp_in_flight: Option<u64>,
}

impl RallySession {
    /// Fresh session on the intro screen. Ids unknown to the catalog are dropped.
    #[must_use]
    pub fn new(catalog: Rc<Catalog>, stamps: StampSet) -> Self {
        let stamps = stamps.retain_known(&catalog);
        Self {
            catalog,
            stamps,
            view: View::Intro,
            selected_checkpoint: None,
            scanned_checkpoint: None,
            fortune_result: None,
            is_loading_fortune: false,
            next_scan_id: 0,
            pending_scan: None,
            scan_generation: 0,
            stamp_in_flight: None,
        }
    }

    /// Session seeded from persisted progress.
    #[must_use]
    pub fn restore<S: ProgressStorage>(catalog: Rc<Catalog>, store: &ProgressStore<S>) -> Self {
        let stamps = store.load();
        Self::new(catalog, stamps)
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn shared_catalog(&self) -> Rc<Catalog> {
        Rc::clone(&self.catalog)
    }

    #[must_use]
    pub const fn stamps(&self) -> &StampSet {
        &self.stamps
    }

    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub const fn selected_checkpoint(&self) -> Option<&Checkpoint> {
        self.selected_checkpoint.as_ref()
    }

    #[must_use]
    pub const fn scanned_checkpoint(&self) -> Option<&Checkpoint> {
        self.scanned_checkpoint.as_ref()
    }

    #[must_use]
    pub const fn fortune_result(&self) -> Option<&FortuneResult> {
        self.fortune_result.as_ref()
    }

    #[must_use]
    pub const fn is_loading_fortune(&self) -> bool {
        self.is_loading_fortune
    }

    /// Whether a demo scan is waiting for its decode delay.
    #[must_use]
    pub const fn scan_pending(&self) -> bool {
        self.pending_scan.is_some()
    }

    #[must_use]
    pub fn stamped_count(&self) -> u32 {
        self.stamps.count()
    }

    #[must_use]
    pub fn is_stamped(&self, id: CheckpointId) -> bool {
        self.stamps.contains(id)
    }

    #[must_use]
    pub const fn shows_nav_bar(&self) -> bool {
        self.view.shows_nav_bar()
    }

    pub fn unlocked_prizes(&self) -> impl Iterator<Item = &Prize> {
        self.catalog.unlocked_prizes(self.stamps.count())
    }

    /// Leave the intro for the stamp book.
    pub fn start(&mut self) -> bool {
        if self.view != View::Intro {
            return self.ignore("start");
        }
        self.view = View::StampBook;
        true
    }

    /// Switch tabs from the navigation bar.
    pub fn navigate(&mut self, target: NavTarget) -> bool {
        if !self.view.shows_nav_bar() {
            return self.ignore("navigate");
        }
        self.view = target.into();
        true
    }

    pub fn open_scanner(&mut self) -> bool {
        if matches!(self.view, View::Intro | View::Scanner) {
            return self.ignore("open_scanner");
        }
        self.view = View::Scanner;
        true
    }

    pub fn close_scanner(&mut self) -> bool {
        if self.view != View::Scanner {
            return self.ignore("close_scanner");
        }
        self.view = View::StampBook;
        true
    }

    /// Start a simulated scan. The caller waits
    /// [`SCAN_DELAY_MS`](crate::constants::SCAN_DELAY_MS) and then calls
    /// [`resolve_scan`](Self::resolve_scan). A newer request supersedes an
    /// older one.
    pub fn request_scan(&mut self) -> Option<PendingScan> {
        if self.view != View::Scanner {
            self.ignore("request_scan");
            return None;
        }
        self.next_scan_id += 1;
        self.pending_scan = Some(self.next_scan_id);
        Some(PendingScan {
            id: self.next_scan_id,
        })
    }

    /// Drop a pending scan so its resolution is ignored.
    pub fn cancel_scan(&mut self, pending: PendingScan) -> bool {
        if self.pending_scan != Some(pending.id) {
            return false;
        }
        self.pending_scan = None;
        true
    }

    /// Finish a simulated scan: pick the target, open the stamp overlay and
    /// return to the stamp book. Applies even if the scanner was closed
    /// meanwhile.
    pub fn resolve_scan(&mut self, pending: PendingScan) -> Option<&Checkpoint> {
        if self.pending_scan != Some(pending.id) {
            log::debug!("ignoring superseded scan {}", pending.id);
            return None;
        }
        self.pending_scan = None;
        let target = self.next_scan_target().clone();
        log::debug!("scan resolved to checkpoint {}", target.id);
        self.scan_generation += 1;
        self.scanned_checkpoint = Some(target);
        self.view = View::StampBook;
        self.scanned_checkpoint.as_ref()
    }

    /// First catalog entry not yet stamped, or the first entry once all are.
    #[must_use]
    pub fn next_scan_target(&self) -> &Checkpoint {
        self.catalog
            .checkpoints()
            .iter()
            .find(|cp| !self.stamps.contains(cp.id))
            .unwrap_or_else(|| self.catalog.first())
    }

    /// Open the detail sheet. Unknown ids leave the state untouched.
    pub fn select_checkpoint(&mut self, id: CheckpointId) -> bool {
        let Some(checkpoint) = self.catalog.checkpoint(id).cloned() else {
            log::debug!("select_checkpoint: unknown id {id}");
            return false;
        };
        self.selected_checkpoint = Some(checkpoint);
        true
    }

    pub fn close_detail(&mut self) -> bool {
        self.selected_checkpoint.take().is_some()
    }

    pub fn close_fortune(&mut self) -> bool {
        self.fortune_result.take().is_some()
    }

    /// Ticket for stamping the scanned checkpoint, if the stamp overlay is
    /// open and no stamp is already running.
    #[must_use]
    pub fn stamp_ticket(&self) -> Option<StampTicket> {
        if self.stamp_in_flight.is_some() {
            return None;
        }
        self.scanned_checkpoint
            .as_ref()
            .map(|checkpoint| StampTicket {
                generation: self.scan_generation,
                checkpoint: checkpoint.clone(),
            })
    }

    /// Record the stamp and mark the fortune as loading. The write reaches
    /// storage before this returns, so it precedes any fortune request.
    pub fn begin_stamp<S: ProgressStorage>(
        &mut self,
        store: &ProgressStore<S>,
        ticket: &StampTicket,
    ) -> bool {
        let current = self.scanned_checkpoint.is_some() && ticket.generation == self.scan_generation;
        if !current || self.stamp_in_flight.is_some() {
            return self.ignore("begin_stamp");
        }
        let id = ticket.checkpoint.id;
        self.stamps = store.mark_stamped(&self.stamps, id);
        log::info!("stamped checkpoint {id} ({} total)", self.stamps.count());
        self.is_loading_fortune = true;
        self.stamp_in_flight = Some(ticket.generation);
        true
    }

    /// Show the fortune for a running stamp and close its stamp overlay.
    ///
    /// Results are applied even if the user navigated away meanwhile; a
    /// ticket that is not the running stamp is discarded.
    pub fn finish_stamp(&mut self, ticket: &StampTicket, text: String) -> bool {
        if self.stamp_in_flight != Some(ticket.generation) {
            log::debug!("discarding fortune for stale stamp {}", ticket.generation);
            return false;
        }
        self.stamp_in_flight = None;
        self.is_loading_fortune = false;
        self.fortune_result = Some(FortuneResult {
            text,
            checkpoint: ticket.checkpoint.clone(),
        });
        // A scan resolved during the fetch owns the overlay now.
        if ticket.generation == self.scan_generation {
            self.scanned_checkpoint = None;
        }
        true
    }

    /// Run the whole stamp sequence for the scanned checkpoint: record,
    /// fetch one fortune, show it.
    pub async fn complete_stamp<S, F>(&mut self, store: &ProgressStore<S>, client: &F) -> bool
    where
        S: ProgressStorage,
        F: FortuneClient + ?Sized,
    {
        let Some(ticket) = self.stamp_ticket() else {
            return self.ignore("complete_stamp");
        };
        if !self.begin_stamp(store, &ticket) {
            return false;
        }
        let text = client.fetch_fortune(&ticket.checkpoint.name).await;
        self.finish_stamp(&ticket, text)
    }

    fn ignore(&self, event: &str) -> bool {
        log::debug!("{event} ignored on {:?}", self.view);
        false
    }
}
