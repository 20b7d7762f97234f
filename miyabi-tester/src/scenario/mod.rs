use anyhow::{Context, Result, bail, ensure};
use async_trait::async_trait;
use miyabi_core::{
    Catalog, CheckpointId, FortuneClient, FortuneFailure, MemoryStorage, ProgressStore,
    RallySession, View, resolve_fortune,
};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

pub mod flows;

#[derive(Debug, Clone, Copy)]
pub struct ScenarioCtx {
    pub iteration: usize,
    pub verbose: bool,
}

/// A scripted walk through the rally.
#[async_trait(?Send)]
pub trait RallyScenario {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    async fn run(&self, ctx: &ScenarioCtx) -> Result<()>;
}

pub fn all_scenarios() -> Vec<Box<dyn RallyScenario>> {
    vec![
        Box::new(flows::Smoke),
        Box::new(flows::FullRally),
        Box::new(flows::FortuneOutage),
        Box::new(flows::Resume),
        Box::new(flows::CorruptStorage),
        Box::new(flows::SupersededScan),
    ]
}

pub fn get_scenario(name: &str) -> Option<Box<dyn RallyScenario>> {
    all_scenarios().into_iter().find(|s| s.name() == name)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    all_scenarios()
        .iter()
        .map(|s| (s.name(), s.description()))
        .collect()
}

/// Fortune client replaying queued outcomes, then repeating the last one.
#[derive(Debug)]
pub struct ScriptedFortune {
    outcomes: RefCell<VecDeque<Result<String, FortuneFailure>>>,
    last: RefCell<Result<String, FortuneFailure>>,
    calls: Cell<usize>,
}

impl ScriptedFortune {
    pub fn new(outcomes: impl IntoIterator<Item = Result<String, FortuneFailure>>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into_iter().collect()),
            last: RefCell::new(Err(FortuneFailure::Empty)),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait(?Send)]
impl FortuneClient for ScriptedFortune {
    async fn fetch_fortune(&self, location_name: &str) -> String {
        self.calls.set(self.calls.get() + 1);
        tokio::task::yield_now().await;
        if let Some(next) = self.outcomes.borrow_mut().pop_front() {
            *self.last.borrow_mut() = next;
        }
        let outcome = self.last.borrow().clone();
        log::debug!("scripted fortune for {location_name}: {outcome:?}");
        resolve_fortune(outcome)
    }
}

/// A session wired to in-memory storage, driven the way the web UI drives it.
pub struct RallyHarness {
    pub storage: MemoryStorage,
    pub store: ProgressStore<MemoryStorage>,
    pub session: RallySession,
}

impl RallyHarness {
    pub fn new() -> Result<Self> {
        Self::with_storage(MemoryStorage::new())
    }

    /// Restore a session from whatever `storage` already holds.
    pub fn with_storage(storage: MemoryStorage) -> Result<Self> {
        let catalog = Rc::new(Catalog::load_from_static().context("loading bundled catalog")?);
        let store = ProgressStore::new(storage.clone());
        let session = RallySession::restore(catalog, &store);
        Ok(Self {
            storage,
            store,
            session,
        })
    }

    /// Open the scanner, run one demo scan and return the checkpoint it found.
    pub async fn scan(&mut self) -> Result<CheckpointId> {
        if self.session.view() == View::Intro {
            self.session.start();
        }
        ensure!(self.session.open_scanner(), "scanner did not open");
        let pending = self
            .session
            .request_scan()
            .context("scan request refused")?;
        tokio::task::yield_now().await;
        let found = self
            .session
            .resolve_scan(pending)
            .context("scan did not resolve")?
            .id;
        ensure!(
            self.session.view() == View::StampBook,
            "scan should land on the stamp book, got {:?}",
            self.session.view()
        );
        Ok(found)
    }

    /// Press the stamp for the scanned checkpoint and wait for its fortune.
    pub async fn stamp(&mut self, client: &dyn FortuneClient) -> Result<String> {
        if !self.session.complete_stamp(&self.store, client).await {
            bail!("stamp sequence was refused");
        }
        ensure!(!self.session.is_loading_fortune(), "fortune still loading");
        let fortune = self
            .session
            .fortune_result()
            .context("no fortune shown")?
            .text
            .clone();
        self.session.close_fortune();
        Ok(fortune)
    }

    pub fn persisted(&self) -> Option<String> {
        self.storage.raw(self.store.key())
    }
}
