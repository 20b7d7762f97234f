use anyhow::{Result, ensure};
use async_trait::async_trait;
use colored::Colorize;
use miyabi_core::{FixedFortune, FortuneFailure, MemoryStorage, NavTarget, View};

use super::{RallyHarness, RallyScenario, ScenarioCtx, ScriptedFortune};

const BLESSING: &str = "山の神が微笑む。Lucky Item: 扇子";

fn trace(ctx: &ScenarioCtx, msg: &str) {
    if ctx.verbose {
        println!("     {} {msg}", "↳".dimmed());
    }
}

pub struct Smoke;

#[async_trait(?Send)]
impl RallyScenario for Smoke {
    fn name(&self) -> &'static str {
        "smoke"
    }

    fn description(&self) -> &'static str {
        "Start, browse every tab, scan and stamp once"
    }

    async fn run(&self, ctx: &ScenarioCtx) -> Result<()> {
        let mut rally = RallyHarness::new()?;
        ensure!(rally.session.view() == View::Intro, "should open on intro");
        ensure!(!rally.session.navigate(NavTarget::Prizes), "nav bar hidden on intro");
        ensure!(rally.session.start(), "start refused");

        for target in NavTarget::ALL {
            ensure!(rally.session.navigate(target), "tab {target:?} refused");
            ensure!(rally.session.view() == View::from(target), "tab {target:?} not shown");
        }

        let found = rally.scan().await?;
        trace(ctx, &format!("scanned checkpoint {found}"));
        ensure!(found == 1, "first scan should find checkpoint 1, got {found}");

        let fortune = rally.stamp(&FixedFortune(BLESSING.into())).await?;
        ensure!(fortune == BLESSING, "unexpected fortune {fortune:?}");
        ensure!(rally.session.stamped_count() == 1, "one stamp expected");
        ensure!(
            rally.persisted().as_deref() == Some("[1]"),
            "persisted progress {:?}",
            rally.persisted()
        );
        ensure!(rally.session.scanned_checkpoint().is_none(), "stamp overlay left open");
        Ok(())
    }
}

pub struct FullRally;

#[async_trait(?Send)]
impl RallyScenario for FullRally {
    fn name(&self) -> &'static str {
        "full-rally"
    }

    fn description(&self) -> &'static str {
        "Collect every checkpoint in order and unlock every prize"
    }

    async fn run(&self, ctx: &ScenarioCtx) -> Result<()> {
        let mut rally = RallyHarness::new()?;
        let client = FixedFortune(BLESSING.into());
        let total = u32::try_from(rally.session.catalog().len())?;
        let mut unlocked_before = 0;

        for expected in 1..=total {
            let found = rally.scan().await?;
            ensure!(found == expected, "scan {expected} found {found}");
            rally.stamp(&client).await?;
            ensure!(rally.session.stamped_count() == expected, "count after {expected}");

            let unlocked = rally.session.unlocked_prizes().count();
            ensure!(unlocked >= unlocked_before, "prizes relocked at {expected}");
            if unlocked > unlocked_before {
                trace(ctx, &format!("{unlocked} prize(s) unlocked at {expected} stamps"));
            }
            unlocked_before = unlocked;
        }

        let prizes = rally.session.catalog().prizes().len();
        ensure!(unlocked_before == prizes, "{unlocked_before}/{prizes} prizes unlocked");

        // With everything collected the scanner wraps back to the first spot.
        let again = rally.scan().await?;
        ensure!(again == 1, "completed rally should rescan checkpoint 1, got {again}");
        rally.stamp(&client).await?;
        ensure!(rally.session.stamped_count() == total, "duplicate stamp was counted");
        Ok(())
    }
}

pub struct FortuneOutage;

#[async_trait(?Send)]
impl RallyScenario for FortuneOutage {
    fn name(&self) -> &'static str {
        "fortune-outage"
    }

    fn description(&self) -> &'static str {
        "Every fortune failure still records the stamp and shows fallback text"
    }

    async fn run(&self, ctx: &ScenarioCtx) -> Result<()> {
        let mut rally = RallyHarness::new()?;
        let script = [
            Err(FortuneFailure::MissingCredential),
            Err(FortuneFailure::Transport),
            Err(FortuneFailure::Empty),
            Ok("   ".to_string()),
        ];
        let expected: Vec<&str> = [
            FortuneFailure::MissingCredential,
            FortuneFailure::Transport,
            FortuneFailure::Empty,
            FortuneFailure::Empty,
        ]
        .iter()
        .map(|f| f.fallback_text())
        .collect();
        let client = ScriptedFortune::new(script);

        for (step, want) in expected.iter().enumerate() {
            rally.scan().await?;
            let text = rally.stamp(&client).await?;
            trace(ctx, &format!("step {step}: {text}"));
            ensure!(text == *want, "step {step}: got {text:?}, want {want:?}");
            ensure!(client.calls() == step + 1, "fortune retried at step {step}");
        }
        ensure!(rally.session.stamped_count() == 4, "stamps lost during outage");
        ensure!(
            rally.persisted().as_deref() == Some("[1,2,3,4]"),
            "persisted {:?}",
            rally.persisted()
        );
        Ok(())
    }
}

pub struct Resume;

#[async_trait(?Send)]
impl RallyScenario for Resume {
    fn name(&self) -> &'static str {
        "resume"
    }

    fn description(&self) -> &'static str {
        "Progress survives a reload and scanning continues where it left off"
    }

    async fn run(&self, ctx: &ScenarioCtx) -> Result<()> {
        let storage = MemoryStorage::new();
        let mut first = RallyHarness::with_storage(storage.clone())?;
        let client = FixedFortune(BLESSING.into());
        let visits = 3 + ctx.iteration % 4;
        for _ in 0..visits {
            first.scan().await?;
            first.stamp(&client).await?;
        }
        let before = first.session.stamps().clone();
        drop(first);

        let mut reloaded = RallyHarness::with_storage(storage)?;
        ensure!(reloaded.session.view() == View::Intro, "reload should show intro");
        ensure!(reloaded.session.stamps() == &before, "stamps changed across reload");
        let next = reloaded.scan().await?;
        let want = u32::try_from(visits)? + 1;
        trace(ctx, &format!("resumed with {visits} stamps, next scan {next}"));
        ensure!(next == want, "resumed scan found {next}, want {want}");
        Ok(())
    }
}

pub struct CorruptStorage;

#[async_trait(?Send)]
impl RallyScenario for CorruptStorage {
    fn name(&self) -> &'static str {
        "corrupt-storage"
    }

    fn description(&self) -> &'static str {
        "Unreadable or foreign progress data never blocks the rally"
    }

    async fn run(&self, ctx: &ScenarioCtx) -> Result<()> {
        let storage = MemoryStorage::new();
        let rally = RallyHarness::with_storage(storage.clone())?;
        let key = rally.store.key().to_string();
        drop(rally);

        for raw in ["not json", "{\"stamps\":[1]}", "[\"1\"]", ""] {
            storage.put_raw(&key, raw);
            let rally = RallyHarness::with_storage(storage.clone())?;
            trace(ctx, &format!("{raw:?} loaded as {:?}", rally.session.stamps()));
            ensure!(rally.session.stamps().is_empty(), "{raw:?} should load empty");
        }

        storage.put_raw(&key, "[2,99,5]");
        let mut rally = RallyHarness::with_storage(storage)?;
        ensure!(rally.session.stamped_count() == 2, "unknown id 99 should be dropped");
        ensure!(rally.scan().await? == 1, "first unstamped spot is 1");
        rally.stamp(&FixedFortune(BLESSING.into())).await?;
        ensure!(
            rally.persisted().as_deref() == Some("[1,2,5]"),
            "rewrite should be clean, got {:?}",
            rally.persisted()
        );
        Ok(())
    }
}

pub struct SupersededScan;

#[async_trait(?Send)]
impl RallyScenario for SupersededScan {
    fn name(&self) -> &'static str {
        "superseded-scan"
    }

    fn description(&self) -> &'static str {
        "Repeated or cancelled demo scans resolve at most once"
    }

    async fn run(&self, ctx: &ScenarioCtx) -> Result<()> {
        let mut rally = RallyHarness::new()?;
        rally.session.start();
        ensure!(rally.session.request_scan().is_none(), "scan outside scanner");
        ensure!(rally.session.open_scanner(), "scanner did not open");

        let older = rally.session.request_scan();
        let newer = rally.session.request_scan();
        let (Some(older), Some(newer)) = (older, newer) else {
            anyhow::bail!("scan requests refused");
        };
        ensure!(rally.session.resolve_scan(older).is_none(), "older scan applied");
        ensure!(rally.session.view() == View::Scanner, "older scan left the scanner");
        ensure!(rally.session.resolve_scan(newer).is_some(), "newer scan dropped");
        ensure!(rally.session.resolve_scan(newer).is_none(), "scan resolved twice");

        ensure!(rally.session.open_scanner(), "scanner did not reopen");
        let cancelled = rally.session.request_scan();
        let Some(cancelled) = cancelled else {
            anyhow::bail!("scan request refused");
        };
        ensure!(rally.session.cancel_scan(cancelled), "cancel refused");
        ensure!(!rally.session.scan_pending(), "cancelled scan still pending");
        ensure!(rally.session.resolve_scan(cancelled).is_none(), "cancelled scan applied");
        trace(ctx, "stale and cancelled scans ignored");
        Ok(())
    }
}
