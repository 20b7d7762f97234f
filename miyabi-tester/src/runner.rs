use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::scenario::{RallyScenario, ScenarioCtx};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
}

pub struct ScenarioRunner {
    verbose: bool,
}

impl ScenarioRunner {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub async fn run(&self, scenario: &dyn RallyScenario, iterations: usize) -> ScenarioResult {
        if self.verbose {
            println!("🧪 Running scenario: {}", scenario.name().bright_white());
        }

        let mut successes = 0;
        let mut failures = Vec::new();
        let mut timings = Vec::new();

        for iteration in 0..iterations {
            let ctx = ScenarioCtx {
                iteration,
                verbose: self.verbose,
            };
            let started = Instant::now();
            match scenario.run(&ctx).await {
                Ok(()) => {
                    successes += 1;
                    let elapsed = started.elapsed();
                    timings.push(elapsed);
                    if self.verbose {
                        println!("  ✅ Iteration {}/{iterations} passed ({elapsed:?})", iteration + 1);
                    }
                }
                Err(err) => {
                    let message = format!("Iteration {}: {err:#}", iteration + 1);
                    if self.verbose {
                        println!("  ❌ {}", message.clone().red());
                    }
                    failures.push(message);
                }
            }
        }

        let average_duration = if timings.is_empty() {
            Duration::ZERO
        } else {
            timings.iter().sum::<Duration>() / u32::try_from(timings.len()).unwrap_or(u32::MAX)
        };

        ScenarioResult {
            scenario_name: scenario.name().to_string(),
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}
