//! Thread-per-actor load harness.

use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Instant;

use client::GatewayClient;
use tracing::{info, warn};

use crate::config::LoadConfig;
use crate::driver::{Actor, OrderOutcome, TrafficDriver};
use crate::error::DriverResult;
use crate::summary::RunSummary;

/// Runs `load.users` actors until the duration elapses or every actor hits
/// its request cap, then returns the finalized summary.
///
/// Actors never retry; an undelivered order is recorded as a failure.
pub fn run_actors<C: GatewayClient>(
    driver: &TrafficDriver<C>,
    load: &LoadConfig,
) -> DriverResult<RunSummary> {
    load.validate()?;
    if !driver.has_fixtures() {
        warn!("no usable fixtures, no orders will be sent");
    }
    info!(
        users = load.users,
        duration_secs = load.duration.as_secs(),
        fixtures = driver.fixtures().len(),
        "starting load run"
    );

    let started = Instant::now();
    let deadline = started + load.duration;
    let recorder = Mutex::new(RunSummary::new(load.users));

    thread::scope(|scope| {
        let recorder = &recorder;
        for index in 0..load.users {
            let actor = driver.actor(index);
            scope.spawn(move || run_actor(actor, load, deadline, recorder));
        }
    });

    let mut summary = recorder.into_inner().unwrap_or_else(PoisonError::into_inner);
    summary.finalize(started.elapsed());
    info!(
        requests = summary.requests,
        successes = summary.successes,
        failures = summary.failures,
        p95_latency_ms = summary.p95_latency_ms,
        error_rate = summary.error_rate,
        "load run finished"
    );
    Ok(summary)
}

fn run_actor<C: GatewayClient>(
    mut actor: Actor<'_, C>,
    load: &LoadConfig,
    deadline: Instant,
    recorder: &Mutex<RunSummary>,
) {
    let mut sent = 0usize;
    while Instant::now() < deadline {
        if load.max_requests_per_user.is_some_and(|max| sent >= max) {
            break;
        }

        let start = Instant::now();
        let outcome = actor.place_order();
        let latency = start.elapsed();
        recorder
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(&outcome, latency);
        if outcome == OrderOutcome::Skipped {
            break;
        }
        sent += 1;

        let wait = actor.next_wait(load.min_wait, load.max_wait);
        let remaining = deadline.saturating_duration_since(Instant::now());
        thread::sleep(wait.min(remaining));
    }
}
