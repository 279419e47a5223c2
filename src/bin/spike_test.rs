//! Traffic surge test: 100 users arriving almost at once.
//!
//! Jumps from zero to 100 virtual users in 10 seconds, holds for a minute,
//! then drops just as abruptly. Verifies the system survives the surge and
//! keeps answering signups.
//!
//! ```bash
//! cargo run --release --bin spike_test
//! ```

use std::time::Duration;

use goose::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use board_load_tests::checks::failed_checks;
use board_load_tests::helpers::{submit_signup, TestIdentity};
use board_load_tests::profile::{LoadProfile, Stage};
use board_load_tests::BASE_URL;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let profile = LoadProfile::new(vec![
        Stage::new(Duration::from_secs(10), 100),
        Stage::new(Duration::from_secs(60), 100),
        Stage::new(Duration::from_secs(10), 0),
    ]);

    GooseAttack::initialize()?
        .register_scenario(
            scenario!("SignupSpike")
                .set_wait_time(Duration::from_secs(1), Duration::from_secs(1))?
                .register_transaction(transaction!(signup)),
        )
        .set_default(GooseDefault::Host, BASE_URL)?
        .set_default(GooseDefault::TestPlan, profile.test_plan().as_str())?
        .execute()
        .await?;

    Ok(())
}

async fn signup(user: &mut GooseUser) -> TransactionResult {
    let identity = TestIdentity::generate("spike", user.weighted_users_index, "Spike Tester");
    let mut goose = submit_signup(user, &identity).await?;

    match goose.response {
        Ok(response) => {
            let status = response.status().as_u16();
            let failed = failed_checks(&[("status is 200", status == 200)]);
            if !failed.is_empty() {
                return user.set_failure(&failed.join(", "), &mut goose.request, None, None);
            }
        }
        Err(error) => {
            return user.set_failure(
                &format!("signup request error: {}", error),
                &mut goose.request,
                None,
                None,
            );
        }
    }

    Ok(())
}
