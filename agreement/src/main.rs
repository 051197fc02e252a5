//! Agreement checklist demo binary
//!
//! Opens a session against the fake terms api and walks through the
//! intents, printing state and notifications along the way.

use checklist_agreement::{
    AgreementConfig, AgreementEffect, AgreementIntent, AgreementSession, AgreementState,
    FakeTermsApi,
};
use futures::StreamExt;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn describe(state: &AgreementState) -> String {
    let flag = |on: bool| if on { "x" } else { " " };
    let items: Vec<String> = state
        .items
        .iter()
        .map(|item| {
            format!(
                "[{}] {}{}",
                flag(item.checked),
                item.title,
                if item.required { " (required)" } else { "" }
            )
        })
        .collect();

    format!(
        "{}\n  all={} required_only={} none={} play_enabled={} undo={}",
        items.join("\n"),
        state.all_agreed(),
        state.required_only_agreed(),
        state.none_agreed(),
        state.play_enabled(),
        state.history_available,
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "checklist_agreement=debug,checklist_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Agreement Checklist ===\n");

    let api = FakeTermsApi::new().with_latency(Duration::from_millis(300));
    let session = AgreementSession::new(api, AgreementConfig::default());

    let notifications = session.effect_stream();
    let printer = tokio::spawn(async move {
        notifications
            .for_each(|effect| async move {
                match effect {
                    AgreementEffect::ShowToast { message } => println!("  (toast) {message}"),
                    AgreementEffect::ShowError { message } => println!("  (error) {message}"),
                }
            })
            .await;
    });

    println!(">>> Load");
    session
        .handle_intent(AgreementIntent::Load)
        .await?
        .wait_with_timeout(Duration::from_secs(5))
        .await?;
    println!("{}\n", describe(&session.state()));

    let steps = [
        AgreementIntent::ToggleItem { id: 1 },
        AgreementIntent::SetRequiredOnly,
        AgreementIntent::Play,
        AgreementIntent::SetAll { checked: true },
        AgreementIntent::Rewind,
        AgreementIntent::Rewind,
        AgreementIntent::Play,
    ];

    for intent in steps {
        println!(">>> {intent:?}");
        session
            .handle_intent(intent)
            .await?
            .wait_with_timeout(Duration::from_secs(1))
            .await?;
        println!("{}\n", describe(&session.state()));
    }

    println!("Activity log:");
    for line in session.state().logs {
        println!("  {line}");
    }

    session.shutdown().await?;
    drop(session);
    printer.await?;

    println!("\n=== Done ===");
    Ok(())
}
