use crate::cli::opts::*;

use anyhow::{bail, Result};
use cardflip_client::{ApiConfig, HttpApi};
use cardflip_core::{filter_by_topic, ApiClient, ApiError, Flashcard, FlashcardForm, TopicSelection};
use cardflip_sync::{CacheKey, MutationOp, MutationOutcome, Observation, SyncClient};
use std::sync::Arc;

pub async fn run_cli(args: Cli) -> Result<()> {
    let api: Arc<dyn ApiClient> = Arc::new(HttpApi::new(ApiConfig {
        base_url: args.base_url.clone(),
    }));
    let sync = SyncClient::new(api);

    match args.cmd {
        Command::Card(cmd) => card_cmd(&sync, cmd).await,
        Command::Topic(cmd) => topic_cmd(&sync, cmd).await,
    }
}

/// Renders validation failures one field per line; other errors pass through.
fn submit(result: Result<MutationOutcome, ApiError>) -> Result<MutationOutcome> {
    match result {
        Ok(outcome) => Ok(outcome),
        Err(ApiError::Validation(errors)) => {
            for field in errors.fields() {
                for message in errors.get(field) {
                    eprintln!("{field}: {message}");
                }
            }
            bail!("validation failed");
        }
        Err(err) => Err(err.into()),
    }
}

fn require_data(observation: &Observation, what: &str) -> Result<()> {
    if observation.data.is_none() {
        match &observation.error {
            Some(err) => bail!("failed to load {what}: {err}"),
            None => bail!("failed to load {what}"),
        }
    }
    Ok(())
}

async fn card_cmd(sync: &SyncClient, cmd: CardCmd) -> Result<()> {
    match cmd {
        CardCmd::Add(a) => {
            let form = FlashcardForm {
                question: a.question,
                answer: a.answer,
                topic_id: a.topic_id,
                difficulty: a.difficulty,
            };
            let outcome = submit(sync.mutate(MutationOp::CreateCard(form)).await)?;
            if let Some(card) = outcome.card() {
                println!("{}", card.id);
            }
        }
        CardCmd::List { topic } => {
            let Some(selection) = TopicSelection::parse(&topic) else {
                bail!("invalid topic selection: {topic}");
            };
            let observation = sync.observe(CacheKey::Cards).await;
            require_data(&observation, "flashcards")?;
            let cards = observation.cards().unwrap_or(&[]);
            for c in filter_by_topic(cards, &selection) {
                print_card(&c);
            }
        }
        CardCmd::Edit(e) => {
            let observation = sync.observe(CacheKey::Cards).await;
            require_data(&observation, "flashcards")?;
            let cards = observation.cards().unwrap_or(&[]);
            let Some(card) = cards.iter().find(|c| c.id == e.card_id) else {
                bail!("card {} not found", e.card_id);
            };
            let form = FlashcardForm {
                question: e.question.unwrap_or_else(|| card.question.clone()),
                answer: e.answer.unwrap_or_else(|| card.answer.clone()),
                topic_id: e.topic_id.unwrap_or(card.topic_id),
                difficulty: e
                    .difficulty
                    .unwrap_or_else(|| card.difficulty.as_str().to_string()),
            };
            submit(
                sync.mutate(MutationOp::UpdateCard {
                    id: e.card_id,
                    form,
                })
                .await,
            )?;
            println!("ok");
        }
        CardCmd::Rm { card_id } => {
            sync.mutate(MutationOp::DeleteCard(card_id)).await?;
            println!("ok");
        }
    }
    Ok(())
}

async fn topic_cmd(sync: &SyncClient, cmd: TopicCmd) -> Result<()> {
    match cmd {
        TopicCmd::Add { name } => {
            let outcome = submit(sync.mutate(MutationOp::CreateTopic { name }).await)?;
            if let Some(topic) = outcome.topic() {
                println!("{}", topic.id);
            }
        }
        TopicCmd::List => {
            let observation = sync.observe(CacheKey::Topics).await;
            require_data(&observation, "topics")?;
            for t in observation.topics().unwrap_or(&[]) {
                println!("{}\t{}", t.id, t.name);
            }
        }
        TopicCmd::Show { topic_id } => {
            let observation = sync.observe(CacheKey::Topic(topic_id)).await;
            require_data(&observation, "topic")?;
            if let Some(t) = observation.topic() {
                println!("{}\t{}", t.id, t.name);
            }
        }
        TopicCmd::Rm { topic_id } => {
            sync.mutate(MutationOp::DeleteTopic(topic_id)).await?;
            println!("ok");
        }
    }
    Ok(())
}

fn print_card(c: &Flashcard) {
    println!(
        "{}\t{}\t{}\ttopic={}\tdifficulty={}",
        c.id,
        c.question,
        c.answer,
        c.topic_id,
        c.difficulty.as_str()
    );
}
