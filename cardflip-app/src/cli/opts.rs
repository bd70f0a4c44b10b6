use cardflip_client::DEFAULT_BASE_URL;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser, Clone)]
#[command(name = "cardflip", version, about = "CardFlip CLI (flashcards and topics over REST)")]
pub struct Cli {
    /// Base URL of the REST API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Flashcard operations
    #[command(subcommand)]
    Card(CardCmd),
    /// Topic operations
    #[command(subcommand)]
    Topic(TopicCmd),
}

#[derive(Debug, Subcommand, Clone)]
pub enum CardCmd {
    Add(CardAdd),
    List {
        /// "All" or a topic id
        #[arg(long, default_value = "All")]
        topic: String,
    },
    Edit(CardEdit),
    Rm { card_id: i64 },
}

#[derive(Debug, Args, Clone)]
pub struct CardAdd {
    #[arg(long)]
    pub question: String,
    #[arg(long)]
    pub answer: String,
    #[arg(long)]
    pub topic_id: i64,
    #[arg(long)]
    pub difficulty: String,
}

#[derive(Debug, Args, Clone)]
pub struct CardEdit {
    pub card_id: i64,
    #[arg(long)]
    pub question: Option<String>,
    #[arg(long)]
    pub answer: Option<String>,
    #[arg(long)]
    pub topic_id: Option<i64>,
    #[arg(long)]
    pub difficulty: Option<String>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum TopicCmd {
    Add { name: String },
    List,
    Show { topic_id: i64 },
    Rm { topic_id: i64 },
}
