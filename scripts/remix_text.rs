//! Text Remix Script
//!
//! This script remixes a piece of text from the command line, either into a
//! single creative paragraph or into up to four tweet variations, using the
//! same Anthropic client as the web service.

use std::io::{self, Write};

use remixer::{
    build_share_url, format_response, AnthropicClient, CharacterCount, RemixMode, RemixRequest,
    RemixResult, RemixerConfig, TextGenerator,
};

/// Reads one trimmed line from stdin after printing `prompt`.
fn prompt_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Loads the API key from the environment (or `.env`), asking for it when absent.
fn load_config() -> Result<RemixerConfig, Box<dyn std::error::Error + Send + Sync>> {
    match dotenvy::dotenv() {
        Ok(path) => println!("📄 Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => println!("⚠️  Failed to read .env file: {}", e),
    }
    if let Ok(config) = RemixerConfig::from_env() {
        println!("🔑 Using API key from environment");
        return Ok(config);
    }

    let api_key = prompt_line("🔑 Enter your Anthropic API key: ")?;
    if api_key.is_empty() {
        println!("❌ API key cannot be empty!");
        return Err("API key is required".into());
    }
    Ok(RemixerConfig { api_key })
}

fn print_result(result: &RemixResult) {
    match result {
        RemixResult::SingleText(text) => {
            println!("\n✨ Remixed text:\n");
            println!("{}", text);
        }
        RemixResult::TweetList(tweets) if tweets.is_empty() => {
            println!("\n🤷 No tweets were generated.");
        }
        RemixResult::TweetList(tweets) => {
            for (index, tweet) in tweets.iter().enumerate() {
                let count = CharacterCount::of(tweet);
                let flag = if count.is_over_limit() { " ⚠️" } else { "" };
                println!("\n🐦 Version {} ({}{})", index + 1, count, flag);
                println!("{}", tweet);
                println!("🔗 {}", build_share_url(tweet));
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    println!("🎛️  Content Remix Tool");
    println!("======================");

    let config = load_config()?;

    let mode = prompt_line("🎚️  Mode [tweets/single] (default tweets): ")?;
    let mode = if mode.is_empty() {
        RemixMode::MultiTweet
    } else {
        match mode.parse::<RemixMode>() {
            Ok(mode) => mode,
            Err(e) => {
                println!("❌ {}", e);
                return Err(e.into());
            }
        }
    };

    let text = prompt_line("📝 Enter the text to remix: ")?;
    let request = match RemixRequest::new(text, mode) {
        Ok(request) => request,
        Err(e) => {
            println!("❌ Input text cannot be empty!");
            return Err(e.into());
        }
    };

    println!("\n🚀 Remixing in {} mode...", request.mode());
    let client = AnthropicClient::new(config)?;
    match client.generate(request.text(), request.mode()).await {
        Ok(raw) => print_result(&format_response(&raw, request.mode())),
        Err(e) => {
            println!("\n💥 Failed to remix text. Please try again.");
            return Err(e.into());
        }
    }

    Ok(())
}
