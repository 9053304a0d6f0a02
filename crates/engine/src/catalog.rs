//! Game catalog metadata: summarize a log file for the game-selection list
//! without replaying it.
//!
//! Date and time come from the filename (`game_log_YYYYMMDD_HHMMSS.jsonl`);
//! player count, model, and the characters in play come from the
//! `game_setup` record near the top of the log.

use regex_lite::Regex;

use grimview_domain::{EventDetails, LogRecord};

use crate::error::FetchError;
use crate::fetch::LogFetcher;

/// How many leading lines may hold the `game_setup` record.
const SETUP_SCAN_LINES: usize = 5;

/// Summary of one recorded game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMetadata {
    pub filename: String,
    pub player_count: u32,
    pub model: String,
    pub friendly_model_name: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub characters_in_play: Vec<String>,
}

/// Technical model id to display name. Unrecognized ids display as-is.
pub fn friendly_model_name(model: &str) -> &str {
    match model {
        "claude-3-5-sonnet-20241022" => "Claude 3.5 Sonnet",
        "claude-3-5-haiku-20241022" => "Claude 3.5 Haiku",
        "claude-sonnet-4-20250514" => "Claude 4 Sonnet",
        "claude-3-sonnet-20240229" => "Claude 3 Sonnet",
        "claude-3-haiku-20240307" => "Claude 3 Haiku",
        "claude-3-opus-20240229" => "Claude 3 Opus",
        "gpt-4o" => "GPT-4o",
        "gpt-4o-mini" => "GPT-4o Mini",
        "gpt-4-turbo" => "GPT-4 Turbo",
        "gpt-4" => "GPT-4",
        "gpt-3.5-turbo" => "GPT-3.5 Turbo",
        other => other,
    }
}

/// Extract catalog metadata from a log's filename and raw text. `None`
/// when no `game_setup` record appears in the first few lines.
pub fn extract_game_metadata(filename: &str, text: &str) -> Option<GameMetadata> {
    let (date, time) = filename_date_time(filename);

    for line in text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SETUP_SCAN_LINES)
    {
        let Ok(record) = serde_json::from_str::<LogRecord>(line) else {
            continue;
        };
        if let EventDetails::GameSetup(setup) = EventDetails::from_record(&record) {
            let model = setup.model.unwrap_or_else(|| "unknown".to_string());
            let friendly = friendly_model_name(&model).to_string();
            let title = format!("{} Players - {}", setup.player_count, friendly);

            let mut characters_in_play: Vec<String> = record
                .snapshot()
                .map(|snapshot| {
                    snapshot
                        .player_state
                        .iter()
                        .map(|player| player.character.clone())
                        .filter(|character| !character.is_empty() && character != "unknown")
                        .collect()
                })
                .unwrap_or_default();
            characters_in_play.sort();

            return Some(GameMetadata {
                filename: filename.to_string(),
                player_count: setup.player_count,
                friendly_model_name: friendly,
                model,
                title,
                date,
                time,
                characters_in_play,
            });
        }
    }

    tracing::warn!(filename, "no game_setup event found");
    None
}

/// Fetch a log and summarize it.
pub async fn fetch_game_metadata(
    fetcher: &dyn LogFetcher,
    filename: &str,
) -> Result<Option<GameMetadata>, FetchError> {
    let text = fetcher.fetch(filename).await?;
    Ok(extract_game_metadata(filename, &text))
}

/// `game_log_YYYYMMDD_HHMMSS.jsonl` to (`YYYY-MM-DD`, `HH:MM`); anything
/// else reads as unknown.
fn filename_date_time(filename: &str) -> (String, String) {
    let Some(captures) = Regex::new(r"game_log_(\d{8})_(\d{6})\.jsonl")
        .ok()
        .and_then(|pattern| pattern.captures(filename))
    else {
        return ("Unknown".to_string(), "Unknown".to_string());
    };

    let date_digits = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let time_digits = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
    let date = format!(
        "{}-{}-{}",
        &date_digits[0..4],
        &date_digits[4..6],
        &date_digits[6..8]
    );
    let time = format!("{}:{}", &time_digits[0..2], &time_digits[2..4]);
    (date, time)
}
