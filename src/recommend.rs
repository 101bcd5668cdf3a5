use crate::types::{FetchOutcome, RecommendationSource, SummonerResult};
use crate::AppContext;
use serde::{Deserialize, Serialize};

/// Each summoner contributes this many of their top champions to the
/// fallback ranking.
const FALLBACK_TOP_N: usize = 3;
const BAN_COUNT: usize = 3;

const SYSTEM_PROMPT: &str = "You are an expert League of Legends draft assistant.";

/// Request structures for the OpenAI chat completions API
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

fn build_prompt(summary: &str) -> String {
    format!(
        "Enemy team stats:\n{summary}\nName {BAN_COUNT} champions to ban, \
         with a short justification for each."
    )
}

/// Ask the completion API for a qualitative ban recommendation.
async fn ai_bans(ctx: &AppContext, summary: &str) -> Result<String, String> {
    let api_key = ctx
        .config
        .openai_api_key
        .as_deref()
        .ok_or_else(|| "OPENAI_API_KEY is not set".to_string())?;

    let prompt = build_prompt(summary);
    let request = ChatRequest {
        model: &ctx.config.openai_model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT,
            },
            ChatMessage {
                role: "user",
                content: &prompt,
            },
        ],
        temperature: 0.7,
        max_tokens: 600,
    };

    let url = format!("{}/chat/completions", ctx.config.openai_api_base);
    let resp = ctx
        .client
        .post(&url)
        .bearer_auth(api_key)
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error calling completion API: {e}"))?;

    if !resp.status().is_success() {
        return Err(format!("Completion API returned {}", resp.status()));
    }

    let body: ChatResponse = resp
        .json()
        .await
        .map_err(|e| format!("Failed to parse completion response: {e}"))?;

    let text = body
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| "Completion response had no choices".to_string())?;

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err("Completion response was empty".to_string());
    }

    Ok(text)
}

/// Rank champions by winrate summed across every summoner's top three
/// entries and name the top three.
///
/// Accumulation preserves first-seen order and the sort is stable, so ties
/// resolve to whichever champion accumulated first — the same way on every
/// run.
pub fn fallback_bans(results: &[SummonerResult]) -> String {
    let mut totals: Vec<(String, f64)> = Vec::new();

    for result in results {
        let FetchOutcome::Stats(stats) = &result.outcome else {
            continue;
        };
        for stat in stats.iter().take(FALLBACK_TOP_N) {
            if let Some(entry) = totals.iter_mut().find(|entry| entry.0 == stat.name) {
                entry.1 += stat.winrate;
            } else {
                totals.push((stat.name.clone(), stat.winrate));
            }
        }
    }

    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    totals
        .into_iter()
        .take(BAN_COUNT)
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Produce the ban recommendation: the completion API's answer verbatim, or
/// the deterministic winrate ranking when that call fails for any reason.
/// An AI failure is logged, never propagated.
pub async fn recommend_bans(
    ctx: &AppContext,
    summary: &str,
    results: &[SummonerResult],
) -> (String, RecommendationSource) {
    match ai_bans(ctx, summary).await {
        Ok(text) => (text, RecommendationSource::Ai),
        Err(e) => {
            eprintln!("Completion call failed, using fallback ranking: {e}");
            (fallback_bans(results), RecommendationSource::Fallback)
        }
    }
}
