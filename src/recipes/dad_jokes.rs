//! A joke-telling agent running on a non-Google model through OpenRouter.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Value};
use tracing::info;

use crate::agent::Agent;
use crate::config::AgentryConfig;
use crate::error::Result;
use crate::models::LanguageModel;
use crate::tools::{AgentTool, AgentToolParameters, Tool};

pub const NAME: &str = "dad_joke_agent";

/// OpenRouter model the recipe pins.
pub const MODEL_ID: &str = "deepseek/deepseek-chat-v3.1:free";

pub const DEFAULT_STYLE: &str = "classic";
pub const DEFAULT_AUDIENCE: &str = "family";

pub const STYLES: [&str; 4] = ["classic", "wordplay", "oneliners", "silly"];
pub const AUDIENCES: [&str; 4] = ["family", "kids", "adults", "workplace"];

const CLASSIC: [&str; 4] = [
    "Why did the chicken cross the road? To get to the other side!",
    "Why did the scarecrow win an award? Because he was outstanding in his field!",
    "Why don't scientists trust atoms? Because they make up everything!",
    "What do you call a factory that makes okay products? A satisfactory!",
];

const WORDPLAY: [&str; 4] = [
    "What do you call a belt made of watches? A waist of time.",
    "What do you call fake spaghetti? An impasta!",
    "I wondered why the baseball kept getting bigger. Then it hit me.",
    "What do you call a dinosaur that crashes his car? Tyrannosaurus Wrecks!",
];

const ONELINERS: [&str; 4] = [
    "I told my wife she was drawing her eyebrows too high. She looked surprised.",
    "Did you hear about the mathematician who's afraid of negative numbers? He'll stop at nothing to avoid them.",
    "Why don't eggs tell jokes? They'd crack each other up!",
    "I used to hate facial hair, but then it grew on me.",
];

const SILLY: [&str; 4] = [
    "What do you call a sleeping bull? A bulldozer!",
    "Why do fish live in salt water? Because pepper makes them sneeze!",
    "What do you call a bear with no teeth? A gummy bear!",
    "Why did the math book look so sad? Because it had too many problems!",
];

const INSTRUCTION: &str = r#"You are a helpful assistant that specializes in telling dad jokes to brighten conversations.

Use the get_dad_joke tool when:
- Users explicitly request jokes or humor
- You want to lighten the mood in conversation
- Users seem stressed and could use a laugh
- Conversation needs a fun, light-hearted element

The get_dad_joke tool accepts two parameters:
- style: Choose from "classic", "wordplay", "oneliners", or "silly" based on user preference or context
- audience: Choose from "family", "kids", "adults", or "workplace" to match the appropriate audience

When users don't specify preferences, default to style="classic" and audience="family".

Always deliver jokes with enthusiasm and consider asking if they'd like another joke or a different style.
You can suggest different joke styles if users want variety."#;

/// Jokes for a style, case-insensitively. Unknown styles get the classics.
pub fn jokes_for(style: &str) -> &'static [&'static str] {
    match style.to_lowercase().as_str() {
        "wordplay" => &WORDPLAY,
        "oneliners" => &ONELINERS,
        "silly" => &SILLY,
        _ => &CLASSIC,
    }
}

/// Result of `get_dad_joke`, drawing the joke with `rng`.
///
/// `style` and `audience` are echoed as given; `category` is the lowercased
/// style even when it fell back to the classics.
pub fn pick_joke<R: Rng + ?Sized>(style: &str, audience: &str, rng: &mut R) -> Value {
    let joke = jokes_for(style).choose(rng).copied().unwrap_or(CLASSIC[0]);
    json!({
        "joke": joke,
        "style": style,
        "audience": audience,
        "status": "success",
        "category": style.to_lowercase(),
        "source": "dad_joke_collection",
    })
}

/// `get_dad_joke(style = "classic", audience = "family")`.
pub fn dad_joke_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::from_fn(
        "get_dad_joke",
        "Get a dad joke based on style and audience preferences. Use this tool when users \
         ask for jokes, want to lighten the mood, or request humor.",
        AgentToolParameters::object()
            .string_with_default(
                "style",
                "Type of joke style (classic, wordplay, oneliners, silly)",
                DEFAULT_STYLE,
            )
            .string_with_default(
                "audience",
                "Target audience (family, kids, adults, workplace)",
                DEFAULT_AUDIENCE,
            )
            .build(),
        |args, _ctx| {
            let style = args.get_str_or("style", DEFAULT_STYLE);
            let audience = args.get_str_or("audience", DEFAULT_AUDIENCE);
            info!(style, audience, "get_dad_joke called");
            Ok(pick_joke(style, audience, &mut rand::thread_rng()))
        },
    ))
}

pub fn agent(config: &AgentryConfig) -> Result<Agent> {
    let agent = Agent::new(NAME, LanguageModel::OpenRouter(MODEL_ID.to_string()))
        .with_description("Dad joke agent")
        .with_instruction(INSTRUCTION)
        .with_tool(dad_joke_tool());
    super::configure(agent, config)
}
