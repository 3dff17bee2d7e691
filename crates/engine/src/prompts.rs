//! Prompt templates for the AI gateway.
//!
//! Every template states the expected JSON shape inline. Economy- and
//! outcome-critical numbers (rarity, power bounds, win/loss) are decided
//! before the call and passed in as constraints, never requested from the
//! model.

use std::ops::RangeInclusive;

use lifequest_domain::{Achievement, Boss, Item, QuestRecord, Rarity};

/// Classification prompt: match a log entry against the existing
/// achievement list or invent a new achievement.
pub fn classify_log(log_text: &str, existing: &[Achievement]) -> String {
    let achievement_list =
        serde_json::to_string(existing).unwrap_or_else(|_| "[]".to_string());

    format!(
        "You are the Game Master of a Life RPG.\n\
         The user submitted a new log: \"{log_text}\".\n\n\
         Here is the player's existing Achievement List (JSON): {achievement_list}\n\n\
         TASK:\n\
         1. Analyze the difficulty of the deed (1-5 scale).\n\
         2. Check if this log fits vaguely into an existing achievement category.\n\
         3. IF MATCH: Return the ID.\n\
         4. IF NEW: Create a witty title, description, emoji, and assign XP (Difficulty * 10).\n\n\
         RETURN JSON ONLY. Format:\n\
         {{\n\
           \"type\": \"MATCH\" | \"NEW\",\n\
           \"id\": \"existing-id-if-match\",\n\
           \"newAchievement\": {{\n\
             \"title\": \"Epic Title\",\n\
             \"description\": \"Short description\",\n\
             \"emoji\": \"🔥\",\n\
             \"xp\": 30\n\
           }}\n\
         }}"
    )
}

/// Daily quest batch prompt, with recent history as anti-repetition context.
pub fn daily_quests(recent: &[QuestRecord]) -> String {
    let mut prompt = String::from(
        "Generate 10 \"Daily Quests\" for a Software Engineer who wants to gamify their life.\n\n\
         Mix the categories:\n\
         - 3 Health (Stretching, Water, Sun)\n\
         - 4 Productivity/Coding (Clean code, Learn something, Git commit)\n\
         - 3 Life/Fun (Read, Music, Kindness)\n\n\
         Give them RPG-style titles.\n\
         Assign XP between 10 (easy) and 50 (hard).\n",
    );

    if !recent.is_empty() {
        prompt.push_str("\nDo NOT repeat these recently generated quests:\n");
        for record in recent {
            prompt.push_str(&format!("- {} ({})\n", record.title, record.task));
        }
    }

    prompt.push_str(
        "\nRETURN JSON ONLY. Format:\n\
         {\n\
           \"quests\": [\n\
             {\n\
               \"title\": \"Potion of Clarity\",\n\
               \"task\": \"Drink water\",\n\
               \"xp\": 10,\n\
               \"type\": \"HEALTH\"\n\
             }\n\
           ]\n\
         }",
    );

    prompt
}

/// Loot flavor prompt. The rarity and power bounds were already rolled
/// locally; the model dresses them up.
pub fn forge_item(quest_title: &str, rarity: Rarity, power: &RangeInclusive<i32>) -> String {
    format!(
        "The player just completed a real-life RPG quest: \"{quest_title}\".\n\
         Generate a fantasy Loot Item that relates to this task.\n\n\
         Rarity: {rarity} (Make the name and description match the rarity).\n\
         Power: an integer between {min} and {max}.\n\n\
         Examples:\n\
         - Quest: \"Drink Water\" -> Item: \"Potion of Hydration\" (Common)\n\
         - Quest: \"Fix Server Bug\" -> Item: \"Hammer of the Banhammer\" (Rare)\n\n\
         RETURN JSON ONLY:\n\
         {{ \"name\": \"Item Name\", \"description\": \"Funny flavor text\", \"emoji\": \"⚔️\", \
         \"type\": \"WEAPON\"|\"ARMOR\"|\"POTION\"|\"RELIC\", \"power\": {min} }}",
        min = power.start(),
        max = power.end(),
    )
}

/// Boss flavor prompt. Stats are computed locally; only the identity is
/// delegated.
pub fn spawn_boss(level: u32) -> String {
    format!(
        "Generate a scary RPG Boss Monster that represents a \"Life Obstacle\" \
         for a Level {level} player.\n\
         Examples: \"The Lord of Laziness\", \"The Specter of Burnout\", \"The Golem of Debt\".\n\n\
         RETURN JSON:\n\
         {{ \"name\": \"Name\", \"description\": \"Scary description\" }}"
    )
}

/// Battle narration prompt. The outcome is already decided; the model only
/// writes the log line.
pub fn narrate_battle(boss: &Boss, items_used: &[Item], win: bool) -> String {
    let loadout = if items_used.is_empty() {
        "- bare fists\n".to_string()
    } else {
        items_used
            .iter()
            .map(|i| format!("- {} ({} {})\n", i.name, i.rarity, i.kind))
            .collect()
    };

    let outcome = if win {
        "The player WON: the boss is defeated."
    } else {
        "The player LOST this exchange: the boss shrugged off the attack."
    };

    format!(
        "BATTLE NARRATION:\n\
         Boss: {name} (HP: {hp}) - {description}\n\n\
         Player attacks with:\n\
         {loadout}\n\
         Outcome (already decided, do not change it): {outcome}\n\n\
         Write a short, exciting 2-sentence battle log consistent with that outcome.\n\n\
         RETURN JSON:\n\
         {{ \"log\": \"You struck the dragon...\" }}",
        name = boss.name,
        hp = boss.hp,
        description = boss.description,
    )
}
