use docmatch::operand::{time_context, StandardOperands};
use docmatch::{MatchOptions, Query};
use serde::Deserialize;
use serde_json::json;
use tracing::Level;

/// A rule as it would be stored alongside other configuration
#[derive(Deserialize)]
struct Rule {
    name: String,
    #[serde(default)]
    options: MatchOptions,
    query: Query,
}

const RULES: &str = r#"[
    {
        "name": "office-open",
        "query": {
            "now.isoTime": { "$gte": "09:00", "$lt": "17:30" },
            "now.weekday": { "$not": { "$in": ["saturday", "sunday"] } },
            "now.isoDate": { "$not": { "$in": ["2026-12-25", "2027-01-01"] } }
        }
    },
    {
        "name": "beta-user",
        "options": { "strict": true },
        "query": {
            "$or": [
                { "user.email": { "$regex": "@example\\.com$", "$options": "i" } },
                { "user.id": { "$in": [{ "$var": "beta.allowlist" }] } }
            ]
        }
    },
    {
        "name": "greeting",
        "query": { "greeting": { "$concat": ["Hello, ", { "$var": "user.name" }] } }
    }
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let now = chrono::Local::now();
    let context = json!({
        "now": time_context(&now),
        "user": { "id": 42, "name": "Ada", "email": "ada@EXAMPLE.com" },
        "beta": { "allowlist": 7 },
        "greeting": "Hello, Ada",
    });

    let rules: Vec<Rule> = serde_json::from_str(RULES)?;
    for mut rule in rules {
        rule.query.set_options(rule.options).set_operand_evaluator(StandardOperands::new());
        match rule.query.test(&context) {
            Ok(verdict) => println!("{}: {}", rule.name, verdict),
            Err(err) => println!("{}: error ({:?}): {}", rule.name, err.kind(), err),
        }
    }
    Ok(())
}
