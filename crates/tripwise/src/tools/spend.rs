//! `get_daily_spend_estimate`: a static food-and-transport estimate.

use crate::ToolDef;
use crate::tools::core::FnTool;
use crate::tools::spec::ToolSpec;
use schemars::JsonSchema;
use serde::Deserialize;

/// Known cities: (lowercase match key, display name, low, high).
const KNOWN_CITIES: &[(&str, &str, u32, u32)] = &[
    ("paris", "Paris", 70, 90),
    ("tokyo", "Tokyo", 60, 80),
    ("new york", "New York", 100, 120),
];

const GENERIC_RANGE: (u32, u32) = (50, 70);

/// Arguments for `get_daily_spend_estimate`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SpendArgs {
    /// The city to estimate daily food and local transport costs for.
    pub city: String,
}

/// Estimate daily food and transport spend for `city`.
///
/// Matching is a case-insensitive substring test against the known-city
/// table, so "Paris, France" hits the Paris entry.
pub fn estimate(city: &str) -> String {
    let needle = city.to_lowercase();
    if let Some((_, name, low, high)) = KNOWN_CITIES
        .iter()
        .find(|(key, ..)| needle.contains(key))
    {
        return format!(
            "For {name}, a reasonable daily budget for food and local transport \
             is around ${low}-${high}."
        );
    }

    let (low, high) = GENERIC_RANGE;
    format!(
        "For {}, a reasonable daily budget for food and local transport is around \
         ${low}-${high}. This is a general estimate.",
        title_case(city.trim())
    )
}

/// Upper-case every letter that follows a non-letter, lower-case the rest,
/// and collapse runs of whitespace. "o'hare-town" becomes "O'Hare-Town".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, word) in s.split_whitespace().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let mut after_letter = false;
        for c in word.chars() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = c.is_alphabetic();
        }
    }
    out
}

pub fn definition() -> ToolDef {
    ToolSpec::builder(
        super::GET_DAILY_SPEND_ESTIMATE,
        "Estimate the average daily cost of food and local transport in a city",
    )
    .when_to_use("After finding accommodation, to budget the rest of each day")
    .when_not_to_use("For hotel prices; use find_hotels instead")
    .parameters_for::<SpendArgs>()
    .example(
        r#"get_daily_spend_estimate(city="Tokyo")"#,
        "For Tokyo, a reasonable daily budget for food and local transport is around $60-$80.",
    )
    .output_format("One sentence with a dollar range")
    .to_tool_def()
}

/// The spend estimator as a registrable tool. It has no state, so it is a
/// plain [`FnTool`].
pub fn spend_estimate_tool() -> FnTool {
    FnTool::new(definition(), |args: SpendArgs| async move {
        estimate(&args.city)
    })
}
