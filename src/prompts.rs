//! Fixed prompt templates sent to the insight endpoint.
//!
//! User text is interpolated as-is; URL encoding happens when the request is built.

use crate::metrics::CountryMetric;

/// Prompt for a single chart point.
pub fn point_insight_prompt(metric: &CountryMetric) -> String {
    format!(
        "Generate a short AI insight about why {country} has a {likelihood}% likelihood of \
         meeting Paris Agreement goals by {year}, under 260 characters.",
        country = metric.name,
        likelihood = metric.likelihood_label(),
        year = metric.target_year,
    )
}

/// Prompt estimating the impact of a user's self-reported actions.
pub fn contribution_prompt(country: &str, actions: &str) -> String {
    format!(
        r#"Given that the user is from {country} and has done the following actions to benefit the environment: {actions}, estimate realistic statistics about their contribution to the country's Paris Agreement goal.
Show values like: "You contributed around 0.0004% to your country's goal and sped up progress by 0.2 seconds. (Don't use the same prompt, change the numbers to match the amount of actions the user has done)"
Follow this with an encouraging message that acknowledges the small impact and motivates them, and include one short piece of feedback on how they can improve.
Keep the response under 500 characters and make it sound natural. If the input is negative for the environment, give honest and blunt feedback on how to improve. Always respond in English. The more detailed the actions or the more impacts that are listed, the higher the percentage should be and the more time should be saved."#
    )
}
