//! Resource search command
//!
//! Fetches a batch through the gateway, applies the optional type and
//! difficulty filters, and prints the result as a table or JSON.

use crate::error::{Result, StudyScoutError};
use crate::gateway::Gateway;
use crate::resource::{LearningResource, ResourceFilter};
use colored::Colorize;
use prettytable::{format, row, Table};

/// Search for resources on `topic` and print them
///
/// # Errors
///
/// Returns `StudyScoutError::InvalidInput` for a blank topic and
/// `StudyScoutError::Serialization` if JSON output fails
pub async fn run_search(
    gateway: &Gateway,
    topic: &str,
    filter: ResourceFilter,
    json: bool,
) -> Result<()> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(
            StudyScoutError::InvalidInput("search topic must not be empty".to_string()).into(),
        );
    }

    tracing::info!("Searching resources for '{}' (live={})", topic, gateway.is_live());
    let batch = gateway.fetch_resources(topic).await;
    let matching = filter.apply(&batch);
    tracing::debug!("{} of {} resources match the filter", matching.len(), batch.len());

    if json {
        println!("{}", resources_json(&matching)?);
        return Ok(());
    }

    if matching.is_empty() {
        println!("{}", "No resources match the selected filters.".yellow());
        return Ok(());
    }

    if !gateway.is_live() {
        println!(
            "{}",
            "Showing simulated results (no API key configured).".yellow()
        );
    }
    println!("\nLearning resources for {}:\n", topic.cyan());
    resources_table(&matching).printstd();
    println!();
    Ok(())
}

/// Serializes the resources as a pretty JSON array
fn resources_json(resources: &[&LearningResource]) -> Result<String> {
    Ok(serde_json::to_string_pretty(resources).map_err(StudyScoutError::Serialization)?)
}

/// Builds the table shown for a batch
fn resources_table(resources: &[&LearningResource]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.set_titles(row![
        "Title", "Type", "Level", "Quality", "Duration", "Source"
    ]);

    for resource in resources {
        table.add_row(row![
            truncate(&resource.title, 48),
            resource.resource_type,
            resource.difficulty,
            format!("{:.1}", resource.quality_score),
            resource.duration,
            resource.source
        ]);
    }
    table
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
