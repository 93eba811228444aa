//! Composes both derivation pipelines into one daily operations briefing
//! and owns its output surfaces (JSON document, terminal report).

use chrono::{DateTime, Local, NaiveDate, Utc};
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::core::error::DaisError;
use crate::core::household::HouseholdStore;
use crate::core::human_contact::HumanContactStore;
use crate::core::output;
use crate::pipelines::household::{CardBriefing, DailyBriefing, build_daily_briefing};
use crate::pipelines::human_contact::{ContactRadar, ContactStatus, build_contact_radar};

/// The combined external contract: one generated document per run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyOperationsBriefing {
    pub generated_at: DateTime<Utc>,
    pub target_date: NaiveDate,
    pub household: DailyBriefing,
    pub human_contacts: ContactRadar,
}

/// Run both pipelines for one target date.
///
/// The target date defaults to today's local calendar date; the generation
/// timestamp is always UTC.
pub fn generate_briefing(
    household: &HouseholdStore,
    contacts: &HumanContactStore,
    for_date: Option<NaiveDate>,
    stale_after_days: i64,
) -> DailyOperationsBriefing {
    let target = for_date.unwrap_or_else(|| Local::now().date_naive());
    DailyOperationsBriefing {
        generated_at: Utc::now(),
        target_date: target,
        household: build_daily_briefing(household, target, stale_after_days),
        human_contacts: build_contact_radar(contacts, target),
    }
}

impl DailyOperationsBriefing {
    pub fn to_value(&self) -> Result<Value, DaisError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DaisError> {
        to_json_document(self)
    }
}

/// Serialize any briefing value as a pretty-printed JSON document with
/// lexicographically ordered keys.
pub fn to_json_document<T: Serialize>(value: &T) -> Result<String, DaisError> {
    let doc = serde_json::to_value(value)?;
    Ok(serde_json::to_string_pretty(&doc)?)
}

// ===== Terminal report rendering =====

const SUMMARY_PREVIEW_CHARS: usize = 72;

pub fn render_briefing_text(briefing: &DailyOperationsBriefing) -> String {
    let mut lines = vec![format!(
        "{} {}",
        "Daily operations briefing for".bold(),
        briefing.target_date.to_string().bright_white().bold()
    )];
    lines.push(String::new());
    lines.extend(household_lines(&briefing.household));
    lines.push(String::new());
    lines.extend(contact_lines(&briefing.human_contacts));
    lines.join("\n")
}

pub fn render_household_text(briefing: &DailyBriefing) -> String {
    household_lines(briefing).join("\n")
}

pub fn render_contacts_text(radar: &ContactRadar) -> String {
    contact_lines(radar).join("\n")
}

fn household_lines(briefing: &DailyBriefing) -> Vec<String> {
    let mut lines = vec![format!(
        "{} (weekday {})",
        "Household".bright_cyan().bold(),
        briefing.weekday
    )];

    if briefing.focus_cards.is_empty() {
        lines.push(format!("  {}", "no cards scheduled today".dimmed()));
    }
    for card in &briefing.focus_cards {
        lines.extend(card_lines(card));
    }

    let stats = &briefing.stats;
    lines.push(format!(
        "  {} {} cards, {}/{} tasks done ({})",
        "Σ".bright_cyan(),
        stats.total_cards,
        stats.completed_tasks,
        stats.total_tasks,
        output::percent(stats.completion_ratio)
    ));

    if !briefing.overdue_cards.is_empty() {
        lines.push(format!("  {}", "Overdue elsewhere this week:".bright_yellow()));
        for card in &briefing.overdue_cards {
            let staleness = match card.staleness_days {
                Some(days) => format!("{} days stale", days),
                None => "never run".to_string(),
            };
            lines.push(format!(
                "    {} {} ({})",
                "⚠".bright_yellow(),
                card.title,
                staleness
            ));
        }
    }

    for note in &briefing.recommendations {
        lines.push(format!("  {} {}", "▸".bright_cyan(), note));
    }

    lines
}

fn card_lines(card: &CardBriefing) -> Vec<String> {
    let mut lines = vec![format!(
        "  {} ({})",
        card.title.bright_white().bold(),
        output::percent(card.completion_ratio)
    )];
    if !card.summary.is_empty() {
        lines.push(format!(
            "    {}",
            output::compact_line(&card.summary, SUMMARY_PREVIEW_CHARS).dimmed()
        ));
    }
    for task in &card.tasks {
        let mark = if task.completed {
            "✓".bright_green()
        } else {
            "○".dimmed()
        };
        lines.push(format!("    {} {}", mark, task.label));
    }
    lines
}

fn contact_lines(radar: &ContactRadar) -> Vec<String> {
    let mut lines = vec![format!("{}", "Human contacts".bright_cyan().bold())];

    let buckets: [(&str, &[ContactStatus]); 3] = [
        ("overdue", &radar.overdue),
        ("due today", &radar.due_today),
        ("upcoming", &radar.upcoming),
    ];
    for (label, statuses) in buckets {
        if statuses.is_empty() {
            continue;
        }
        lines.push(format!("  {}:", label.bright_white().bold()));
        for status in statuses {
            lines.push(contact_line(status));
        }
    }

    let summary = &radar.summary;
    lines.push(format!(
        "  {} {} people, {} overdue / {} due today / {} upcoming",
        "Σ".bright_cyan(),
        summary.total_people,
        summary.overdue_assignments,
        summary.due_today,
        summary.upcoming_assignments
    ));

    lines
}

fn contact_line(status: &ContactStatus) -> String {
    let due = if status.due_in_days < 0 {
        format!("{} days over", -status.due_in_days).bright_red().to_string()
    } else if status.due_in_days == 0 {
        "due now".bright_yellow().to_string()
    } else {
        format!("in {} days", status.due_in_days)
    };
    let mut line = format!(
        "    {} ({}) - {} [{}], {}",
        status.name, status.relation, status.activity, status.cadence, due
    );
    if let Some(note) = &status.note {
        line.push_str(&format!(
            " ({})",
            output::compact_line(note, SUMMARY_PREVIEW_CHARS)
        ));
    }
    line
}
