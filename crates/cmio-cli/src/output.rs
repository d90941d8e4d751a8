//! Terminal output formatting.

use colored::Colorize;
use cmio_core::dashboard::model::{DashboardSnapshot, DashboardStats};
use cmio_core::fact::model::FactStatus;

/// Print the headline counters.
pub fn print_stats(stats: &DashboardStats) {
    println!("{}", "Dashboard".cyan().bold());
    println!();
    println!("  {:<16} {}", "Pending facts", count(stats.pending_facts));
    println!("  {:<16} {}", "Draft notes", count(stats.draft_notes));
    println!("  {:<16} {}", "Open tasks", count(stats.open_tasks));
}

fn count(n: i64) -> colored::ColoredString {
    if n == 0 {
        n.to_string().dimmed()
    } else {
        n.to_string().yellow().bold()
    }
}

/// Print the full snapshot: counters, review queue, notes and tasks.
pub fn print_snapshot(snapshot: &DashboardSnapshot) {
    print_stats(&snapshot.stats);

    println!();
    println!("{}", "Pending facts".bold());
    let pending: Vec<_> = snapshot
        .pending_facts
        .iter()
        .filter(|f| f.status == FactStatus::Pending)
        .collect();
    if pending.is_empty() {
        println!("  {}", "Nothing to review.".dimmed());
    }
    for fact in pending {
        println!(
            "  {:>3}  {:<14} {} {}",
            fact.id,
            fact.client_name,
            fact.value,
            format!("[{}]", fact.security.as_str()).dimmed()
        );
    }

    println!();
    println!("{}", "Encounter notes".bold());
    for note in &snapshot.encounter_notes {
        println!(
            "  {:>3}  {:<20} {:<14} {}",
            note.id,
            note.status.as_str().yellow(),
            note.client_name,
            note.summary
        );
    }

    println!();
    println!("{}", "Tasks".bold());
    for task in &snapshot.tasks {
        println!(
            "  {:>3}  {} {}",
            task.id,
            task.title,
            format!("({}/{})", task.completed_steps(), task.steps.len()).dimmed()
        );
    }

    println!();
    println!(
        "{}: {}",
        "Model".bold(),
        snapshot.selected_model.green()
    );
}
