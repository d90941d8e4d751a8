//! Dashboard read path.

pub mod model;

use crate::analysis::{self, model::MODEL_OPTIONS};
use crate::error::CmioResult;
use crate::fact::model::FactStatus;
use crate::note::model::NoteStatus;
use crate::{fact, message, note, task};
use cmio_db::DbPool;
use model::{DashboardSnapshot, DashboardStats};

/// Compute the headline counters.
pub fn get_stats(pool: &DbPool) -> CmioResult<DashboardStats> {
    Ok(DashboardStats {
        pending_facts: fact::count_pending(pool)?,
        draft_notes: note::count_unapproved(pool)?,
        open_tasks: task::count_tasks(pool)?,
    })
}

/// Read the full current state for display.
///
/// Each list takes the store lock separately, so lists read during concurrent
/// writes may come from different moments. The counters are computed from the
/// lists themselves and always agree with what the page shows.
pub fn get_snapshot(pool: &DbPool) -> CmioResult<DashboardSnapshot> {
    let pending_facts = fact::list_facts(pool)?;
    let encounter_notes = note::list_notes(pool)?;
    let tasks = task::list_tasks(pool)?;

    let stats = DashboardStats {
        pending_facts: pending_facts
            .iter()
            .filter(|f| f.status == FactStatus::Pending)
            .count() as i64,
        draft_notes: encounter_notes
            .iter()
            .filter(|n| n.status != NoteStatus::Approved)
            .count() as i64,
        open_tasks: tasks.len() as i64,
    };

    Ok(DashboardSnapshot {
        stats,
        pending_facts,
        encounter_notes,
        case_notes: note::list_case_notes(pool)?,
        tasks,
        messages: message::list_messages(pool)?,
        model_options: MODEL_OPTIONS.to_vec(),
        selected_model: analysis::get_selected_model(pool)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seeded_pool;

    #[test]
    fn test_seeded_stats() {
        let pool = seeded_pool();
        let stats = get_stats(&pool).unwrap();
        assert_eq!(
            stats,
            DashboardStats {
                pending_facts: 2,
                draft_notes: 2,
                open_tasks: 2,
            }
        );
    }

    #[test]
    fn test_snapshot_reflects_mutations() {
        let pool = seeded_pool();
        fact::review_fact(&pool, 1, "approve", 1).unwrap();
        note::promote_note(&pool, 1).unwrap();
        task::toggle_step(&pool, 1, 0).unwrap();
        analysis::select_model(&pool, "local-llm", false).unwrap();

        let snapshot = get_snapshot(&pool).unwrap();
        assert_eq!(snapshot.stats.pending_facts, 1);
        assert_eq!(snapshot.stats.draft_notes, 1);
        assert_eq!(snapshot.stats.open_tasks, 2);
        assert_eq!(snapshot.case_notes.len(), 1);
        assert!(snapshot.tasks[0].steps[0].completed);
        assert_eq!(snapshot.selected_model, "local-llm");
        assert_eq!(snapshot.model_options.len(), 3);
        assert_eq!(snapshot.messages.len(), 2);
    }

    #[test]
    fn test_rejected_notes_still_count_as_drafts() {
        let pool = seeded_pool();
        note::reject_note(&pool, 2).unwrap();
        assert_eq!(get_stats(&pool).unwrap().draft_notes, 2);
    }

    #[test]
    fn test_snapshot_counters_agree_with_lists() {
        let pool = seeded_pool();
        fact::review_fact(&pool, 2, "reject", 1).unwrap();
        note::submit_note(&pool, 1).unwrap();
        note::promote_note(&pool, 2).unwrap();

        let snapshot = get_snapshot(&pool).unwrap();
        let pending = snapshot
            .pending_facts
            .iter()
            .filter(|f| f.status == FactStatus::Pending)
            .count() as i64;
        let unapproved = snapshot
            .encounter_notes
            .iter()
            .filter(|n| n.status != NoteStatus::Approved)
            .count() as i64;

        assert_eq!(snapshot.stats.pending_facts, pending);
        assert_eq!(snapshot.stats.draft_notes, unapproved);
        assert_eq!(snapshot.stats.open_tasks, snapshot.tasks.len() as i64);
        assert_eq!(snapshot.stats, get_stats(&pool).unwrap());
    }
}
