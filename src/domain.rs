//! Task timing and the derived overdue predicate.
//!
//! The timer is two independent instants on the task row. Starting and
//! stopping are unconditional writes (see `db::tasks`); everything derived
//! from them lives here as pure reads so the rules stay in one place:
//!
//! - elapsed time is only known when both instants are set
//! - a stop instant earlier than the start instant clamps to zero minutes
//! - overdue is a strict comparison against the estimate and never writes
//!   back to the stored status

use crate::types::Task;

/// Milliseconds per minute, as a float so elapsed time keeps its fraction.
const MS_PER_MINUTE: f64 = 60_000.0;

impl Task {
    /// Elapsed timer minutes, or `None` unless both instants are set.
    ///
    /// The value is real-valued (90 seconds reads as 1.5). A stop instant
    /// before the start instant clamps to 0.0 rather than going negative.
    pub fn time_spent(&self) -> Option<f64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                let elapsed_ms = (end - start).max(0);
                Some(elapsed_ms as f64 / MS_PER_MINUTE)
            }
            _ => None,
        }
    }

    /// Whether elapsed time strictly exceeds the completion estimate.
    ///
    /// False whenever elapsed time is unknown or no estimate is set,
    /// regardless of timer state. Exactly meeting the estimate is not
    /// overdue. This is a derived read; the stored `status` column is
    /// never transitioned by it.
    pub fn is_overdue(&self) -> bool {
        match (self.time_spent(), self.estimated_time_for_completion) {
            (Some(spent), Some(estimate)) => spent > estimate as f64,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{Task, TaskStatus};

    fn task_with_timer(start: Option<i64>, end: Option<i64>, estimate: Option<i64>) -> Task {
        Task {
            id: 1,
            user_id: 1,
            title: "timer".to_string(),
            description: None,
            due_date: None,
            due_time: None,
            status: TaskStatus::Pending,
            category: None,
            tool: None,
            recurring: false,
            duration: None,
            estimated_time_for_completion: estimate,
            workroom_id: None,
            assigned_to: None,
            start_time: start,
            end_time: end,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn time_spent_is_exact_fractional_minutes() {
        // start=T, end=T+90s -> 1.5 minutes
        let task = task_with_timer(Some(1_000_000), Some(1_090_000), None);
        assert_eq!(task.time_spent(), Some(1.5));
    }

    #[test]
    fn time_spent_unknown_without_both_instants() {
        assert_eq!(task_with_timer(None, None, None).time_spent(), None);
        assert_eq!(task_with_timer(Some(1000), None, None).time_spent(), None);
        assert_eq!(task_with_timer(None, Some(1000), None).time_spent(), None);
    }

    #[test]
    fn time_spent_clamps_stop_before_start_to_zero() {
        let task = task_with_timer(Some(2_000_000), Some(1_000_000), None);
        assert_eq!(task.time_spent(), Some(0.0));
    }

    #[test]
    fn overdue_false_without_estimate_for_any_timer_state() {
        assert!(!task_with_timer(None, None, None).is_overdue());
        assert!(!task_with_timer(Some(0), Some(86_400_000), None).is_overdue());
    }

    #[test]
    fn overdue_false_when_timer_unknown_even_with_estimate() {
        assert!(!task_with_timer(Some(1000), None, Some(1)).is_overdue());
    }

    #[test]
    fn overdue_requires_strictly_exceeding_estimate() {
        // estimate=10, spent exactly 10 -> not overdue
        let exact = task_with_timer(Some(0), Some(600_000), Some(10));
        assert_eq!(exact.time_spent(), Some(10.0));
        assert!(!exact.is_overdue());

        // spent 10.01 -> overdue
        let over = task_with_timer(Some(0), Some(600_600), Some(10));
        assert!(over.is_overdue());
    }

    #[test]
    fn zero_elapsed_with_zero_estimate_is_not_overdue() {
        let task = task_with_timer(Some(1000), Some(1000), Some(0));
        assert_eq!(task.time_spent(), Some(0.0));
        assert!(!task.is_overdue());
    }
}
