// VgeViewer - core/plan.rs
//
// Run plan construction. The plan is fixed before any file is processed.

use crate::core::model::{RunItem, VariantKind};

/// Apply the job time rules to classified items.
///
/// - `add_job_time`: every job list also gets a job time item, appended to
///   the end in the same relative order.
/// - `only_job_time`: job lists are replaced in place by job time items.
///
/// When both are set `add_job_time` wins and `only_job_time` is ignored.
pub fn build_plan(items: Vec<RunItem>, add_job_time: bool, only_job_time: bool) -> Vec<RunItem> {
    let mut plan = items;

    if add_job_time {
        let appended: Vec<RunItem> = plan
            .iter()
            .filter(|item| item.variant == VariantKind::Joblist)
            .map(|item| RunItem::new(item.path.clone(), VariantKind::JobTime))
            .collect();
        plan.extend(appended);
    } else if only_job_time {
        for item in plan.iter_mut() {
            if item.variant == VariantKind::Joblist {
                item.variant = VariantKind::JobTime;
            }
        }
    }

    tracing::debug!(
        items = plan.len(),
        add_job_time,
        only_job_time,
        "Run plan built"
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Vec<RunItem> {
        vec![
            RunItem::new("/d/p1.csv", VariantKind::Joblist),
            RunItem::new("/d/p2.csv", VariantKind::WorkerResult),
        ]
    }

    #[test]
    fn test_no_flags_keeps_plan() {
        assert_eq!(build_plan(base(), false, false), base());
    }

    #[test]
    fn test_add_job_time_appends() {
        assert_eq!(
            build_plan(base(), true, false),
            vec![
                RunItem::new("/d/p1.csv", VariantKind::Joblist),
                RunItem::new("/d/p2.csv", VariantKind::WorkerResult),
                RunItem::new("/d/p1.csv", VariantKind::JobTime),
            ]
        );
    }

    #[test]
    fn test_only_job_time_replaces_in_place() {
        assert_eq!(
            build_plan(base(), false, true),
            vec![
                RunItem::new("/d/p1.csv", VariantKind::JobTime),
                RunItem::new("/d/p2.csv", VariantKind::WorkerResult),
            ]
        );
    }

    #[test]
    fn test_add_wins_over_only() {
        assert_eq!(build_plan(base(), true, true), build_plan(base(), true, false));
    }

    #[test]
    fn test_appended_items_keep_relative_order() {
        let items = vec![
            RunItem::new("/a.csv", VariantKind::Joblist),
            RunItem::new("/b.csv", VariantKind::Joblist),
        ];
        let plan = build_plan(items, true, false);
        assert_eq!(plan[2], RunItem::new("/a.csv", VariantKind::JobTime));
        assert_eq!(plan[3], RunItem::new("/b.csv", VariantKind::JobTime));
    }
}
