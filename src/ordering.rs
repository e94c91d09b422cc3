//! Delivery-time ordering.
//!
//! Optional pre-pass for Jackson's rule: with the store sorted by `q`
//! descending, the first released job met during a scan already has the
//! largest tail among the eligible set.
//!
//! The relative order of jobs with equal `q` is not part of the contract.
//! The current implementation keeps their previous order.

use std::cmp::Ordering;

use crate::models::{Job, JobStore};

/// Comparator putting larger delivery times first.
pub fn by_delivery_desc(a: &Job, b: &Job) -> Ordering {
    b.delivery().cmp(&a.delivery())
}

/// Sorts a store in place by delivery time, largest first.
pub fn sort_by_delivery<S: JobStore>(store: &mut S) {
    store.sort_by(by_delivery_desc);
}

/// Whether every adjacent pair satisfies `q[k] >= q[k + 1]`.
pub fn is_sorted_by_delivery<'a, I>(jobs: I) -> bool
where
    I: IntoIterator<Item = &'a Job>,
{
    let mut prev: Option<&Job> = None;
    for job in jobs {
        if let Some(p) = prev {
            if p.delivery() < job.delivery() {
                return false;
            }
        }
        prev = Some(job);
    }
    true
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::instance::sample_instance;
    use crate::models::JobCollection;

    #[test]
    fn test_sort_collection() {
        let mut jobs = sample_instance();
        assert!(!is_sorted_by_delivery(&jobs));

        sort_by_delivery(&mut jobs);
        assert!(is_sorted_by_delivery(&jobs));
        let order: Vec<u32> = jobs.iter().map(|j| j.id()).collect();
        assert_eq!(order, vec![5, 4, 6, 2, 3, 1]);
    }

    #[test]
    fn test_sort_vec_keeps_every_job() {
        let mut jobs: Vec<Job> = sample_instance().into();
        let before: BTreeSet<u32> = jobs.iter().map(|j| j.id()).collect();

        sort_by_delivery(&mut jobs);
        let after: BTreeSet<u32> = jobs.iter().map(|j| j.id()).collect();
        assert_eq!(jobs.len(), 6);
        assert_eq!(before, after);
        assert!(is_sorted_by_delivery(&jobs));
    }

    #[test]
    fn test_equal_keys_are_sorted() {
        let jobs: JobCollection = vec![
            Job::new(1, 0, 1, 3),
            Job::new(2, 0, 1, 3),
            Job::new(3, 0, 1, 3),
        ]
        .into();
        assert!(is_sorted_by_delivery(&jobs));
    }

    #[test]
    fn test_empty_and_single_are_sorted() {
        assert!(is_sorted_by_delivery(&JobCollection::new()));
        assert!(is_sorted_by_delivery(&vec![Job::new(1, 0, 1, 9)]));
    }
}
