//! Text rendering of job listings and schedules.

use std::fmt;

use crate::models::Job;
use crate::scheduler::ScheduleKpi;

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "job {}: r={} p={} q={} ",
            self.id(),
            self.release(),
            self.processing(),
            self.delivery()
        )?;
        match self.interval() {
            Some(i) => write!(f, "[{}, {}]", i.start, i.finish),
            None => f.write_str("[-, -]"),
        }
    }
}

/// Renders a titled listing, one job per line, in iteration order.
pub fn render_jobs<'a, I>(title: &str, jobs: I) -> String
where
    I: IntoIterator<Item = &'a Job>,
{
    let lines: String = jobs.into_iter().map(|job| format!("  {job}\n")).collect();
    format!("{title}\n{lines}")
}

/// Renders the KPI block printed under a schedule.
pub fn render_kpi(kpi: &ScheduleKpi) -> String {
    format!(
        "objective max(C + q) = {} (job {})\n\
         makespan = {}, idle = {}, avg flow = {:.2}, max wait = {}\n",
        kpi.objective,
        kpi.critical_job,
        kpi.makespan,
        kpi.total_idle,
        kpi.avg_flow_time,
        kpi.max_waiting
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::sample_instance;
    use crate::scheduler::JacksonScheduler;

    #[test]
    fn test_display_unscheduled() {
        assert_eq!(Job::new(3, 2, 3, 2).to_string(), "job 3: r=2 p=3 q=2 [-, -]");
    }

    #[test]
    fn test_display_scheduled() {
        let mut job = Job::new(3, 2, 3, 2);
        job.assign(2);
        assert_eq!(job.to_string(), "job 3: r=2 p=3 q=2 [2, 5]");
    }

    #[test]
    fn test_render_jobs_in_collection_order() {
        let schedule = JacksonScheduler::new().schedule(sample_instance()).unwrap();
        let text = render_jobs("Schedule", &schedule);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Schedule");
        assert_eq!(lines[1], "  job 3: r=2 p=3 q=2 [2, 5]");
        assert_eq!(lines[6], "  job 1: r=3 p=2 q=1 [29, 31]");
    }

    #[test]
    fn test_render_jobs_empty() {
        let jobs = crate::models::JobCollection::new();
        assert_eq!(render_jobs("Instance", &jobs), "Instance\n");
    }

    #[test]
    fn test_render_kpi() {
        let schedule = JacksonScheduler::new().schedule(sample_instance()).unwrap();
        let kpi = ScheduleKpi::calculate(&schedule).unwrap();
        let text = render_kpi(&kpi);
        assert!(text.starts_with("objective max(C + q) = 38 (job 6)"));
        assert!(text.contains("makespan = 31"));
    }
}
