//! Progress reporting
//!
//! A [`ProgressMonitor`] observes a layout as it runs. Tasks nest: a task
//! begun while another is open is a sub-task of it, and `done` closes the
//! innermost open task. Monitors never influence the layout result.

use log::{debug, info, trace};

/// Receives progress notifications from a running layout
pub trait ProgressMonitor {
    /// Opens a task expected to take `total_work` units.
    fn begin(&mut self, task: &str, total_work: usize);

    /// Reports `units` of completed work on the innermost open task.
    fn worked(&mut self, _units: usize) {}

    /// Attaches a free-form message to the innermost open task.
    fn log(&mut self, _message: &str) {}

    /// Closes the innermost open task.
    fn done(&mut self);
}

/// Monitor that discards every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor;

impl ProgressMonitor for NoopMonitor {
    fn begin(&mut self, _task: &str, _total_work: usize) {}

    fn done(&mut self) {}
}

#[derive(Debug)]
struct OpenTask {
    name: String,
    total_work: usize,
    completed: usize,
}

/// Monitor that forwards notifications to the `log` facade
#[derive(Debug, Default)]
pub struct LogMonitor {
    tasks: Vec<OpenTask>,
}

impl LogMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks begun but not yet done
    pub fn depth(&self) -> usize {
        self.tasks.len()
    }
}

impl ProgressMonitor for LogMonitor {
    fn begin(&mut self, task: &str, total_work: usize) {
        debug!(task, total_work, depth = self.tasks.len(); "Task started");
        self.tasks.push(OpenTask {
            name: task.to_string(),
            total_work,
            completed: 0,
        });
    }

    fn worked(&mut self, units: usize) {
        if let Some(task) = self.tasks.last_mut() {
            task.completed += units;
            trace!(
                task = task.name.as_str(),
                completed = task.completed,
                total_work = task.total_work;
                "Task progress"
            );
        }
    }

    fn log(&mut self, message: &str) {
        match self.tasks.last() {
            Some(task) => info!(task = task.name.as_str(); "{message}"),
            None => info!("{message}"),
        }
    }

    fn done(&mut self) {
        if let Some(task) = self.tasks.pop() {
            debug!(
                task = task.name.as_str(),
                completed = task.completed,
                total_work = task.total_work;
                "Task done"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_monitor_nests_tasks() {
        let mut monitor = LogMonitor::new();
        monitor.begin("layout", 2);
        monitor.begin("placement", 3);
        assert_eq!(monitor.depth(), 2);

        monitor.worked(2);
        assert_eq!(monitor.tasks[1].completed, 2);

        monitor.done();
        monitor.worked(1);
        assert_eq!(monitor.tasks[0].completed, 1);

        monitor.done();
        assert_eq!(monitor.depth(), 0);
    }

    #[test]
    fn test_log_monitor_tolerates_unbalanced_calls() {
        let mut monitor = LogMonitor::new();
        monitor.worked(5);
        monitor.log("nothing open");
        monitor.done();
        assert_eq!(monitor.depth(), 0);
    }

    #[test]
    fn test_noop_monitor() {
        let mut monitor = NoopMonitor;
        monitor.begin("anything", 10);
        monitor.worked(10);
        monitor.log("ignored");
        monitor.done();
    }
}
