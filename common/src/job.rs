use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Timestamp layout used everywhere a job time is shown to a user.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_time(t: &DateTime<Utc>) -> String {
    t.format(TIME_FORMAT).to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct JobId(pub String);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Running,
    Success,
    Failed,
    Retry,
    Timeout,
    Canceled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::Running => "Running",
            JobStatus::Success => "Success",
            JobStatus::Failed => "Failed",
            JobStatus::Retry => "Retry",
            JobStatus::Timeout => "Timeout",
            JobStatus::Canceled => "Canceled",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row-level snapshot of a job, as returned by a list query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobSummary {
    pub uuid: JobId,
    pub creator: String,
    pub method: String,
    pub status: JobStatus,
    pub start_time: DateTime<Utc>,
    pub cluster_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubJob {
    pub name: String,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl std::fmt::Display for SubJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.status)
    }
}

/// A sub-job as reported upstream: either just its identifier or a full record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SubJobEntry {
    Id(String),
    Record(SubJob),
}

impl From<SubJob> for SubJobEntry {
    fn from(sub: SubJob) -> Self {
        SubJobEntry::Record(sub)
    }
}

impl std::fmt::Display for SubJobEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubJobEntry::Id(id) => f.write_str(id),
            SubJobEntry::Record(sub) => write!(f, "{}", sub),
        }
    }
}

/// Full snapshot of a single job, as returned by an info query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobDetail {
    pub uuid: JobId,
    pub creator: String,
    pub method: String,
    pub status: JobStatus,
    pub start_time: DateTime<Utc>,
    /// None while the job is still running.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    pub cluster_id: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub sub_jobs: Vec<SubJobEntry>,
}

impl JobDetail {
    pub fn summary(&self) -> JobSummary {
        JobSummary {
            uuid: self.uuid.clone(),
            creator: self.creator.clone(),
            method: self.method.clone(),
            status: self.status,
            start_time: self.start_time,
            cluster_id: self.cluster_id.clone(),
        }
    }

    /// Textual form of the sub-job sequence, e.g. `[mysql(Success), proxy]`.
    pub fn sub_jobs_text(&self) -> String {
        let parts: Vec<String> = self.sub_jobs.iter().map(|s| s.to_string()).collect();
        format!("[{}]", parts.join(", "))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct JobList(pub Vec<JobSummary>);

impl JobList {
    /// Start time ascending, then uuid ascending.
    pub fn sort(&mut self) {
        self.0.sort_by(compare_jobs);
    }

    pub fn sorted(&self) -> JobList {
        let mut list = self.clone();
        list.sort();
        list
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JobSummary> {
        self.0.iter()
    }
}

impl From<Vec<JobSummary>> for JobList {
    fn from(jobs: Vec<JobSummary>) -> Self {
        JobList(jobs)
    }
}

fn compare_jobs(a: &JobSummary, b: &JobSummary) -> Ordering {
    a.start_time
        .cmp(&b.start_time)
        .then_with(|| a.uuid.cmp(&b.uuid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn summary(uuid: &str, secs: i64) -> JobSummary {
        JobSummary {
            uuid: JobId(uuid.to_string()),
            creator: "admin".to_string(),
            method: "ClusterInstall".to_string(),
            status: JobStatus::Success,
            start_time: Utc.timestamp_opt(secs, 0).unwrap(),
            cluster_id: "c-1".to_string(),
        }
    }

    #[test]
    fn test_sort_by_start_time_then_uuid() {
        let mut list = JobList(vec![
            summary("c", 300),
            summary("b", 100),
            summary("a", 100),
            summary("d", 200),
        ]);
        list.sort();
        let ids: Vec<&str> = list.iter().map(|j| j.uuid.0.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn test_format_time() {
        let t = Utc.with_ymd_and_hms(2020, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(format_time(&t), "2020-03-07 09:05:01");
    }

    #[test]
    fn test_sub_jobs_text() {
        let mut detail = JobDetail {
            uuid: JobId("u".to_string()),
            creator: "admin".to_string(),
            method: "ClusterUpdate".to_string(),
            status: JobStatus::Running,
            start_time: Utc.timestamp_opt(0, 0).unwrap(),
            end_time: None,
            cluster_id: "c".to_string(),
            result: String::new(),
            sub_jobs: Vec::new(),
        };
        assert_eq!(detail.sub_jobs_text(), "[]");

        detail.sub_jobs = vec![
            SubJob { name: "mysql".to_string(), status: JobStatus::Success, start_time: None, end_time: None }.into(),
            SubJob { name: "proxy".to_string(), status: JobStatus::Running, start_time: None, end_time: None }.into(),
        ];
        assert_eq!(detail.sub_jobs_text(), "[mysql(Success), proxy(Running)]");

        detail.sub_jobs = vec![SubJobEntry::Id("python".to_string()), SubJobEntry::Id("client".to_string())];
        assert_eq!(detail.sub_jobs_text(), "[python, client]");
        assert_eq!(detail.summary().status, JobStatus::Running);
    }

    #[test]
    fn test_sub_job_entry_accepts_ids_and_records() {
        let entries: Vec<SubJobEntry> = serde_json::from_str(
            r#"["mysql", {"name": "proxy", "status": "Running"}]"#,
        )
        .unwrap();
        assert_eq!(entries[0], SubJobEntry::Id("mysql".to_string()));
        match &entries[1] {
            SubJobEntry::Record(sub) => assert_eq!(sub.status, JobStatus::Running),
            other => panic!("expected record, got {:?}", other),
        }
        assert_eq!(entries[1].to_string(), "proxy(Running)");
    }

    #[test]
    fn test_status_wire_form() {
        let s = serde_json::to_string(&JobStatus::Canceled).unwrap();
        assert_eq!(s, "\"Canceled\"");
        assert_eq!(JobStatus::Timeout.to_string(), "Timeout");
    }

    proptest! {
        #[test]
        fn test_sorted_list_is_ordered(
            entries in proptest::collection::vec((0i64..50, "[a-f]{1,4}"), 0..30),
        ) {
            let list: JobList = entries
                .iter()
                .map(|(secs, id)| summary(id, *secs))
                .collect::<Vec<_>>()
                .into();
            let sorted = list.sorted();
            prop_assert_eq!(sorted.len(), list.len());
            for pair in sorted.0.windows(2) {
                prop_assert_ne!(compare_jobs(&pair[0], &pair[1]), Ordering::Greater);
            }
        }
    }
}
