use crate::machine::{ItemRef, Status};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Child,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub role: Role,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub family_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Morning,
    Evening,
    Sunday,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub key: String,
    pub label: String,
    pub group: Group,
    pub status: Status,
}

impl Task {
    pub fn item_ref(&self) -> ItemRef {
        ItemRef::task(self.key.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extra {
    pub id: i64,
    pub title: String,
    pub points: u32,
    pub status: Status,
}

impl Extra {
    pub fn item_ref(&self) -> ItemRef {
        ItemRef::extra(self.id)
    }

    pub fn label(&self) -> String {
        format!("{} (+{} pts)", self.title, self.points)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistSnapshot {
    pub date: NaiveDate,
    #[serde(default)]
    pub is_sunday: bool,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub extras: Vec<Extra>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub late: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalKind {
    Task,
    Extra,
}

impl ApprovalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalKind::Task => "task",
            ApprovalKind::Extra => "extra",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Photo,
    Video,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalItem {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ApprovalKind,
    pub child_name: String,
    #[serde(default)]
    pub child_id: Option<i64>,
    pub label: String,
    #[serde(default)]
    pub points: Option<u32>,
    pub date: String,
    #[serde(default, rename = "photo_file_id")]
    pub media_ref: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub media_type: MediaType,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ApprovalItem {
    pub fn key(&self) -> ApprovalKey {
        ApprovalKey {
            kind: self.kind,
            id: self.id,
        }
    }
}

/// `(type, id)` identifies one rendered approval card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApprovalKey {
    pub kind: ApprovalKind,
    pub id: i64,
}

impl ApprovalKey {
    pub fn card_key(&self) -> String {
        format!("approval-{}-{}", self.kind.as_str(), self.id)
    }
}

impl fmt::Display for ApprovalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.as_str(), self.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApprovalList {
    pub approvals: Vec<ApprovalItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DecisionBody {
    #[serde(rename = "type")]
    pub kind: ApprovalKind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChildSummary {
    pub id: i64,
    pub name: String,
    pub total_tasks: u32,
    pub done: u32,
    #[serde(default)]
    pub pending: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParentSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChildrenOverview {
    pub children: Vec<ChildSummary>,
    #[serde(default)]
    pub parents: Vec<ParentSummary>,
    #[serde(default)]
    pub pending_approvals: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChildToday {
    pub child_name: String,
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub extras: Vec<Extra>,
    pub points: u32,
    pub max_points: u32,
    #[serde(default)]
    pub extra_points: u32,
    #[serde(default)]
    pub shower_missing: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportDay {
    pub date: NaiveDate,
    pub weekday: String,
    pub display: String,
    pub points: u32,
    #[serde(default)]
    pub extra: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyReport {
    pub child_name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<ReportDay>,
    pub subtotal: i64,
    #[serde(default)]
    pub penalty: i64,
    pub total: i64,
    #[serde(default)]
    pub extra_total: u32,
    pub money_percent: u32,
    pub max_daily: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryWeek {
    pub start_display: String,
    pub end_display: String,
    pub days: Vec<ReportDay>,
    pub total: i64,
    #[serde(default)]
    pub penalty: i64,
    #[serde(default)]
    pub extra_total: u32,
    pub money_percent: u32,
    pub max_daily: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct History {
    pub child_name: String,
    pub weeks: Vec<HistoryWeek>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManagedTask {
    pub key: String,
    pub label: String,
    pub group: Group,
    pub is_standard: bool,
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskList {
    pub child_name: String,
    pub tasks: Vec<ManagedTask>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InviteCode {
    pub invite_code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct NewExtra<'a> {
    pub child_id: i64,
    pub title: &'a str,
    pub points: u32,
}

#[derive(Debug, Serialize)]
pub struct ToggleTask<'a> {
    pub task_key: &'a str,
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct TaskKeyBody<'a> {
    pub task_key: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NewTask<'a> {
    pub label: &'a str,
}
