//! Habitify wire types.
//!
//! Only the fields the app reads are typed. Everything else the service
//! sends is kept in `extra` so the payload shape can drift without
//! breaking deserialization.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::core::habit::{Habit, HabitKind, Progress, Status};

/// `GET /journal` response envelope.
#[derive(Deserialize, Debug, Default)]
pub struct JournalEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<HabitDto>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub status: bool,
}

fn default_true() -> bool {
    true
}

/// Treats an explicit JSON `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

#[derive(Deserialize, Debug, Default)]
pub struct HabitDto {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_archived: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_of_day: Vec<String>,
    #[serde(default)]
    pub goal: Option<GoalDto>,
    #[serde(default)]
    pub log_method: Option<String>,
    #[serde(default)]
    pub recurrence: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub remind: Vec<Value>,
    #[serde(default)]
    pub area: Option<AreaDto>,
    #[serde(default)]
    pub priority: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: Status,
    #[serde(default)]
    pub progress: Option<ProgressDto>,
    #[serde(default)]
    pub habit_type: Option<i64>,
    /// Fields we don't model (start_date, goal_history_items, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct GoalDto {
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub periodicity: String,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct AreaDto {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ProgressDto {
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_value: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_value: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub periodicity: String,
}

/// `POST /logs/<habit_id>` body.
#[derive(Serialize, Debug)]
pub struct AddLogRequest<'a> {
    pub unit_type: &'a str,
    pub value: f64,
    pub target_date: String,
}

/// `PUT /status/<habit_id>` body.
#[derive(Serialize, Debug)]
pub struct PutStatusRequest {
    pub status: Status,
    pub target_date: String,
}

impl From<HabitDto> for Habit {
    fn from(dto: HabitDto) -> Self {
        let goal = dto.goal.unwrap_or_default();
        let progress = dto.progress.unwrap_or_default();
        let area = dto
            .area
            .map(|a| a.name)
            .filter(|name| !name.trim().is_empty());

        // Journal entries without their own unit fall back to the goal's
        let unit = if progress.unit_type.is_empty() {
            goal.unit_type.clone()
        } else {
            progress.unit_type
        };
        let goal_unit = if goal.unit_type.is_empty() {
            unit.clone()
        } else {
            goal.unit_type
        };

        Habit {
            id: dto.id,
            name: dto.name,
            status: dto.status,
            progress: Progress {
                current: progress.current_value.max(0.0),
                target: progress.target_value,
                unit,
                periodicity: if progress.periodicity.is_empty() {
                    goal.periodicity
                } else {
                    progress.periodicity
                },
            },
            goal_unit,
            area,
            kind: HabitKind::from_code(dto.habit_type.unwrap_or(1)),
        }
    }
}
