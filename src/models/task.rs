use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    /// Unique identifier, assigned by the store at creation
    pub id: u64,
    /// What needs doing; never empty after trimming
    pub text: String,
    /// Whether the task is done
    pub completed: bool,
    /// Classification label
    #[serde(default)]
    pub category: Category,
    /// Due day, local calendar
    #[serde(rename = "dueDate", default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,
    /// Time of day the task is due; only meaningful together with `due_date`
    #[serde(
        rename = "dueTime",
        default,
        skip_serializing_if = "Option::is_none",
        with = "hhmm"
    )]
    pub due_time: Option<Time>,
}

/// Task classification label.
///
/// Labels outside the built-in set are kept verbatim in `Custom` so they
/// survive a load/save round trip; they get the same styling as `Other`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Personal,
    Work,
    Shopping,
    Health,
    Finance,
    Other,
    Custom(String),
}

impl Category {
    pub const BUILTIN: [Category; 6] = [
        Category::Personal,
        Category::Work,
        Category::Shopping,
        Category::Health,
        Category::Finance,
        Category::Other,
    ];

    pub fn label(&self) -> &str {
        match self {
            Category::Personal => "Personal",
            Category::Work => "Work",
            Category::Shopping => "Shopping",
            Category::Health => "Health",
            Category::Finance => "Finance",
            Category::Other => "Other",
            Category::Custom(label) => label,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "personal" => Category::Personal,
            "work" => Category::Work,
            "shopping" => Category::Shopping,
            "health" => Category::Health,
            "finance" => Category::Finance,
            "other" => Category::Other,
            _ => Category::Custom(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Custom(label) => label,
            builtin => builtin.label().to_owned(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::from(s.to_owned()))
    }
}

/// Wire encoding for `dueTime`: 24-hour "HH:MM", no seconds.
mod hhmm {
    use jiff::civil::Time;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &Option<Time>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_str(&format!("{:02}:{:02}", t.hour(), t.minute())),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Time>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)?.as_deref() {
            None | Some("") => Ok(None),
            Some(value) => Time::strptime("%H:%M", value)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
