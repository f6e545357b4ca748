use serde::Serialize;
use std::str::FromStr;

/// Condition written by the bulk archival update
pub const ARCHIVED_CONDITION: &str = "archived";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Archaeologist {
    pub id: i64,
    pub full_name: String,
    pub salary: Option<f64>,
    pub specialization: Option<String>,
    pub qualification: Option<String>,
}

/// Column values for inserting or overwriting an archaeologist
#[derive(Debug, Clone, PartialEq)]
pub struct ArchaeologistFields {
    pub full_name: String,
    pub salary: f64,
    pub specialization: Option<String>,
    pub qualification: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub id: i64,
    pub name: String,
    pub cost: Option<f64>,
    pub era: Option<String>,
    pub prior_owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactFields {
    pub name: String,
    pub cost: f64,
    pub era: Option<String>,
    pub prior_owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: i64,
    pub archaeologist_id: i64,
    pub artifact_id: i64,
    pub location: Option<String>,
    pub date: Option<String>,
    pub condition: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FindingFields {
    pub archaeologist_id: i64,
    pub artifact_id: i64,
    pub location: Option<String>,
    pub date: Option<String>,
    pub condition: Option<String>,
    pub kind: Option<String>,
}

/// A finding joined with the names of its archaeologist and artifact
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingDetail {
    pub archaeologist_name: String,
    pub artifact_name: String,
    pub location: Option<String>,
    pub date: Option<String>,
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingCount {
    pub archaeologist_id: i64,
    pub name: String,
    pub count: i64,
}

/// Columns artifacts may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Name,
    Cost,
    Era,
}

impl SortField {
    pub fn column(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Cost => "cost",
            SortField::Era => "era",
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "cost" => Ok(SortField::Cost),
            "era" => Ok(SortField::Era),
            other => Err(format!(
                "Invalid sortBy '{}': expected one of name, cost, era",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Invalid order '{}': expected asc or desc", other)),
        }
    }
}
