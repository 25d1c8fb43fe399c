use serde::{Deserialize, Serialize};

/// Physical condition of a returned item as judged at inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnCondition {
    NewUnopened,
    NewOpened,
    LikeNew,
    Good,
    Fair,
    Poor,
    Defective,
    Damaged,
    Expired,
    MissingParts,
}

impl ReturnCondition {
    /// Wire code of the condition
    pub fn code(&self) -> &'static str {
        match self {
            ReturnCondition::NewUnopened => "NEW_UNOPENED",
            ReturnCondition::NewOpened => "NEW_OPENED",
            ReturnCondition::LikeNew => "LIKE_NEW",
            ReturnCondition::Good => "GOOD",
            ReturnCondition::Fair => "FAIR",
            ReturnCondition::Poor => "POOR",
            ReturnCondition::Defective => "DEFECTIVE",
            ReturnCondition::Damaged => "DAMAGED",
            ReturnCondition::Expired => "EXPIRED",
            ReturnCondition::MissingParts => "MISSING_PARTS",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ReturnCondition::NewUnopened => "New, unopened",
            ReturnCondition::NewOpened => "New, opened",
            ReturnCondition::LikeNew => "Like new",
            ReturnCondition::Good => "Good",
            ReturnCondition::Fair => "Fair",
            ReturnCondition::Poor => "Poor",
            ReturnCondition::Defective => "Defective",
            ReturnCondition::Damaged => "Damaged",
            ReturnCondition::Expired => "Expired",
            ReturnCondition::MissingParts => "Missing parts",
        }
    }

    /// All conditions
    pub fn all() -> Vec<ReturnCondition> {
        vec![
            ReturnCondition::NewUnopened,
            ReturnCondition::NewOpened,
            ReturnCondition::LikeNew,
            ReturnCondition::Good,
            ReturnCondition::Fair,
            ReturnCondition::Poor,
            ReturnCondition::Defective,
            ReturnCondition::Damaged,
            ReturnCondition::Expired,
            ReturnCondition::MissingParts,
        ]
    }

    /// Parse from a wire code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "NEW_UNOPENED" => Some(ReturnCondition::NewUnopened),
            "NEW_OPENED" => Some(ReturnCondition::NewOpened),
            "LIKE_NEW" => Some(ReturnCondition::LikeNew),
            "GOOD" => Some(ReturnCondition::Good),
            "FAIR" => Some(ReturnCondition::Fair),
            "POOR" => Some(ReturnCondition::Poor),
            "DEFECTIVE" => Some(ReturnCondition::Defective),
            "DAMAGED" => Some(ReturnCondition::Damaged),
            "EXPIRED" => Some(ReturnCondition::Expired),
            "MISSING_PARTS" => Some(ReturnCondition::MissingParts),
            _ => None,
        }
    }
}

impl ToString for ReturnCondition {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}
