//! Board member model matching the frontend BoardMember interface.

use serde::{Deserialize, Serialize};

/// Role class of a board member, drives grouping on the public page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoardMemberType {
    Executive,
    Representative,
    Member,
}

impl BoardMemberType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardMemberType::Executive => "EXECUTIVE",
            BoardMemberType::Representative => "REPRESENTATIVE",
            BoardMemberType::Member => "MEMBER",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "EXECUTIVE" => Some(BoardMemberType::Executive),
            "REPRESENTATIVE" => Some(BoardMemberType::Representative),
            "MEMBER" => Some(BoardMemberType::Member),
            _ => None,
        }
    }
}

/// A member of the school board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMember {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(rename = "type")]
    pub member_type: BoardMemberType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Display position on the public board page, lowest first
    #[serde(rename = "order")]
    pub display_order: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl BoardMember {
    /// Initials used for the avatar placeholder ("Jane Doe" -> "JD").
    pub fn initials(&self) -> String {
        let mut words = self.name.split_whitespace();
        let first = words.next().and_then(|w| w.chars().next());
        let last = words.last().and_then(|w| w.chars().next());

        match (first, last) {
            (Some(f), Some(l)) => format!("{}{}", f, l).to_uppercase(),
            (Some(f), None) => f.to_uppercase().to_string(),
            _ => String::new(),
        }
    }
}

/// Request body for creating a new board member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardMemberRequest {
    pub name: String,
    pub role: String,
    #[serde(rename = "type")]
    pub member_type: BoardMemberType,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(rename = "order", default)]
    pub display_order: i64,
}

/// Request body for updating an existing board member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoardMemberRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(rename = "type", default)]
    pub member_type: Option<BoardMemberType>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(rename = "order", default)]
    pub display_order: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str) -> BoardMember {
        BoardMember {
            id: "test".to_string(),
            name: name.to_string(),
            role: "Chairperson".to_string(),
            member_type: BoardMemberType::Executive,
            email: None,
            phone: None,
            bio: None,
            display_order: 0,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_initials_two_names() {
        assert_eq!(member("Jane Doe").initials(), "JD");
    }

    #[test]
    fn test_initials_single_name() {
        assert_eq!(member("Madonna").initials(), "M");
    }

    #[test]
    fn test_initials_three_names_uses_first_and_last() {
        assert_eq!(member("Mary Jane Watson").initials(), "MW");
    }

    #[test]
    fn test_initials_lowercase_input() {
        assert_eq!(member("jane doe").initials(), "JD");
    }

    #[test]
    fn test_initials_empty_name() {
        assert_eq!(member("  ").initials(), "");
    }

    #[test]
    fn test_member_type_round_trip() {
        for member_type in [
            BoardMemberType::Executive,
            BoardMemberType::Representative,
            BoardMemberType::Member,
        ] {
            assert_eq!(
                BoardMemberType::from_str(member_type.as_str()),
                Some(member_type)
            );
        }
    }
}
