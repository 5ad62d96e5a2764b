#![forbid(unsafe_code)]

pub mod view;

pub mod ids {
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct UserId(String);

    impl UserId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, UserIdError> {
            let value = value.into();
            validate_user_id(&value)?;
            Ok(Self(value))
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum UserIdError {
        Empty,
        TooLong,
        InvalidFirstChar,
        InvalidChar { ch: char, index: usize },
    }

    fn validate_user_id(value: &str) -> Result<(), UserIdError> {
        if value.is_empty() {
            return Err(UserIdError::Empty);
        }
        if value.len() > 128 {
            return Err(UserIdError::TooLong);
        }
        let Some(first) = value.chars().next() else {
            return Err(UserIdError::Empty);
        };
        if !first.is_ascii_alphanumeric() {
            return Err(UserIdError::InvalidFirstChar);
        }
        for (index, ch) in value.chars().enumerate() {
            if index == 0 {
                continue;
            }
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '@' | '-') {
                continue;
            }
            return Err(UserIdError::InvalidChar { ch, index });
        }
        Ok(())
    }
}

pub mod model {
    use std::cmp::Ordering;
    use std::collections::BTreeSet;

    pub const TASK_TITLE_MAX: usize = 500;
    pub const LIST_TITLE_MAX: usize = 100;
    pub const NOTES_MAX: usize = 5000;
    pub const TAG_MAX: usize = 50;
    pub const SEARCH_MAX: usize = 200;

    pub const DEFAULT_LIST_COLOR: &str = "#007AFF";

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
    pub enum Priority {
        #[default]
        None,
        Low,
        Medium,
        High,
    }

    impl Priority {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::None => "none",
                Self::Low => "low",
                Self::Medium => "medium",
                Self::High => "high",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value {
                "none" => Some(Self::None),
                "low" => Some(Self::Low),
                "medium" => Some(Self::Medium),
                "high" => Some(Self::High),
                _ => None,
            }
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum FieldError {
        Empty,
        TooLong { max: usize },
        InvalidColor,
        ContainsControl,
    }

    impl FieldError {
        pub fn message(&self) -> &'static str {
            match self {
                Self::Empty => "value must not be empty",
                Self::TooLong { max } => match *max {
                    TASK_TITLE_MAX => "title exceeds 500 characters",
                    LIST_TITLE_MAX => "title exceeds 100 characters",
                    NOTES_MAX => "notes exceed 5000 characters",
                    TAG_MAX => "tag exceeds 50 characters",
                    SEARCH_MAX => "search exceeds 200 characters",
                    _ => "value too long",
                },
                Self::InvalidColor => "color must be #RRGGBB",
                Self::ContainsControl => "value contains control characters",
            }
        }
    }

    pub fn validate_task_title(value: &str) -> Result<(), FieldError> {
        validate_bounded(value, TASK_TITLE_MAX)
    }

    pub fn validate_list_title(value: &str) -> Result<(), FieldError> {
        validate_bounded(value, LIST_TITLE_MAX)
    }

    pub fn validate_notes(value: &str) -> Result<(), FieldError> {
        if value.chars().count() > NOTES_MAX {
            return Err(FieldError::TooLong { max: NOTES_MAX });
        }
        Ok(())
    }

    pub fn validate_search(value: &str) -> Result<(), FieldError> {
        if value.chars().count() > SEARCH_MAX {
            return Err(FieldError::TooLong { max: SEARCH_MAX });
        }
        Ok(())
    }

    pub fn validate_color(value: &str) -> Result<(), FieldError> {
        let Some(hex) = value.strip_prefix('#') else {
            return Err(FieldError::InvalidColor);
        };
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(FieldError::InvalidColor);
        }
        Ok(())
    }

    fn validate_bounded(value: &str, max: usize) -> Result<(), FieldError> {
        if value.is_empty() {
            return Err(FieldError::Empty);
        }
        if value.chars().count() > max {
            return Err(FieldError::TooLong { max });
        }
        Ok(())
    }

    /// Trims, drops empties, rejects control characters and over-long tags,
    /// and returns the deduplicated set in sorted order.
    pub fn normalize_tags(tags: &[String]) -> Result<Vec<String>, FieldError> {
        let mut out = BTreeSet::new();
        for tag in tags {
            let trimmed = tag.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.chars().any(|c| c.is_control()) {
                return Err(FieldError::ContainsControl);
            }
            if trimmed.chars().count() > TAG_MAX {
                return Err(FieldError::TooLong { max: TAG_MAX });
            }
            out.insert(trimmed.to_string());
        }
        Ok(out.into_iter().collect())
    }

    /// Canonical task ordering: `position` ascending, then `created_at_ms`
    /// ascending. Callers break remaining ties by insertion order (id).
    pub fn cmp_task_order(
        left: (i64, i64),
        right: (i64, i64),
    ) -> Ordering {
        left.0.cmp(&right.0).then(left.1.cmp(&right.1))
    }

}
