#![forbid(unsafe_code)]

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    Task,
    List,
}

impl Entity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::List => "list",
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
    InvalidInput(&'static str),
    NotFound(Entity),
    Forbidden,
    /// A compound request landed its field write but the tag replacement
    /// (or the reverse) failed; the caller decides whether to retry the
    /// failed half.
    PartialFailure {
        applied_fields: bool,
        source: Box<StoreError>,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::NotFound(entity) => write!(f, "{} not found", entity.as_str()),
            Self::Forbidden => write!(f, "forbidden"),
            Self::PartialFailure {
                applied_fields,
                source,
            } => write!(
                f,
                "partial failure (fields_applied={applied_fields}): {source}"
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Sql(err) => Some(err),
            Self::PartialFailure { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}

impl From<td_core::model::FieldError> for StoreError {
    fn from(value: td_core::model::FieldError) -> Self {
        Self::InvalidInput(value.message())
    }
}
