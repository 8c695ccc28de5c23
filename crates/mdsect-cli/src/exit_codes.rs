//! Deterministic exit codes for machine callers.
//!
//! Scripted and agent callers branch on exit codes without parsing stderr,
//! so every error kind in the shared taxonomy maps to exactly one code.

use mdsect_core::CoreError;
use mdsect_tasks::TaskError;

/// Exit code constants.
pub mod codes {
    /// Success.
    pub const SUCCESS: u8 = 0;

    /// Validation error: malformed section id, bad frontmatter path, bad
    /// arguments.
    pub const VALIDATION_ERROR: u8 = 10;

    /// Not found: the file does not exist or the id resolves to no section.
    pub const NOT_FOUND: u8 = 12;

    /// Parse error: content lacks the structural shape the operation
    /// requires (e.g. an operation demanded frontmatter or a task file).
    pub const PARSE_ERROR: u8 = 13;

    /// Filesystem I/O failure other than not-found.
    pub const IO_ERROR: u8 = 20;

    /// Fallback for unmapped errors.
    pub const GENERIC_ERROR: u8 = 70;
}

/// Map a core error to its exit code.
pub fn map_core_error(err: &CoreError) -> u8 {
    match err {
        CoreError::SectionNotFound(_) => codes::NOT_FOUND,
        CoreError::InvalidId(_) => codes::VALIDATION_ERROR,
        CoreError::Parse(_) => codes::PARSE_ERROR,
        CoreError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => codes::NOT_FOUND,
        CoreError::Io(_) => codes::IO_ERROR,
    }
}

/// Map a task error to its exit code.
pub fn map_task_error(err: &TaskError) -> u8 {
    match err {
        TaskError::InvalidTaskFile(_) => codes::PARSE_ERROR,
        TaskError::Core(core) => map_core_error(core),
    }
}

/// Map any error chain to an exit code, walking down to the first known
/// error kind.
pub fn map_error(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(core) = cause.downcast_ref::<CoreError>() {
            return map_core_error(core);
        }
        if let Some(task) = cause.downcast_ref::<TaskError>() {
            return map_task_error(task);
        }
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            return if io.kind() == std::io::ErrorKind::NotFound {
                codes::NOT_FOUND
            } else {
                codes::IO_ERROR
            };
        }
        if cause.downcast_ref::<mdsect_core::SearchError>().is_some() {
            return codes::VALIDATION_ERROR;
        }
    }
    codes::GENERIC_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_codes() {
        assert_eq!(
            map_core_error(&CoreError::SectionNotFound("abc".into())),
            codes::NOT_FOUND
        );
        assert_eq!(
            map_core_error(&CoreError::InvalidId("xyz".into())),
            codes::VALIDATION_ERROR
        );
        assert_eq!(
            map_core_error(&CoreError::Parse("bad".into())),
            codes::PARSE_ERROR
        );
    }

    #[test]
    fn test_missing_file_maps_to_not_found() {
        let err = anyhow::Error::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        assert_eq!(map_error(&err), codes::NOT_FOUND);
    }

    #[test]
    fn test_unknown_error_is_generic() {
        let err = anyhow::anyhow!("something else entirely");
        assert_eq!(map_error(&err), codes::GENERIC_ERROR);
    }

    #[test]
    fn test_codes_are_distinct() {
        let all = [
            codes::SUCCESS,
            codes::VALIDATION_ERROR,
            codes::NOT_FOUND,
            codes::PARSE_ERROR,
            codes::IO_ERROR,
            codes::GENERIC_ERROR,
        ];
        let unique: std::collections::HashSet<u8> = all.iter().copied().collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_task_error_codes() {
        assert_eq!(
            map_task_error(&TaskError::InvalidTaskFile("no".into())),
            codes::PARSE_ERROR
        );
        assert_eq!(
            map_task_error(&TaskError::Core(CoreError::SectionNotFound("a".into()))),
            codes::NOT_FOUND
        );
    }
}
