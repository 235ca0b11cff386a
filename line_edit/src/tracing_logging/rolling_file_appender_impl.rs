// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

/// Creates a file appender that never rolls over. `path_str` is split into the folder
/// and the file name.
///
/// Note that if you wrap this up in a non blocking writer, as shown below, the guard
/// has to be kept alive for the lifetime of the program, otherwise nothing is written:
///
/// ```ignore
/// tracing_appender::non_blocking(try_create("foo.log")?);
/// ```
pub fn try_create(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(&path_str);

    let parent = path.parent().ok_or_else(|| {
        miette::miette!(
            "Can't access current folder {}. It might not exist, or don't have required permissions.",
            path.display()
        )
    })?;

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!(
            "Can't access file name {}. It might not exist, or don't have required permissions.",
            path.display()
        )
    })?;

    Ok(tracing_appender::rolling::never(parent, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_create_in_temp_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("line_edit_test.log");
        let result = try_create(path.to_str().unwrap());
        assert!(result.is_ok());
    }

    #[test]
    fn test_try_create_rejects_path_without_file_name() {
        assert!(try_create("/").is_err());
    }
}
