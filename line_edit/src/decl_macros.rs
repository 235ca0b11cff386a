// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Simple macro to create a [`Result`] with an [`Ok`] variant. It is just syntactic sugar
/// that helps having to write `Ok(())`.
/// - If no arg is passed in then it will return `Ok(())`.
/// - If an arg is passed in then it will return `Ok($arg)`.
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}

/// Early return from an edit operation that has nothing to do, logging why at `trace`
/// level. Boundary edits are not errors, they are silent no-ops.
///
/// ```rust,ignore
/// early_return_if!(self.state.cursor() == 0, "delete_backward at start of line");
/// ```
#[macro_export]
macro_rules! early_return_if {
    ($cond:expr, $why:expr) => {
        if $cond {
            tracing::trace!(message = "no-op edit", reason = $why);
            return $crate::ok!();
        }
    };
}
