use crate::ast::{Redirect, RedirectMode};

/// Split one pipeline-stage string into its command text and an optional
/// output redirection.
///
/// The operator needs no surrounding whitespace, so this works on the raw
/// stage text rather than on tokens: everything before the first `>` is
/// the command, everything between the first run of `>` and the next `>`
/// (if any) is the target. Append wins whenever `>>` appears anywhere in
/// the stage. Stages that begin or end with `>` are rejected by the
/// parser before this runs; an empty target is left for the open call to
/// refuse.
pub fn extract_redirection(stage: &str) -> (String, Option<Redirect>) {
    let Some(first) = stage.find('>') else {
        return (stage.trim().to_string(), None);
    };

    let mode = if stage.contains(">>") {
        RedirectMode::Append
    } else {
        RedirectMode::Truncate
    };

    let command = stage[..first].trim().to_string();
    let rest = stage[first..].trim_start_matches('>');
    let target = rest.split('>').next().unwrap_or(rest).trim().to_string();

    (command, Some(Redirect { target, mode }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redirect(stage: &str) -> Redirect {
        let (_, redirect) = extract_redirection(stage);
        redirect.unwrap()
    }

    #[test]
    fn no_operator_passes_through() {
        let (command, redirect) = extract_redirection("echo hello world");
        assert_eq!(command, "echo hello world");
        assert!(redirect.is_none());
    }

    #[test]
    fn truncate_redirect() {
        let (command, redirect) = extract_redirection("echo hello > out.txt");
        assert_eq!(command, "echo hello");
        assert_eq!(
            redirect,
            Some(Redirect { target: "out.txt".to_string(), mode: RedirectMode::Truncate })
        );
    }

    #[test]
    fn append_redirect() {
        let (command, redirect) = extract_redirection("echo hello >> out.txt");
        assert_eq!(command, "echo hello");
        assert_eq!(
            redirect,
            Some(Redirect { target: "out.txt".to_string(), mode: RedirectMode::Append })
        );
    }

    #[test]
    fn operator_needs_no_whitespace() {
        let (command, redirect) = extract_redirection("echo hello>out.txt");
        assert_eq!(command, "echo hello");
        assert_eq!(redirect.unwrap().target, "out.txt");
    }

    #[test]
    fn extra_angle_brackets_fold_into_the_operator() {
        let r = redirect("echo hi >>> out.txt");
        assert_eq!(r.mode, RedirectMode::Append);
        assert_eq!(r.target, "out.txt");
    }

    #[test]
    fn second_operator_truncates_the_target() {
        let r = redirect("echo hi > a > b");
        assert_eq!(r.mode, RedirectMode::Truncate);
        assert_eq!(r.target, "a");
    }

    #[test]
    fn append_anywhere_selects_append_mode() {
        // The first operator picks the split point, a later `>>` still
        // selects append mode.
        let r = redirect("echo hi > a >> b");
        assert_eq!(r.mode, RedirectMode::Append);
        assert_eq!(r.target, "a");
    }

    #[test]
    fn empty_target_is_preserved_for_the_open_to_reject() {
        let (command, redirect) = extract_redirection("echo hi > > ");
        assert_eq!(command, "echo hi");
        assert_eq!(redirect.unwrap().target, "");
    }
}
