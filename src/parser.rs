use crate::ast::{MAX_ARGS, MAX_STAGES, Pipeline, PipelineStage};
use crate::error::ShellError;
use crate::redirect;

/// Strip leading and trailing whitespace from a raw input line.
/// All-whitespace input yields the empty string.
pub fn normalize(raw: &str) -> &str {
    raw.trim()
}

/// Split `input` on `sep` into trimmed, non-empty, owned tokens.
/// Whitespace-only pieces between separators are dropped, so runs of
/// separators collapse rather than producing empty tokens.
pub fn split_tokens(input: &str, sep: char) -> Vec<String> {
    input
        .split(sep)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Locate the background marker. A trailing `&` is stripped (along with
/// the whitespace before it) and sets the flag; an `&` anywhere else is a
/// syntax error.
fn detect_background(line: &str) -> Result<(&str, bool), ShellError> {
    match line.find('&') {
        None => Ok((line, false)),
        Some(at) if at == line.len() - 1 => Ok((line[..at].trim_end(), true)),
        Some(_) => Err(ShellError::MislocatedBackground),
    }
}

/// Parse one normalized command line into a validated [`Pipeline`].
///
/// Every syntax rule is checked here, before any process exists:
/// background-marker placement, empty stages around `|`, the stage and
/// argument ceilings, and redirection placement (final stage only). A
/// line that parses is safe to hand straight to the launcher.
pub fn parse_line(line: &str) -> Result<Pipeline, ShellError> {
    let (command, background) = detect_background(line)?;

    if command.is_empty() || command.starts_with('|') || command.ends_with('|') {
        return Err(ShellError::MissingCommand);
    }

    let stage_texts = split_tokens(command, '|');
    if stage_texts.len() > MAX_STAGES {
        return Err(ShellError::TooManyStages);
    }
    // The job registry tracks one process per backgrounded line, so a
    // multi-stage pipeline cannot go to the background.
    if background && stage_texts.len() > 1 {
        return Err(ShellError::MislocatedBackground);
    }

    let Some((_, leading_stages)) = stage_texts.split_last() else {
        return Err(ShellError::MissingCommand);
    };
    if leading_stages.iter().any(|stage| stage.contains('>')) {
        return Err(ShellError::MislocatedRedirection);
    }

    let stages = stage_texts
        .iter()
        .map(|text| parse_stage(text))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Pipeline { stages, background })
}

/// Parse one stage's text into argument tokens plus optional redirection.
fn parse_stage(text: &str) -> Result<PipelineStage, ShellError> {
    if text.starts_with('>') {
        return Err(ShellError::MissingCommand);
    }
    if text.ends_with('>') {
        return Err(ShellError::NoOutputFile);
    }

    let (command, redirect) = redirect::extract_redirection(text);
    let argv = split_tokens(&command, ' ');
    if argv.is_empty() {
        return Err(ShellError::MissingCommand);
    }
    if argv.len() > MAX_ARGS {
        return Err(ShellError::TooManyArgs);
    }

    Ok(PipelineStage { argv, redirect })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::RedirectMode;

    fn argv_of(pipeline: &Pipeline, stage: usize) -> Vec<&str> {
        pipeline.stages[stage].argv.iter().map(String::as_str).collect()
    }

    // ── Tokenization ──

    #[test]
    fn whitespace_separates_arguments() {
        let p = parse_line("echo hello   world").unwrap();
        assert_eq!(p.stages.len(), 1);
        assert_eq!(argv_of(&p, 0), vec!["echo", "hello", "world"]);
        assert!(!p.background);
    }

    #[test]
    fn tabs_count_as_whitespace_at_the_edges() {
        assert_eq!(normalize("\t ls -l \t"), "ls -l");
    }

    #[test]
    fn whitespace_only_input_normalizes_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  \t "), "");
        assert_eq!(normalize("\t\t\t"), "");
    }

    #[test]
    fn trimming_is_idempotent() {
        for input in ["  echo hi  ", "echo  hi", "\t a | b \t", ""] {
            let once = normalize(input);
            assert_eq!(normalize(once), once);
        }
    }

    #[test]
    fn repeated_separators_collapse() {
        assert_eq!(split_tokens("a  b   c", ' '), vec!["a", "b", "c"]);
        assert_eq!(split_tokens(" | a | | b |", '|'), vec!["a", "b"]);
    }

    #[test]
    fn sixteen_arguments_are_accepted() {
        let line = (0..MAX_ARGS).map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
        let p = parse_line(&line).unwrap();
        assert_eq!(p.stages[0].argv.len(), MAX_ARGS);
    }

    #[test]
    fn seventeen_arguments_are_rejected() {
        let line = (0..=MAX_ARGS).map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
        assert!(matches!(parse_line(&line), Err(ShellError::TooManyArgs)));
    }

    // ── Pipelines ──

    #[test]
    fn pipes_split_stages() {
        let p = parse_line("ls | grep foo | wc -l").unwrap();
        assert_eq!(p.stages.len(), 3);
        assert_eq!(argv_of(&p, 1), vec!["grep", "foo"]);
    }

    #[test]
    fn pipe_needs_no_surrounding_whitespace() {
        let p = parse_line("echo hi|cat").unwrap();
        assert_eq!(p.stages.len(), 2);
        assert_eq!(argv_of(&p, 0), vec!["echo", "hi"]);
        assert_eq!(argv_of(&p, 1), vec!["cat"]);
    }

    #[test]
    fn five_stages_are_accepted_six_are_not() {
        let five = parse_line("a | b | c | d | e").unwrap();
        assert_eq!(five.stages.len(), MAX_STAGES);
        assert!(matches!(
            parse_line("a | b | c | d | e | f"),
            Err(ShellError::TooManyStages)
        ));
    }

    #[test]
    fn empty_stage_is_missing_command() {
        assert!(matches!(parse_line("| ls"), Err(ShellError::MissingCommand)));
        assert!(matches!(parse_line("ls |"), Err(ShellError::MissingCommand)));
        assert!(matches!(parse_line("&"), Err(ShellError::MissingCommand)));
    }

    #[test]
    fn adjacent_pipes_collapse_like_one() {
        // Interior empty stages disappear with the whitespace filter.
        let p = parse_line("echo hi | | cat").unwrap();
        assert_eq!(p.stages.len(), 2);
    }

    #[test]
    fn argument_ceiling_applies_per_stage() {
        let long = (0..=MAX_ARGS).map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
        let line = format!("{long} | cat");
        assert!(matches!(parse_line(&line), Err(ShellError::TooManyArgs)));
    }

    // ── Redirection placement ──

    #[test]
    fn redirection_binds_to_the_final_stage() {
        let p = parse_line("ls | sort > out.txt").unwrap();
        assert!(p.stages[0].redirect.is_none());
        let r = p.stages[1].redirect.as_ref().unwrap();
        assert_eq!(r.target, "out.txt");
        assert_eq!(r.mode, RedirectMode::Truncate);
        assert_eq!(argv_of(&p, 1), vec!["sort"]);
    }

    #[test]
    fn append_mode_is_recognized() {
        let p = parse_line("echo hi >> log.txt").unwrap();
        let r = p.stages[0].redirect.as_ref().unwrap();
        assert_eq!(r.mode, RedirectMode::Append);
        assert_eq!(r.target, "log.txt");
    }

    #[test]
    fn redirection_in_a_non_final_stage_is_rejected() {
        assert!(matches!(
            parse_line("echo hi > out.txt | cat"),
            Err(ShellError::MislocatedRedirection)
        ));
        assert!(matches!(
            parse_line("a > x | b | c"),
            Err(ShellError::MislocatedRedirection)
        ));
    }

    #[test]
    fn redirection_without_target_is_rejected() {
        assert!(matches!(parse_line("echo hi >"), Err(ShellError::NoOutputFile)));
        assert!(matches!(parse_line("ls | sort >>"), Err(ShellError::NoOutputFile)));
    }

    #[test]
    fn redirection_without_command_is_rejected() {
        assert!(matches!(parse_line("> out.txt"), Err(ShellError::MissingCommand)));
        assert!(matches!(
            parse_line("ls | > out.txt"),
            Err(ShellError::MissingCommand)
        ));
    }

    // ── Background marker ──

    #[test]
    fn trailing_ampersand_sets_the_flag() {
        let p = parse_line("sleep 5 &").unwrap();
        assert!(p.background);
        assert_eq!(argv_of(&p, 0), vec!["sleep", "5"]);
    }

    #[test]
    fn ampersand_without_space_sets_the_flag() {
        let p = parse_line("sleep 5&").unwrap();
        assert!(p.background);
        assert_eq!(argv_of(&p, 0), vec!["sleep", "5"]);
    }

    #[test]
    fn ampersand_before_the_end_is_rejected() {
        assert!(matches!(
            parse_line("echo a & echo b"),
            Err(ShellError::MislocatedBackground)
        ));
    }

    #[test]
    fn background_pipeline_is_rejected() {
        assert!(matches!(
            parse_line("echo hi | cat &"),
            Err(ShellError::MislocatedBackground)
        ));
    }

    #[test]
    fn background_command_may_redirect() {
        let p = parse_line("echo hi > out.txt &").unwrap();
        assert!(p.background);
        assert_eq!(p.stages[0].redirect.as_ref().unwrap().target, "out.txt");
    }
}
