use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::info;
use unicode_width::UnicodeWidthStr;

use shuang_core::corpus::Corpus;
use shuang_core::settings::{self, settings};
use shuang_session::{
    now_millis, CompletionSummary, InputOutcome, PracticeMode, PracticeSession, SessionConfig,
    SessionState, TextSource, UnitStatus,
};

use super::translate_ops::resolve_scheme;
use crate::upload::read_sentence_file;

/// Command-line overrides for the configured practice preferences.
#[derive(Debug, Default)]
pub struct PracticeOptions {
    pub scheme: Option<String>,
    pub mode: Option<PracticeMode>,
    pub upload: Option<String>,
    pub skip_non_chinese: bool,
    pub settings_file: Option<String>,
    pub seed: Option<u64>,
}

pub fn practice(opts: &PracticeOptions) {
    if let Some(file) = &opts.settings_file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(settings::init_custom(content), "Error: {}");
    }
    let prefs = settings();

    let scheme = resolve_scheme(opts.scheme.as_deref());
    let upload = opts.upload.as_deref().or(prefs.practice.upload_file.as_deref());
    let source = match upload {
        Some(path) => TextSource::Upload(die!(
            read_sentence_file(Path::new(path), &prefs.upload),
            "Error: {}"
        )),
        None => TextSource::Builtin,
    };
    let config = SessionConfig {
        mode: opts.mode.unwrap_or(prefs.practice.mode),
        source,
        skip_non_chinese: opts.skip_non_chinese || prefs.practice.skip_non_chinese,
        slowest_limit: prefs.stats.slowest_limit,
    };

    let mut session = PracticeSession::new(scheme, Corpus::builtin().clone(), config);
    if let Some(seed) = opts.seed {
        session.set_seed(seed);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    die!(
        run(&mut session, stdin.lock(), &mut stdout, &mut now_millis),
        "Error: {}"
    );
}

/// Drive `session` from line input until completion, `:q` or end of input.
///
/// Each line is either a command (`:p` pause/resume, `:r` reset, `:e` list
/// errors, `:q` quit) or the keys for the current character.
pub fn run<R: BufRead, W: Write>(
    session: &mut PracticeSession,
    input: R,
    out: &mut W,
    clock: &mut dyn FnMut() -> u64,
) -> io::Result<()> {
    writeln!(
        out,
        "scheme: {}  mode: {}  (:p pause, :r reset, :e errors, :q quit)",
        session.scheme_code(),
        session.config().mode
    )?;
    if session.start(clock()).is_err() {
        writeln!(out, "no text to practice")?;
        return Ok(());
    }
    write_prompt(session, out)?;

    for line in input.lines() {
        let line = line?;
        let now = clock();
        match line.trim() {
            ":q" => break,
            ":p" => {
                let state = session.toggle_pause(now);
                writeln!(out, "{}", state_label(state))?;
            }
            ":r" => {
                session.reset();
                if session.start(now).is_err() {
                    writeln!(out, "no text to practice")?;
                    return Ok(());
                }
            }
            ":e" => write_errors(session, out)?,
            keys => match session.submit_input(keys, now) {
                InputOutcome::Completed => {
                    writeln!(out, "completed")?;
                    write_summary(&session.summary(now), out)?;
                    return Ok(());
                }
                outcome => writeln!(out, "{}", outcome_label(outcome))?,
            },
        }
        write_prompt(session, out)?;
    }

    let summary = session.summary(clock());
    info!(progress = summary.progress, errors = summary.errors, "practice ended");
    write_summary(&summary, out)
}

fn state_label(state: SessionState) -> &'static str {
    match state {
        SessionState::NotStarted => "not started",
        SessionState::Running => "running",
        SessionState::Paused => "paused (:p to resume)",
        SessionState::Completed => "completed",
    }
}

fn outcome_label(outcome: InputOutcome) -> &'static str {
    match outcome {
        InputOutcome::Ignored => "paused (:p to resume)",
        InputOutcome::Waiting => "...",
        InputOutcome::Error { too_long: true } => "x too long",
        InputOutcome::Error { too_long: false } => "x wrong",
        InputOutcome::Correct { .. } => "ok",
        InputOutcome::Skipped => "skipped",
        InputOutcome::Completed => "completed",
    }
}

/// The text with the current character bracketed, then the character and
/// its syllable.
pub fn render_line(session: &PracticeSession) -> String {
    let mut line = String::new();
    for view in session.unit_views() {
        match view.status {
            UnitStatus::Current => {
                line.push('[');
                line.push(view.unit.ch);
                line.push(']');
            }
            _ => line.push(view.unit.ch),
        }
    }
    match session.current_unit() {
        Some(unit) => format!(
            "{line}\n> {} ({})",
            unit.ch,
            unit.syllable.as_deref().unwrap_or("-")
        ),
        None => line,
    }
}

fn write_prompt<W: Write>(session: &PracticeSession, out: &mut W) -> io::Result<()> {
    let progress = session.stats().progress();
    if session.config().mode == PracticeMode::Word {
        writeln!(out, "[pass {}]", session.stats().cycles() + 1)?;
    } else {
        writeln!(out, "[{progress}%]")?;
    }
    writeln!(out, "{}", render_line(session))
}

fn write_errors<W: Write>(session: &PracticeSession, out: &mut W) -> io::Result<()> {
    let errors = session.stats().errors();
    if errors.is_empty() {
        return writeln!(out, "no errors");
    }
    // Word-mode passes reorder indices, so group by the recorded character.
    let mut by_char: Vec<(char, Vec<&str>)> = Vec::new();
    for record in errors.values().flatten() {
        match by_char.iter_mut().find(|(ch, _)| *ch == record.ch) {
            Some((_, inputs)) => inputs.push(&record.input),
            None => by_char.push((record.ch, vec![&record.input])),
        }
    }
    for (ch, inputs) in by_char {
        writeln!(out, "{ch}: {}", inputs.join(", "))?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(summary: &CompletionSummary, out: &mut W) -> io::Result<()> {
    writeln!(out, "time: {}", summary.elapsed())?;
    writeln!(
        out,
        "progress: {}% ({}/{})",
        summary.progress, summary.completed, summary.total_valid
    )?;
    if summary.cycles > 0 {
        writeln!(out, "passes: {}", summary.cycles)?;
    }
    writeln!(out, "errors: {}", summary.errors)?;
    if summary.slowest.is_empty() {
        return Ok(());
    }
    writeln!(out, "slowest:")?;
    let width = summary
        .slowest
        .iter()
        .map(|s| s.syllable.width())
        .max()
        .unwrap_or(0);
    for s in &summary.slowest {
        let pad = " ".repeat(width - s.syllable.width());
        writeln!(
            out,
            "  {} {}{pad}  {:.2}s  x{}",
            s.ch, s.syllable, s.seconds, s.attempts
        )?;
    }
    Ok(())
}
