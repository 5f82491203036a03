//! Session command handler.
//!
//! Speaks the UI message protocol over JSON lines: one [`UiMessage`] per
//! input line, one [`CoreMessage`] per output line. Tables are placed on a
//! [`MemoryCanvas`].
//!
//! [`CoreMessage`]: crate::protocol::CoreMessage

use crate::config::{
    FilePreferencesStore, LayoutConfig, MemoryPreferencesStore, PreferencesStore,
};
use crate::host::{Canvas, MemoryCanvas};
use crate::pipeline::{
    exit_codes, load_snapshot_with_context, write_output, OutputTarget, PipelineError,
};
use crate::protocol::{Controller, NotificationKind, Reply, UiMessage};
use crate::store::VariableStore;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub snapshot: PathBuf,
    /// Preferences file; the user config directory when unset
    pub preferences: Option<PathBuf>,
    pub layout: LayoutConfig,
    /// Write the canvas as JSON here when the session ends
    pub canvas_dump: Option<PathBuf>,
    pub quiet: bool,
}

/// Run a message session on stdin/stdout.
#[allow(clippy::needless_pass_by_value)]
pub fn run_session(config: SessionConfig) -> Result<i32> {
    let loaded =
        load_snapshot_with_context(&config.snapshot).map_err(|source| PipelineError::LoadFailed {
            path: config.snapshot.display().to_string(),
            source,
        })?;

    let preferences: Box<dyn PreferencesStore> = match config
        .preferences
        .clone()
        .map(FilePreferencesStore::new)
        .or_else(FilePreferencesStore::default_location)
    {
        Some(store) => {
            tracing::debug!(path = %store.path().display(), "using preferences file");
            Box::new(store)
        }
        None => {
            tracing::warn!("no config directory available, preferences will not be persisted");
            Box::new(MemoryPreferencesStore::new())
        }
    };

    let mut controller = Controller::new(loaded.store, MemoryCanvas::new(), preferences)
        .with_layout(config.layout.clone());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let handled = serve(&mut controller, stdin.lock(), stdout.lock())?;
    tracing::info!(messages = handled, "session ended");

    if let Some(path) = &config.canvas_dump {
        let json = serde_json::to_string_pretty(controller.canvas())
            .context("failed to serialize canvas")?;
        write_output(&json, &OutputTarget::File(path.clone()), config.quiet)?;
    }

    Ok(exit_codes::SUCCESS)
}

/// Answer UI messages read from `input` until it ends or a reply asks to
/// close. Returns the number of messages handled.
///
/// Malformed lines get an `error` message and do not end the session.
pub fn serve<S, C, P, R, W>(
    controller: &mut Controller<S, C, P>,
    input: R,
    mut output: W,
) -> Result<usize>
where
    S: VariableStore,
    C: Canvas,
    P: PreferencesStore,
    R: BufRead,
    W: Write,
{
    emit(&mut output, &controller.start())?;

    let mut handled = 0;
    for line in input.lines() {
        let line = line.context("failed to read UI message")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<UiMessage>(line) {
            Ok(message) => controller.handle(message),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring malformed UI message");
                Reply::error(format!("Invalid message: {err}"))
            }
        };
        handled += 1;

        emit(&mut output, &reply)?;
        if reply.close {
            break;
        }
    }
    Ok(handled)
}

fn emit<W: Write>(output: &mut W, reply: &Reply) -> Result<()> {
    for message in &reply.messages {
        serde_json::to_writer(&mut *output, message).context("failed to write core message")?;
        writeln!(output)?;
    }
    output.flush()?;

    if let Some(notification) = &reply.notification {
        match notification.kind {
            NotificationKind::Success => tracing::info!("{}", notification.message),
            NotificationKind::Error => tracing::error!("{}", notification.message),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Collection, Mode, RawValue, Rgba, Variable, VariableType};
    use crate::store::InMemoryStore;

    fn controller() -> Controller<InMemoryStore, MemoryCanvas, MemoryPreferencesStore> {
        let store = InMemoryStore::new()
            .with_collection(Collection::new("c1", "Core", vec![Mode::new("m1", "Light")]))
            .with_variable(
                Variable::new("v1", "color/red", "c1", VariableType::Color)
                    .with_value("m1", RawValue::Color(Rgba::rgb(1.0, 0.0, 0.0))),
            );
        Controller::new(store, MemoryCanvas::new(), MemoryPreferencesStore::new())
    }

    fn lines(output: &[u8]) -> Vec<serde_json::Value> {
        String::from_utf8_lossy(output)
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_session_starts_with_settings() {
        let mut output = Vec::new();
        let handled = serve(&mut controller(), "".as_bytes(), &mut output).unwrap();
        assert_eq!(handled, 0);
        let out = lines(&output);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["type"], "settings-loaded");
        assert_eq!(out[0]["settings"]["tableTheme"], "dark");
    }

    #[test]
    fn test_session_answers_and_stops_on_close() {
        let input = concat!(
            r#"{"type":"load-groups","collectionId":"c1"}"#,
            "\n\n",
            "not json\n",
            r#"{"type":"create-table","collectionId":"c1","modes":["m1"],"groups":["color"]}"#,
            "\n",
            r#"{"type":"load-collections"}"#,
            "\n",
        );
        let mut controller = controller();
        let mut output = Vec::new();
        let handled = serve(&mut controller, input.as_bytes(), &mut output).unwrap();

        assert_eq!(handled, 3);
        let out = lines(&output);
        assert_eq!(out[1]["type"], "groups-loaded");
        assert_eq!(out[1]["totalVariables"], 1);
        assert_eq!(out[2]["type"], "error");
        assert_eq!(out.len(), 3);
        assert_eq!(controller.canvas().roots().len(), 1);
    }

    #[test]
    fn test_missing_snapshot_is_a_load_failure() {
        let config = SessionConfig {
            snapshot: PathBuf::from("/nonexistent/session.json"),
            ..SessionConfig::default()
        };
        let err = run_session(config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::LoadFailed { path, .. }) if path == "/nonexistent/session.json"
        ));
    }
}
