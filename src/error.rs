use thiserror::Error;

/// Every way the monitor can fail, per the error taxonomy it implements.
///
/// `Compositor` and `DecoderUnavailable` are deliberately reachable even
/// though the engine never propagates either upward (a `display.error`
/// event is logged, not fatal; a missing `libxkbcommon` is a silent
/// downgrade to the text-scan decoder) — they still name the condition so
/// callers and tests can match on it.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("WAYLAND_DISPLAY is relative and XDG_RUNTIME_DIR is not set")]
    EnvMissing,

    #[error("failed to connect to the compositor socket")]
    ConnectFailed(#[source] std::io::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed Wayland message: {0}")]
    Malformed(String),

    #[error("Wayland protocol error: {0}")]
    Protocol(String),

    #[error("compositor reported a display error on object {object_id}: code {code}, {message}")]
    Compositor {
        object_id: u32,
        code: u32,
        message: String,
    },

    #[error("unsupported keymap format {0}, expected XKB_V1")]
    KeymapUnsupported(u32),

    #[error("libxkbcommon is not available at runtime; using the text-scan decoder")]
    DecoderUnavailable,

    #[error("the compositor closed the connection")]
    ConnectionLost,
}
