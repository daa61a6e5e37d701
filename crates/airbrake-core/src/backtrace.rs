//! Backtrace frames, normalization and current-stack capture
//!
//! Raw traces handed to the notifier may follow the convention of some
//! call-stack APIs where each frame records the function *about to be
//! called* rather than the one executing. [`normalize_frames`] shifts the
//! labels into the executing-function convention the notifier API expects
//! and anchors the first frame at the literal error site.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Literal location where the error was raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSite {
    pub file: String,
    pub line: u32,
}

impl ErrorSite {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

/// One stack entry, outermost-first (point of failure first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktraceFrame {
    pub file: String,
    pub line: u32,
    /// Function executing at this frame, when known.
    pub function: Option<String>,
    /// Enclosing class/type of the executing function, when known.
    pub class: Option<String>,
}

impl BacktraceFrame {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
            function: None,
            class: None,
        }
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

/// Shift callee-labeled raw frames into the executing-function convention.
///
/// The output has as many frames as the raw input. Frame 0 takes the literal
/// error-site file/line; every other frame keeps its own file/line. Frame `i`
/// takes the function/class recorded at raw frame `i + 1`. The last frame has
/// no successor to pull from and its function/class are left unset.
///
/// An empty raw trace yields the single synthetic site frame.
pub fn normalize_frames(site: &ErrorSite, raw: &[BacktraceFrame]) -> Vec<BacktraceFrame> {
    if raw.is_empty() {
        return vec![BacktraceFrame::new(site.file.clone(), site.line)];
    }

    let mut frames = Vec::with_capacity(raw.len());
    for (i, frame) in raw.iter().enumerate() {
        let (file, line) = if i == 0 {
            (site.file.clone(), site.line)
        } else {
            (frame.file.clone(), frame.line)
        };
        let (function, class) = match raw.get(i + 1) {
            Some(next) => (next.function.clone(), next.class.clone()),
            None => (None, None),
        };
        frames.push(BacktraceFrame {
            file,
            line,
            function,
            class,
        });
    }
    frames
}

/// Capture the current call stack via the `backtrace` crate.
///
/// Used as the fallback when a report carries no frames. Captured frames
/// already name the executing function, so no label shift is applied.
/// Frames without a resolvable source file are skipped.
pub fn capture_current() -> Vec<BacktraceFrame> {
    let trace = ::backtrace::Backtrace::new();
    let mut frames = Vec::new();
    for frame in trace.frames() {
        for symbol in frame.symbols() {
            let Some(file) = symbol.filename() else {
                continue;
            };
            frames.push(BacktraceFrame {
                file: file.display().to_string(),
                line: symbol.lineno().unwrap_or(0),
                function: symbol.name().map(|name| name.to_string()),
                class: None,
            });
        }
    }
    debug!("captured {} frames from the current stack", frames.len());
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_trace() -> Vec<BacktraceFrame> {
        vec![
            BacktraceFrame::new("a.rs", 10)
                .with_function("alpha")
                .with_class("A"),
            BacktraceFrame::new("b.rs", 20)
                .with_function("beta")
                .with_class("B"),
            BacktraceFrame::new("c.rs", 30)
                .with_function("gamma")
                .with_class("C"),
        ]
    }

    #[test]
    fn test_normalize_preserves_frame_count() {
        let site = ErrorSite::new("site.rs", 7);
        let frames = normalize_frames(&site, &raw_trace());
        assert_eq!(frames.len(), 3);
    }

    #[test]
    fn test_normalize_shifts_function_labels() {
        let site = ErrorSite::new("site.rs", 7);
        let raw = raw_trace();
        let frames = normalize_frames(&site, &raw);

        for i in 0..raw.len() - 1 {
            assert_eq!(frames[i].function, raw[i + 1].function);
            assert_eq!(frames[i].class, raw[i + 1].class);
        }
    }

    #[test]
    fn test_normalize_anchors_first_frame_at_error_site() {
        let site = ErrorSite::new("site.rs", 7);
        let frames = normalize_frames(&site, &raw_trace());

        assert_eq!(frames[0].file, "site.rs");
        assert_eq!(frames[0].line, 7);
        // remaining frames keep their own locations
        assert_eq!(frames[1].file, "b.rs");
        assert_eq!(frames[1].line, 20);
        assert_eq!(frames[2].file, "c.rs");
        assert_eq!(frames[2].line, 30);
    }

    #[test]
    fn test_normalize_leaves_terminal_frame_unlabeled() {
        let site = ErrorSite::new("site.rs", 7);
        let frames = normalize_frames(&site, &raw_trace());

        let last = frames.last().unwrap();
        assert_eq!(last.function, None);
        assert_eq!(last.class, None);
    }

    #[test]
    fn test_normalize_empty_trace_yields_site_frame() {
        let site = ErrorSite::new("site.rs", 7);
        let frames = normalize_frames(&site, &[]);

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].file, "site.rs");
        assert_eq!(frames[0].line, 7);
        assert_eq!(frames[0].function, None);
    }

    #[test]
    fn test_capture_current_skips_unresolved_frames() {
        let frames = capture_current();
        assert!(frames.iter().all(|frame| !frame.file.is_empty()));
    }
}
