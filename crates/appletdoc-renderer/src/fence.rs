//! Code fence tracking for directive parsing.
//!
//! Directive syntax inside fenced code blocks (e.g. a documented
//! `::applet{...}` example) must be left untouched.

/// An open code fence: its marker character and minimum closing length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
}

/// Tracks code fence state during line-by-line processing.
///
/// Code fences in `CommonMark` use three or more backticks or tildes. The
/// closing fence must use the same character and be at least as long as
/// the opening fence.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<Fence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Check if currently inside a fenced code block.
    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Update fence state based on a line.
    ///
    /// Returns `true` if the line opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let Some(fence) = fence_marker(line.trim_start()) else {
            return false;
        };

        match self.open {
            None => {
                self.open = Some(fence.opening);
                true
            }
            Some(open) if fence.closes(open) => {
                self.open = None;
                true
            }
            Some(_) => false,
        }
    }
}

/// A fence marker found at the start of a line.
struct Marker {
    opening: Fence,
    /// Whether only whitespace follows the marker run.
    bare: bool,
}

impl Marker {
    fn closes(&self, open: Fence) -> bool {
        self.bare && self.opening.marker == open.marker && self.opening.len >= open.len
    }
}

fn fence_marker(trimmed: &str) -> Option<Marker> {
    let marker = trimmed.chars().next().filter(|&c| c == '`' || c == '~')?;
    let len = trimmed.chars().take_while(|&c| c == marker).count();
    if len < 3 {
        return None;
    }

    Some(Marker {
        opening: Fence { marker, len },
        bare: trimmed[len..].chars().all(char::is_whitespace),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backtick_fence() {
        let mut tracker = FenceTracker::new();
        assert!(!tracker.in_fence());

        assert!(tracker.update("```markdown"));
        assert!(tracker.in_fence());
        assert!(!tracker.update("::applet{url=a fig=b}"));
        assert!(tracker.in_fence());
        assert!(tracker.update("```"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_tilde_fence() {
        let mut tracker = FenceTracker::new();
        assert!(tracker.update("~~~"));
        assert!(tracker.update("~~~"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_closing_fence_length() {
        let mut tracker = FenceTracker::new();
        assert!(tracker.update("````"));
        assert!(!tracker.update("```"));
        assert!(tracker.in_fence());
        assert!(tracker.update("`````"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_mixed_fence_chars_do_not_close() {
        let mut tracker = FenceTracker::new();
        assert!(tracker.update("```"));
        assert!(!tracker.update("~~~"));
        assert!(tracker.in_fence());
    }

    #[test]
    fn test_info_string_does_not_close() {
        let mut tracker = FenceTracker::new();
        assert!(tracker.update("```"));
        assert!(!tracker.update("```rust"));
        assert!(tracker.in_fence());
    }

    #[test]
    fn test_indented_and_trailing_whitespace() {
        let mut tracker = FenceTracker::new();
        assert!(tracker.update("   ```rust"));
        assert!(tracker.update("  ```  "));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_regular_lines() {
        let mut tracker = FenceTracker::new();
        assert!(!tracker.update("``inline code``"));
        assert!(!tracker.update(":::applet"));
        assert!(!tracker.in_fence());
    }
}
