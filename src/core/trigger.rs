//! When to re-capture the thumbnail.
//!
//! The capture policy is a single tagged variant and every input that might
//! lead to a capture goes through [`TriggerResolver::resolve`], so the
//! per-mode rules live in one place.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::thumbnail::ThumbnailState;

/// Capture policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Capture on mount and after every (debounced) content change.
    Always,
    /// Capture once, this long after mount.
    AfterDelay(Duration),
    /// Capture whenever the host flips its boolean flag.
    OnFlag,
}

impl Default for RefreshTrigger {
    fn default() -> Self {
        Self::Always
    }
}

impl fmt::Display for RefreshTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("always"),
            Self::AfterDelay(d) => write!(f, "delay:{}", d.as_millis()),
            Self::OnFlag => f.write_str("flag"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown refresh trigger `{0}` (expected `always`, `flag` or `delay:<ms>`)")]
pub struct ParseTriggerError(String);

impl FromStr for RefreshTrigger {
    type Err = ParseTriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "always" => return Ok(Self::Always),
            "flag" => return Ok(Self::OnFlag),
            _ => {}
        }
        s.strip_prefix("delay:")
            .and_then(|ms| ms.trim().parse::<u64>().ok())
            .map(|ms| Self::AfterDelay(Duration::from_millis(ms)))
            .ok_or_else(|| ParseTriggerError(s.to_string()))
    }
}

/// Inputs that may lead to a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Mounted,
    /// Debounced content mutation.
    ContentChanged,
    /// The mount delay of [`RefreshTrigger::AfterDelay`] elapsed.
    DelayElapsed,
    FlagChanged(bool),
    /// Debounced container resize to a new size.
    Resized,
}

/// What the engine should do about an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    Nothing,
    Refresh,
    ArmDelay(Duration),
}

#[derive(Debug, Clone)]
pub struct TriggerResolver {
    trigger: RefreshTrigger,
    refresh_on_resize: bool,
    flag: bool,
    captured_once: bool,
}

impl TriggerResolver {
    pub fn new(trigger: RefreshTrigger, refresh_on_resize: bool) -> Self {
        Self {
            trigger,
            refresh_on_resize,
            flag: false,
            captured_once: false,
        }
    }

    /// Thumbnail state before anything has happened.
    pub fn initial_state(&self) -> ThumbnailState {
        match self.trigger {
            RefreshTrigger::Always | RefreshTrigger::AfterDelay(_) => ThumbnailState::pending(),
            RefreshTrigger::OnFlag => ThumbnailState::idle(),
        }
    }

    /// Whether the host's loading callback should hear about refreshes.
    pub fn reports_loading(&self) -> bool {
        self.trigger == RefreshTrigger::OnFlag
    }

    /// Whether content mutations are worth watching at all.
    pub fn watches_content(&self) -> bool {
        self.trigger == RefreshTrigger::Always
    }

    pub fn resolve(&mut self, event: TriggerEvent) -> TriggerAction {
        let action = match (self.trigger, event) {
            (RefreshTrigger::Always, TriggerEvent::Mounted) => TriggerAction::Refresh,
            (RefreshTrigger::Always, TriggerEvent::ContentChanged) => TriggerAction::Refresh,
            (RefreshTrigger::AfterDelay(d), TriggerEvent::Mounted) => TriggerAction::ArmDelay(d),
            (RefreshTrigger::AfterDelay(_), TriggerEvent::DelayElapsed) if !self.captured_once => {
                TriggerAction::Refresh
            }
            (_, TriggerEvent::FlagChanged(v)) => {
                let flipped = v != self.flag;
                self.flag = v;
                if flipped && self.trigger == RefreshTrigger::OnFlag {
                    TriggerAction::Refresh
                } else {
                    TriggerAction::Nothing
                }
            }
            (_, TriggerEvent::Resized) if self.refresh_on_resize && self.captured_once => {
                TriggerAction::Refresh
            }
            _ => TriggerAction::Nothing,
        };
        if action == TriggerAction::Refresh {
            self.captured_once = true;
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints() {
        assert_eq!("always".parse::<RefreshTrigger>().unwrap(), RefreshTrigger::Always);
        assert_eq!("Flag".parse::<RefreshTrigger>().unwrap(), RefreshTrigger::OnFlag);
        let d: RefreshTrigger = "delay:1500".parse().unwrap();
        assert_eq!(d, RefreshTrigger::AfterDelay(Duration::from_millis(1500)));
        assert_eq!(d.to_string(), "delay:1500");
        assert!("sometimes".parse::<RefreshTrigger>().is_err());
        assert!("delay:soon".parse::<RefreshTrigger>().is_err());
    }

    #[test]
    fn always_refreshes_on_mount_and_change() {
        let mut r = TriggerResolver::new(RefreshTrigger::Always, true);
        assert!(r.initial_state().loading);
        assert_eq!(r.resolve(TriggerEvent::Mounted), TriggerAction::Refresh);
        assert_eq!(r.resolve(TriggerEvent::ContentChanged), TriggerAction::Refresh);
        assert_eq!(r.resolve(TriggerEvent::FlagChanged(true)), TriggerAction::Nothing);
        assert!(!r.reports_loading());
    }

    #[test]
    fn delay_captures_once() {
        let d = Duration::from_millis(800);
        let mut r = TriggerResolver::new(RefreshTrigger::AfterDelay(d), true);
        assert_eq!(r.resolve(TriggerEvent::Mounted), TriggerAction::ArmDelay(d));
        assert_eq!(r.resolve(TriggerEvent::ContentChanged), TriggerAction::Nothing);
        assert_eq!(r.resolve(TriggerEvent::DelayElapsed), TriggerAction::Refresh);
        assert_eq!(r.resolve(TriggerEvent::DelayElapsed), TriggerAction::Nothing);
    }

    #[test]
    fn flag_refreshes_on_every_flip() {
        let mut r = TriggerResolver::new(RefreshTrigger::OnFlag, true);
        assert!(!r.initial_state().loading);
        assert!(r.reports_loading());
        assert_eq!(r.resolve(TriggerEvent::Mounted), TriggerAction::Nothing);
        assert_eq!(r.resolve(TriggerEvent::FlagChanged(false)), TriggerAction::Nothing);
        assert_eq!(r.resolve(TriggerEvent::FlagChanged(true)), TriggerAction::Refresh);
        assert_eq!(r.resolve(TriggerEvent::FlagChanged(true)), TriggerAction::Nothing);
        assert_eq!(r.resolve(TriggerEvent::FlagChanged(false)), TriggerAction::Refresh);
    }

    #[test]
    fn resize_waits_for_first_capture() {
        let mut r = TriggerResolver::new(RefreshTrigger::OnFlag, true);
        assert_eq!(r.resolve(TriggerEvent::Resized), TriggerAction::Nothing);
        r.resolve(TriggerEvent::FlagChanged(true));
        assert_eq!(r.resolve(TriggerEvent::Resized), TriggerAction::Refresh);

        let mut off = TriggerResolver::new(RefreshTrigger::Always, false);
        off.resolve(TriggerEvent::Mounted);
        assert_eq!(off.resolve(TriggerEvent::Resized), TriggerAction::Nothing);
    }
}
