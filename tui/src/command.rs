//! Chord-based command layer. A single resolver maps `(key code,
//! modifier set)` to a command; the app feeds every key event through
//! it and dispatches the first match.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PanelId {
    Properties,
    Code,
}

impl PanelId {
    pub fn storage_key(self) -> &'static str {
        match self {
            PanelId::Properties => "properties",
            PanelId::Code => "code",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    /// Select the Nth entry of the currently visible list (0-based).
    JumpTo(usize),
    PrevComponent,
    NextComponent,
    TogglePanel(PanelId),
    FocusSearch,
    /// Context dependent: blurs search and clears the filter when
    /// search is focused, otherwise dismisses overlays.
    Escape,
    CopyCode,
    ToggleHelp,
    ExportSession,
    ImportSession,
    /// Jump back through the recency ring.
    RecentComponent,
    Quit,
}

impl Command {
    /// Commands that stay live while the search field is focused.
    /// Everything else is suppressed so typing never triggers chords.
    fn is_global(self) -> bool {
        matches!(
            self,
            Command::Escape | Command::CopyCode | Command::ToggleHelp | Command::JumpTo(_)
        )
    }
}

const CTRL_SHIFT: KeyModifiers = KeyModifiers::CONTROL.union(KeyModifiers::SHIFT);

/// Resolve a key event to a command, honoring the search-focus
/// allowlist. Returns `None` for keys the chord table does not claim;
/// those fall through to the focused widget.
pub fn resolve(key: KeyEvent, search_focused: bool) -> Option<Command> {
    let command = lookup(key.code, key.modifiers)?;
    if search_focused && !command.is_global() {
        return None;
    }
    Some(command)
}

fn lookup(code: KeyCode, mods: KeyModifiers) -> Option<Command> {
    let command = match (code, mods) {
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::CONTROL) => {
            Command::JumpTo(c as usize - '1' as usize)
        }
        (KeyCode::Left | KeyCode::Up, KeyModifiers::CONTROL) => Command::PrevComponent,
        (KeyCode::Right | KeyCode::Down, KeyModifiers::CONTROL) => Command::NextComponent,
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Command::TogglePanel(PanelId::Properties),
        (KeyCode::Char('g'), KeyModifiers::CONTROL) => Command::TogglePanel(PanelId::Code),
        (KeyCode::Char('/'), KeyModifiers::NONE) => Command::FocusSearch,
        (KeyCode::Esc, _) => Command::Escape,
        (KeyCode::Char('c') | KeyCode::Char('C'), m) if m == CTRL_SHIFT => Command::CopyCode,
        (KeyCode::F(1), _) => Command::ToggleHelp,
        (KeyCode::Char('e'), KeyModifiers::CONTROL) => Command::ExportSession,
        (KeyCode::Char('i'), KeyModifiers::CONTROL) => Command::ImportSession,
        (KeyCode::Tab, KeyModifiers::CONTROL) | (KeyCode::BackTab, KeyModifiers::CONTROL) => {
            Command::RecentComponent
        }
        (KeyCode::Char('q'), KeyModifiers::CONTROL) => Command::Quit,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn digits_jump_to_zero_based_index() {
        let cmd = resolve(key(KeyCode::Char('3'), KeyModifiers::CONTROL), false);
        assert_eq!(cmd, Some(Command::JumpTo(2)));
    }

    #[test]
    fn plain_typing_is_not_a_chord() {
        assert_eq!(resolve(key(KeyCode::Char('a'), KeyModifiers::NONE), false), None);
        assert_eq!(resolve(key(KeyCode::Char('p'), KeyModifiers::NONE), true), None);
    }

    #[test]
    fn search_focus_suppresses_non_global_chords() {
        let nav = key(KeyCode::Right, KeyModifiers::CONTROL);
        assert_eq!(resolve(nav, false), Some(Command::NextComponent));
        assert_eq!(resolve(nav, true), None);
    }

    #[test]
    fn allowlist_survives_search_focus() {
        assert_eq!(
            resolve(key(KeyCode::Esc, KeyModifiers::NONE), true),
            Some(Command::Escape)
        );
        assert_eq!(
            resolve(key(KeyCode::Char('C'), CTRL_SHIFT), true),
            Some(Command::CopyCode)
        );
        assert_eq!(
            resolve(key(KeyCode::F(1), KeyModifiers::NONE), true),
            Some(Command::ToggleHelp)
        );
        assert_eq!(
            resolve(key(KeyCode::Char('7'), KeyModifiers::CONTROL), true),
            Some(Command::JumpTo(6))
        );
    }

    #[test]
    fn slash_focuses_search_only_when_unfocused() {
        let slash = key(KeyCode::Char('/'), KeyModifiers::NONE);
        assert_eq!(resolve(slash, false), Some(Command::FocusSearch));
        assert_eq!(resolve(slash, true), None);
    }
}
