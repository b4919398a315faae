use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;
use std::{str::FromStr, sync::LazyLock};

use super::input::KeyAction;

macro_rules! keymap_source {
    () => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/keymap/default.keymap.json"
        ))
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(super) enum KeymapContext {
    /// Popup closed, the field has focus.
    Field,
    /// Calendar popup open.
    Calendar,
}

impl KeymapContext {
    fn from_name(raw: &str) -> Option<Self> {
        match raw {
            "field" => Some(KeymapContext::Field),
            "calendar" => Some(KeymapContext::Calendar),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct RawEntry {
    id: String,
    description: String,
    contexts: Vec<String>,
    action: RawAction,
    combos: Vec<String>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum RawAction {
    Save,
    Quit,
    TogglePopup,
    Clear,
    Select,
    Dismiss,
    MonthStep { delta: i32 },
    FocusStep { days: i64 },
}

impl RawAction {
    fn into_action(self) -> KeyAction {
        match self {
            RawAction::Save => KeyAction::Save,
            RawAction::Quit => KeyAction::Quit,
            RawAction::TogglePopup => KeyAction::TogglePopup,
            RawAction::Clear => KeyAction::Clear,
            RawAction::Select => KeyAction::Select,
            RawAction::Dismiss => KeyAction::Dismiss,
            RawAction::MonthStep { delta } => KeyAction::MonthStep(delta),
            RawAction::FocusStep { days } => KeyAction::FocusStep(days),
        }
    }
}

struct KeyBinding {
    action: KeyAction,
    contexts: Vec<KeymapContext>,
    chords: Vec<Chord>,
    snippet: String,
}

impl KeyBinding {
    fn from_raw(raw: RawEntry) -> Result<Self, String> {
        let contexts = raw
            .contexts
            .iter()
            .filter_map(|ctx| KeymapContext::from_name(ctx))
            .collect::<Vec<_>>();
        if contexts.is_empty() {
            return Err(format!("{}: no known context", raw.id));
        }
        let chords = raw
            .combos
            .iter()
            .map(|combo| {
                combo
                    .parse::<Chord>()
                    .map_err(|err| format!("{}: {err}", raw.id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if chords.is_empty() {
            return Err(format!("{}: no combos", raw.id));
        }
        let snippet = format!("{} {}", raw.combos.join("/"), raw.description);
        Ok(Self {
            action: raw.action.into_action(),
            contexts,
            chords,
            snippet,
        })
    }

    fn lookup(&self, key: &KeyEvent, context: KeymapContext) -> Option<KeyAction> {
        let bound = self.contexts.contains(&context);
        (bound && self.chords.iter().any(|chord| chord.accepts(key))).then_some(self.action)
    }
}

/// One key plus the modifiers that must be held.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Chord {
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl FromStr for Chord {
    type Err = String;

    fn from_str(combo: &str) -> Result<Self, Self::Err> {
        let mut parts = combo.split('+').map(str::trim).collect::<Vec<_>>();
        let key = parts
            .pop()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| format!("'{combo}' names no key"))?;
        let mut modifiers = KeyModifiers::NONE;
        for part in parts {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                other => return Err(format!("unknown modifier '{other}' in '{combo}'")),
            };
        }
        Ok(Self {
            code: key_code(key).ok_or_else(|| format!("unknown key '{key}' in '{combo}'"))?,
            modifiers,
        })
    }
}

impl Chord {
    /// Characters ignore case and an implicit Shift, since terminals report
    /// `<` or `H` with Shift held.
    fn accepts(&self, key: &KeyEvent) -> bool {
        let mut held = key.modifiers;
        match (self.code, key.code) {
            (KeyCode::Char(want), KeyCode::Char(got)) if want != ' ' => {
                if !got.eq_ignore_ascii_case(&want) {
                    return false;
                }
                if !self.modifiers.contains(KeyModifiers::SHIFT) {
                    held.remove(KeyModifiers::SHIFT);
                }
            }
            (want, got) if want == got => {}
            _ => return false,
        }
        held == self.modifiers
    }
}

fn key_code(token: &str) -> Option<KeyCode> {
    let code = match token.to_ascii_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        "backspace" => KeyCode::Backspace,
        _ => {
            let mut chars = token.chars();
            let ch = chars.next()?;
            return chars
                .next()
                .is_none()
                .then(|| KeyCode::Char(ch.to_ascii_lowercase()));
        }
    };
    Some(code)
}

static KEYMAP: LazyLock<Vec<KeyBinding>> = LazyLock::new(|| {
    let raw_entries: Vec<RawEntry> =
        serde_json::from_str(keymap_source!()).expect("invalid keymap/default.keymap.json");
    raw_entries
        .into_iter()
        .map(KeyBinding::from_raw)
        .collect::<Result<_, _>>()
        .unwrap_or_else(|err| panic!("invalid keymap/default.keymap.json: {err}"))
});

pub(super) fn classify_key(key: &KeyEvent, context: KeymapContext) -> Option<KeyAction> {
    KEYMAP
        .iter()
        .find_map(|binding| binding.lookup(key, context))
}

pub(super) fn help_text(context: KeymapContext) -> Option<String> {
    let snippets = KEYMAP
        .iter()
        .filter(|binding| binding.contexts.contains(&context))
        .map(|binding| binding.snippet.as_str())
        .collect::<Vec<_>>();
    if snippets.is_empty() {
        None
    } else {
        Some(snippets.join(" • "))
    }
}
