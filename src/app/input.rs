#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Save,
    Quit,
    TogglePopup,
    Clear,
    Select,
    Dismiss,
    MonthStep(i32),
    FocusStep(i64),
}
