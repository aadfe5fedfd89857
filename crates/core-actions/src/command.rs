use core_state::Mode;
use core_text::WordClass;

/// Cursor motions. Row arguments are relative to the window, columns count
/// characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    RowAbs(isize),
    RowRel(isize),
    RowEnd,
    CharAbs(usize),
    CharRel(isize),
    CharEnd,
    WordNext(WordClass),
    WordPrev(WordClass),
    ParaNext,
    ParaPrev,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowOp {
    PageDown,
    PageUp,
    Top,
    Bottom,
    CentreCursor,
    Grow,
    Shrink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteKind {
    Forward,
    Backward,
    ToLineEnd,
    ToLineStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransposeKind {
    /// Swap the cursor line with the next line.
    Lines,
    /// Swap with the next line and move down with it.
    LinesDown,
    /// Swap with the previous line and move up with it.
    LinesUp,
    Chars,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Motion),
    Window(WindowOp),
    InsertChar(char),
    Delete(DeleteKind),
    Indent,
    Exdent,
    Join,
    DuplicateLine,
    /// Insert an empty line at the cursor.
    NewLine,
    /// Split the line at the cursor.
    InsertNewLine { follow: bool },
    Transpose(TransposeKind),
    RotateVariant,
    ToggleKeyword,
    SearchNext,
    SearchPrev,
    Save,
    Undo,
    Redo,
    SwitchMode(Mode),
    PreviewMode(Mode),
    CommitMode,
    CancelMode,
    /// New geometry in text columns and buffer rows.
    Resize { width: usize, height: usize },
    Quit,
}
