//! Ordered list of Atomic Red Team test identifiers.

use tracing::{debug, warn};

/// Identifiers in the order they appear in the generated `vars` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TidList {
    entries: Vec<String>,
    trim: bool,
}

impl Default for TidList {
    fn default() -> Self {
        Self::new()
    }
}

impl TidList {
    /// Create an empty list that trims surrounding whitespace from new entries.
    pub fn new() -> Self {
        Self::with_trim(true)
    }

    /// Create an empty list, choosing whether new entries are trimmed.
    pub fn with_trim(trim: bool) -> Self {
        Self {
            entries: Vec::new(),
            trim,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Append an entry to the end of the list.
    ///
    /// Blank entries are rejected and `false` is returned.
    pub fn add(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.trim().is_empty() {
            warn!("rejected blank test identifier");
            return false;
        }
        let entry = if self.trim {
            text.trim().to_owned()
        } else {
            text
        };
        debug!(entry = %entry, index = self.entries.len(), "added test identifier");
        self.entries.push(entry);
        true
    }

    /// Swap the entry at `index` with its predecessor. No-op for the first entry.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            return false;
        }
        self.entries.swap(index - 1, index);
        debug!(from = index, to = index - 1, "moved test identifier up");
        true
    }

    /// Swap the entry at `index` with its successor. No-op for the last entry.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index >= self.entries.len().saturating_sub(1) {
            return false;
        }
        self.entries.swap(index, index + 1);
        debug!(from = index, to = index + 1, "moved test identifier down");
        true
    }

    /// Remove the entry at `index`, shifting later entries left.
    pub fn delete(&mut self, index: usize) -> Option<String> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        debug!(entry = %removed, index, "deleted test identifier");
        Some(removed)
    }

    /// Snapshot the list as editor rows, each with commands bound to its own index.
    pub fn rows(&self) -> Vec<TidRow<'_>> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| TidRow::new(index, entry))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for TidList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = TidList::new();
        for entry in iter {
            list.add(entry);
        }
        list
    }
}

/// Buttons shown next to every row of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowCommandKind {
    Up,
    Down,
    Delete,
}

impl RowCommandKind {
    pub const ALL: [RowCommandKind; 3] =
        [RowCommandKind::Up, RowCommandKind::Down, RowCommandKind::Delete];

    pub fn label(&self) -> &'static str {
        match self {
            RowCommandKind::Up => "Up",
            RowCommandKind::Down => "Down",
            RowCommandKind::Delete => "Delete",
        }
    }
}

/// A row button with the row's index captured by value at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCommand {
    kind: RowCommandKind,
    index: usize,
}

impl RowCommand {
    pub fn bind(kind: RowCommandKind, index: usize) -> Self {
        Self { kind, index }
    }

    pub fn kind(&self) -> RowCommandKind {
        self.kind
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Run the command against the list. Returns the index the entry now occupies, if any.
    pub fn apply(self, list: &mut TidList) -> Option<usize> {
        match self.kind {
            RowCommandKind::Up => list.move_up(self.index).then(|| self.index - 1),
            RowCommandKind::Down => list.move_down(self.index).then(|| self.index + 1),
            RowCommandKind::Delete => list.delete(self.index).map(|_| self.index),
        }
    }
}

/// One rendered row of the list editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TidRow<'a> {
    pub index: usize,
    pub entry: &'a str,
    pub commands: [RowCommand; 3],
}

impl<'a> TidRow<'a> {
    fn new(index: usize, entry: &'a str) -> Self {
        Self {
            index,
            entry,
            commands: RowCommandKind::ALL.map(|kind| RowCommand::bind(kind, index)),
        }
    }

    pub fn command(&self, kind: RowCommandKind) -> RowCommand {
        RowCommand::bind(kind, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(entries: &[&str]) -> TidList {
        entries.iter().copied().collect()
    }

    #[test]
    fn add_appends_in_order() {
        let mut tids = TidList::new();
        assert!(tids.add("T1059"));
        assert!(tids.add("T1003.001"));
        assert_eq!(tids.entries(), ["T1059", "T1003.001"]);
    }

    #[test]
    fn add_trims_and_rejects_blank_entries() {
        let mut tids = TidList::new();
        assert!(!tids.add(""));
        assert!(!tids.add("   "));
        assert!(tids.add("  T1082 "));
        assert_eq!(tids.entries(), ["T1082"]);
    }

    #[test]
    fn untrimmed_list_keeps_whitespace_but_rejects_blank() {
        let mut tids = TidList::with_trim(false);
        assert!(!tids.add("\t"));
        assert!(tids.add(" T1082"));
        assert_eq!(tids.entries(), [" T1082"]);
    }

    #[test]
    fn move_up_swaps_with_previous() {
        let mut tids = list(&["a", "b", "c"]);
        assert!(tids.move_up(2));
        assert_eq!(tids.entries(), ["a", "c", "b"]);
    }

    #[test]
    fn move_down_swaps_with_next() {
        let mut tids = list(&["a", "b", "c"]);
        assert!(tids.move_down(0));
        assert_eq!(tids.entries(), ["b", "a", "c"]);
    }

    #[test]
    fn boundary_moves_are_no_ops() {
        let mut tids = list(&["a", "b", "c"]);
        assert!(!tids.move_up(0));
        assert!(!tids.move_down(2));
        assert!(!tids.move_up(7));
        assert!(!tids.move_down(7));
        assert!(!tids.move_up(usize::MAX));
        assert!(!tids.move_down(usize::MAX));
        assert_eq!(tids.delete(usize::MAX), None);
        assert_eq!(tids.entries(), ["a", "b", "c"]);

        let mut empty = TidList::new();
        assert!(!empty.move_down(0));
        assert!(!empty.move_up(0));
    }

    #[test]
    fn delete_shifts_later_entries_left() {
        let mut tids = list(&["a", "b", "c"]);
        assert_eq!(tids.delete(1).as_deref(), Some("b"));
        assert_eq!(tids.entries(), ["a", "c"]);
        assert_eq!(tids.delete(5), None);
        assert_eq!(tids.len(), 2);
    }

    #[derive(Clone, Copy)]
    enum Op {
        Add(&'static str),
        Up(usize),
        Down(usize),
        Delete(usize),
    }

    fn apply_model(model: &mut Vec<&'static str>, op: Op) {
        match op {
            Op::Add(entry) => model.push(entry),
            Op::Up(i) if i > 0 && i < model.len() => model.swap(i - 1, i),
            Op::Down(i) if i + 1 < model.len() => model.swap(i, i + 1),
            Op::Delete(i) if i < model.len() => {
                model.remove(i);
            }
            _ => {}
        }
    }

    #[test]
    fn operation_sequences_preserve_membership_and_count() {
        use Op::*;
        let sequences: &[&[Op]] = &[
            &[
                Add("T1"),
                Add("T2"),
                Add("T3"),
                Add("T4"),
                Add("T5"),
                Down(0),
                Up(4),
                Delete(2),
                Down(0),
                Delete(0),
                Add("T6"),
            ],
            &[Add("T1"), Add("T2"), Add("T3"), Delete(2), Delete(0), Delete(0), Delete(0)],
            &[Delete(0), Up(0), Down(0), Add("T1"), Up(0), Down(0), Delete(1)],
            &[
                Add("T1"),
                Add("T2"),
                Add("T3"),
                Add("T4"),
                Up(3),
                Up(2),
                Up(1),
                Down(3),
                Delete(3),
                Add("T5"),
                Delete(0),
            ],
            &[Add("T1"), Add("T2"), Down(1), Up(0), Down(0), Delete(1), Add("T3"), Delete(1)],
        ];

        for (case, ops) in sequences.iter().enumerate() {
            let mut tids = TidList::new();
            let mut model = Vec::new();
            let mut adds = 0;
            let mut deletes = 0;
            for &op in ops.iter() {
                match op {
                    Op::Add(entry) => adds += usize::from(tids.add(entry)),
                    Op::Up(i) => {
                        tids.move_up(i);
                    }
                    Op::Down(i) => {
                        tids.move_down(i);
                    }
                    Op::Delete(i) => deletes += usize::from(tids.delete(i).is_some()),
                }
                apply_model(&mut model, op);
            }

            assert_eq!(tids.len(), adds - deletes, "sequence {case}");
            assert_eq!(tids.entries(), model.as_slice(), "sequence {case}");
        }
    }

    #[test]
    fn first_sequence_ends_in_expected_order() {
        let mut tids = list(&["T1", "T2", "T3", "T4", "T5"]);
        tids.move_down(0);
        tids.move_up(4);
        tids.delete(2);
        tids.move_down(0);
        tids.delete(0);
        tids.add("T6");
        assert_eq!(tids.entries(), ["T2", "T5", "T4", "T6"]);
    }

    #[test]
    fn rows_bind_their_own_index() {
        let tids = list(&["a", "b", "c"]);
        let rows = tids.rows();
        for (position, row) in rows.iter().enumerate() {
            assert_eq!(row.index, position);
            assert!(row.commands.iter().all(|cmd| cmd.index() == position));
        }
    }

    #[test]
    fn rebuilt_rows_track_indices_after_mutation() {
        let mut tids = list(&["a", "b", "c"]);
        let delete_first = tids.rows()[0].command(RowCommandKind::Delete);
        assert_eq!(delete_first.apply(&mut tids), Some(0));

        // The old row for "c" was bound to index 2; the rebuilt one is bound to 1.
        let rows = tids.rows();
        let row_c = rows.iter().find(|row| row.entry == "c").unwrap();
        assert_eq!(row_c.index, 1);
        assert_eq!(row_c.command(RowCommandKind::Up).apply(&mut tids), Some(0));
        assert_eq!(tids.entries(), ["c", "b"]);
    }

    #[test]
    fn row_commands_report_no_op_at_boundaries() {
        let mut tids = list(&["a", "b"]);
        assert_eq!(RowCommand::bind(RowCommandKind::Up, 0).apply(&mut tids), None);
        assert_eq!(RowCommand::bind(RowCommandKind::Down, 1).apply(&mut tids), None);
        assert_eq!(tids.entries(), ["a", "b"]);
    }
}
