//! The whiteboard controller.
//!
//! [`Whiteboard`] owns the board, its history, the active tool, the selection
//! and the pointer session, and exposes every state transition the host can
//! trigger. The board is only mutated through these methods.

use crate::board::Board;
use crate::config::BoardConfig;
use crate::elements::{Element, ElementId, ElementKind, ElementStyle, HexColor, NewElement};
use crate::error::{BoardError, BoardResult};
use crate::history::{History, Navigation};
use crate::input::{KeyEvent, KeyIntent, PointerEvent};
use crate::interaction::{InteractionSession, PointerOutcome};
use crate::selection::{FocusState, Selection};
use crate::tools::{ToolBehavior, ToolKind, ToolManager};
use kurbo::{Point, Rect, Vec2};

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key is unbound, or its command does not apply right now.
    Ignored,
    Deleted(ElementId),
    Navigated(Navigation),
}

/// Runtime whiteboard state.
#[derive(Debug, Clone)]
pub struct Whiteboard {
    board: Board,
    history: History,
    tools: ToolManager,
    selection: Selection,
    session: InteractionSession,
    config: BoardConfig,
}

impl Default for Whiteboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Whiteboard {
    /// Create an empty whiteboard with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(BoardConfig::default())
    }

    /// Create an empty whiteboard, rejecting a malformed configuration.
    pub fn with_config(config: BoardConfig) -> BoardResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: BoardConfig) -> Self {
        Self {
            board: Board::new(),
            history: History::new(),
            tools: ToolManager::new(),
            selection: Selection::new(),
            session: InteractionSession::Idle,
            config,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Elements in paint order, for the renderer.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.board.elements()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selection.selected()
    }

    pub fn editing(&self) -> Option<ElementId> {
        self.selection.editing()
    }

    pub fn focus_state(&self, id: ElementId) -> FocusState {
        self.selection.state(id)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Topmost element under a point.
    pub fn hit_test(&self, point: Point) -> Option<ElementId> {
        self.board.topmost_at(point, 0.0)
    }

    /// Switch tools. Only accepted while no drag or draw is in progress.
    ///
    /// Switching to a creation tool drops the selection and closes the text editor.
    pub fn set_tool(&mut self, tool: ToolKind) -> BoardResult<()> {
        if !self.session.is_idle() {
            log::warn!("Rejected switch to {:?} during {:?}", tool, self.session);
            return Err(BoardError::InteractionInProgress("change tools"));
        }
        if tool.creates_elements() {
            self.end_text_edit();
            self.selection.clear();
        }
        log::debug!("Tool: {:?} -> {:?}", self.tools.current_tool, tool);
        self.tools.set_tool(tool);
        Ok(())
    }

    /// Override the style of new elements; `None` restores the per-kind defaults.
    pub fn set_style(&mut self, style: Option<ElementStyle>) -> BoardResult<()> {
        if let Some(style) = &style {
            style.validate()?;
        }
        self.tools.set_style(style);
        Ok(())
    }

    /// Dispatch a pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> BoardResult<PointerOutcome> {
        match event {
            PointerEvent::Down { position, target } => self.pointer_down(position, target),
            PointerEvent::Move { position } => Ok(self
                .pointer_move(position)
                .map_or(PointerOutcome::Ignored, PointerOutcome::Updated)),
            PointerEvent::Up => Ok(if self.session.is_idle() {
                PointerOutcome::Ignored
            } else {
                PointerOutcome::Released {
                    committed: self.pointer_up(),
                }
            }),
            PointerEvent::DoubleClick { target } => Ok(if self.begin_text_edit(target) {
                PointerOutcome::EditStarted(target)
            } else {
                PointerOutcome::Ignored
            }),
        }
    }

    /// Handle a press at `position`, with the element under the pointer if any.
    ///
    /// Creation tools always create, whatever lies under the pointer.
    ///
    /// Panics if `target` is not on the board.
    pub fn pointer_down(
        &mut self,
        position: Point,
        target: Option<ElementId>,
    ) -> BoardResult<PointerOutcome> {
        if let Some(id) = target {
            assert!(self.board.contains(id), "pointer-down on unknown element {id}");
        }

        let behavior = self.tools.current_tool.behavior();

        if let Some(editing) = self.selection.editing() {
            if behavior == ToolBehavior::Select && target == Some(editing) {
                return Ok(PointerOutcome::Ignored);
            }
            self.end_text_edit();
        }

        // A press without a matching release finishes the previous session first.
        if !self.session.is_idle() {
            log::debug!("Pointer-down during {:?}; releasing it", self.session);
            self.pointer_up();
        }

        match behavior {
            ToolBehavior::Assist => Ok(PointerOutcome::AssistRequested),
            ToolBehavior::ClickToPlace(kind) => self.place(kind, position),
            ToolBehavior::DragToDraw(kind) => self.start_drawing(kind, position),
            ToolBehavior::Select => Ok(match target {
                Some(id) => self.start_dragging(id, position),
                None => {
                    self.selection.clear();
                    PointerOutcome::SelectionCleared
                }
            }),
        }
    }

    fn place(&mut self, kind: ElementKind, position: Point) -> BoardResult<PointerOutcome> {
        let style = self.tools.style_for(kind, &self.config);
        let NewElement {
            element,
            begins_text_edit,
        } = Element::create(kind, position, style, &self.config)?;
        let id = element.id();

        self.board.push(element);
        self.commit();
        self.selection.select(id);
        if begins_text_edit {
            self.selection.enter_editing(id);
        }
        self.tools.reset();
        log::debug!("Placed {} {}", kind, id);
        Ok(PointerOutcome::Placed(id))
    }

    fn start_drawing(&mut self, kind: ElementKind, origin: Point) -> BoardResult<PointerOutcome> {
        let style = self.tools.style_for(kind, &self.config);
        let NewElement { element, .. } = Element::create(kind, origin, style, &self.config)?;
        let id = element.id();

        self.board.push(element);
        self.selection.select(id);
        self.session = InteractionSession::Drawing { id, origin };
        log::debug!("Drawing {} {}", kind, id);
        Ok(PointerOutcome::DrawStarted(id))
    }

    fn start_dragging(&mut self, id: ElementId, origin: Point) -> PointerOutcome {
        let start_pos = self.element(id).position;
        self.selection.select(id);
        self.session = InteractionSession::Dragging {
            id,
            origin,
            start_pos,
        };
        log::debug!("Dragging {}", id);
        PointerOutcome::DragStarted(id)
    }

    /// Follow the pointer with the element under the current session.
    ///
    /// Returns the updated element; nothing is committed.
    pub fn pointer_move(&mut self, position: Point) -> Option<ElementId> {
        if !(position.x.is_finite() && position.y.is_finite()) {
            log::warn!("Ignoring pointer-move to non-finite position {:?}", position);
            return None;
        }

        match self.session {
            InteractionSession::Idle => None,
            InteractionSession::Drawing { id, origin } => {
                let element = self.board.get_mut(id)?;
                element.span(origin, position);
                log::trace!("Sized {} to {:?}", id, element.size());
                Some(id)
            }
            InteractionSession::Dragging {
                id,
                origin,
                start_pos,
            } => {
                let element = self.board.get_mut(id)?;
                element.position = InteractionSession::drag_position(start_pos, origin, position);
                log::trace!("Moved {} to {:?}", id, element.position);
                Some(id)
            }
        }
    }

    /// End the current session, committing if the board changed.
    ///
    /// Finishing a draw returns to the select tool. Returns whether a history
    /// entry was added.
    pub fn pointer_up(&mut self) -> bool {
        match std::mem::take(&mut self.session) {
            InteractionSession::Idle => false,
            InteractionSession::Drawing { .. } => {
                let committed = self.commit();
                self.tools.reset();
                committed
            }
            InteractionSession::Dragging { .. } => self.commit(),
        }
    }

    /// Open the text editor on a note or text label.
    ///
    /// Returns false for other kinds or while a drag or draw is in progress.
    /// Panics if `id` is not on the board.
    pub fn begin_text_edit(&mut self, id: ElementId) -> bool {
        if !self.element(id).kind().holds_text() || !self.session.is_idle() {
            return false;
        }
        if self.selection.editing().is_some_and(|editing| editing != id) {
            self.end_text_edit();
        }
        self.selection.enter_editing(id);
        true
    }

    /// Replace the text of the element under edit. Not committed until
    /// [`Whiteboard::end_text_edit`].
    pub fn input_text(&mut self, text: impl Into<String>) -> bool {
        let Some(id) = self.selection.editing() else {
            return false;
        };
        match self.board.get_mut(id) {
            Some(element) => {
                element.text = Some(text.into());
                true
            }
            None => false,
        }
    }

    /// Close the text editor (blur), committing if the board changed.
    pub fn end_text_edit(&mut self) -> bool {
        match self.selection.exit_editing() {
            Some(_) => self.commit(),
            None => false,
        }
    }

    /// Remove the selected element and commit. No-op without a selection.
    pub fn delete_selected(&mut self) -> Option<ElementId> {
        let id = self.selection.selected()?;
        self.board.remove(id);
        if self.session.element() == Some(id) {
            self.session = InteractionSession::Idle;
        }
        self.selection.forget(id);
        self.commit();
        log::debug!("Deleted {}", id);
        Some(id)
    }

    /// Set the fill of the selected element and commit.
    ///
    /// Returns whether a history entry was added. Rejected while a drag or draw
    /// is in progress.
    pub fn set_fill_color(&mut self, color: HexColor) -> BoardResult<bool> {
        if !self.session.is_idle() {
            log::warn!("Rejected fill change during {:?}", self.session);
            return Err(BoardError::InteractionInProgress("change colors"));
        }
        let Some(element) = self
            .selection
            .selected()
            .and_then(|id| self.board.get_mut(id))
        else {
            return Ok(false);
        };
        element.style.fill_color = color;
        Ok(self.commit())
    }

    pub fn undo(&mut self) -> Navigation {
        let navigation = self.history.undo();
        self.restore(navigation);
        navigation
    }

    pub fn redo(&mut self) -> Navigation {
        let navigation = self.history.redo();
        self.restore(navigation);
        navigation
    }

    fn restore(&mut self, navigation: Navigation) {
        if !navigation.is_restored() {
            return;
        }
        self.board = self.history.current().clone();
        self.selection.clear();
        self.session = InteractionSession::Idle;
        log::debug!(
            "History at {}/{} ({} elements)",
            self.history.index(),
            self.history.len() - 1,
            self.board.len()
        );
    }

    /// Dispatch a key press.
    ///
    /// Delete and Backspace are left to the text editor while one is open.
    pub fn handle_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        match event.intent() {
            Some(KeyIntent::DeleteSelected) if self.selection.editing().is_none() => self
                .delete_selected()
                .map_or(KeyOutcome::Ignored, KeyOutcome::Deleted),
            Some(KeyIntent::Undo) => KeyOutcome::Navigated(self.undo()),
            Some(KeyIntent::Redo) => KeyOutcome::Navigated(self.redo()),
            _ => KeyOutcome::Ignored,
        }
    }

    /// Insert one sticky note per generated idea, laid out in a two-column grid
    /// centered on `center`, and commit them as a single history entry.
    ///
    /// Works on the board as it is at call time. An open text edit is committed
    /// first as its own entry. Rejected while a drag or draw is in progress.
    pub fn insert_generated_elements<I, S>(
        &mut self,
        texts: I,
        center: Point,
    ) -> BoardResult<Vec<ElementId>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.session.is_idle() {
            log::warn!("Rejected generated notes during {:?}", self.session);
            return Err(BoardError::InteractionInProgress("insert generated notes"));
        }
        let texts: Vec<String> = texts.into_iter().map(Into::into).collect();
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let size = self.config.note_size;
        let cell = size + self.config.grid_gap;
        let columns = texts.len().min(2) as f64;
        let rows = texts.len().div_ceil(2) as f64;
        let grid = Vec2::new(
            columns * cell - self.config.grid_gap,
            rows * cell - self.config.grid_gap,
        );
        let origin = center - grid / 2.0;

        let notes = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                let offset = Vec2::new((index % 2) as f64 * cell, (index / 2) as f64 * cell);
                let style =
                    ElementStyle::new(self.config.palette_fill(index), HexColor::TRANSPARENT, 0.0);
                Element::sized(ElementKind::Note, origin + offset, size, size, style)
                    .map(|note| note.with_text(text))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.end_text_edit();
        let ids: Vec<ElementId> = notes.iter().map(Element::id).collect();
        for note in notes {
            self.board.push(note);
        }
        self.commit();
        self.tools.reset();
        log::debug!("Inserted {} generated notes", ids.len());
        Ok(ids)
    }

    /// Region to capture when exporting the board as an image.
    pub fn export_bounds(&self) -> Rect {
        self.board
            .export_bounds(self.config.export_padding, self.config.empty_export_size)
    }

    fn commit(&mut self) -> bool {
        let committed = self.history.commit(&self.board);
        if committed {
            log::debug!(
                "Committed history entry {} ({} elements)",
                self.history.index(),
                self.board.len()
            );
        }
        committed
    }

    fn element(&self, id: ElementId) -> &Element {
        match self.board.get(id) {
            Some(element) => element,
            None => panic!("unknown element {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use kurbo::Size;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Draw a rectangle from `from` to `to` and return its ID.
    fn draw(wb: &mut Whiteboard, tool: ToolKind, from: Point, to: Point) -> ElementId {
        wb.set_tool(tool).unwrap();
        let PointerOutcome::DrawStarted(id) = wb.pointer_down(from, None).unwrap() else {
            panic!("expected a draw to start");
        };
        wb.pointer_move(to);
        wb.pointer_up();
        id
    }

    fn ctrl(key: &str, shift: bool) -> KeyEvent {
        KeyEvent::new(
            key,
            Modifiers {
                ctrl: true,
                shift,
                ..Modifiers::default()
            },
        )
    }

    #[test]
    fn test_draw_normalizes_negative_drag() {
        init_logger();
        let mut wb = Whiteboard::new();
        let id = draw(
            &mut wb,
            ToolKind::Rectangle,
            Point::new(100.0, 100.0),
            Point::new(40.0, 30.0),
        );

        let rect = wb.board().get(id).unwrap();
        assert_eq!(rect.position, Point::new(40.0, 30.0));
        assert_eq!(rect.size(), Size::new(60.0, 70.0));
        assert_eq!(wb.tool(), ToolKind::Select);
        assert_eq!(wb.history().len(), 2);
    }

    #[test]
    fn test_moves_do_not_commit() {
        let mut wb = Whiteboard::new();
        wb.set_tool(ToolKind::Circle).unwrap();
        wb.pointer_down(Point::new(0.0, 0.0), None).unwrap();
        for step in 1..=20 {
            wb.pointer_move(Point::new(step as f64 * 5.0, step as f64 * 3.0));
            assert_eq!(wb.history().len(), 1);
        }
        assert!(wb.pointer_up());
        assert_eq!(wb.history().len(), 2);
        assert!(wb.session().is_idle());
    }

    #[test]
    fn test_drawing_selects_new_shape() {
        let mut wb = Whiteboard::new();
        wb.set_tool(ToolKind::Cloud).unwrap();
        let PointerOutcome::DrawStarted(id) = wb.pointer_down(Point::ZERO, None).unwrap() else {
            panic!("expected a draw to start");
        };
        assert_eq!(wb.selected(), Some(id));
        assert_eq!(wb.board().get(id).unwrap().size(), Size::ZERO);
        assert_eq!(wb.tool(), ToolKind::Cloud);
    }

    #[test]
    fn test_note_click_to_place() {
        let mut wb = Whiteboard::new();
        wb.set_tool(ToolKind::Note).unwrap();
        let outcome = wb.pointer_down(Point::new(500.0, 400.0), None).unwrap();
        let PointerOutcome::Placed(id) = outcome else {
            panic!("expected a placed note");
        };

        let note = wb.board().get(id).unwrap();
        assert_eq!(note.position, Point::new(400.0, 300.0));
        assert_eq!(note.size(), Size::new(200.0, 200.0));
        assert_eq!(note.style.fill_color, wb.config().palette_fill(0));
        assert_eq!(wb.history().len(), 2);
        assert_eq!(wb.selected(), Some(id));
        assert_eq!(wb.editing(), Some(id));
        assert_eq!(wb.tool(), ToolKind::Select);
        assert!(wb.session().is_idle());
    }

    #[test]
    fn test_creation_wins_over_target() {
        let mut wb = Whiteboard::new();
        let existing = draw(
            &mut wb,
            ToolKind::Rectangle,
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
        );

        wb.set_tool(ToolKind::Text).unwrap();
        let outcome = wb
            .pointer_down(Point::new(50.0, 50.0), Some(existing))
            .unwrap();
        assert!(matches!(outcome, PointerOutcome::Placed(id) if id != existing));
        assert_eq!(wb.board().len(), 2);
    }

    #[test]
    fn test_drag_moves_by_pointer_delta() {
        let mut wb = Whiteboard::new();
        let id = draw(
            &mut wb,
            ToolKind::Triangle,
            Point::new(10.0, 10.0),
            Point::new(60.0, 60.0),
        );
        let before = wb.history().len();

        assert_eq!(
            wb.pointer_down(Point::new(30.0, 30.0), Some(id)).unwrap(),
            PointerOutcome::DragStarted(id)
        );
        wb.pointer_move(Point::new(40.0, 35.0));
        wb.pointer_move(Point::new(130.0, 80.0));
        assert_eq!(wb.board().get(id).unwrap().position, Point::new(110.0, 60.0));
        assert_eq!(wb.history().len(), before);

        assert!(wb.pointer_up());
        assert_eq!(wb.history().len(), before + 1);
        assert_eq!(wb.selected(), Some(id));
    }

    #[test]
    fn test_click_without_move_does_not_commit() {
        let mut wb = Whiteboard::new();
        let id = draw(
            &mut wb,
            ToolKind::Arrow,
            Point::new(10.0, 10.0),
            Point::new(60.0, 60.0),
        );
        let before = wb.history().len();

        wb.pointer_down(Point::new(20.0, 20.0), Some(id)).unwrap();
        assert!(!wb.pointer_up());
        assert_eq!(wb.history().len(), before);
    }

    #[test]
    fn test_background_click_clears_selection() {
        let mut wb = Whiteboard::new();
        let id = draw(
            &mut wb,
            ToolKind::Rectangle,
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
        );
        assert_eq!(wb.selected(), Some(id));

        let outcome = wb.pointer_down(Point::new(500.0, 500.0), None).unwrap();
        assert_eq!(outcome, PointerOutcome::SelectionCleared);
        assert_eq!(wb.selected(), None);
    }

    #[test]
    fn test_undo_then_redo_restores_board() {
        let mut wb = Whiteboard::new();
        draw(&mut wb, ToolKind::Rectangle, Point::ZERO, Point::new(10.0, 10.0));
        draw(&mut wb, ToolKind::Circle, Point::new(20.0, 20.0), Point::new(5.0, 5.0));
        let snapshot = wb.board().clone();

        assert_eq!(wb.undo(), Navigation::Restored);
        assert_eq!(wb.board().len(), 1);
        assert_eq!(wb.selected(), None);
        assert_eq!(wb.redo(), Navigation::Restored);
        assert_eq!(wb.board(), &snapshot);
    }

    #[test]
    fn test_history_ends_are_reported() {
        let mut wb = Whiteboard::new();
        assert_eq!(wb.undo(), Navigation::NothingToUndo);
        assert_eq!(wb.redo(), Navigation::NothingToRedo);
        assert!(!wb.can_undo());
        assert!(!wb.can_redo());
    }

    #[test]
    fn test_commit_after_undo_drops_future() {
        let mut wb = Whiteboard::new();
        draw(&mut wb, ToolKind::Rectangle, Point::ZERO, Point::new(10.0, 10.0));
        draw(&mut wb, ToolKind::Cloud, Point::ZERO, Point::new(30.0, 30.0));

        wb.undo();
        draw(&mut wb, ToolKind::Triangle, Point::ZERO, Point::new(50.0, 50.0));
        let current = wb.board().clone();

        assert_eq!(wb.redo(), Navigation::NothingToRedo);
        assert_eq!(wb.board(), &current);
        assert_eq!(wb.history().len(), 3);
    }

    #[test]
    fn test_delete_selected() {
        let mut wb = Whiteboard::new();
        let keep = draw(&mut wb, ToolKind::Rectangle, Point::ZERO, Point::new(10.0, 10.0));
        let doomed = draw(&mut wb, ToolKind::Circle, Point::new(50.0, 50.0), Point::new(80.0, 80.0));
        let before = wb.history().len();

        assert_eq!(wb.delete_selected(), Some(doomed));
        assert_eq!(wb.board().ids(), &[keep]);
        assert_eq!(wb.selected(), None);
        assert_eq!(wb.history().len(), before + 1);

        assert_eq!(wb.delete_selected(), None);
        assert_eq!(wb.history().len(), before + 1);
    }

    #[test]
    fn test_delete_key_skipped_while_editing() {
        let mut wb = Whiteboard::new();
        wb.set_tool(ToolKind::Note).unwrap();
        wb.pointer_down(Point::new(100.0, 100.0), None).unwrap();
        let backspace = KeyEvent::new("Backspace", Modifiers::default());

        assert_eq!(wb.handle_key(&backspace), KeyOutcome::Ignored);
        assert_eq!(wb.board().len(), 1);

        wb.end_text_edit();
        let id = wb.selected().unwrap();
        assert_eq!(wb.handle_key(&backspace), KeyOutcome::Deleted(id));
        assert!(wb.board().is_empty());
    }

    #[test]
    fn test_keyboard_undo_redo() {
        let mut wb = Whiteboard::new();
        draw(&mut wb, ToolKind::Rectangle, Point::ZERO, Point::new(10.0, 10.0));

        assert_eq!(
            wb.handle_key(&ctrl("z", false)),
            KeyOutcome::Navigated(Navigation::Restored)
        );
        assert!(wb.board().is_empty());
        assert_eq!(
            wb.handle_key(&ctrl("Z", true)),
            KeyOutcome::Navigated(Navigation::Restored)
        );
        assert_eq!(wb.board().len(), 1);
        assert_eq!(
            wb.handle_key(&ctrl("y", false)),
            KeyOutcome::Navigated(Navigation::NothingToRedo)
        );
    }

    #[test]
    fn test_color_change_commits_each_time() {
        let mut wb = Whiteboard::new();
        let id = draw(&mut wb, ToolKind::Rectangle, Point::ZERO, Point::new(10.0, 10.0));
        let before = wb.history().len();
        let palette: Vec<HexColor> = wb.config().palette.iter().map(|c| c.fill).collect();

        assert_eq!(wb.set_fill_color(palette[1]), Ok(true));
        assert_eq!(wb.set_fill_color(palette[2]), Ok(true));
        assert_eq!(wb.history().len(), before + 2);
        assert_eq!(wb.board().get(id).unwrap().style.fill_color, palette[2]);

        assert_eq!(wb.set_fill_color(palette[2]), Ok(false));
        assert_eq!(wb.history().len(), before + 2);
    }

    #[test]
    fn test_color_change_without_selection() {
        let mut wb = Whiteboard::new();
        assert_eq!(wb.set_fill_color(HexColor::WHITE), Ok(false));
        assert_eq!(wb.history().len(), 1);
    }

    #[test]
    fn test_text_edit_commits_once_on_blur() {
        let mut wb = Whiteboard::new();
        wb.set_tool(ToolKind::Text).unwrap();
        let PointerOutcome::Placed(id) = wb.pointer_down(Point::new(200.0, 200.0), None).unwrap()
        else {
            panic!("expected a placed label");
        };
        let before = wb.history().len();

        for text in ["H", "He", "Hel", "Hello"] {
            assert!(wb.input_text(text));
        }
        assert_eq!(wb.history().len(), before);

        assert!(wb.end_text_edit());
        assert_eq!(wb.history().len(), before + 1);
        assert_eq!(wb.board().get(id).unwrap().text.as_deref(), Some("Hello"));
        assert_eq!(wb.editing(), None);
        assert_eq!(wb.selected(), Some(id));
    }

    #[test]
    fn test_blur_without_changes_does_not_commit() {
        let mut wb = Whiteboard::new();
        wb.set_tool(ToolKind::Note).unwrap();
        wb.pointer_down(Point::ZERO, None).unwrap();
        let before = wb.history().len();
        assert!(!wb.end_text_edit());
        assert_eq!(wb.history().len(), before);
        assert!(!wb.input_text("no editor open"));
    }

    #[test]
    fn test_double_click_opens_editor() {
        let mut wb = Whiteboard::new();
        wb.set_tool(ToolKind::Note).unwrap();
        let PointerOutcome::Placed(note) = wb.pointer_down(Point::ZERO, None).unwrap() else {
            panic!("expected a placed note");
        };
        wb.end_text_edit();
        let shape = draw(&mut wb, ToolKind::Rectangle, Point::new(300.0, 300.0), Point::new(350.0, 350.0));

        assert_eq!(
            wb.handle_pointer(PointerEvent::DoubleClick { target: shape }).unwrap(),
            PointerOutcome::Ignored
        );
        assert_eq!(
            wb.handle_pointer(PointerEvent::DoubleClick { target: note }).unwrap(),
            PointerOutcome::EditStarted(note)
        );
        assert_eq!(wb.focus_state(note), FocusState::Editing);
    }

    #[test]
    fn test_press_elsewhere_ends_text_edit() {
        let mut wb = Whiteboard::new();
        wb.set_tool(ToolKind::Note).unwrap();
        let PointerOutcome::Placed(id) = wb.pointer_down(Point::new(100.0, 100.0), None).unwrap()
        else {
            panic!("expected a placed note");
        };
        wb.input_text("idea");
        let before = wb.history().len();

        assert_eq!(
            wb.pointer_down(Point::new(150.0, 150.0), Some(id)).unwrap(),
            PointerOutcome::Ignored
        );
        assert_eq!(wb.editing(), Some(id));

        wb.pointer_down(Point::new(900.0, 900.0), None).unwrap();
        assert_eq!(wb.editing(), None);
        assert_eq!(wb.selected(), None);
        assert_eq!(wb.history().len(), before + 1);
    }

    #[test]
    fn test_undo_closes_editor_and_selection() {
        let mut wb = Whiteboard::new();
        wb.set_tool(ToolKind::Note).unwrap();
        wb.pointer_down(Point::ZERO, None).unwrap();
        assert!(wb.editing().is_some());

        assert_eq!(wb.undo(), Navigation::Restored);
        assert_eq!(wb.editing(), None);
        assert_eq!(wb.selected(), None);
        assert!(wb.board().is_empty());
    }

    #[test]
    fn test_tool_change_rejected_mid_session() {
        let mut wb = Whiteboard::new();
        wb.set_tool(ToolKind::Rectangle).unwrap();
        wb.pointer_down(Point::ZERO, None).unwrap();

        assert_eq!(
            wb.set_tool(ToolKind::Select),
            Err(BoardError::InteractionInProgress("change tools"))
        );
        assert_eq!(wb.tool(), ToolKind::Rectangle);

        wb.pointer_up();
        assert!(wb.set_tool(ToolKind::Circle).is_ok());
    }

    #[test]
    fn test_creation_tool_clears_selection() {
        let mut wb = Whiteboard::new();
        draw(&mut wb, ToolKind::Rectangle, Point::ZERO, Point::new(10.0, 10.0));
        assert!(wb.selected().is_some());

        wb.set_tool(ToolKind::Select).unwrap();
        assert!(wb.selected().is_some());
        wb.set_tool(ToolKind::Cloud).unwrap();
        assert_eq!(wb.selected(), None);
    }

    #[test]
    fn test_assist_tool_only_signals() {
        let mut wb = Whiteboard::new();
        wb.set_tool(ToolKind::Assist).unwrap();
        assert_eq!(
            wb.pointer_down(Point::new(10.0, 10.0), None).unwrap(),
            PointerOutcome::AssistRequested
        );
        assert!(wb.board().is_empty());
        assert_eq!(wb.history().len(), 1);
        assert_eq!(wb.tool(), ToolKind::Assist);
    }

    #[test]
    fn test_insert_generated_commits_once() {
        let mut wb = Whiteboard::new();
        draw(&mut wb, ToolKind::Rectangle, Point::ZERO, Point::new(10.0, 10.0));
        let before = wb.history().len();

        let ids = wb
            .insert_generated_elements(["A", "B", "C"], Point::new(500.0, 500.0))
            .unwrap();

        assert_eq!(ids.len(), 3);
        assert_eq!(wb.board().len(), 4);
        assert_eq!(wb.history().len(), before + 1);
        assert_eq!(&wb.board().ids()[1..], ids.as_slice());

        let notes: Vec<&Element> = ids.iter().map(|&id| wb.board().get(id).unwrap()).collect();
        assert!(notes.iter().all(|n| n.kind() == ElementKind::Note));
        assert_eq!(notes[0].text.as_deref(), Some("A"));
        assert_eq!(notes[2].text.as_deref(), Some("C"));

        // Two columns of 200 + 20 gap, two rows, centered on (500, 500).
        assert_eq!(notes[0].position, Point::new(290.0, 290.0));
        assert_eq!(notes[1].position, Point::new(510.0, 290.0));
        assert_eq!(notes[2].position, Point::new(290.0, 510.0));

        assert_eq!(notes[0].style.fill_color, wb.config().palette_fill(0));
        assert_eq!(notes[1].style.fill_color, wb.config().palette_fill(1));
        assert!(notes[2].style.stroke_color.is_transparent());
    }

    #[test]
    fn test_insert_generated_edge_cases() {
        let mut wb = Whiteboard::new();
        let none: [&str; 0] = [];
        assert!(wb.insert_generated_elements(none, Point::ZERO).unwrap().is_empty());
        assert_eq!(wb.history().len(), 1);

        let single = wb
            .insert_generated_elements(vec![String::from("solo")], Point::new(100.0, 100.0))
            .unwrap();
        assert_eq!(wb.board().get(single[0]).unwrap().position, Point::new(0.0, 0.0));

        assert!(matches!(
            wb.insert_generated_elements(["x"], Point::new(f64::NAN, 0.0)),
            Err(BoardError::Element(_))
        ));
        assert_eq!(wb.board().len(), 1);
    }

    #[test]
    fn test_insert_generated_rejected_mid_session() {
        let mut wb = Whiteboard::new();
        wb.set_tool(ToolKind::Rectangle).unwrap();
        wb.pointer_down(Point::ZERO, None).unwrap();
        assert!(matches!(
            wb.insert_generated_elements(["late"], Point::ZERO),
            Err(BoardError::InteractionInProgress(_))
        ));
    }

    #[test]
    fn test_invalid_style_rejected() {
        let mut wb = Whiteboard::new();
        let bad = ElementStyle::new(HexColor::WHITE, HexColor::BLACK, -1.0);
        assert!(matches!(wb.set_style(Some(bad)), Err(BoardError::Element(_))));

        wb.set_tool(ToolKind::Rectangle).unwrap();
        assert!(matches!(
            wb.pointer_down(Point::new(f64::INFINITY, 0.0), None),
            Err(BoardError::Element(_))
        ));
        assert!(wb.board().is_empty());
    }

    #[test]
    fn test_handle_pointer_dispatch() {
        let mut wb = Whiteboard::new();
        wb.set_tool(ToolKind::Rectangle).unwrap();
        let PointerOutcome::DrawStarted(id) = wb
            .handle_pointer(PointerEvent::Down {
                position: Point::ZERO,
                target: None,
            })
            .unwrap()
        else {
            panic!("expected a draw to start");
        };
        assert_eq!(
            wb.handle_pointer(PointerEvent::Move {
                position: Point::new(5.0, 5.0)
            })
            .unwrap(),
            PointerOutcome::Updated(id)
        );
        assert_eq!(
            wb.handle_pointer(PointerEvent::Up).unwrap(),
            PointerOutcome::Released { committed: true }
        );
        assert_eq!(
            wb.handle_pointer(PointerEvent::Up).unwrap(),
            PointerOutcome::Ignored
        );
    }

    #[test]
    #[should_panic(expected = "unknown element")]
    fn test_unknown_target_fails_fast() {
        let mut wb = Whiteboard::new();
        let _ = wb.pointer_down(Point::ZERO, Some(uuid::Uuid::new_v4()));
    }

    #[test]
    fn test_color_change_rejected_mid_draw() {
        let mut wb = Whiteboard::new();
        wb.set_tool(ToolKind::Rectangle).unwrap();
        let PointerOutcome::DrawStarted(id) = wb.pointer_down(Point::ZERO, None).unwrap() else {
            panic!("expected a draw to start");
        };
        wb.pointer_move(Point::new(30.0, 30.0));

        assert_eq!(
            wb.set_fill_color(HexColor::WHITE),
            Err(BoardError::InteractionInProgress("change colors"))
        );
        assert_eq!(wb.history().len(), 1);

        wb.pointer_move(Point::new(80.0, 80.0));
        assert!(wb.pointer_up());
        assert_eq!(wb.history().len(), 2);

        wb.undo();
        assert!(wb.board().get(id).is_none());
    }

    #[test]
    fn test_color_change_rejected_mid_drag() {
        let mut wb = Whiteboard::new();
        let id = draw(&mut wb, ToolKind::Cloud, Point::ZERO, Point::new(50.0, 50.0));
        let before = wb.history().len();

        wb.pointer_down(Point::new(10.0, 10.0), Some(id)).unwrap();
        wb.pointer_move(Point::new(40.0, 40.0));
        assert!(matches!(
            wb.set_fill_color(HexColor::BLACK),
            Err(BoardError::InteractionInProgress(_))
        ));
        assert_eq!(wb.history().len(), before);

        wb.pointer_up();
        assert_eq!(wb.history().len(), before + 1);
        assert_eq!(
            wb.board().get(id).unwrap().style.fill_color,
            wb.config().shape_style.fill_color
        );
    }

    #[test]
    fn test_insert_generated_commits_open_text_edit_first() {
        let mut wb = Whiteboard::new();
        wb.set_tool(ToolKind::Note).unwrap();
        let PointerOutcome::Placed(note) = wb.pointer_down(Point::ZERO, None).unwrap() else {
            panic!("expected a placed note");
        };
        wb.input_text("typed");
        let before = wb.history().len();

        wb.insert_generated_elements(["A"], Point::new(600.0, 600.0))
            .unwrap();
        assert_eq!(wb.history().len(), before + 2);
        assert_eq!(wb.editing(), None);

        assert_eq!(wb.undo(), Navigation::Restored);
        assert_eq!(wb.board().len(), 1);
        assert_eq!(wb.board().get(note).unwrap().text.as_deref(), Some("typed"));
    }

    #[test]
    fn test_with_config_validates() {
        let config = BoardConfig {
            grid_gap: f64::NAN,
            ..BoardConfig::default()
        };
        assert!(matches!(
            Whiteboard::with_config(config),
            Err(BoardError::Config(_))
        ));

        let config = BoardConfig {
            note_size: 120.0,
            ..BoardConfig::default()
        };
        let wb = Whiteboard::with_config(config).unwrap();
        assert_eq!(wb.config().note_size, 120.0);
    }

    #[test]
    fn test_export_bounds_uses_config() {
        let mut wb = Whiteboard::new();
        assert_eq!(wb.export_bounds(), Rect::new(0.0, 0.0, 800.0, 600.0));

        draw(&mut wb, ToolKind::Rectangle, Point::new(100.0, 100.0), Point::new(200.0, 150.0));
        assert_eq!(wb.export_bounds(), Rect::new(50.0, 50.0, 250.0, 200.0));
    }

    #[test]
    fn test_topmost_hit_wins() {
        let mut wb = Whiteboard::new();
        draw(&mut wb, ToolKind::Rectangle, Point::ZERO, Point::new(100.0, 100.0));
        let front = draw(&mut wb, ToolKind::Circle, Point::new(50.0, 50.0), Point::new(150.0, 150.0));
        assert_eq!(wb.hit_test(Point::new(75.0, 75.0)), Some(front));
    }
}
