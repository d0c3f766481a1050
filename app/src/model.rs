//! The interactive editor: board state, tool selection, and drawing.

use std::time::Duration;

use gridsearch_core::{Canvas, Color, Glyph, Input, Key, MouseAction, Point};
use gridsearch_paths::{Algorithm, Board, Mark, Outcome, SearchError, SearchGrid};
use log::Level;

use crate::app::{Effect, Model};
use crate::logger::MessageLog;
use crate::worker;

/// Lines reserved for the message log under the status line.
pub const LOG_LINES: i32 = 4;
/// The UI is at least this wide so the status line fits.
pub const MIN_WIDTH: i32 = 80;

const START: Color = Color::from_rgb(255, 165, 0);
const GOAL: Color = Color::from_rgb(220, 20, 20);
const OBSTACLE: Color = Color::from_rgb(24, 24, 24);
const VISITED: Color = Color::from_rgb(40, 170, 60);
const PATH: Color = Color::from_rgb(240, 220, 40);
const OPEN: Color = Color::from_rgb(235, 235, 235);
const INK: Color = Color::from_rgb(10, 10, 10);
const DIM: Color = Color::from_rgb(140, 140, 140);

/// Messages consumed by [`Editor::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Init,
    Input(Input),
    /// A running search visited a node.
    Visit(Point),
    /// A running search marked a traceback node, goal first.
    PathStep(Point),
    /// A running search cleared its per-run state.
    Reset,
    Log(Level, String),
    Finished(Report),
}

impl From<Input> for Msg {
    fn from(input: Input) -> Self {
        Self::Input(input)
    }
}

/// Summary of a finished run, sent by the worker.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub algorithm: Algorithm,
    pub result: Result<Outcome, SearchError>,
    pub visited: usize,
    /// Edge count of the path, when one was found.
    pub path_len: Option<usize>,
}

/// What a mouse click does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tool {
    Start,
    Goal,
    #[default]
    Obstacle,
}

impl Tool {
    fn label(self) -> &'static str {
        match self {
            Self::Start => "Start pos",
            Self::Goal => "End pos",
            Self::Obstacle => "Obstacle",
        }
    }
}

pub struct Editor {
    board: Board,
    algorithm: Algorithm,
    tool: Tool,
    interval: Duration,
    running: bool,
    log: MessageLog,
}

impl Editor {
    pub fn new(board: Board, algorithm: Algorithm, interval: Duration) -> Self {
        Self {
            board,
            algorithm,
            tool: Tool::default(),
            interval,
            running: false,
            log: MessageLog::new(),
        }
    }

    /// Screen size needed to draw the editor.
    pub fn size(&self) -> (i32, i32) {
        (
            self.board.width().max(MIN_WIDTH),
            self.board.height() + 1 + LOG_LINES,
        )
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Refuse an edit while a search owns the board.
    fn editable(&self) -> bool {
        if self.running {
            log::warn!("the board cannot be edited while a search is running");
        }
        !self.running
    }

    fn start_run(&mut self) -> Option<Effect> {
        if self.running {
            log::warn!("a search is already running");
            return None;
        }
        if let Err(err) = self.board.validate() {
            log::warn!("{err}");
            return None;
        }
        self.board.reset();
        self.running = true;
        log::info!("running {}", self.algorithm);

        let board = self.board.clone();
        let algorithm = self.algorithm;
        let interval = self.interval;
        Some(Effect::Sub(Box::new(move |ctx, tx| {
            worker::search(board, algorithm, interval, &ctx, &tx);
        })))
    }

    fn key_down(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Char('s') => self.tool = Tool::Start,
            Key::Char('g') => self.tool = Tool::Goal,
            Key::Char('o') => self.tool = Tool::Obstacle,
            Key::Tab if self.editable() => {
                self.algorithm = self.algorithm.next();
                log::info!("algorithm: {}", self.algorithm);
            }
            Key::Enter | Key::Space => return self.start_run(),
            Key::Char('c') if self.editable() => self.board.reset(),
            Key::Char('d') if self.editable() => {
                let on = !self.board.diagonals();
                self.board.set_diagonals(on);
                self.board.reset();
                log::info!("diagonal moves {}", if on { "on" } else { "off" });
            }
            Key::Escape if self.running => return Some(Effect::Cancel),
            Key::Escape | Key::Char('q') => return Some(Effect::End),
            _ => {}
        }
        None
    }

    fn click(&mut self, p: Point) {
        if !self.board.contains(p) || !self.editable() {
            return;
        }
        let edit = match self.tool {
            Tool::Start => self.board.set_start(p),
            Tool::Goal => self.board.set_goal(p),
            Tool::Obstacle => self.board.toggle_obstacle(p).map(|_| ()),
        };
        match edit {
            Ok(()) => self.board.reset(),
            Err(err) => log::warn!("{err}"),
        }
    }

    fn finished(&mut self, report: Report) {
        self.running = false;
        let name = report.algorithm.name();
        match report.result {
            Ok(Outcome::Found(_)) => log::info!(
                "{name}: path of {} steps, {} nodes visited",
                report.path_len.unwrap_or(0),
                report.visited
            ),
            Ok(Outcome::Exhausted) => {
                log::info!("{name}: no path, {} nodes visited", report.visited)
            }
            Ok(Outcome::Cancelled) => log::info!("{name}: cancelled"),
            Err(err) => log::error!("{name}: {err}"),
        }
    }

    fn glyph(&self, p: Point) -> Glyph {
        if p == self.board.start() {
            return Glyph::new('S', INK, START);
        }
        if p == self.board.goal() {
            return Glyph::new('G', INK, GOAL);
        }
        if self.board.is_obstacle(p) {
            return Glyph::new(' ', OPEN, OBSTACLE);
        }
        match self.board.mark(p).unwrap_or_default() {
            Mark::Clear => Glyph::new('·', DIM, OPEN),
            Mark::Visited => Glyph::new(' ', INK, VISITED),
            Mark::Path => Glyph::new(' ', INK, PATH),
        }
    }

    fn status(&self) -> String {
        format!(
            "[{}] {} | diagonals {} | {} | visited {}",
            self.tool().label(),
            self.algorithm(),
            if self.board().diagonals() { "on" } else { "off" },
            if self.is_running() { "running" } else { "idle" },
            self.board().visited_count()
        )
    }
}

impl Model for Editor {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => {
                log::info!("s/g/o pick a tool, click to edit, Tab switches algorithm, Enter runs");
                None
            }
            Msg::Input(Input::Key(key)) => self.key_down(key),
            Msg::Input(Input::Mouse {
                action: MouseAction::Main,
                pos,
            }) => {
                self.click(pos);
                None
            }
            Msg::Input(_) => None,
            // Search events only matter while the run they belong to is live.
            Msg::Visit(p) if self.running => {
                self.board.on_node_visited(p);
                None
            }
            Msg::PathStep(p) if self.running => {
                self.board.set_mark(p, Mark::Path);
                None
            }
            Msg::Reset if self.running => {
                self.board.reset();
                None
            }
            Msg::Visit(_) | Msg::PathStep(_) | Msg::Reset => None,
            Msg::Log(level, text) => {
                self.log.push(level, &text);
                None
            }
            Msg::Finished(report) => {
                self.finished(report);
                None
            }
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.fill(Glyph::default());
        for p in self.board.bounds() {
            canvas.set(p, self.glyph(p));
        }

        let (width, _) = self.size();
        let y = self.board.height();
        canvas.text(Point::new(0, y), &self.status(), Color::DEFAULT, Color::DEFAULT);

        let lines = self.log.recent_lines(width as usize, LOG_LINES as usize);
        for (i, (level, line)) in lines.iter().enumerate() {
            let fg = match level {
                Level::Error => GOAL,
                Level::Warn => START,
                Level::Info => Color::DEFAULT,
                Level::Debug | Level::Trace => DIM,
            };
            canvas.text(Point::new(0, y + 1 + i as i32), line, fg, Color::DEFAULT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> Editor {
        Editor::new(Board::new(5, 3).unwrap(), Algorithm::BreadthFirst, Duration::ZERO)
    }

    fn click(ed: &mut Editor, x: i32, y: i32) -> Option<Effect> {
        ed.update(Msg::Input(Input::click(Point::new(x, y))))
    }

    fn key(ed: &mut Editor, c: char) -> Option<Effect> {
        ed.update(Msg::Input(Input::char(c)))
    }

    #[test]
    fn tools_edit_the_board() {
        let mut ed = editor();
        assert_eq!(ed.tool(), Tool::Obstacle);
        click(&mut ed, 2, 1);
        assert!(ed.board().is_obstacle(Point::new(2, 1)));
        click(&mut ed, 2, 1);
        assert!(!ed.board().is_obstacle(Point::new(2, 1)));

        key(&mut ed, 's');
        click(&mut ed, 1, 1);
        assert_eq!(ed.board().start(), Point::new(1, 1));
        key(&mut ed, 'g');
        click(&mut ed, 3, 0);
        assert_eq!(ed.board().goal(), Point::new(3, 0));
    }

    #[test]
    fn invalid_edits_leave_the_board_alone() {
        let mut ed = editor();
        // Obstacle on the start, goal onto the start, clicks off the board.
        click(&mut ed, 0, 0);
        key(&mut ed, 'g');
        click(&mut ed, 0, 0);
        click(&mut ed, 9, 9);
        assert_eq!(ed.board().to_string(), "S....\n.....\n....G");
    }

    #[test]
    fn enter_starts_one_run_at_a_time() {
        let mut ed = editor();
        assert!(matches!(ed.update(Msg::Input(Input::Key(Key::Enter))), Some(Effect::Sub(_))));
        assert!(ed.is_running());
        assert!(ed.update(Msg::Input(Input::Key(Key::Enter))).is_none());
    }

    #[test]
    fn editing_is_refused_while_running() {
        let mut ed = editor();
        ed.update(Msg::Input(Input::Key(Key::Enter)));
        click(&mut ed, 2, 1);
        ed.update(Msg::Input(Input::Key(Key::Tab)));
        key(&mut ed, 'd');
        assert!(!ed.board().is_obstacle(Point::new(2, 1)));
        assert_eq!(ed.algorithm(), Algorithm::BreadthFirst);
        assert!(!ed.board().diagonals());
    }

    #[test]
    fn escape_cancels_then_quits() {
        let mut ed = editor();
        ed.update(Msg::Input(Input::Key(Key::Enter)));
        assert!(matches!(
            ed.update(Msg::Input(Input::Key(Key::Escape))),
            Some(Effect::Cancel)
        ));
        ed.update(Msg::Finished(Report {
            algorithm: Algorithm::BreadthFirst,
            result: Ok(Outcome::Cancelled),
            visited: 2,
            path_len: None,
        }));
        assert!(!ed.is_running());
        assert!(matches!(
            ed.update(Msg::Input(Input::Key(Key::Escape))),
            Some(Effect::End)
        ));
        assert!(matches!(key(&mut ed, 'q'), Some(Effect::End)));
    }

    #[test]
    fn search_events_are_mirrored_while_running() {
        let mut ed = editor();
        let p = Point::new(1, 0);
        ed.update(Msg::Visit(p));
        assert_eq!(ed.board().mark(p), Some(Mark::Clear));

        ed.update(Msg::Input(Input::Key(Key::Enter)));
        ed.update(Msg::Visit(p));
        assert_eq!(ed.board().mark(p), Some(Mark::Visited));
        assert_eq!(ed.board().visited_count(), 1);
        ed.update(Msg::PathStep(p));
        assert_eq!(ed.board().mark(p), Some(Mark::Path));
        ed.update(Msg::Reset);
        assert_eq!(ed.board().mark(p), Some(Mark::Clear));
    }

    #[test]
    fn tab_cycles_and_d_toggles() {
        let mut ed = editor();
        ed.update(Msg::Input(Input::Key(Key::Tab)));
        assert_eq!(ed.algorithm(), Algorithm::IterativeDeepening);
        key(&mut ed, 'd');
        assert!(ed.board().diagonals());
    }

    #[test]
    fn draw_shows_board_status_and_log() {
        let mut ed = editor();
        click(&mut ed, 2, 1);
        ed.update(Msg::Log(Level::Warn, "careful".into()));
        let (w, h) = ed.size();
        assert_eq!((w, h), (MIN_WIDTH, 3 + 1 + LOG_LINES));

        let mut canvas = Canvas::new(w, h);
        ed.draw(&mut canvas);
        assert_eq!(canvas.at(Point::new(0, 0)).ch, 'S');
        assert_eq!(canvas.at(Point::new(0, 0)).bg, START);
        assert_eq!(canvas.at(Point::new(4, 2)).ch, 'G');
        assert_eq!(canvas.at(Point::new(2, 1)).bg, OBSTACLE);
        assert_eq!(canvas.at(Point::new(1, 3)).ch, 'O');
        let log_line: String = (0..7).map(|x| canvas.at(Point::new(x, 4)).ch).collect();
        assert_eq!(log_line, "Careful");
        assert_eq!(canvas.at(Point::new(0, 4)).fg, START);
    }
}
