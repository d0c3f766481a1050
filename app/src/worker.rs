//! Background search runs for the interactive editor.
//!
//! A run owns a clone of the editor's board. Its observer forwards every
//! event as a [`Msg`] and sleeps after each visit so the exploration can be
//! watched.

use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use gridsearch_core::{Context, Point};
use gridsearch_paths::{Algorithm, Board, Observer};

use crate::model::{Msg, Report};

pub struct ChannelObserver {
    tx: Sender<Msg>,
    interval: Duration,
}

impl ChannelObserver {
    pub fn new(tx: Sender<Msg>, interval: Duration) -> Self {
        Self { tx, interval }
    }
}

impl Observer for ChannelObserver {
    fn on_visit(&mut self, p: Point) {
        let _ = self.tx.send(Msg::Visit(p));
        if !self.interval.is_zero() {
            thread::sleep(self.interval);
        }
    }

    fn on_path_step(&mut self, p: Point) {
        let _ = self.tx.send(Msg::PathStep(p));
    }

    fn on_reset(&mut self) {
        let _ = self.tx.send(Msg::Reset);
    }
}

/// Run `algorithm` on `board`, streaming events to `tx` and finishing with
/// [`Msg::Finished`]. Returns the same report.
pub fn search(
    board: Board,
    algorithm: Algorithm,
    interval: Duration,
    ctx: &Context,
    tx: &Sender<Msg>,
) -> Report {
    let mut board = board.with_observer(ChannelObserver::new(tx.clone(), interval));
    let result = algorithm.run_with(&mut board, ctx);
    let report = Report {
        algorithm,
        result,
        visited: board.visited_count(),
        path_len: board.path().map(|p| p.len() - 1),
    };
    let _ = tx.send(Msg::Finished(report.clone()));
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsearch_paths::Outcome;
    use std::sync::mpsc;

    #[test]
    fn events_arrive_in_order_and_finish_last() {
        let (tx, rx) = mpsc::channel();
        let board = Board::parse("S..\n.#.\n..G").unwrap();
        let report = search(board, Algorithm::BreadthFirst, Duration::ZERO, &Context::new(), &tx);

        assert_eq!(report.result, Ok(Outcome::Found(Point::new(2, 2))));
        assert_eq!(report.path_len, Some(4));

        let msgs: Vec<Msg> = rx.try_iter().collect();
        assert_eq!(msgs.first(), Some(&Msg::Reset));
        assert_eq!(msgs.last(), Some(&Msg::Finished(report.clone())));
        let visits = msgs.iter().filter(|m| matches!(m, Msg::Visit(_))).count();
        assert_eq!(visits, report.visited);
        let steps: Vec<Point> = msgs
            .iter()
            .filter_map(|m| match m {
                Msg::PathStep(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0], Point::new(2, 2));
    }

    #[test]
    fn cancelled_run_reports_cancelled() {
        let (tx, rx) = mpsc::channel();
        let ctx = Context::new();
        ctx.cancel();
        let board = Board::new(8, 8).unwrap();
        let report = search(board, Algorithm::AStar, Duration::ZERO, &ctx, &tx);
        assert_eq!(report.result, Ok(Outcome::Cancelled));
        assert_eq!(report.path_len, None);
        assert!(rx.try_iter().all(|m| !matches!(m, Msg::PathStep(_))));
    }

    #[test]
    fn runs_on_another_thread() {
        let (tx, rx) = mpsc::channel();
        let board = Board::new(6, 4).unwrap().with_diagonals(true);
        let ctx = Context::new();
        let handle = thread::spawn(move || {
            search(board, Algorithm::IterativeDeepening, Duration::from_micros(10), &ctx, &tx)
        });
        let report = handle.join().unwrap();
        assert_eq!(report.path_len, Some(5));
        assert!(rx.iter().any(|m| matches!(m, Msg::Finished(_))));
    }
}
